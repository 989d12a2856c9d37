//! Headers for well-known top-level services.

/// Interface headers for roots whose declared type already exists.
const ROOT_INTERFACES: &[(&str, &str)] = &[
    ("Workspace", "interface Workspace extends Model"),
    ("Terrain", "interface Terrain extends BasePart"),
    ("StarterGui", "interface StarterGui extends BasePlayerGui"),
    ("StarterCharacterScripts", "interface StarterCharacterScripts extends StarterPlayerScripts"),
    ("ReplicatedFirst", "interface ReplicatedFirst extends Instance"),
    ("Lighting", "interface Lighting extends Instance"),
    ("ReplicatedStorage", "interface ReplicatedStorage extends Instance"),
    ("ServerScriptService", "interface ServerScriptService extends Instance"),
    ("ServerStorage", "interface ServerStorage extends Instance"),
    ("StarterPack", "interface StarterPack extends Instance"),
    ("StarterPlayer", "interface StarterPlayer extends Instance"),
    ("StarterPlayerScripts", "interface StarterPlayerScripts extends Instance"),
    ("SoundService", "interface SoundService extends Instance"),
    ("Chat", "interface Chat extends Instance"),
    ("TestService", "interface TestService extends Instance"),
];

/// Roots whose children may not have replicated yet when scripts run.
pub const LATE_REPLICATING_ROOTS: &[&str] = &["ReplicatedFirst"];

pub fn root_interface(class_name: &str) -> Option<&'static str> {
    ROOT_INTERFACES
        .iter()
        .find(|(class, _)| *class == class_name)
        .map(|(_, header)| *header)
}
