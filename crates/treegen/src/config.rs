//! Generator configuration.

use std::path::PathBuf;

use crate::codegen::DEFAULT_WRAP_WIDTH;
use crate::metadata::DEFAULT_API_DUMP_URL;

/// Configuration for a [`crate::Generator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API dump location: an http(s) URL or a local file path.
    pub api_dump: String,

    /// JSON table of default property values per class. Without one, any
    /// creatable class defaults to a bare instance.
    pub defaults: Option<PathBuf>,

    /// Attribute length above which markup attributes go one per line.
    pub markup_wrap_width: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_dump: DEFAULT_API_DUMP_URL.to_string(),
            defaults: None,
            markup_wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}
