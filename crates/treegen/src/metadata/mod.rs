//! Class metadata: the decoded API dump and the flattened registry built from it.
//!
//! The registry is the only place the engine learns which members a class
//! has. Everything downstream (child resolution, property selection, the
//! markup child filter) asks it, and a class it doesn't know is treated as
//! undescribable.

mod api_dump;
mod registry;
mod source;

pub use api_dump::{ApiDump, ClassMember, ClassMetadata, MemberType, Security};
pub use registry::MetadataRegistry;
pub use source::{MetadataCache, MetadataSource, DEFAULT_API_DUMP_URL};
