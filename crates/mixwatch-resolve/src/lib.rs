//! Identity resolution for the mixwatch console.
//!
//! Raw endpoint addresses embedded in rendered status tables are mapped to
//! human-readable descriptors ("Node3 (mixer)", "Client5") by scanning the
//! current snapshot, and memoized for the lifetime of the console session.

pub mod cache;
pub mod descriptor;
pub mod path;
pub mod resolver;

pub use cache::IdentityCache;
pub use descriptor::{DisplayDescriptor, EntityKind, Resolution, StyleClass};
pub use path::{format_routing_path, routing_path_text, PathSegment};
pub use resolver::IdentityResolver;
