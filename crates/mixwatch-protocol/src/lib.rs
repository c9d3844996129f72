//! Mixwatch protocol - status snapshot wire types.
//!
//! Mirrors the JSON document served by the bulletin board's `/data`
//! endpoint: two mappings from raw endpoint address to per-entity status,
//! one for relay nodes and one for clients.

pub mod snapshot;

pub use snapshot::*;
