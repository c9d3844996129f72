use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::DisplayDescriptor;

/// Session-lifetime identity cache, keyed by the normalized raw identifier.
///
/// Append-only: entries are never evicted or replaced, so a descriptor
/// stays authoritative for the whole console session even if the entity's
/// ID were to change in a later snapshot (accepted staleness tradeoff).
#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: HashMap<String, Arc<DisplayDescriptor>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ident: &str) -> Option<Arc<DisplayDescriptor>> {
        self.entries.get(ident).cloned()
    }

    /// Store a descriptor under a normalized identifier, returning the
    /// shared handle. An already-present entry wins, keeping the first
    /// resolution authoritative.
    pub fn insert(&mut self, ident: String, descriptor: DisplayDescriptor) -> Arc<DisplayDescriptor> {
        self.entries
            .entry(ident)
            .or_insert_with(|| Arc::new(descriptor))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
