use std::collections::BTreeMap;

use mixwatch_protocol::Snapshot;

use crate::cache::IdentityCache;
use crate::descriptor::{DisplayDescriptor, Resolution};

/// Resolves raw endpoint identifiers against the current snapshot,
/// memoizing every successful lookup in an owned [`IdentityCache`].
#[derive(Debug, Default)]
pub struct IdentityResolver {
    cache: IdentityCache,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Resolve a raw identifier to a display descriptor.
    ///
    /// The identifier is trimmed and lower-cased, then looked up in the
    /// cache; on a miss the snapshot's nodes are scanned before its
    /// clients. Matches are cached under the normalized identifier; blank
    /// input and failed lookups are not.
    pub fn resolve(&mut self, snapshot: &Snapshot, raw: &str) -> Resolution {
        let ident = normalize(raw);
        if let Some(hit) = self.cache.get(&ident) {
            return Resolution::Resolved(hit);
        }
        if ident.is_empty() {
            return Resolution::Blank;
        }

        if let Some(status) = best_match(&ident, &snapshot.nodes) {
            let descriptor = DisplayDescriptor::for_node(status.node.id, status.node.role());
            tracing::debug!(ident = %ident, name = %descriptor.name, "resolved node identity");
            return Resolution::Resolved(self.cache.insert(ident, descriptor));
        }

        if let Some(status) = best_match(&ident, &snapshot.clients) {
            let descriptor = DisplayDescriptor::for_client(status.client.id);
            tracing::debug!(ident = %ident, name = %descriptor.name, "resolved client identity");
            return Resolution::Resolved(self.cache.insert(ident, descriptor));
        }

        Resolution::Unknown
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Pick the entry whose key best matches the normalized identifier.
///
/// Policy, in priority order:
/// 1. exact match on the normalized key;
/// 2. keys embedded in the identifier (`ident.contains(key)`), longest
///    key first — a full URL contains the bare host key it was derived
///    from, and the longest fragment is the most specific;
/// 3. keys containing the identifier (`key.contains(ident)`), shortest
///    key first — the tightest superset of a bare fragment;
/// 4. lexicographic key order breaks remaining ties (the map is sorted,
///    so the scan itself is deterministic).
fn best_match<'a, T>(ident: &str, entries: &'a BTreeMap<String, T>) -> Option<&'a T> {
    let mut best: Option<(MatchRank, &'a T)> = None;
    for (key, value) in entries {
        let key = normalize(key);
        if key == ident {
            return Some(value);
        }
        let rank = if ident.contains(&key) {
            MatchRank::Embedded(usize::MAX - key.len())
        } else if key.contains(ident) {
            MatchRank::Superset(key.len())
        } else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((current, _)) => rank < *current,
        };
        if better {
            best = Some((rank, value));
        }
    }
    best.map(|(_, value)| value)
}

/// Ordering key for substring candidates; smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    /// Key is a substring of the identifier; payload is inverted key
    /// length so longer keys order first.
    Embedded(usize),
    /// Identifier is a substring of the key; payload is key length so
    /// shorter keys order first.
    Superset(usize),
}
