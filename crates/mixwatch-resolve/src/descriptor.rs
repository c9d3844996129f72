use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mixwatch_protocol::NodeRole;

/// Presentational class attached to resolved identities and table cells.
/// These are the CSS class names of the original dashboard, mapped to
/// terminal colors by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleClass {
    Mixer,
    Gatekeeper,
    Client,
}

impl From<NodeRole> for StyleClass {
    fn from(role: NodeRole) -> Self {
        match role {
            NodeRole::Mixer => Self::Mixer,
            NodeRole::Gatekeeper => Self::Gatekeeper,
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mixer => "mixer",
            Self::Gatekeeper => "gatekeeper",
            Self::Client => "client",
        };
        write!(f, "{s}")
    }
}

/// Which snapshot mapping an identity was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Node,
    Client,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Node => "Node",
            Self::Client => "Client",
        };
        write!(f, "{s}")
    }
}

/// Human-readable rendering of a resolved identity.
///
/// Derived deterministically from a snapshot entry and immutable once
/// built; cached descriptors are shared via `Arc`, so repeated lookups of
/// the same identifier hand back the identical instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayDescriptor {
    pub id: i64,
    pub kind: EntityKind,
    /// Full label, e.g. `Node3 (mixer)` or `Client5`.
    pub name: String,
    pub class: StyleClass,
    /// Compact label with a space, e.g. `Node 3`.
    pub short: String,
}

impl DisplayDescriptor {
    pub fn for_node(id: i64, role: NodeRole) -> Self {
        Self {
            id,
            kind: EntityKind::Node,
            name: format!("Node{id} ({role})"),
            class: role.into(),
            short: format!("Node {id}"),
        }
    }

    pub fn for_client(id: i64) -> Self {
        Self {
            id,
            kind: EntityKind::Client,
            name: format!("Client{id}"),
            class: StyleClass::Client,
            short: format!("Client {id}"),
        }
    }
}

/// Outcome of an identity lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The identifier was empty after normalization. Never cached.
    Blank,
    /// Matched a node or client entry (freshly scanned or cache hit).
    Resolved(Arc<DisplayDescriptor>),
    /// No entry matched. Never cached, so a later snapshot that contains
    /// the missing entry can still resolve it.
    Unknown,
}

impl Resolution {
    pub fn descriptor(&self) -> Option<&Arc<DisplayDescriptor>> {
        match self {
            Self::Resolved(d) => Some(d),
            _ => None,
        }
    }
}
