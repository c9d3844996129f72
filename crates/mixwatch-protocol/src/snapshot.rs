use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One polled status document describing every known node and client.
///
/// Both mappings are keyed by the raw endpoint address the bulletin board
/// knows the entity under (usually a full `http://host:port` URL). The
/// snapshot is read-only: it lives for one refresh cycle and is replaced
/// wholesale by the next poll. `BTreeMap` keeps scans over the entries
/// deterministic regardless of the producer's serialization order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "Nodes", default)]
    pub nodes: BTreeMap<String, NodeStatus>,
    #[serde(rename = "Clients", default)]
    pub clients: BTreeMap<String, ClientStatus>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.clients.is_empty()
    }
}

/// Role of a relay node within the mix network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// Shuffles and re-encrypts traffic.
    Mixer,
    /// Guards entry/exit and enforces checkpoints.
    Gatekeeper,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mixer => "mixer",
            Self::Gatekeeper => "gatekeeper",
        };
        write!(f, "{s}")
    }
}

/// Publicly advertised identity of a node or client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicNodeInfo {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "IsMixer", default)]
    pub is_mixer: bool,
}

impl PublicNodeInfo {
    /// Role derived from the `IsMixer` flag.
    pub fn role(&self) -> NodeRole {
        if self.is_mixer {
            NodeRole::Mixer
        } else {
            NodeRole::Gatekeeper
        }
    }
}

/// Per-node status as reported to the bulletin board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStatus {
    #[serde(rename = "Node")]
    pub node: PublicNodeInfo,
    /// Every onion this node has received, in arrival order.
    #[serde(rename = "Received", default)]
    pub received: Vec<OnionRecord>,
    /// Checkpoint onions received, keyed by layer.
    #[serde(rename = "CheckpointOnionsReceived", default)]
    pub checkpoint_onions_received: BTreeMap<u32, u64>,
    /// Checkpoint onions this node expected, keyed by layer.
    #[serde(rename = "ExpectedCheckpoints", default)]
    pub expected_checkpoints: BTreeMap<u32, u64>,
    /// All onions received, keyed by layer.
    #[serde(rename = "TotalOnionsReceived", default)]
    pub total_onions_received: BTreeMap<u32, u64>,
}

impl NodeStatus {
    /// Total onions received across all layers.
    pub fn onions_received(&self) -> u64 {
        self.total_onions_received.values().sum()
    }

    /// Checkpoint onions received vs expected, summed over layers.
    pub fn checkpoint_progress(&self) -> (u64, u64) {
        let got = self.checkpoint_onions_received.values().sum();
        let want = self.expected_checkpoints.values().sum();
        (got, want)
    }

    /// Whether any received onion was dropped by this node.
    pub fn dropped_any(&self) -> bool {
        self.received.iter().any(|o| o.dropped)
    }
}

/// A single onion observed at a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnionRecord {
    #[serde(rename = "LastHop", default)]
    pub last_hop: String,
    #[serde(rename = "ThisAddress", default)]
    pub this_address: String,
    #[serde(rename = "NextHop", default)]
    pub next_hop: String,
    #[serde(rename = "Layer", default)]
    pub layer: u32,
    #[serde(rename = "IsCheckPointOnion", default)]
    pub is_checkpoint_onion: bool,
    #[serde(rename = "TimeReceived", default)]
    pub time_received: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "Bruises", default)]
    pub bruises: u32,
    #[serde(rename = "Dropped", default)]
    pub dropped: bool,
    #[serde(rename = "NonceVerification", default)]
    pub nonce_verification: bool,
    #[serde(rename = "ExpectCheckPoint", default)]
    pub expect_checkpoint: bool,
}

/// Per-client status as reported to the bulletin board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientStatus {
    #[serde(rename = "Client")]
    pub client: PublicNodeInfo,
    #[serde(rename = "MessagesSent", default)]
    pub messages_sent: Vec<SentMessage>,
    #[serde(rename = "MessagesReceived", default)]
    pub messages_received: Vec<ReceivedMessage>,
}

/// A message a client has submitted, with the route it was wrapped for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentMessage {
    #[serde(rename = "ClientReceiver", default)]
    pub client_receiver: PublicNodeInfo,
    /// Relay hops in order; the final entry is the receiving client.
    #[serde(rename = "RoutingPath", default)]
    pub routing_path: Vec<PublicNodeInfo>,
    #[serde(rename = "Message")]
    pub message: Message,
    #[serde(rename = "TimeSent", default)]
    pub time_sent: Option<chrono::DateTime<chrono::Utc>>,
}

/// A message a client has received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedMessage {
    #[serde(rename = "Message")]
    pub message: Message,
    #[serde(rename = "TimeReceived", default)]
    pub time_received: Option<chrono::DateTime<chrono::Utc>>,
}

/// Message payload envelope. `hash` uniquely identifies the message so
/// delivery can be confirmed by matching sent against received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "From", default)]
    pub from: i64,
    #[serde(rename = "To", default)]
    pub to: i64,
    #[serde(rename = "Msg", default)]
    pub msg: String,
    #[serde(rename = "Hash", default)]
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_deserializes_wire_field_names() {
        let doc = r#"{
            "Nodes": {
                "http://10.0.0.1:8080": {
                    "Node": {"ID": 1, "Address": "http://10.0.0.1:8080", "IsMixer": true},
                    "CheckpointOnionsReceived": {"0": 3, "1": 2},
                    "ExpectedCheckpoints": {"0": 4},
                    "TotalOnionsReceived": {"0": 9}
                }
            },
            "Clients": {
                "http://10.0.0.9:8081": {
                    "Client": {"ID": 5, "Address": "http://10.0.0.9:8081"},
                    "MessagesSent": [{
                        "ClientReceiver": {"ID": 6, "Address": "http://10.0.0.10:8081"},
                        "RoutingPath": [
                            {"ID": 1, "Address": "http://10.0.0.1:8080", "IsMixer": true},
                            {"ID": 6, "Address": "http://10.0.0.10:8081"}
                        ],
                        "Message": {"From": 5, "To": 6, "Msg": "hi", "Hash": "abc"}
                    }]
                }
            }
        }"#;

        let snap: Snapshot = serde_json::from_str(doc).expect("valid snapshot");
        let node = &snap.nodes["http://10.0.0.1:8080"];
        assert_eq!(node.node.id, 1);
        assert_eq!(node.node.role(), NodeRole::Mixer);
        assert_eq!(node.onions_received(), 9);
        assert_eq!(node.checkpoint_progress(), (5, 4));

        let client = &snap.clients["http://10.0.0.9:8081"];
        assert_eq!(client.client.id, 5);
        assert_eq!(client.messages_sent.len(), 1);
        assert_eq!(client.messages_sent[0].routing_path.len(), 2);
        assert_eq!(client.messages_sent[0].message.hash, "abc");
    }

    #[test]
    fn missing_optional_sections_default() {
        let snap: Snapshot = serde_json::from_str(r#"{"Nodes": {}, "Clients": {}}"#).unwrap();
        assert!(snap.is_empty());

        let status: NodeStatus = serde_json::from_str(r#"{"Node": {"ID": 2}}"#).unwrap();
        assert_eq!(status.node.id, 2);
        assert_eq!(status.node.role(), NodeRole::Gatekeeper);
        assert_eq!(status.onions_received(), 0);
        assert!(!status.dropped_any());
    }

    #[test]
    fn role_formats_as_css_class_names() {
        assert_eq!(NodeRole::Mixer.to_string(), "mixer");
        assert_eq!(NodeRole::Gatekeeper.to_string(), "gatekeeper");
    }
}
