use mixwatch_protocol::PublicNodeInfo;

use crate::descriptor::StyleClass;

/// One styled hop in a formatted routing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Compact hop label, e.g. `node3` or `client5`.
    pub label: String,
    pub class: StyleClass,
}

/// Format a routing path as styled hop segments.
///
/// Every entry except the last renders as `node{ID}` colored by its role.
/// The last entry is always the receiving client and renders as
/// `client{ID}` with the client class, whatever its own role flag says.
pub fn format_routing_path(path: &[PublicNodeInfo]) -> Vec<PathSegment> {
    path.iter()
        .enumerate()
        .map(|(index, hop)| {
            if index == path.len() - 1 {
                PathSegment {
                    label: format!("client{}", hop.id),
                    class: StyleClass::Client,
                }
            } else {
                PathSegment {
                    label: format!("node{}", hop.id),
                    class: hop.role().into(),
                }
            }
        })
        .collect()
}

/// Plain-text rendering of a formatted path, hops joined by arrows.
pub fn routing_path_text(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(|s| s.label.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}
