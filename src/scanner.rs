//! Document tree scanning
//!
//! Walks the node tree returned by the document fetch and collects every
//! exportable vector component. A node is exportable when it is a `COMPONENT`,
//! is not hidden, and declares at least one SVG export setting. The subtree of an
//! exportable node is not scanned further.

use crate::types::{DocumentNode, ExportCandidates, NodeKind};

/// Collect node id → export name for every exportable component under `nodes`.
///
/// Depth-first; on duplicate identifiers the last node visited wins. An empty
/// slice yields an empty map.
pub fn scan(nodes: &[DocumentNode]) -> ExportCandidates {
    let mut found = ExportCandidates::new();
    for node in nodes {
        scan_node(node, &mut found);
    }
    found
}

fn scan_node(node: &DocumentNode, found: &mut ExportCandidates) {
    if is_exportable(node) {
        found.insert(node.id.clone(), node.name.clone());
        return;
    }
    for child in &node.children {
        scan_node(child, found);
    }
}

/// Whether a node is an exportable vector component
pub fn is_exportable(node: &DocumentNode) -> bool {
    node.kind == NodeKind::Component && node.visible && node.exports_svg()
}
