//! Core types for figma-svg-dl
//!
//! Wire types for the remote document and image-render endpoints, the maps passed
//! between pipeline stages, and the progress events reported to callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Node identifier → export name, built by the tree scanner
pub type ExportCandidates = HashMap<String, String>;

/// Export name → render URL, built by the render requester
pub type RenderResults = HashMap<String, String>;

/// Kind of a document node
///
/// Only `COMPONENT` is exportable; every other kind is kept verbatim so unknown
/// node types never break deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Reusable component, the exportable kind
    Component,
    /// Any other node type (`DOCUMENT`, `CANVAS`, `FRAME`, `GROUP`, `COMPONENT_SET`, ...)
    Other(String),
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        if s == "COMPONENT" {
            NodeKind::Component
        } else {
            NodeKind::Other(s)
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Component => "COMPONENT".to_string(),
            NodeKind::Other(s) => s,
        }
    }
}

/// Export format declared on a node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportFormat {
    /// Vector export
    Svg,
    /// Any raster or document format (`PNG`, `JPG`, `PDF`, ...)
    Other(String),
}

impl From<String> for ExportFormat {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("SVG") {
            ExportFormat::Svg
        } else {
            ExportFormat::Other(s)
        }
    }
}

impl From<ExportFormat> for String {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Svg => "SVG".to_string(),
            ExportFormat::Other(s) => s,
        }
    }
}

/// Per-format export declaration on a node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSetting {
    /// Declared format
    pub format: ExportFormat,
    /// File-name suffix configured in the editor
    #[serde(default)]
    pub suffix: String,
}

/// A node in the remote document tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    /// Identifier, unique within the document (e.g. `"1:23"`)
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Node type
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Visibility flag; absent means visible
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Export declarations
    #[serde(default)]
    pub export_settings: Vec<ExportSetting>,
    /// Children (container kinds only)
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

fn default_visible() -> bool {
    true
}

impl DocumentNode {
    /// Whether the node declares an SVG export
    pub fn exports_svg(&self) -> bool {
        self.export_settings
            .iter()
            .any(|s| s.format == ExportFormat::Svg)
    }
}

/// Response of the document fetch endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct FileResponse {
    /// Name of the design file
    #[serde(default)]
    pub name: String,
    /// Root document node; its children are the pages
    pub document: DocumentNode,
}

/// Response of the image-render endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ImagesResponse {
    /// Error reported by the service, if any
    #[serde(default)]
    pub err: Option<String>,
    /// Node identifier → render URL (null when rendering failed)
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Progress notification emitted by the download/optimize orchestrator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A file finished downloading and was written to disk
    Downloaded {
        /// Path of the written file
        path: PathBuf,
        /// Files written so far
        completed: usize,
        /// Files in this run
        total: usize,
    },
    /// A file was optimized in place
    Optimized {
        /// Path of the optimized file
        path: PathBuf,
        /// Files optimized so far
        completed: usize,
        /// Files in this run
        total: usize,
    },
}

/// Progress callback accepted by the orchestrator
pub type ProgressFn = dyn Fn(&Event) + Send + Sync;

/// Outcome of a complete export run
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct ExportSummary {
    /// Exportable components found in the document
    pub components: usize,
    /// Files written, in render-result order
    pub written: Vec<PathBuf>,
    /// Whether the optimize phase ran
    pub optimized: bool,
}

impl ExportSummary {
    /// True when the document had no exportable components
    pub fn is_empty(&self) -> bool {
        self.components == 0
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_defaults_to_visible_without_children() {
        let node: DocumentNode = serde_json::from_value(serde_json::json!({
            "id": "1:1",
            "name": "icon-home",
            "type": "COMPONENT",
            "exportSettings": [{ "format": "SVG", "suffix": "" }]
        }))
        .unwrap();

        assert!(node.visible);
        assert!(node.children.is_empty());
        assert_eq!(node.kind, NodeKind::Component);
        assert!(node.exports_svg());
    }

    #[test]
    fn unknown_node_kinds_and_formats_are_preserved() {
        let node: DocumentNode = serde_json::from_value(serde_json::json!({
            "id": "0:1",
            "name": "Page 1",
            "type": "CANVAS",
            "visible": false,
            "exportSettings": [{ "format": "PNG" }]
        }))
        .unwrap();

        assert_eq!(node.kind, NodeKind::Other("CANVAS".into()));
        assert!(!node.visible);
        assert!(!node.exports_svg());
        assert_eq!(
            node.export_settings[0].format,
            ExportFormat::Other("PNG".into())
        );
    }

    #[test]
    fn images_response_accepts_null_urls_and_missing_err() {
        let resp: ImagesResponse = serde_json::from_value(serde_json::json!({
            "images": { "1:1": "https://cdn/a.svg", "1:2": null }
        }))
        .unwrap();

        assert!(resp.err.is_none());
        assert_eq!(resp.images["1:1"].as_deref(), Some("https://cdn/a.svg"));
        assert_eq!(resp.images["1:2"], None);
    }
}
