//! Document tree fixtures and sample SVG content

use serde_json::{Value, json};

/// Rendered SVG as the CDN serves it
pub const SAMPLE_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: design tool -->
<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
  <title>icon</title>
  <path d="M12.0000 2L2 12h3v8h6v-6h2v6h6v-8h3z"/>
</svg>
"#;

/// Visible component with an SVG export setting
pub fn component(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "COMPONENT",
        "exportSettings": [{ "format": "SVG", "suffix": "" }]
    })
}

/// Component that is hidden in the editor
pub fn hidden_component(id: &str, name: &str) -> Value {
    let mut node = component(id, name);
    node["visible"] = json!(false);
    node
}

/// Component that only exports a raster format
pub fn png_component(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "COMPONENT",
        "exportSettings": [{ "format": "PNG", "suffix": "@2x" }]
    })
}

/// Container node (`FRAME`, `GROUP`, `CANVAS`, ...)
pub fn container(kind: &str, id: &str, name: &str, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": kind,
        "children": children
    })
}

/// Document fetch response wrapping the given pages
pub fn file_response(pages: Vec<Value>) -> Value {
    json!({
        "name": "Icon Library",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": pages
        }
    })
}

/// One page holding the given nodes
pub fn single_page(nodes: Vec<Value>) -> Value {
    file_response(vec![container("CANVAS", "0:1", "Icons", nodes)])
}
