//! Purpose: Re-serialize typed node trees into the wire JSON shape.
//! Exports: `encode_document`, `encode_content`.
//! Role: Tag-directed inverse of the decode pass; recursion mirrors `decode`.
//! Invariants: Output array order equals node order; containers always emit `content`.
//! Invariants: Resolved targets serialize as the entity's own JSON, unresolved as sys links.

use crate::core::link::{Link, LinkCell};
use crate::core::node::{Node, ResourceLinkData};
use serde_json::{Map, Value, json};

/// Encodes an ordered node sequence as a JSON array. Infallible: invalid
/// tag/shape pairings are unrepresentable in the node model.
pub fn encode_content(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(encode_node).collect())
}

/// Encodes a single node (typically the `document` root) as a JSON object.
pub fn encode_document(node: &Node) -> Value {
    encode_node(node)
}

fn encode_node(node: &Node) -> Value {
    let mut object = Map::new();
    object.insert(
        "nodeType".to_string(),
        Value::String(node.kind().as_tag().to_string()),
    );
    match node {
        Node::Document(container)
        | Node::Paragraph(container)
        | Node::Blockquote(container)
        | Node::HorizontalRule(container)
        | Node::OrderedList(container)
        | Node::UnorderedList(container)
        | Node::ListItem(container) => {
            object.insert("content".to_string(), encode_content(&container.children));
        }
        Node::Heading(heading) => {
            object.insert(
                "content".to_string(),
                encode_content(&heading.container.children),
            );
        }
        Node::Hyperlink(link) => {
            let mut data = Map::new();
            data.insert("uri".to_string(), Value::String(link.uri.clone()));
            if let Some(title) = &link.title {
                data.insert("title".to_string(), Value::String(title.clone()));
            }
            object.insert("data".to_string(), Value::Object(data));
            object.insert(
                "content".to_string(),
                encode_content(&link.container.children),
            );
        }
        Node::ResourceBlock(resource) | Node::ResourceInline(resource) => {
            object.insert("data".to_string(), encode_resource_data(&resource.data));
            object.insert(
                "content".to_string(),
                encode_content(&resource.container.children),
            );
        }
        Node::Text(text) => {
            object.insert("value".to_string(), Value::String(text.value.clone()));
            let marks = text
                .marks
                .iter()
                .map(|mark| json!({"type": mark.as_name()}))
                .collect();
            object.insert("marks".to_string(), Value::Array(marks));
        }
    }
    Value::Object(object)
}

fn encode_resource_data(data: &ResourceLinkData) -> Value {
    let mut out = Map::new();
    out.insert("target".to_string(), encode_target(&data.target));
    if let Some(title) = &data.title {
        out.insert("title".to_string(), Value::String(title.clone()));
    }
    Value::Object(out)
}

fn encode_target(cell: &LinkCell) -> Value {
    match cell.snapshot() {
        Link::Unresolved { link_type, id } => json!({
            "sys": {"type": "Link", "linkType": link_type, "id": id}
        }),
        Link::Resolved(entity) => entity,
    }
}
