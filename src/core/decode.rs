//! Purpose: Decode wire JSON into the typed node tree, one pass at a time.
//! Exports: `decode_document`, `decode_content`.
//! Role: Discriminator-driven dispatch plus the synchronous link-resolution drain.
//! Invariants: Output order equals input order; any failure aborts the whole pass.
//! Invariants: The pending link list is drained before the public entrypoints return.

use crate::core::error::{Error, ErrorKind};
use crate::core::kind::NodeKind;
use crate::core::link::{LinkCell, Resolver, WireLink};
use crate::core::node::{
    Container, Heading, Hyperlink, Mark, Node, ResourceLink, ResourceLinkData, Text,
};
use serde_json::{Map, Value};

/// Decodes a whole document. The root must carry the `document` tag; a
/// `document` anywhere below the root is malformed input.
pub fn decode_document(value: &Value, resolver: Option<&dyn Resolver>) -> Result<Node, Error> {
    let mut pass = DecodePass::new();
    let object = require_object(value)?;
    let tag = tag_of(object)?;
    let kind = NodeKind::from_tag(tag).ok_or_else(|| unknown_kind(tag))?;
    if kind != NodeKind::Document {
        return Err(Error::new(ErrorKind::Malformed)
            .with_message("top-level node must be a document")
            .with_node_type(tag));
    }
    let container = pass.container_of(object)?;
    pass.drain(resolver);
    Ok(Node::Document(container))
}

/// Decodes one content array into an ordered node sequence. An empty array is
/// a valid, empty sequence.
pub fn decode_content(value: &Value, resolver: Option<&dyn Resolver>) -> Result<Vec<Node>, Error> {
    let mut pass = DecodePass::new();
    let nodes = pass.decode_array(value)?;
    pass.drain(resolver);
    Ok(nodes)
}

/// Per-call decode state: the cells registered for deferred resolution. Local
/// to one pass; nothing survives the public entrypoints.
struct DecodePass {
    pending: Vec<LinkCell>,
}

impl DecodePass {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    fn decode_array(&mut self, value: &Value) -> Result<Vec<Node>, Error> {
        let items = value.as_array().ok_or_else(|| {
            Error::new(ErrorKind::Malformed).with_message("content must be a JSON array")
        })?;
        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let node = self.decode_node(item).map_err(|err| {
                if err.index().is_none() {
                    err.with_index(index)
                } else {
                    err
                }
            })?;
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn decode_node(&mut self, value: &Value) -> Result<Node, Error> {
        let object = require_object(value)?;
        let tag = tag_of(object)?;
        let kind = NodeKind::from_tag(tag).ok_or_else(|| unknown_kind(tag))?;
        self.decode_shape(kind, object).map_err(|err| {
            if err.node_type().is_none() {
                err.with_node_type(tag)
            } else {
                err
            }
        })
    }

    fn decode_shape(&mut self, kind: NodeKind, object: &Map<String, Value>) -> Result<Node, Error> {
        match kind {
            NodeKind::Document => Err(Error::new(ErrorKind::Malformed)
                .with_message("document nodes may only appear at the tree root")),
            NodeKind::Paragraph => Ok(Node::Paragraph(self.container_of(object)?)),
            NodeKind::Blockquote => Ok(Node::Blockquote(self.container_of(object)?)),
            NodeKind::HorizontalRule => Ok(Node::HorizontalRule(self.container_of(object)?)),
            NodeKind::OrderedList => Ok(Node::OrderedList(self.container_of(object)?)),
            NodeKind::UnorderedList => Ok(Node::UnorderedList(self.container_of(object)?)),
            NodeKind::ListItem => Ok(Node::ListItem(self.container_of(object)?)),
            NodeKind::Heading1
            | NodeKind::Heading2
            | NodeKind::Heading3
            | NodeKind::Heading4
            | NodeKind::Heading5
            | NodeKind::Heading6 => {
                let container = self.container_of(object)?;
                Ok(Node::Heading(Heading::new(kind, container)?))
            }
            NodeKind::Hyperlink => self.decode_hyperlink(object),
            NodeKind::EmbeddedEntryBlock | NodeKind::EmbeddedAssetBlock => {
                let data = self.resource_data(object)?;
                let container = self.container_of(object)?;
                Ok(Node::ResourceBlock(ResourceLink::block(
                    kind, data, container,
                )?))
            }
            NodeKind::EmbeddedEntryInline | NodeKind::EntryHyperlink | NodeKind::AssetHyperlink => {
                let data = self.resource_data(object)?;
                let container = self.container_of(object)?;
                Ok(Node::ResourceInline(ResourceLink::inline(
                    kind, data, container,
                )?))
            }
            NodeKind::Text => decode_text(object),
        }
    }

    fn container_of(&mut self, object: &Map<String, Value>) -> Result<Container, Error> {
        match object.get("content") {
            None => Ok(Container::default()),
            Some(value @ Value::Array(_)) => Ok(Container::new(self.decode_array(value)?)),
            Some(_) => Err(Error::new(ErrorKind::Shape)
                .with_message("content must be an array")
                .with_field("content")),
        }
    }

    fn decode_hyperlink(&mut self, object: &Map<String, Value>) -> Result<Node, Error> {
        let data = data_object(object)?;
        let uri = match data.get("uri") {
            Some(Value::String(uri)) => uri.clone(),
            Some(_) => {
                return Err(Error::new(ErrorKind::Shape)
                    .with_message("uri must be a string")
                    .with_field("data.uri"));
            }
            None => {
                return Err(Error::new(ErrorKind::Shape)
                    .with_message("hyperlink is missing data.uri")
                    .with_field("data.uri"));
            }
        };
        let title = optional_title(data)?;
        let container = self.container_of(object)?;
        Ok(Node::Hyperlink(Hyperlink {
            uri,
            title,
            container,
        }))
    }

    fn resource_data(&mut self, object: &Map<String, Value>) -> Result<ResourceLinkData, Error> {
        let data = data_object(object)?;
        let target = data.get("target").ok_or_else(|| {
            Error::new(ErrorKind::Shape)
                .with_message("resource link is missing data.target")
                .with_field("data.target")
        })?;
        let title = optional_title(data)?;
        let target = self.decode_target(target)?;
        Ok(ResourceLinkData { target, title })
    }

    /// An unresolved reference travels as `{"sys": {"type": "Link", ...}}`.
    /// Anything else under `target` is an already-hydrated entity: the cell
    /// starts frozen and is never registered, so the resolver is not asked
    /// about it (at-most-once holds across encode/decode cycles).
    fn decode_target(&mut self, target: &Value) -> Result<LinkCell, Error> {
        if !target.is_object() {
            return Err(Error::new(ErrorKind::Shape)
                .with_message("link target must be an object")
                .with_field("data.target"));
        }
        let sys_type = target
            .get("sys")
            .and_then(|sys| sys.get("type"))
            .and_then(Value::as_str);
        if sys_type != Some("Link") {
            return Ok(LinkCell::resolved(target.clone()));
        }
        let wire: WireLink = serde_json::from_value(target.clone()).map_err(|err| {
            Error::new(ErrorKind::Shape)
                .with_message("link target has a malformed sys envelope")
                .with_field("data.target.sys")
                .with_source(err)
        })?;
        debug_assert_eq!(wire.sys.sys_type, "Link");
        let cell = LinkCell::unresolved(wire.sys.link_type, wire.sys.id);
        self.pending.push(cell.clone());
        Ok(cell)
    }

    /// Synchronous resolution drain, registration order. Resolver misses (and
    /// the no-resolver case) leave cells unresolved; that is a valid terminal
    /// state, never an error.
    fn drain(&mut self, resolver: Option<&dyn Resolver>) {
        let cells = std::mem::take(&mut self.pending);
        let Some(resolver) = resolver else {
            return;
        };
        for cell in cells {
            let Some((link_type, id)) = cell.pending_key() else {
                continue;
            };
            if let Some(entity) = resolver.resolve(&link_type, &id) {
                cell.fill(entity);
            }
        }
    }
}

fn decode_text(object: &Map<String, Value>) -> Result<Node, Error> {
    let value = match object.get("value") {
        Some(Value::String(value)) => value.clone(),
        Some(_) => {
            return Err(Error::new(ErrorKind::Shape)
                .with_message("value must be a string")
                .with_field("value"));
        }
        None => {
            return Err(Error::new(ErrorKind::Shape)
                .with_message("text node is missing its value")
                .with_field("value"));
        }
    };
    let marks = match object.get("marks") {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            let mut marks = Vec::with_capacity(items.len());
            for item in items {
                let name = item.get("type").and_then(Value::as_str).ok_or_else(|| {
                    Error::new(ErrorKind::Shape)
                        .with_message("mark is missing its type")
                        .with_field("marks")
                })?;
                let mark = Mark::from_name(name).ok_or_else(|| {
                    Error::new(ErrorKind::Shape)
                        .with_message(format!("unknown mark type `{name}`"))
                        .with_field("marks")
                })?;
                marks.push(mark);
            }
            marks
        }
        Some(_) => {
            return Err(Error::new(ErrorKind::Shape)
                .with_message("marks must be an array")
                .with_field("marks"));
        }
    };
    Ok(Node::Text(Text { value, marks }))
}

fn require_object(value: &Value) -> Result<&Map<String, Value>, Error> {
    value.as_object().ok_or_else(|| {
        Error::new(ErrorKind::Malformed).with_message("node must be a JSON object")
    })
}

fn tag_of(object: &Map<String, Value>) -> Result<&str, Error> {
    match object.get("nodeType") {
        Some(Value::String(tag)) => Ok(tag.as_str()),
        Some(_) => Err(Error::new(ErrorKind::Malformed).with_message("nodeType must be a string")),
        None => Err(Error::new(ErrorKind::Malformed)
            .with_message("node is missing its nodeType discriminator")),
    }
}

fn unknown_kind(tag: &str) -> Error {
    Error::new(ErrorKind::UnknownKind)
        .with_message("nodeType is not in the registry")
        .with_node_type(tag)
}

fn data_object(object: &Map<String, Value>) -> Result<&Map<String, Value>, Error> {
    match object.get("data") {
        Some(Value::Object(data)) => Ok(data),
        Some(_) => Err(Error::new(ErrorKind::Shape)
            .with_message("data must be an object")
            .with_field("data")),
        None => Err(Error::new(ErrorKind::Shape)
            .with_message("node is missing its data object")
            .with_field("data")),
    }
}

fn optional_title(data: &Map<String, Value>) -> Result<Option<String>, Error> {
    match data.get("title") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(title)) => Ok(Some(title.clone())),
        Some(_) => Err(Error::new(ErrorKind::Shape)
            .with_message("title must be a string")
            .with_field("data.title")),
    }
}
