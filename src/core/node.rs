//! Purpose: Define the typed node shapes of the structured-text tree.
//! Exports: `Node`, `Container`, `Heading`, `Hyperlink`, `ResourceLink`, `ResourceLinkData`, `Text`, `Mark`.
//! Role: Closed tagged union; dispatch is by `kind` tag, never reflection.
//! Invariants: Tag-derived values (heading level, resource family) are fixed at construction.
//! Invariants: Child order is document order and is never reordered.

use crate::core::error::{Error, ErrorKind};
use crate::core::kind::NodeKind;
use crate::core::link::LinkCell;

/// Shared container fields, embedded by value in every container-shaped
/// variant. Children keep wire order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Container {
    pub children: Vec<Node>,
}

impl Container {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// Heading node. Stores the specific heading tag so tag and level can never
/// disagree; `new` rejects anything outside `heading-1`..`heading-6`.
#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    kind: NodeKind,
    pub container: Container,
}

impl Heading {
    pub fn new(kind: NodeKind, container: Container) -> Result<Self, Error> {
        if kind.heading_level().is_none() {
            return Err(Error::new(ErrorKind::Invariant)
                .with_message("heading constructed from a non-heading kind")
                .with_node_type(kind.as_tag()));
        }
        Ok(Self { kind, container })
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn level(&self) -> u8 {
        self.kind
            .heading_level()
            .expect("constructor admits heading kinds only")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hyperlink {
    pub uri: String,
    pub title: Option<String>,
    pub container: Container,
}

/// Reference payload of a resource-link node. The target cell is shared with
/// the decode pass that built it, which is how a later resolution lands here.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLinkData {
    pub target: LinkCell,
    pub title: Option<String>,
}

/// Resource-link node, block or inline position. Stores its specific tag;
/// the family-checked constructors keep tag and position consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLink {
    kind: NodeKind,
    pub data: ResourceLinkData,
    pub container: Container,
}

impl ResourceLink {
    pub fn block(kind: NodeKind, data: ResourceLinkData, container: Container) -> Result<Self, Error> {
        if !kind.is_block_resource() {
            return Err(Error::new(ErrorKind::Invariant)
                .with_message("block resource link constructed from a non-block kind")
                .with_node_type(kind.as_tag()));
        }
        Ok(Self {
            kind,
            data,
            container,
        })
    }

    pub fn inline(kind: NodeKind, data: ResourceLinkData, container: Container) -> Result<Self, Error> {
        if !kind.is_inline_resource() {
            return Err(Error::new(ErrorKind::Invariant)
                .with_message("inline resource link constructed from a non-inline kind")
                .with_node_type(kind.as_tag()));
        }
        Ok(Self {
            kind,
            data,
            container,
        })
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Mark::Bold),
            "italic" => Some(Mark::Italic),
            "underline" => Some(Mark::Underline),
            "code" => Some(Mark::Code),
            _ => None,
        }
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }
}

/// Leaf text run. Marks keep wire order, duplicates included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub value: String,
    pub marks: Vec<Mark>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Container),
    Paragraph(Container),
    Heading(Heading),
    Blockquote(Container),
    HorizontalRule(Container),
    OrderedList(Container),
    UnorderedList(Container),
    ListItem(Container),
    Hyperlink(Hyperlink),
    ResourceBlock(ResourceLink),
    ResourceInline(ResourceLink),
    Text(Text),
}

impl Node {
    /// The wire tag this node serializes under. Total.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(heading) => heading.kind(),
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::HorizontalRule(_) => NodeKind::HorizontalRule,
            Node::OrderedList(_) => NodeKind::OrderedList,
            Node::UnorderedList(_) => NodeKind::UnorderedList,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Hyperlink(_) => NodeKind::Hyperlink,
            Node::ResourceBlock(resource) | Node::ResourceInline(resource) => resource.kind(),
            Node::Text(_) => NodeKind::Text,
        }
    }

    /// Children in document order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(container)
            | Node::Paragraph(container)
            | Node::Blockquote(container)
            | Node::HorizontalRule(container)
            | Node::OrderedList(container)
            | Node::UnorderedList(container)
            | Node::ListItem(container) => &container.children,
            Node::Heading(heading) => &heading.container.children,
            Node::Hyperlink(link) => &link.container.children,
            Node::ResourceBlock(resource) | Node::ResourceInline(resource) => {
                &resource.container.children
            }
            Node::Text(_) => &[],
        }
    }
}
