//! Purpose: Discriminator registry mapping wire tags to node kinds.
//! Exports: `NodeKind`.
//! Role: Single closed table consulted by decode dispatch and re-derived on encode.
//! Invariants: The table is compile-time complete; a lookup miss means an unsupported schema.
//! Invariants: `from_tag` and `as_tag` are exact inverses over the known set.

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Blockquote,
    HorizontalRule,
    OrderedList,
    UnorderedList,
    ListItem,
    Hyperlink,
    EmbeddedEntryBlock,
    EmbeddedAssetBlock,
    EmbeddedEntryInline,
    EntryHyperlink,
    AssetHyperlink,
    Text,
}

impl NodeKind {
    pub const ALL: [NodeKind; 20] = [
        NodeKind::Document,
        NodeKind::Paragraph,
        NodeKind::Heading1,
        NodeKind::Heading2,
        NodeKind::Heading3,
        NodeKind::Heading4,
        NodeKind::Heading5,
        NodeKind::Heading6,
        NodeKind::Blockquote,
        NodeKind::HorizontalRule,
        NodeKind::OrderedList,
        NodeKind::UnorderedList,
        NodeKind::ListItem,
        NodeKind::Hyperlink,
        NodeKind::EmbeddedEntryBlock,
        NodeKind::EmbeddedAssetBlock,
        NodeKind::EmbeddedEntryInline,
        NodeKind::EntryHyperlink,
        NodeKind::AssetHyperlink,
        NodeKind::Text,
    ];

    /// Registry lookup. `None` means the schema carries a tag this codec does
    /// not support; callers turn that into a hard decode failure.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "document" => Some(NodeKind::Document),
            "paragraph" => Some(NodeKind::Paragraph),
            "heading-1" => Some(NodeKind::Heading1),
            "heading-2" => Some(NodeKind::Heading2),
            "heading-3" => Some(NodeKind::Heading3),
            "heading-4" => Some(NodeKind::Heading4),
            "heading-5" => Some(NodeKind::Heading5),
            "heading-6" => Some(NodeKind::Heading6),
            "blockquote" => Some(NodeKind::Blockquote),
            "hr" => Some(NodeKind::HorizontalRule),
            "ordered-list" => Some(NodeKind::OrderedList),
            "unordered-list" => Some(NodeKind::UnorderedList),
            "list-item" => Some(NodeKind::ListItem),
            "hyperlink" => Some(NodeKind::Hyperlink),
            "embedded-entry-block" => Some(NodeKind::EmbeddedEntryBlock),
            "embedded-asset-block" => Some(NodeKind::EmbeddedAssetBlock),
            "embedded-entry-inline" => Some(NodeKind::EmbeddedEntryInline),
            "entry-hyperlink" => Some(NodeKind::EntryHyperlink),
            "asset-hyperlink" => Some(NodeKind::AssetHyperlink),
            "text" => Some(NodeKind::Text),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading1 => "heading-1",
            NodeKind::Heading2 => "heading-2",
            NodeKind::Heading3 => "heading-3",
            NodeKind::Heading4 => "heading-4",
            NodeKind::Heading5 => "heading-5",
            NodeKind::Heading6 => "heading-6",
            NodeKind::Blockquote => "blockquote",
            NodeKind::HorizontalRule => "hr",
            NodeKind::OrderedList => "ordered-list",
            NodeKind::UnorderedList => "unordered-list",
            NodeKind::ListItem => "list-item",
            NodeKind::Hyperlink => "hyperlink",
            NodeKind::EmbeddedEntryBlock => "embedded-entry-block",
            NodeKind::EmbeddedAssetBlock => "embedded-asset-block",
            NodeKind::EmbeddedEntryInline => "embedded-entry-inline",
            NodeKind::EntryHyperlink => "entry-hyperlink",
            NodeKind::AssetHyperlink => "asset-hyperlink",
            NodeKind::Text => "text",
        }
    }

    /// Total over the six heading tags; the level is encoded in the tag
    /// itself, never in a payload field.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            NodeKind::Heading1 => Some(1),
            NodeKind::Heading2 => Some(2),
            NodeKind::Heading3 => Some(3),
            NodeKind::Heading4 => Some(4),
            NodeKind::Heading5 => Some(5),
            NodeKind::Heading6 => Some(6),
            _ => None,
        }
    }

    pub fn is_block_resource(self) -> bool {
        matches!(
            self,
            NodeKind::EmbeddedEntryBlock | NodeKind::EmbeddedAssetBlock
        )
    }

    pub fn is_inline_resource(self) -> bool {
        matches!(
            self,
            NodeKind::EmbeddedEntryInline | NodeKind::EntryHyperlink | NodeKind::AssetHyperlink
        )
    }
}
