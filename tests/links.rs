//! Purpose: Cover the link-resolution engine end to end.
//! Exports: Integration tests only.
//! Role: Verify deferred in-place patching, resolver misses, and at-most-once writes.
//! Invariants: Resolution completes before the decode entrypoints return.
//! Invariants: An unresolved link is a valid terminal state, never an error.

use richtree::core::decode::{decode_content, decode_document};
use richtree::core::kind::NodeKind;
use richtree::core::link::{CatalogResolver, Link, Resolver};
use richtree::core::node::Node;
use serde_json::{Value, json};
use std::cell::Cell;

/// Resolver wrapper that counts how often it is consulted.
struct CountingResolver<'a> {
    inner: &'a CatalogResolver,
    calls: Cell<usize>,
}

impl<'a> CountingResolver<'a> {
    fn new(inner: &'a CatalogResolver) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl Resolver for CountingResolver<'_> {
    fn resolve(&self, link_type: &str, id: &str) -> Option<Value> {
        self.calls.set(self.calls.get() + 1);
        self.inner.resolve(link_type, id)
    }
}

fn entry_block(id: &str) -> Value {
    json!({
        "nodeType": "embedded-entry-block",
        "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": id}}},
        "content": []
    })
}

fn resource_of(node: &Node) -> &richtree::core::node::ResourceLink {
    match node {
        Node::ResourceBlock(resource) | Node::ResourceInline(resource) => resource,
        other => panic!("expected resource link node, got {other:?}"),
    }
}

#[test]
fn without_a_resolver_links_stay_unresolved() {
    let input = json!([entry_block("X")]);
    let nodes = decode_content(&input, None).unwrap();
    let resource = resource_of(&nodes[0]);
    assert!(!resource.data.target.is_resolved());
    assert_eq!(
        resource.data.target.snapshot(),
        Link::Unresolved {
            link_type: "Entry".into(),
            id: "X".into(),
        }
    );
}

#[test]
fn resolver_patches_the_link_in_place_before_return() {
    let entity = json!({"sys": {"type": "Entry", "id": "X"}, "fields": {"name": "thing"}});
    let mut catalog = CatalogResolver::new();
    catalog.insert("Entry", "X", entity.clone());

    let input = json!([entry_block("X")]);
    let nodes = decode_content(&input, Some(&catalog)).unwrap();
    let resource = resource_of(&nodes[0]);
    assert_eq!(resource.data.target.snapshot(), Link::Resolved(entity));
}

#[test]
fn resolver_miss_is_not_an_error() {
    let catalog = CatalogResolver::new();
    let input = json!([entry_block("absent")]);
    let nodes = decode_content(&input, Some(&catalog)).unwrap();
    assert!(!resource_of(&nodes[0]).data.target.is_resolved());
}

#[test]
fn hydrated_wire_targets_skip_the_resolver() {
    let entity = json!({"sys": {"type": "Entry", "id": "X"}, "fields": {"n": 1}});
    let input = json!([{
        "nodeType": "embedded-entry-block",
        "data": {"target": entity},
        "content": []
    }]);

    let catalog = CatalogResolver::new();
    let counting = CountingResolver::new(&catalog);
    let nodes = decode_content(&input, Some(&counting)).unwrap();

    assert_eq!(counting.calls.get(), 0);
    assert_eq!(
        resource_of(&nodes[0]).data.target.snapshot(),
        Link::Resolved(entity)
    );
}

#[test]
fn each_link_is_queried_exactly_once_per_pass() {
    let mut catalog = CatalogResolver::new();
    catalog.insert("Entry", "a", json!({"id": "a"}));
    catalog.insert("Entry", "b", json!({"id": "b"}));

    let input = json!([entry_block("a"), entry_block("b"), entry_block("missing")]);
    let counting = CountingResolver::new(&catalog);
    let nodes = decode_content(&input, Some(&counting)).unwrap();

    assert_eq!(counting.calls.get(), 3);
    assert!(resource_of(&nodes[0]).data.target.is_resolved());
    assert!(resource_of(&nodes[1]).data.target.is_resolved());
    assert!(!resource_of(&nodes[2]).data.target.is_resolved());
}

#[test]
fn duplicate_references_resolve_independently() {
    let mut catalog = CatalogResolver::new();
    catalog.insert("Entry", "dup", json!({"id": "dup"}));

    let input = json!([entry_block("dup"), entry_block("dup")]);
    let counting = CountingResolver::new(&catalog);
    let nodes = decode_content(&input, Some(&counting)).unwrap();

    assert_eq!(counting.calls.get(), 2);
    for node in &nodes {
        assert_eq!(
            resource_of(node).data.target.snapshot(),
            Link::Resolved(json!({"id": "dup"}))
        );
    }
}

#[test]
fn inline_resource_tags_route_to_inline_nodes() {
    let mut catalog = CatalogResolver::new();
    catalog.insert("Asset", "img", json!({"url": "https://cdn.test/img.png"}));

    let doc = json!({
        "nodeType": "document",
        "content": [{
            "nodeType": "paragraph",
            "content": [
                {
                    "nodeType": "asset-hyperlink",
                    "data": {"target": {"sys": {"type": "Link", "linkType": "Asset", "id": "img"}}},
                    "content": [{"nodeType": "text", "value": "a picture"}]
                },
                {
                    "nodeType": "embedded-entry-inline",
                    "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": "gone"}}},
                    "content": []
                }
            ]
        }]
    });

    let root = decode_document(&doc, Some(&catalog)).unwrap();
    let paragraph = &root.children()[0];

    let asset = resource_of(&paragraph.children()[0]);
    assert_eq!(asset.kind(), NodeKind::AssetHyperlink);
    assert!(asset.data.target.is_resolved());
    assert_eq!(asset.container.children.len(), 1);

    let inline = resource_of(&paragraph.children()[1]);
    assert_eq!(inline.kind(), NodeKind::EmbeddedEntryInline);
    assert!(!inline.data.target.is_resolved());
}

#[test]
fn link_title_travels_next_to_the_target() {
    let input = json!([{
        "nodeType": "embedded-asset-block",
        "data": {
            "target": {"sys": {"type": "Link", "linkType": "Asset", "id": "img"}},
            "title": "cover image"
        },
        "content": []
    }]);
    let nodes = decode_content(&input, None).unwrap();
    let resource = resource_of(&nodes[0]);
    assert_eq!(resource.kind(), NodeKind::EmbeddedAssetBlock);
    assert_eq!(resource.data.title.as_deref(), Some("cover image"));
}

#[test]
fn malformed_sys_envelope_is_a_shape_error() {
    let input = json!([{
        "nodeType": "embedded-entry-block",
        "data": {"target": {"sys": {"type": "Link", "id": "X"}}},
        "content": []
    }]);
    let err = decode_content(&input, None).unwrap_err();
    assert_eq!(err.kind(), richtree::core::error::ErrorKind::Shape);
}
