//! Purpose: Model external-entity references and their write-once resolution.
//! Exports: `Link`, `LinkCell`, `Resolver`, `CatalogResolver`.
//! Role: Deferred-resolution seam between the pure decoder and an external catalog.
//! Invariants: A cell is written at most once; once resolved the value is frozen.
//! Invariants: Cells are single-threaded (`Rc`); one decode pass owns its pending list.

use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One reference to an external entity. Starts `Unresolved` with the opaque
/// `(linkType, id)` pair from the wire; a resolver may replace it with the
/// hydrated entity exactly once per decode pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Link {
    Unresolved { link_type: String, id: String },
    Resolved(Value),
}

/// Wire envelope of an unresolved reference: `{"sys": {"type": "Link", ...}}`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct WireLink {
    pub sys: WireLinkSys,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct WireLinkSys {
    #[serde(rename = "type")]
    pub sys_type: String,
    #[serde(rename = "linkType")]
    pub link_type: String,
    pub id: String,
}

/// Shared write-once cell holding a `Link`. The decode pass hands one clone to
/// the node that owns the reference and keeps another on its pending list, so
/// the resolution patch lands on the right node without re-walking the tree.
#[derive(Clone, Debug)]
pub struct LinkCell {
    inner: Rc<RefCell<Link>>,
}

impl LinkCell {
    pub fn unresolved(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Link::Unresolved {
                link_type: link_type.into(),
                id: id.into(),
            })),
        }
    }

    pub fn resolved(entity: Value) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Link::Resolved(entity))),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> Link {
        self.inner.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(&*self.inner.borrow(), Link::Resolved(_))
    }

    /// The `(linkType, id)` pair to ask a resolver about, or `None` once the
    /// cell is frozen.
    pub(crate) fn pending_key(&self) -> Option<(String, String)> {
        match &*self.inner.borrow() {
            Link::Unresolved { link_type, id } => Some((link_type.clone(), id.clone())),
            Link::Resolved(_) => None,
        }
    }

    /// Write-once: fills the cell only if it is still unresolved. Returns
    /// whether the write happened.
    pub(crate) fn fill(&self, entity: Value) -> bool {
        let mut slot = self.inner.borrow_mut();
        match &*slot {
            Link::Unresolved { .. } => {
                *slot = Link::Resolved(entity);
                true
            }
            Link::Resolved(_) => false,
        }
    }
}

impl PartialEq for LinkCell {
    fn eq(&self, other: &Self) -> bool {
        *self.inner.borrow() == *other.inner.borrow()
    }
}

/// External collaborator that maps a link's `(linkType, id)` to a hydrated
/// entity. Invoked synchronously, zero or more times per decode pass. `None`
/// leaves the link unresolved, which is a valid terminal state.
pub trait Resolver {
    fn resolve(&self, link_type: &str, id: &str) -> Option<Value>;
}

/// Map-backed resolver for embedders holding a prefetched catalog.
#[derive(Clone, Debug, Default)]
pub struct CatalogResolver {
    entries: BTreeMap<(String, String), Value>,
}

impl CatalogResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        link_type: impl Into<String>,
        id: impl Into<String>,
        entity: Value,
    ) -> &mut Self {
        self.entries.insert((link_type.into(), id.into()), entity);
        self
    }
}

impl Resolver for CatalogResolver {
    fn resolve(&self, link_type: &str, id: &str) -> Option<Value> {
        self.entries
            .get(&(link_type.to_string(), id.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogResolver, Link, LinkCell, Resolver};
    use serde_json::json;

    #[test]
    fn fill_writes_once_then_freezes() {
        let cell = LinkCell::unresolved("Entry", "a1");
        assert!(!cell.is_resolved());
        assert_eq!(cell.pending_key(), Some(("Entry".into(), "a1".into())));

        assert!(cell.fill(json!({"sys": {"id": "a1"}})));
        assert!(cell.is_resolved());
        assert_eq!(cell.pending_key(), None);

        assert!(!cell.fill(json!({"sys": {"id": "other"}})));
        assert_eq!(cell.snapshot(), Link::Resolved(json!({"sys": {"id": "a1"}})));
    }

    #[test]
    fn clones_share_one_slot() {
        let cell = LinkCell::unresolved("Asset", "img");
        let alias = cell.clone();
        assert!(alias.fill(json!({"url": "x"})));
        assert!(cell.is_resolved());
    }

    #[test]
    fn catalog_resolver_hits_and_misses() {
        let mut catalog = CatalogResolver::new();
        catalog.insert("Entry", "a1", json!({"fields": {"name": "one"}}));

        assert_eq!(
            catalog.resolve("Entry", "a1"),
            Some(json!({"fields": {"name": "one"}}))
        );
        assert_eq!(catalog.resolve("Entry", "a2"), None);
        assert_eq!(catalog.resolve("Asset", "a1"), None);
    }
}
