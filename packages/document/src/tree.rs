//! # Tree Operations
//!
//! Structural edits on a [`Document`]'s node forest.
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! document exactly as it was.
//!
//! ## Semantics
//!
//! ### Add
//! - Appends to the parent's children, or to the root list without a parent
//! - Fails if the parent is missing or is a leaf type (never falls back to the root)
//!
//! ### Update / Delete / Duplicate
//! - Missing targets are no-ops, reported through the return value
//! - Delete removes the whole subtree
//! - Duplicate copies the whole subtree with fresh ids and places the copy
//!   right after the original, under the same parent
//!
//! ### Reorder
//! - Moves one item within a single sibling list
//!
//! ### Insert
//! - Places a detached subtree, which must satisfy the catalog's rules
//!
//! Sibling lists whose nodes carry an `order` key (store sections) are
//! renumbered after every change so `order` matches the position.

use crate::error::TreeError;
use crate::id_generator::IdGenerator;
use crate::node::{ElementPatch, Node};
use crate::registry::{Registry, RegistryEntry};
use crate::validate::check_subtree;
use crate::Document;

impl Document {
    /// Depth-first search for a node by id
    pub fn find(&self, id: &str) -> Option<&Node> {
        find_in(&self.elements, id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        find_in_mut(&mut self.elements, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// The node owning `id`, `None` for top-level or missing nodes
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        let (parent_id, _) = self.position_of(id)?;
        self.find(&parent_id?)
    }

    /// Parent id (`None` for the root list) and index within that sibling list
    pub fn position_of(&self, id: &str) -> Option<(Option<String>, usize)> {
        position_in(&self.elements, None, id)
    }

    /// Children of `container_id`, or the root list for `None`
    pub fn siblings(&self, container_id: Option<&str>) -> Option<&[Node]> {
        match container_id {
            None => Some(self.elements.as_slice()),
            Some(id) => self.find(id).and_then(Node::children),
        }
    }

    fn siblings_mut(&mut self, container_id: Option<&str>) -> Option<&mut Vec<Node>> {
        match container_id {
            None => Some(&mut self.elements),
            Some(id) => self.find_mut(id).and_then(Node::children_mut),
        }
    }

    /// Pre-order iterator over every node in the document
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: self.elements.iter().rev().collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Every node id in pre-order
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(Node::id).collect()
    }

    /// Create a node from `entry` and append it under `parent_id`.
    ///
    /// Returns the id of the new node.
    pub fn add_element(
        &mut self,
        entry: &RegistryEntry,
        parent_id: Option<&str>,
        ids: &mut IdGenerator,
    ) -> Result<String, TreeError> {
        if let Some(parent_id) = parent_id {
            match self.find(parent_id) {
                Some(parent) if parent.is_container() => {}
                Some(_) => return Err(TreeError::parent_is_leaf(parent_id)),
                None => return Err(TreeError::parent_not_found(parent_id)),
            }
        }

        let id = ids.fresh_id(self);
        let node = Node::from_entry(entry, id.clone(), parent_id.map(str::to_string));

        let siblings = self
            .siblings_mut(parent_id)
            .ok_or_else(|| TreeError::parent_not_found(parent_id.unwrap_or_default()))?;
        siblings.push(node);
        renumber(siblings);

        Ok(id)
    }

    /// Apply `patch` to the node. Returns `false` if the node does not exist.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                node.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the node and its subtree, returning it
    pub fn delete_element(&mut self, id: &str) -> Option<Node> {
        remove_from(&mut self.elements, id).map(|(_, node)| node)
    }

    /// Copy the node's subtree next to it. Returns the copy's id.
    pub fn duplicate_element(&mut self, id: &str, ids: &mut IdGenerator) -> Option<String> {
        let (parent_id, index) = self.position_of(id)?;

        let mut copy = {
            let doc = &*self;
            let original = doc.find(id)?;
            original.deep_copy(parent_id.clone(), &mut || ids.fresh_id(doc))
        };
        copy.rename(format!("{} (Copy)", copy.name()));

        let copy_id = copy.id().to_string();
        let siblings = self.siblings_mut(parent_id.as_deref())?;
        siblings.insert(index + 1, copy);
        renumber(siblings);
        Some(copy_id)
    }

    /// Move the item at `from_index` to `to_index` within one sibling list
    pub fn reorder(
        &mut self,
        container_id: Option<&str>,
        from_index: usize,
        to_index: usize,
    ) -> Result<(), TreeError> {
        let siblings = self
            .siblings_mut(container_id)
            .ok_or_else(|| TreeError::ContainerNotFound(container_id.unwrap_or_default().to_string()))?;

        let len = siblings.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(TreeError::IndexOutOfRange { index, len });
            }
        }

        let item = siblings.remove(from_index);
        siblings.insert(to_index, item);
        renumber(siblings);
        Ok(())
    }

    /// Insert an existing subtree at `index` (clamped) under `parent_id`.
    ///
    /// Used to restore deleted subtrees. The subtree's `parentId`s are
    /// rewritten to where it lands, every id in it must be unused and
    /// distinct, and every node must follow `registry`'s children rules.
    pub fn insert_node(
        &mut self,
        registry: &Registry,
        parent_id: Option<&str>,
        index: usize,
        mut node: Node,
    ) -> Result<(), TreeError> {
        if let Some(parent_id) = parent_id {
            match self.find(parent_id) {
                Some(parent) if parent.is_container() => {}
                Some(_) => return Err(TreeError::parent_is_leaf(parent_id)),
                None => return Err(TreeError::parent_not_found(parent_id)),
            }
        }

        node.reparent(parent_id.map(str::to_string));
        check_subtree(&node, parent_id, registry).map_err(|violations| TreeError::InvalidSubtree {
            id: node.id().to_string(),
            violations,
        })?;

        if let Some(taken) = node.subtree_ids().into_iter().find(|id| self.contains(id)) {
            return Err(TreeError::DuplicateId(taken));
        }

        let siblings = self
            .siblings_mut(parent_id)
            .ok_or_else(|| TreeError::parent_not_found(parent_id.unwrap_or_default()))?;
        let index = index.min(siblings.len());
        siblings.insert(index, node);
        renumber(siblings);
        Ok(())
    }
}

/// Pre-order traversal over a document's nodes
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

fn find_in<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = node.children().and_then(|children| find_in(children, id)) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = node.children_mut().and_then(|children| find_in_mut(children, id)) {
            return Some(found);
        }
    }
    None
}

fn position_in(nodes: &[Node], parent_id: Option<&str>, id: &str) -> Option<(Option<String>, usize)> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some((parent_id.map(str::to_string), index));
        }
        if let Some(found) = node
            .children()
            .and_then(|children| position_in(children, Some(node.id()), id))
        {
            return Some(found);
        }
    }
    None
}

/// Keep `order` in step with position when the list tracks it
fn renumber(siblings: &mut [Node]) {
    if !siblings.iter().any(Node::has_order) {
        return;
    }
    for (index, node) in siblings.iter_mut().enumerate() {
        node.set_order(index);
    }
}

fn remove_from(nodes: &mut Vec<Node>, id: &str) -> Option<(usize, Node)> {
    if let Some(pos) = nodes.iter().position(|node| node.id() == id) {
        let removed = nodes.remove(pos);
        renumber(nodes);
        return Some((pos, removed));
    }

    for node in nodes.iter_mut() {
        if let Some(removed) = node.children_mut().and_then(|children| remove_from(children, id)) {
            return Some(removed);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Violation;
    use serde_json::json;

    fn add(doc: &mut Document, ids: &mut IdGenerator, element_type: &str, parent: Option<&str>) -> String {
        let entry = Registry::page().lookup(element_type).unwrap();
        doc.add_element(entry, parent, ids).unwrap()
    }

    #[test]
    fn test_add_to_root_and_nested() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);

        let container = add(&mut doc, &mut ids, "container", None);
        let button = add(&mut doc, &mut ids, "button", Some(&container));

        assert_eq!(doc.elements().len(), 1);
        let found = doc.find(&button).unwrap();
        assert_eq!(found.parent_id(), Some(container.as_str()));
        assert_eq!(doc.parent_of(&button).unwrap().id(), container);
    }

    #[test]
    fn test_add_under_leaf_is_rejected() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let heading = add(&mut doc, &mut ids, "heading", None);

        let entry = Registry::page().lookup("button").unwrap();
        let err = doc.add_element(entry, Some(&heading), &mut ids).unwrap_err();

        assert!(matches!(err, TreeError::InvalidParent { ref parent_id, .. } if *parent_id == heading));
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_add_under_missing_parent_is_rejected() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);

        let entry = Registry::page().lookup("button").unwrap();
        let err = doc.add_element(entry, Some("ghost"), &mut ids).unwrap_err();

        assert_eq!(err, TreeError::parent_not_found("ghost"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_update_nested() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let section = add(&mut doc, &mut ids, "section", None);
        let heading = add(&mut doc, &mut ids, "heading", Some(&section));

        let content = json!({ "text": "Hello", "level": "h2" });
        let patch = ElementPatch::content(content.as_object().unwrap().clone()).with_name("Title");

        assert!(doc.update_element(&heading, &patch));
        let node = doc.find(&heading).unwrap();
        assert_eq!(node.name(), "Title");
        assert_eq!(node.content_str("level"), Some("h2"));
        assert_eq!(node.styles()["fontWeight"], "bold");
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut doc = Document::new();
        let before = doc.clone();
        assert!(!doc.update_element("ghost", &ElementPatch::name("x")));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_nested_subtree() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let row = add(&mut doc, &mut ids, "row", None);
        let column = add(&mut doc, &mut ids, "column", Some(&row));
        let text = add(&mut doc, &mut ids, "paragraph", Some(&column));

        let removed = doc.delete_element(&column).unwrap();
        assert_eq!(removed.subtree_ids(), vec![column.clone(), text.clone()]);
        assert!(!doc.contains(&text));
        assert_eq!(doc.find(&row).unwrap().children().unwrap().len(), 0);
        assert!(doc.delete_element(&column).is_none());
    }

    #[test]
    fn test_duplicate_keeps_nesting() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let section = add(&mut doc, &mut ids, "section", None);
        let first = add(&mut doc, &mut ids, "button", Some(&section));
        let _last = add(&mut doc, &mut ids, "image", Some(&section));

        let copy = doc.duplicate_element(&first, &mut ids).unwrap();

        let children = doc.find(&section).unwrap().children().unwrap();
        let order: Vec<_> = children.iter().map(Node::id).collect();
        assert_eq!(order, vec![first.as_str(), copy.as_str(), children[2].id()]);
        assert_eq!(children[1].name(), "Button (Copy)");
        assert_eq!(children[1].parent_id(), Some(section.as_str()));
        assert_eq!(doc.elements().len(), 1);
    }

    #[test]
    fn test_reorder_root() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let a = add(&mut doc, &mut ids, "heading", None);
        let b = add(&mut doc, &mut ids, "paragraph", None);
        let c = add(&mut doc, &mut ids, "button", None);

        doc.reorder(None, 0, 2).unwrap();
        assert_eq!(doc.ids(), vec![b.as_str(), c.as_str(), a.as_str()]);

        let err = doc.reorder(None, 3, 0).unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_reorder_unknown_container() {
        let mut doc = Document::new();
        let err = doc.reorder(Some("ghost"), 0, 0).unwrap_err();
        assert_eq!(err, TreeError::ContainerNotFound("ghost".to_string()));
    }

    #[test]
    fn test_insert_node_restores_position() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let container = add(&mut doc, &mut ids, "container", None);
        let a = add(&mut doc, &mut ids, "heading", Some(&container));
        let b = add(&mut doc, &mut ids, "paragraph", Some(&container));

        let (parent, index) = doc.position_of(&a).unwrap();
        let removed = doc.delete_element(&a).unwrap();
        doc.insert_node(Registry::page(), parent.as_deref(), index, removed).unwrap();

        let children: Vec<_> = doc.siblings(Some(&container)).unwrap().iter().map(Node::id).collect();
        assert_eq!(children, vec![a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_insert_node_rejects_taken_ids() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let heading = add(&mut doc, &mut ids, "heading", None);

        let copy = doc.find(&heading).unwrap().clone();
        let err = doc.insert_node(Registry::page(), None, 0, copy).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId(heading));
    }

    #[test]
    fn test_insert_node_rejects_malformed_subtree() {
        let mut doc = Document::new();
        let node: Node = serde_json::from_value(json!({
            "id": "x",
            "type": "heading",
            "name": "Heading",
            "children": [
                { "id": "dup", "type": "marquee", "name": "M", "parentId": "elsewhere" },
                { "id": "dup", "type": "spacer", "name": "Spacer" }
            ]
        }))
        .unwrap();

        let err = doc.insert_node(Registry::page(), None, 0, node).unwrap_err();

        let TreeError::InvalidSubtree { id, violations } = err else {
            panic!("expected InvalidSubtree, got {:?}", err);
        };
        assert_eq!(id, "x");
        assert_eq!(
            violations,
            vec![
                Violation::ChildrenNotAllowed { id: "x".into(), element_type: "heading".into() },
                Violation::UnknownType { id: "dup".into(), element_type: "marquee".into() },
                Violation::DuplicateId("dup".into()),
            ]
        );
        assert!(doc.is_empty());
    }

    #[test]
    fn test_insert_node_rewrites_parent_ids() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let section = add(&mut doc, &mut ids, "section", None);

        let node: Node = serde_json::from_value(json!({
            "id": "row",
            "type": "row",
            "name": "Row",
            "parentId": "stale",
            "children": [
                { "id": "col", "type": "column", "name": "Column", "children": [] }
            ]
        }))
        .unwrap();

        doc.insert_node(Registry::page(), Some(&section), 0, node).unwrap();

        assert_eq!(doc.find("row").unwrap().parent_id(), Some(section.as_str()));
        assert_eq!(doc.find("col").unwrap().parent_id(), Some("row"));
        assert_eq!(doc.validate(Registry::page()), Ok(()));
    }

    #[test]
    fn test_store_order_follows_position() {
        let mut doc = Document::from_value(json!({
            "elements": [
                { "id": "a", "type": "hero", "name": "Hero", "order": 0 },
                { "id": "b", "type": "products", "name": "Products", "order": 1 },
                { "id": "c", "type": "about", "name": "About", "order": 2 }
            ]
        }))
        .unwrap();
        let mut ids = IdGenerator::from_seed(1);
        let orders = |doc: &Document| -> Vec<(String, Option<u64>)> {
            doc.elements().iter().map(|n| (n.id().to_string(), n.order())).collect()
        };

        doc.reorder(None, 0, 2).unwrap();
        assert_eq!(
            orders(&doc),
            vec![("b".into(), Some(0)), ("c".into(), Some(1)), ("a".into(), Some(2))]
        );

        let copy = doc.duplicate_element("b", &mut ids).unwrap();
        assert_eq!(doc.find(&copy).unwrap().order(), Some(1));
        assert_eq!(doc.find("a").unwrap().order(), Some(3));

        let entry = Registry::store().lookup("newsletter").unwrap();
        let added = doc.add_element(entry, None, &mut ids).unwrap();
        assert_eq!(doc.find(&added).unwrap().order(), Some(4));

        doc.delete_element("b").unwrap();
        let expected: Vec<Option<u64>> = (0..4).map(Some).collect();
        assert_eq!(doc.elements().iter().map(Node::order).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_iter_is_pre_order() {
        let mut doc = Document::new();
        let mut ids = IdGenerator::from_seed(1);
        let row = add(&mut doc, &mut ids, "row", None);
        let col = add(&mut doc, &mut ids, "column", Some(&row));
        let text = add(&mut doc, &mut ids, "paragraph", Some(&col));
        let tail = add(&mut doc, &mut ids, "divider", None);

        assert_eq!(doc.ids(), vec![row.as_str(), col.as_str(), text.as_str(), tail.as_str()]);
        assert_eq!(doc.node_count(), 4);
    }
}
