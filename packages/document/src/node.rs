//! Element nodes of a page/store document.

use crate::registry::RegistryEntry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form key/value payload used for both `content` and `styles`.
pub type Payload = Map<String, Value>;

const ORDER_KEY: &str = "order";

/// One element instance in a document tree.
///
/// Fields are private so that structural properties (`id`, `type`,
/// `children`, `parentId`) can only change through tree operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: String,

    #[serde(rename = "type")]
    element_type: String,

    name: String,

    #[serde(default)]
    content: Payload,

    #[serde(default)]
    styles: Payload,

    /// `Some` iff the node's type accepts children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,

    /// Keys this model does not know about, such as a store section's `order`
    #[serde(flatten)]
    extra: Payload,
}

impl Node {
    /// Create a node from a registry template with the template's defaults
    pub fn from_entry(entry: &RegistryEntry, id: String, parent_id: Option<String>) -> Self {
        Self {
            id,
            element_type: entry.id.to_string(),
            name: entry.name.to_string(),
            content: entry.default_content.clone(),
            styles: entry.default_styles.clone(),
            children: entry.allow_children.then(Vec::new),
            parent_id,
            extra: Payload::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Payload {
        &self.content
    }

    pub fn styles(&self) -> &Payload {
        &self.styles
    }

    /// Child nodes, `None` for leaf types
    pub fn children(&self) -> Option<&[Node]> {
        self.children.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Whether this node can hold children
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Look up a string value in `content`
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }

    /// Unmodelled keys kept through a load/save round trip
    pub fn extra(&self) -> &Payload {
        &self.extra
    }

    /// Position recorded by store documents, if any
    pub fn order(&self) -> Option<u64> {
        self.extra.get(ORDER_KEY).and_then(Value::as_u64)
    }

    pub(crate) fn has_order(&self) -> bool {
        self.extra.contains_key(ORDER_KEY)
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.extra.insert(ORDER_KEY.to_string(), Value::from(order));
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    /// Set this node's `parentId` and point every descendant at its actual parent
    pub(crate) fn reparent(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
        let id = self.id.clone();
        for child in self.children.iter_mut().flatten() {
            child.reparent(Some(id.clone()));
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(styles) = &patch.styles {
            self.styles = styles.clone();
        }
    }

    /// Deep copy with fresh ids for this node and every descendant.
    ///
    /// Descendants get their `parentId` rewritten to the new ids; the copy
    /// itself keeps `parent_id`.
    pub(crate) fn deep_copy(&self, parent_id: Option<String>, next_id: &mut impl FnMut() -> String) -> Node {
        let id = next_id();
        let children = self.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| child.deep_copy(Some(id.clone()), &mut *next_id))
                .collect()
        });

        Node {
            id,
            element_type: self.element_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
            styles: self.styles.clone(),
            children,
            parent_id,
            extra: self.extra.clone(),
        }
    }

    /// Collect the ids of this node and its whole subtree (pre-order)
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        for child in self.children().unwrap_or_default() {
            child.collect_ids(out);
        }
    }
}

/// Partial update of a node.
///
/// Only `name`, `content` and `styles` can be patched. Each present field
/// replaces the node's field wholesale; absent fields are left untouched.
/// Keys such as `id`, `type` or `children` in an incoming JSON patch are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Payload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Payload>,
}

impl ElementPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn content(content: Payload) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn styles(styles: Payload) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: Payload) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_styles(mut self, styles: Payload) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.styles.is_none()
    }

    /// Patch that restores `node`'s current editable fields
    pub fn snapshot_of(node: &Node) -> Self {
        Self {
            name: Some(node.name.clone()),
            content: Some(node.content.clone()),
            styles: Some(node.styles.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;
    use serde_json::json;

    #[test]
    fn test_from_entry_clones_defaults() {
        let entry = Registry::page().lookup("heading").unwrap();
        let node = Node::from_entry(entry, "element-1".to_string(), None);

        assert_eq!(node.element_type(), "heading");
        assert_eq!(node.name(), "Heading");
        assert_eq!(node.content_str("text"), Some("Your Heading Here"));
        assert_eq!(node.content_str("level"), Some("h1"));
        assert!(node.children().is_none());
        assert!(node.parent_id().is_none());
    }

    #[test]
    fn test_container_starts_with_empty_children() {
        let entry = Registry::page().lookup("container").unwrap();
        let node = Node::from_entry(entry, "element-1".to_string(), Some("p".to_string()));

        assert_eq!(node.children(), Some(&[][..]));
        assert_eq!(node.parent_id(), Some("p"));
    }

    #[test]
    fn test_leaf_serializes_without_children_key() {
        let entry = Registry::page().lookup("button").unwrap();
        let node = Node::from_entry(entry, "element-1".to_string(), None);

        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("children").is_none());
        assert!(value.get("parentId").is_none());
        assert_eq!(value["type"], json!("button"));
    }

    #[test]
    fn test_patch_ignores_structural_keys() {
        let patch: ElementPatch = serde_json::from_value(json!({
            "id": "hijack",
            "type": "image",
            "children": [],
            "parentId": "elsewhere",
            "name": "Renamed"
        }))
        .unwrap();

        assert_eq!(patch, ElementPatch::name("Renamed"));
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let input = json!({
            "id": "section-1",
            "type": "hero",
            "name": "Hero Banner",
            "content": { "title": "Welcome" },
            "styles": {},
            "order": 0,
            "visible": true
        });

        let node: Node = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(node.order(), Some(0));
        assert_eq!(node.extra()["visible"], json!(true));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_reparent_rewrites_descendants() {
        let registry = Registry::page();
        let mut row = Node::from_entry(registry.lookup("row").unwrap(), "row".to_string(), None);
        let col = Node::from_entry(registry.lookup("column").unwrap(), "col".to_string(), Some("stale".to_string()));
        row.children_mut().unwrap().push(col);

        row.reparent(Some("page".to_string()));

        assert_eq!(row.parent_id(), Some("page"));
        assert_eq!(row.children().unwrap()[0].parent_id(), Some("row"));
    }

    #[test]
    fn test_deep_copy_regenerates_all_ids() {
        let registry = Registry::page();
        let mut row = Node::from_entry(registry.lookup("row").unwrap(), "row".to_string(), None);
        let col = Node::from_entry(registry.lookup("column").unwrap(), "col".to_string(), Some("row".to_string()));
        row.children_mut().unwrap().push(col);

        let mut n = 0;
        let copy = row.deep_copy(None, &mut || {
            n += 1;
            format!("copy-{}", n)
        });

        assert_eq!(copy.subtree_ids(), vec!["copy-1", "copy-2"]);
        assert_eq!(copy.children().unwrap()[0].parent_id(), Some("copy-1"));
    }
}
