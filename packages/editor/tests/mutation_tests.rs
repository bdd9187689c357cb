//! Wire format and validation of individual mutations

use pagecraft_document::IdGenerator;
use pagecraft_editor::{DocumentHandle, EditorError, ElementPatch, Mutation, MutationError, MutationResult, Registry};
use serde_json::json;

#[test]
fn test_mutations_deserialize_from_camel_case_json() {
    let mutations: Vec<Mutation> = serde_json::from_value(json!([
        { "kind": "addElement", "elementType": "row" },
        { "kind": "updateElement", "nodeId": "element-1", "patch": { "name": "Hero" } },
        { "kind": "deleteElement", "nodeId": "element-2" },
        { "kind": "duplicateElement", "nodeId": "element-3" },
        { "kind": "reorder", "containerId": "element-1", "fromIndex": 2, "toIndex": 0 }
    ]))
    .unwrap();

    assert_eq!(
        mutations,
        vec![
            Mutation::AddElement {
                element_type: "row".to_string(),
                parent_id: None,
            },
            Mutation::UpdateElement {
                node_id: "element-1".to_string(),
                patch: ElementPatch::name("Hero"),
            },
            Mutation::DeleteElement {
                node_id: "element-2".to_string(),
            },
            Mutation::DuplicateElement {
                node_id: "element-3".to_string(),
            },
            Mutation::Reorder {
                container_id: Some("element-1".to_string()),
                from_index: 2,
                to_index: 0,
            },
        ]
    );
}

#[test]
fn test_reorder_out_of_range_is_rejected() {
    let mut handle = DocumentHandle::new(Registry::page()).with_ids(IdGenerator::from_seed(1));
    handle
        .apply(&Mutation::AddElement {
            element_type: "paragraph".to_string(),
            parent_id: None,
        })
        .unwrap();

    let err = handle
        .apply(&Mutation::Reorder {
            container_id: None,
            from_index: 0,
            to_index: 4,
        })
        .unwrap_err();

    assert!(matches!(err, EditorError::Mutation(MutationError::Tree(_))));
    assert_eq!(handle.version, 1);
}

#[test]
fn test_reorder_of_leaf_container_is_rejected() {
    let mut handle = DocumentHandle::new(Registry::page()).with_ids(IdGenerator::from_seed(1));
    let heading = handle
        .apply(&Mutation::AddElement {
            element_type: "heading".to_string(),
            parent_id: None,
        })
        .unwrap()
        .created()
        .unwrap()
        .to_string();

    let result = handle.apply(&Mutation::Reorder {
        container_id: Some(heading),
        from_index: 0,
        to_index: 0,
    });
    assert!(result.is_err());
}

#[test]
fn test_update_replaces_content_wholesale() {
    let mut handle = DocumentHandle::new(Registry::page()).with_ids(IdGenerator::from_seed(1));
    let button = handle
        .apply(&Mutation::AddElement {
            element_type: "button".to_string(),
            parent_id: None,
        })
        .unwrap()
        .created()
        .unwrap()
        .to_string();

    let content = json!({ "text": "Go" });
    let result = handle
        .apply(&Mutation::UpdateElement {
            node_id: button.clone(),
            patch: ElementPatch::content(content.as_object().unwrap().clone()),
        })
        .unwrap();

    assert_eq!(result, MutationResult::Applied { version: 2, created: None });
    let node = handle.document().find(&button).unwrap();
    assert_eq!(node.content().len(), 1);
    assert_eq!(node.content_str("text"), Some("Go"));
    // Untouched fields keep their values
    assert_eq!(node.name(), "Button");
    assert_eq!(node.styles()["borderRadius"], "0.5rem");
}
