//! Export tests: persisted shape, sanitizer idempotence, round-tripping.
mod common;
use common::{legacy_doc, sample_flow};
use serde_json::{Value, json};
use waflow::prelude::*;

#[test]
fn test_export_shape() {
    let flow = sample_flow();
    let doc = export_flow(&flow);

    assert_eq!(doc["name"], "Support");
    assert_eq!(doc["isActive"], false);
    assert_eq!(doc["flowType"], "inbound");
    assert_eq!(doc["flowNodes"].as_array().unwrap().len(), 4);
    assert_eq!(doc["flowEdges"].as_array().unwrap().len(), 3);
    for edge in doc["flowEdges"].as_array().unwrap() {
        assert_eq!(edge["type"], EDGE_TYPE);
    }
}

#[test]
fn test_export_writes_trigger_config_to_both_homes() {
    let doc = export_flow(&sample_flow());

    assert_eq!(doc["triggerConfig"]["keywords"], json!(["help"]));
    let start = doc["flowNodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["type"] == "flowStartNode")
        .unwrap();
    assert_eq!(start["data"]["keywords"], json!(["help"]));
}

#[test]
fn test_export_synthesizes_node_result_ids() {
    let flow = sample_flow();
    let doc = export_flow(&flow);

    let menu = doc["flowNodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["type"] == "text-button")
        .unwrap();
    let buttons = menu["data"]["interactiveButtonsItems"].as_array().unwrap();
    assert_eq!(buttons.len(), 2);
    for button in buttons {
        let handle = format!("btn-{}", button["id"].as_str().unwrap());
        let edge = flow
            .edges
            .iter()
            .find(|e| e.source_handle.as_deref() == Some(handle.as_str()))
            .unwrap();
        assert_eq!(button["nodeResultId"], json!(edge.target));
    }
}

#[test]
fn test_export_omits_empty_optionals() {
    let mut flow = Flow::new("Bare", FlowType::Outbound);
    let start_id = flow.start_node().unwrap().id.clone();
    let text_id = flow
        .add_node(NodeKind::Text, Position::new(100.0, 200.0))
        .unwrap();
    flow.connect(&start_id, None, &text_id).unwrap();

    let doc = export_flow(&flow);
    let edge = &doc["flowEdges"].as_array().unwrap()[0];
    assert!(edge.get("sourceHandle").is_none());
    assert!(doc.get("triggerConfig").is_none());
    assert!(doc.get("transform").is_none());
}

#[test]
fn test_sanitize_strips_transient_node_fields() {
    let mut node = json!({
        "id": "n1",
        "type": "text",
        "width": 200,
        "height": 80,
        "selected": true,
        "dragging": false,
        "data": { "message": "hi", "updateNodeData": "[Function]", "label": "Text" }
    });
    waflow::export::sanitize_node(&mut node);
    assert_eq!(
        node,
        json!({ "id": "n1", "type": "text", "data": { "message": "hi" } })
    );
}

#[test]
fn test_sanitize_resolves_duplicate_button_keys() {
    let mut node = json!({
        "id": "n1",
        "type": "text-button",
        "data": {
            "interactiveButtonsItems": [ { "id": "canonical", "text": "Keep" } ],
            "buttons": [ { "id": "legacy", "text": "Drop" } ]
        }
    });
    waflow::export::sanitize_node(&mut node);
    assert_eq!(
        node["data"],
        json!({ "interactiveButtonsItems": [ { "id": "canonical", "text": "Keep" } ] })
    );
}

#[test]
fn test_sanitize_renames_lone_legacy_button_key() {
    let mut node = json!({
        "id": "n1",
        "type": "text-button",
        "data": { "buttons": [ { "id": "b1", "text": "Orders" } ] }
    });
    waflow::export::sanitize_node(&mut node);
    assert_eq!(
        node["data"],
        json!({ "interactiveButtonsItems": [ { "id": "b1", "text": "Orders" } ] })
    );
}

#[test]
fn test_sanitize_flattens_edge_handles() {
    let mut edge = json!({
        "id": "e1",
        "source": "a",
        "target": "b",
        "data": { "sourceHandle": "btn-1", "targetHandle": null }
    });
    waflow::export::sanitize_edge(&mut edge);
    assert_eq!(
        edge,
        json!({
            "id": "e1",
            "source": "a",
            "target": "b",
            "sourceHandle": "btn-1",
            "type": EDGE_TYPE
        })
    );
}

#[test]
fn test_sanitize_is_idempotent() {
    let mut doc = legacy_doc();
    sanitize_flow(&mut doc);
    let once = doc.clone();
    sanitize_flow(&mut doc);
    assert_eq!(doc, once);

    let mut clean: Value = export_flow(&sample_flow());
    let before = clean.clone();
    sanitize_flow(&mut clean);
    assert_eq!(clean, before);
}

#[test]
fn test_round_trip_preserves_graph() {
    let flow = sample_flow();
    let exported = export_flow(&flow);
    let restored = import_flow(&exported).unwrap();

    let ids = |f: &Flow| -> Vec<String> { f.nodes.iter().map(|n| n.id.clone()).collect() };
    assert_eq!(ids(&flow), ids(&restored));

    let triples = |f: &Flow| -> Vec<(String, String, Option<String>)> {
        f.edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.source_handle.clone()))
            .collect()
    };
    assert_eq!(triples(&flow), triples(&restored));

    // A second export is byte-identical to the first: the persisted form is
    // a fixed point of export -> import.
    assert_eq!(export_flow(&restored), exported);
}

#[test]
fn test_round_trip_keeps_button_content() {
    let flow = sample_flow();
    let restored = import_flow(&export_flow(&flow)).unwrap();

    let buttons = |f: &Flow| -> Vec<(String, String)> {
        let node = f.nodes.iter().find(|n| n.kind == NodeKind::TextButton).unwrap();
        node.data
            .buttons()
            .unwrap()
            .iter()
            .map(|b| (b.id.clone(), b.text.clone()))
            .collect()
    };
    assert_eq!(buttons(&flow), buttons(&restored));
}

#[test]
fn test_list_item_connection_survives_round_trip() {
    let mut flow = Flow::new("Lists", FlowType::Inbound);
    let start_id = flow.start_node().unwrap().id.clone();
    let list_id = flow
        .add_node(NodeKind::List, Position::new(250.0, 220.0))
        .unwrap();
    let text_id = flow
        .add_node(NodeKind::Text, Position::new(250.0, 400.0))
        .unwrap();

    // A fresh list node carries one section with one item.
    let item_handle = flow.node(&list_id).unwrap().data.sections().unwrap()[0].items[0].handle();
    assert!(item_handle.starts_with("item-") && item_handle.ends_with("-source"));

    flow.connect(&start_id, None, &list_id).unwrap();
    flow.connect(&list_id, Some(&item_handle), &text_id).unwrap();
    flow.move_node(&list_id, Position::new(300.0, 260.0)).unwrap();

    let restored = import_flow(&export_flow(&flow)).unwrap();
    let edge = restored.edges.iter().find(|e| e.source == list_id).unwrap();
    assert_eq!(edge.target, text_id);
    assert_eq!(edge.source_handle.as_deref(), Some(item_handle.as_str()));

    let list = restored.node(&list_id).unwrap();
    assert_eq!((list.position.x, list.position.y), (300.0, 260.0));
    assert_eq!(list.data.sections().unwrap().len(), 1);
}

#[test]
fn test_legacy_import_then_export_is_stable() {
    let flow = import_flow(&legacy_doc()).unwrap();
    let exported = export_flow(&flow);
    let restored = import_flow(&exported).unwrap();
    assert_eq!(export_flow(&restored), exported);
}
