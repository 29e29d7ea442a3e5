//! Import tests: legacy shapes, per-record degradation, trigger merging.
mod common;
use common::legacy_doc;
use serde_json::json;
use waflow::prelude::*;

#[test]
fn test_import_legacy_document() {
    let flow = import_flow(&legacy_doc()).unwrap();

    assert_eq!(flow.name, "Legacy");
    assert_eq!(flow.flow_type, FlowType::Inbound);
    assert_eq!(flow.nodes.len(), 4);

    let start = flow.node("start-1").unwrap();
    assert_eq!(start.kind, NodeKind::FlowStart);
    assert_eq!((start.position.x, start.position.y), (120.5, 40.0));

    let menu = flow.node("menu-1").unwrap();
    assert_eq!(menu.kind, NodeKind::TextButton);
    match &menu.data {
        NodeData::TextButton(data) => {
            assert_eq!(data.message, "Pick one");
            let ids: Vec<&str> = data.buttons.iter().map(|b| b.id.as_str()).collect();
            assert_eq!(ids, ["b1", "b2"]);
        }
        other => panic!("expected text-button data, got {other:?}"),
    }

    assert_eq!(flow.node("orders-1").unwrap().kind, NodeKind::Text);

    let viewport = flow.viewport.unwrap();
    assert_eq!((viewport.pos_x, viewport.pos_y, viewport.zoom), (-40.0, 12.5, 0.75));
}

#[test]
fn test_import_decodes_concatenated_edge_sources() {
    let flow = import_flow(&legacy_doc()).unwrap();

    let edge = flow.edge("e2").unwrap();
    assert_eq!(edge.source, "menu-1");
    assert_eq!(edge.target, "orders-1");
    assert_eq!(edge.source_handle.as_deref(), Some("btn-b1"));
}

#[test]
fn test_import_drops_only_unresolvable_edges() {
    let flow = import_flow(&legacy_doc()).unwrap();

    // e3 targets a node that does not exist; everything else survives.
    let ids: Vec<&str> = flow.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e1", "e2", "e4"]);
}

#[test]
fn test_import_merges_flow_level_trigger_into_start_node() {
    let flow = import_flow(&legacy_doc()).unwrap();

    match &flow.start_node().unwrap().data {
        NodeData::FlowStart(data) => {
            assert_eq!(data.keywords, ["hello", "hi"]);
            assert!(data.case_sensitive);
        }
        other => panic!("expected start data, got {other:?}"),
    }
    let trigger = flow.trigger_config.as_ref().unwrap();
    assert_eq!(trigger.keywords, ["hello", "hi"]);
}

#[test]
fn test_import_node_level_trigger_wins() {
    let doc = json!({
        "flowNodes": [
            { "id": "s", "type": "flowStartNode", "data": { "keywords": ["order"] } }
        ],
        "flowEdges": [],
        "triggerConfig": { "keywords": ["hello"], "regex": "^hi$", "caseSensitive": true }
    });
    let flow = import_flow(&doc).unwrap();
    match &flow.start_node().unwrap().data {
        NodeData::FlowStart(data) => {
            assert_eq!(data.keywords, ["order"]);
            // Node-level keywords are set, so only the missing regex fills in.
            assert_eq!(data.regex, "^hi$");
            assert!(!data.case_sensitive);
        }
        other => panic!("expected start data, got {other:?}"),
    }
}

#[test]
fn test_import_accepts_nodes_edges_spelling() {
    let doc = json!({
        "nodes": [
            { "id": "s", "type": "flowStartNode", "position": { "x": 0.0, "y": 0.0 } },
            { "id": "t", "type": "text", "position": { "x": 0.0, "y": 100.0 } }
        ],
        "edges": [ { "id": "e", "source": "s", "target": "t" } ]
    });
    let flow = import_flow(&doc).unwrap();
    assert_eq!(flow.nodes.len(), 2);
    assert_eq!(flow.edges.len(), 1);
}

#[test]
fn test_import_rejects_non_array_node_collection() {
    let doc = json!({ "flowNodes": { "id": "s" } });
    match import_flow(&doc) {
        Err(ImportError::NotAnArray { field, .. }) => assert_eq!(field, "flowNodes"),
        other => panic!("expected NotAnArray, got {other:?}"),
    }
}

#[test]
fn test_import_rejects_missing_node_collection() {
    assert!(matches!(
        import_flow(&json!({ "name": "x" })),
        Err(ImportError::MissingNodes)
    ));
}

#[test]
fn test_import_rejects_unparseable_json_text() {
    assert!(matches!(
        import_flow_str("{ not json"),
        Err(ImportError::JsonParse(_))
    ));
}

#[test]
fn test_import_rejects_multiple_start_nodes() {
    let doc = json!({
        "flowNodes": [
            { "id": "a", "type": "flowStartNode" },
            { "id": "b", "type": "start" }
        ]
    });
    assert!(matches!(
        import_flow(&doc),
        Err(ImportError::MultipleStartNodes { count: 2 })
    ));
}

#[test]
fn test_import_synthesizes_missing_start_node() {
    let doc = json!({
        "flowNodes": [ { "id": "t", "type": "text", "data": { "message": "hi" } } ]
    });
    let flow = import_flow(&doc).unwrap();
    assert_eq!(flow.nodes.len(), 2);
    let start = flow.start_node().unwrap();
    assert!(start.position.x.is_finite() && start.position.y.is_finite());
}

#[test]
fn test_import_unknown_type_keeps_raw_data() {
    let flow = import_flow(&legacy_doc()).unwrap();
    let mystery = flow.node("mystery-1").unwrap();
    assert_eq!(mystery.kind, NodeKind::Default);
    assert_eq!(mystery.data, NodeData::Default(json!({ "shape": "cube" })));
}

#[test]
fn test_import_drops_duplicate_output_edges() {
    let doc = json!({
        "flowNodes": [
            { "id": "s", "type": "flowStartNode" },
            { "id": "a", "type": "text" },
            { "id": "b", "type": "text" }
        ],
        "flowEdges": [
            { "id": "e1", "source": "a", "target": "b" },
            { "id": "e2", "source": "a", "target": "s" },
            { "id": "e3", "source": "a", "target": "b", "sourceHandle": "" }
        ]
    });
    let flow = import_flow(&doc).unwrap();
    // e2 targets the start node, e3 reuses the default output of 'a'.
    let ids: Vec<&str> = flow.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e1"]);
}

#[test]
fn test_import_malformed_data_of_known_kind_degrades() {
    let doc = json!({
        "flowNodes": [
            { "id": "s", "type": "flowStartNode" },
            { "id": "t", "type": "text", "data": { "message": 42 } }
        ]
    });
    let flow = import_flow(&doc).unwrap();
    // The payload could not be parsed; the node survives with fresh defaults.
    assert_eq!(flow.node("t").unwrap().data, NodeData::Text(TextData::default()));
}
