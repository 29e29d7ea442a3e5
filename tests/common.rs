//! Common test utilities for building flows and persisted documents.
use serde_json::{Value, json};
use waflow::prelude::*;

/// Builds a small support flow through the editing API.
///
/// start -> menu (text-button, 2 buttons); "FAQ" -> text node,
/// "Talk to an agent" -> ask-question node.
#[allow(dead_code)]
pub fn sample_flow() -> Flow {
    let mut flow = Flow::new("Support", FlowType::Inbound);
    flow.set_trigger_config(TriggerConfig {
        keywords: vec!["help".to_string()],
        ..TriggerConfig::default()
    });

    let start_id = flow.start_node().unwrap().id.clone();
    let menu_id = flow
        .add_node(NodeKind::TextButton, Position::new(250.0, 220.0))
        .unwrap();
    let faq_id = flow
        .add_node(NodeKind::Text, Position::new(80.0, 400.0))
        .unwrap();
    let agent_id = flow
        .add_node(NodeKind::AskQuestion, Position::new(420.0, 400.0))
        .unwrap();

    let menu = TextButtonData {
        message: "How can we help?".to_string(),
        buttons: vec![Button::with_text("FAQ"), Button::with_text("Talk to an agent")],
    };
    let faq_handle = menu.buttons[0].handle();
    let agent_handle = menu.buttons[1].handle();
    flow.update_data(&menu_id, NodeData::TextButton(menu))
        .unwrap();

    flow.connect(&start_id, None, &menu_id).unwrap();
    flow.connect(&menu_id, Some(&faq_handle), &faq_id).unwrap();
    flow.connect(&menu_id, Some(&agent_handle), &agent_id)
        .unwrap();
    flow
}

/// A persisted document in the oldest export shape: `flowNodeType` names,
/// stringly `flowNodePosition`, handle ids concatenated into edge sources,
/// legacy button key, transient UI fields, and a flow-level-only trigger
/// config. One edge points at a node that does not exist.
#[allow(dead_code)]
pub fn legacy_doc() -> Value {
    json!({
        "name": "Legacy",
        "flowType": "inbound",
        "flowNodes": [
            {
                "id": "start-1",
                "flowNodeType": "FlowStartNode",
                "flowNodePosition": { "posX": "120.5", "posY": "40" },
                "data": {}
            },
            {
                "id": "menu-1",
                "flowNodeType": "InteractiveButtons",
                "flowNodePosition": { "posX": 200, "posY": 180 },
                "data": {
                    "text": "Pick one",
                    "buttons": [
                        { "id": "b1", "text": "Orders" },
                        { "id": "b2", "text": "Returns" }
                    ],
                    "updateNodeData": "[Function]",
                    "label": "Menu"
                },
                "selected": true,
                "width": 240,
                "height": 120
            },
            {
                "id": "orders-1",
                "flowNodeType": "text_message",
                "data": { "message": "Here are your orders." }
            },
            {
                "id": "mystery-1",
                "flowNodeType": "HologramMessage",
                "data": { "shape": "cube" }
            }
        ],
        "flowEdges": [
            { "id": "e1", "source": "start-1", "target": "menu-1" },
            { "id": "e2", "source": "menu-1btn-b1", "target": "orders-1" },
            { "id": "e3", "source": "menu-1btn-b2", "target": "ghost-9" },
            {
                "id": "e4",
                "source": "orders-1",
                "target": "mystery-1",
                "data": { "sourceHandle": null }
            }
        ],
        "triggerConfig": { "keywords": ["hello", "hi"], "regex": "", "caseSensitive": true },
        "transform": { "posX": -40.0, "posY": 12.5, "zoom": 0.75 }
    })
}
