//! Writes a [`Flow`] back to the persisted JSON document shape.
//!
//! Exporting synthesizes the redundant per-node fields the messaging backend
//! reads (`nodeResultId` on buttons, derived from the live edges) and writes
//! the trigger configuration to both of its historical homes. Transient UI
//! fields never exist on the typed model, so the output is clean by
//! construction; [`sanitize`] covers raw documents that bypass the model.

use crate::error::ExportError;
use crate::graph::{Flow, FlowEdge, FlowNode, TriggerConfig};
use crate::node::NodeData;
use itertools::Itertools;
use serde_json::{Map, Value, json};

pub mod sanitize;

pub use sanitize::{sanitize_edge, sanitize_flow, sanitize_node};

/// Edge kind constant written for every persisted edge.
pub const EDGE_TYPE: &str = "buttonedge";

/// Serializes the flow to its persisted JSON document.
pub fn export_flow(flow: &Flow) -> Value {
    let outgoing = flow
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e))
        .into_group_map();

    let flow_nodes: Vec<Value> = flow
        .nodes
        .iter()
        .map(|node| {
            let edges = outgoing
                .get(node.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            export_node(node, edges)
        })
        .collect();
    let flow_edges: Vec<Value> = flow.edges.iter().map(export_edge).collect();

    let mut doc = Map::new();
    doc.insert("name".to_string(), Value::String(flow.name.clone()));
    doc.insert("isActive".to_string(), Value::Bool(flow.is_active));
    doc.insert(
        "flowType".to_string(),
        serde_json::to_value(flow.flow_type).unwrap_or(Value::Null),
    );
    doc.insert("flowNodes".to_string(), Value::Array(flow_nodes));
    doc.insert("flowEdges".to_string(), Value::Array(flow_edges));
    if let Some(trigger) = effective_trigger(flow) {
        doc.insert(
            "triggerConfig".to_string(),
            serde_json::to_value(&trigger).unwrap_or(Value::Null),
        );
    }
    if let Some(viewport) = &flow.viewport {
        doc.insert(
            "transform".to_string(),
            serde_json::to_value(viewport).unwrap_or(Value::Null),
        );
    }
    Value::Object(doc)
}

/// Pretty-printed variant of [`export_flow`].
pub fn export_flow_string(flow: &Flow) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&export_flow(flow))
        .map_err(|e| ExportError::Serialize(e.to_string()))
}

/// The flow-level trigger config to persist: the explicit one if set,
/// otherwise the start node's data. Empty configs are omitted entirely.
fn effective_trigger(flow: &Flow) -> Option<TriggerConfig> {
    flow.trigger_config
        .clone()
        .or_else(|| match flow.start_node().map(|n| &n.data) {
            Some(NodeData::FlowStart(data)) => Some(TriggerConfig::from(data)),
            _ => None,
        })
        .filter(|config| !config.is_empty())
}

fn export_node(node: &FlowNode, outgoing: &[&FlowEdge]) -> Value {
    // nodeResultId is persisted redundantly for the backend; the edges stay
    // the source of truth in the editor.
    let mut data = node.data.clone();
    if let Some(buttons) = data.buttons_mut() {
        for button in buttons {
            let handle = button.handle();
            button.node_result_id = outgoing
                .iter()
                .find(|e| e.source_handle.as_deref() == Some(handle.as_str()))
                .map(|e| e.target.clone());
        }
    }
    json!({
        "id": node.id,
        "type": node.kind.as_str(),
        "position": { "x": node.position.x, "y": node.position.y },
        "data": data.to_value(),
    })
}

fn export_edge(edge: &FlowEdge) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), Value::String(edge.id.clone()));
    obj.insert("source".to_string(), Value::String(edge.source.clone()));
    obj.insert("target".to_string(), Value::String(edge.target.clone()));
    if let Some(handle) = edge.source_handle.as_deref().filter(|h| !h.is_empty()) {
        obj.insert(
            "sourceHandle".to_string(),
            Value::String(handle.to_string()),
        );
    }
    obj.insert("type".to_string(), Value::String(EDGE_TYPE.to_string()));
    Value::Object(obj)
}
