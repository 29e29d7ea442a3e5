//! Reconstitutes editor state from a persisted flow document.
//!
//! The importer is deliberately forgiving: it accepts both collection
//! spellings (`flowNodes`/`flowEdges` and `nodes`/`edges`), every historical
//! type-naming convention, both position shapes, and edges whose handles are
//! still concatenated into the endpoint strings. A malformed document is
//! rejected as a whole; a single bad node or edge is logged and skipped so it
//! cannot corrupt the rest of the graph.

use crate::error::ImportError;
use crate::export::sanitize::sanitize_flow;
use crate::graph::{Flow, FlowEdge, FlowNode, FlowType, TriggerConfig, Viewport};
use crate::node::{NodeData, NodeKind};
use ahash::AHashSet;
use serde_json::Value;
use uuid::Uuid;

pub mod handle;
pub mod position;

pub use handle::{DecodedEndpoint, decode_endpoint};
pub use position::resolve_position;

/// Keys a node's raw type string may live under.
const TYPE_KEYS: [&str; 4] = ["type", "flowNodeType", "flownodetype", "nodeType"];

/// Parses JSON text and imports it. See [`import_flow`].
pub fn import_flow_str(text: &str) -> Result<Flow, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::JsonParse(e.to_string()))?;
    import_flow(&value)
}

/// Imports a persisted flow document into editor state.
///
/// Fails only on structural problems (not an object, node collection missing
/// or not an array, more than one start node); everything else degrades per
/// record. The returned flow always satisfies the graph invariants.
pub fn import_flow(raw: &Value) -> Result<Flow, ImportError> {
    let mut doc = raw.clone();
    sanitize_flow(&mut doc);
    let Some(obj) = doc.as_object() else {
        return Err(ImportError::NotAnObject {
            found: json_type_name(&doc).to_string(),
        });
    };

    let nodes_value = obj
        .get("flowNodes")
        .or_else(|| obj.get("nodes"))
        .ok_or(ImportError::MissingNodes)?;
    let raw_nodes = nodes_value
        .as_array()
        .ok_or_else(|| ImportError::NotAnArray {
            field: "flowNodes",
            found: json_type_name(nodes_value).to_string(),
        })?;
    let raw_edges: &[Value] = match obj.get("flowEdges").or_else(|| obj.get("edges")) {
        None => &[],
        Some(value) => value
            .as_array()
            .ok_or_else(|| ImportError::NotAnArray {
                field: "flowEdges",
                found: json_type_name(value).to_string(),
            })?
            .as_slice(),
    };

    let mut nodes: Vec<FlowNode> = Vec::with_capacity(raw_nodes.len());
    let mut known_ids: AHashSet<String> = AHashSet::with_capacity(raw_nodes.len());
    for raw_node in raw_nodes {
        let Some(node_obj) = raw_node.as_object() else {
            log::warn!("Skipping non-object node entry");
            continue;
        };
        let Some(id) = node_obj.get("id").and_then(Value::as_str) else {
            log::warn!("Skipping node without an id");
            continue;
        };
        if !known_ids.insert(id.to_string()) {
            log::warn!("Skipping node with duplicate id '{id}'");
            continue;
        }
        let raw_type = TYPE_KEYS
            .iter()
            .find_map(|key| node_obj.get(*key).and_then(Value::as_str));
        let kind = NodeKind::normalize(raw_type);
        if kind == NodeKind::Default {
            log::debug!(
                "Node '{id}' has unrecognized type {raw_type:?}; keeping raw data for the fallback renderer"
            );
        }
        let data_value = node_obj.get("data").cloned().unwrap_or(Value::Null);
        nodes.push(FlowNode {
            id: id.to_string(),
            kind,
            position: resolve_position(raw_node),
            data: NodeData::from_value(kind, &data_value),
        });
    }

    let start_count = nodes.iter().filter(|n| n.kind.is_start()).count();
    if start_count > 1 {
        return Err(ImportError::MultipleStartNodes { count: start_count });
    }
    if start_count == 0 {
        log::warn!("Flow has no start node; synthesizing one");
        let id = Uuid::new_v4().to_string();
        known_ids.insert(id.clone());
        nodes.insert(
            0,
            FlowNode {
                id,
                kind: NodeKind::FlowStart,
                position: position::random_position(),
                data: NodeData::fresh(NodeKind::FlowStart),
            },
        );
    }

    let flow_trigger: Option<TriggerConfig> = obj
        .get("triggerConfig")
        .and_then(|v| serde_json::from_value(v.clone()).ok());
    let trigger_config = merge_trigger_config(&mut nodes, flow_trigger);

    let start_id = nodes
        .iter()
        .find(|n| n.kind.is_start())
        .map(|n| n.id.clone())
        .unwrap_or_default();

    let mut edges: Vec<FlowEdge> = Vec::with_capacity(raw_edges.len());
    for raw_edge in raw_edges {
        let Some(edge_obj) = raw_edge.as_object() else {
            log::warn!("Skipping non-object edge entry");
            continue;
        };
        let id = edge_obj
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let (Some(source_raw), Some(target_raw)) = (
            edge_obj.get("source").and_then(Value::as_str),
            edge_obj.get("target").and_then(Value::as_str),
        ) else {
            log::warn!("Dropping edge '{id}': missing source or target");
            continue;
        };
        let Some(source) = resolve_endpoint(source_raw, &known_ids) else {
            log::warn!("Dropping edge '{id}': unresolvable source '{source_raw}'");
            continue;
        };
        let Some(target) = resolve_endpoint(target_raw, &known_ids) else {
            log::warn!("Dropping edge '{id}': unresolvable target '{target_raw}'");
            continue;
        };
        if target.node_id == start_id {
            log::warn!("Dropping edge '{id}': the start node cannot be a target");
            continue;
        }
        let explicit_handle = edge_obj
            .get("sourceHandle")
            .and_then(Value::as_str)
            .filter(|h| !h.is_empty());
        let source_handle = explicit_handle.map(str::to_string).or(source.handle);
        if edges
            .iter()
            .any(|e| e.source == source.node_id && e.source_handle == source_handle)
        {
            log::warn!(
                "Dropping edge '{id}': output {source_handle:?} of node '{}' is already connected",
                source.node_id
            );
            continue;
        }
        if source.node_id == start_id && edges.iter().any(|e| e.source == start_id) {
            log::warn!("Dropping edge '{id}': the start node already has an outgoing edge");
            continue;
        }
        edges.push(FlowEdge {
            id,
            source: source.node_id,
            target: target.node_id,
            source_handle,
        });
    }

    let viewport: Option<Viewport> = obj
        .get("transform")
        .and_then(|v| serde_json::from_value(v.clone()).ok());
    let flow_type: FlowType = obj
        .get("flowType")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    Ok(Flow {
        name: obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Untitled flow")
            .to_string(),
        is_active: obj
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        flow_type,
        nodes,
        edges,
        trigger_config,
        viewport,
    })
}

/// Matches an edge endpoint to a known node, decoding composite strings when
/// the raw value is not a node id itself.
fn resolve_endpoint(raw: &str, known_ids: &AHashSet<String>) -> Option<DecodedEndpoint> {
    if known_ids.contains(raw) {
        return Some(DecodedEndpoint {
            node_id: raw.to_string(),
            handle: None,
        });
    }
    let decoded = decode_endpoint(raw);
    known_ids.contains(&decoded.node_id).then_some(decoded)
}

/// Merges flow-level trigger settings into the start node's data. Node-level
/// values win; flow-level values only fill the gaps. Returns the merged
/// config, which becomes the flow-level value so both homes agree.
fn merge_trigger_config(
    nodes: &mut [FlowNode],
    flow_trigger: Option<TriggerConfig>,
) -> Option<TriggerConfig> {
    let start = nodes.iter_mut().find(|n| n.kind.is_start())?;
    let NodeData::FlowStart(data) = &mut start.data else {
        return flow_trigger;
    };
    if let Some(config) = &flow_trigger {
        let node_unset = data.keywords.is_empty() && data.regex.is_empty();
        if data.keywords.is_empty() {
            data.keywords = config.keywords.clone();
        }
        if data.regex.is_empty() {
            data.regex = config.regex.clone();
        }
        if node_unset {
            data.case_sensitive = config.case_sensitive;
        }
    }
    let merged = TriggerConfig::from(&*data);
    (!merged.is_empty()).then_some(merged)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
