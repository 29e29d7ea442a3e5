//! Strips transient, UI-injected fields from raw flow JSON before it is
//! persisted or re-parsed. Sanitizing is idempotent: running it over an
//! already-clean document changes nothing.

use super::EDGE_TYPE;
use serde_json::Value;

/// Fields the canvas runtime injects onto nodes that must never be persisted.
pub const TRANSIENT_NODE_FIELDS: [&str; 7] = [
    "updateNodeData",
    "label",
    "width",
    "height",
    "selected",
    "dragging",
    "positionAbsolute",
];

/// UI-injected fields that leak into the node `data` object itself.
const TRANSIENT_DATA_FIELDS: [&str; 2] = ["updateNodeData", "label"];

/// Canonical key for the button list; `buttons` is the legacy spelling.
const BUTTONS_KEY: &str = "interactiveButtonsItems";
const LEGACY_BUTTONS_KEY: &str = "buttons";

/// Sanitizes every node and edge in a persisted flow document, whichever of
/// the two collection spellings it uses.
pub fn sanitize_flow(doc: &mut Value) {
    let Some(obj) = doc.as_object_mut() else {
        return;
    };
    for key in ["flowNodes", "nodes"] {
        if let Some(Value::Array(nodes)) = obj.get_mut(key) {
            for node in nodes {
                sanitize_node(node);
            }
        }
    }
    for key in ["flowEdges", "edges"] {
        if let Some(Value::Array(edges)) = obj.get_mut(key) {
            for edge in edges {
                sanitize_edge(edge);
            }
        }
    }
}

/// Removes runtime-added node fields and collapses duplicate button
/// representations, keeping the canonical `interactiveButtonsItems` key.
pub fn sanitize_node(node: &mut Value) {
    let Some(obj) = node.as_object_mut() else {
        return;
    };
    for field in TRANSIENT_NODE_FIELDS {
        obj.remove(field);
    }
    if let Some(data) = obj.get_mut("data").and_then(Value::as_object_mut) {
        for field in TRANSIENT_DATA_FIELDS {
            data.remove(field);
        }
        if let Some(legacy) = data.remove(LEGACY_BUTTONS_KEY) {
            if !data.contains_key(BUTTONS_KEY) {
                data.insert(BUTTONS_KEY.to_string(), legacy);
            }
        }
    }
}

/// Flattens nested handle fields up to the top level (top level wins),
/// drops empty optionals, and defaults the edge type.
pub fn sanitize_edge(edge: &mut Value) {
    let Some(obj) = edge.as_object_mut() else {
        return;
    };
    obj.remove("selected");
    if let Some(Value::Object(data)) = obj.remove("data") {
        for key in ["sourceHandle", "targetHandle"] {
            if let Some(value) = data.get(key) {
                if !obj.contains_key(key) && !value.is_null() {
                    obj.insert(key.to_string(), value.clone());
                }
            }
        }
    }
    for key in ["sourceHandle", "targetHandle"] {
        let empty = match obj.get(key) {
            Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            _ => false,
        };
        if empty {
            obj.remove(key);
        }
    }
    let has_type = matches!(obj.get("type"), Some(Value::String(s)) if !s.is_empty());
    if !has_type {
        obj.insert("type".to_string(), Value::String(EDGE_TYPE.to_string()));
    }
}
