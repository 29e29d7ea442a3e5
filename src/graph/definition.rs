use crate::node::{NodeData, NodeKind, StartData};
use serde::{Deserialize, Serialize};

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    #[default]
    Inbound,
    Outbound,
}

/// Keyword/regex matching that starts an inbound flow.
///
/// Historically this lived both at the flow level and inside the start
/// node's data; the model keeps the two in sync and the exporter writes
/// both for backward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerConfig {
    pub keywords: Vec<String>,
    pub regex: String,
    pub case_sensitive: bool,
}

impl TriggerConfig {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.regex.is_empty()
    }
}

impl From<&StartData> for TriggerConfig {
    fn from(data: &StartData) -> Self {
        Self {
            keywords: data.keywords.clone(),
            regex: data.regex.clone(),
            case_sensitive: data.case_sensitive,
        }
    }
}

/// Saved camera pan/zoom, restored when the flow is reopened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub pos_x: f64,
    pub pos_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pos_x: 0.0,
            pos_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A node on the canvas: identity, kind, placement, and its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

/// A directed connection between two nodes.
///
/// `source_handle` names the logical output the edge leaves from: `None` for
/// single-output nodes, `btn-<buttonId>` for a reply button, or
/// `item-<itemId>-source` for a list item.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
}

/// The top-level authored unit: a named conversation graph plus its trigger
/// configuration and saved viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub name: String,
    pub is_active: bool,
    pub flow_type: FlowType,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub trigger_config: Option<TriggerConfig>,
    pub viewport: Option<Viewport>,
}

impl Flow {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn start_node(&self) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.kind.is_start())
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// All edges leaving `source`, across every handle.
    pub fn outgoing<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// The edge leaving a specific `(source, handle)` output, if connected.
    pub fn edge_from(&self, source: &str, handle: Option<&str>) -> Option<&FlowEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.source_handle.as_deref() == handle)
    }
}
