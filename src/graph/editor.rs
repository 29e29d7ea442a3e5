//! Mutation API for [`Flow`]. Every operation validates the graph invariants
//! up front and leaves the flow untouched on error.

use crate::error::GraphError;
use crate::graph::definition::{Flow, FlowEdge, FlowNode, FlowType, Position, TriggerConfig, Viewport};
use crate::node::{NodeData, NodeKind, StartData};
use uuid::Uuid;

/// Canvas placement of the start node in a brand-new flow.
const START_POSITION: Position = Position { x: 250.0, y: 60.0 };

/// Offset applied to a duplicated node so it does not cover the original.
const DUPLICATE_OFFSET: (f64, f64) = (40.0, 40.0);

impl Flow {
    /// Creates an empty flow containing only its start node.
    pub fn new(name: &str, flow_type: FlowType) -> Self {
        let start = FlowNode {
            id: Uuid::new_v4().to_string(),
            kind: NodeKind::FlowStart,
            position: START_POSITION,
            data: NodeData::fresh(NodeKind::FlowStart),
        };
        Self {
            name: name.to_string(),
            is_active: false,
            flow_type,
            nodes: vec![start],
            edges: Vec::new(),
            trigger_config: None,
            viewport: None,
        }
    }

    /// Places a fresh node of `kind` on the canvas and returns its id.
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> Result<String, GraphError> {
        if kind.is_start() && self.start_node().is_some() {
            return Err(GraphError::DuplicateStartNode);
        }
        let id = Uuid::new_v4().to_string();
        self.nodes.push(FlowNode {
            id: id.clone(),
            kind,
            position,
            data: NodeData::fresh(kind),
        });
        Ok(id)
    }

    /// Duplicates a node: fresh id, offset position, and content fields reset
    /// via [`NodeData::duplicate_defaults`]. The start node cannot be
    /// duplicated.
    pub fn duplicate_node(&mut self, id: &str) -> Result<String, GraphError> {
        let original = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        if original.kind.is_start() {
            return Err(GraphError::StartNodeDuplication);
        }
        let copy_id = Uuid::new_v4().to_string();
        let copy = FlowNode {
            id: copy_id.clone(),
            kind: original.kind,
            position: original.position.offset(DUPLICATE_OFFSET.0, DUPLICATE_OFFSET.1),
            data: original.data.duplicate_defaults(),
        };
        self.nodes.push(copy);
        Ok(copy_id)
    }

    /// Connects an output of `source` to `target`.
    ///
    /// Enforced invariants: both endpoints exist, no self-loop, the start
    /// node takes no incoming edges and keeps at most one outgoing edge, and
    /// each `(source, handle)` output connects to at most one downstream
    /// node.
    pub fn connect(
        &mut self,
        source: &str,
        source_handle: Option<&str>,
        target: &str,
    ) -> Result<String, GraphError> {
        let source_node = self
            .node(source)
            .ok_or_else(|| GraphError::NodeNotFound(source.to_string()))?;
        let source_is_start = source_node.kind.is_start();
        let target_node = self
            .node(target)
            .ok_or_else(|| GraphError::NodeNotFound(target.to_string()))?;
        if source == target {
            return Err(GraphError::SelfLoop);
        }
        if target_node.kind.is_start() {
            return Err(GraphError::EdgeIntoStartNode);
        }
        if source_is_start && self.outgoing(source).next().is_some() {
            return Err(GraphError::StartNodeFanOut);
        }
        if self.edge_from(source, source_handle).is_some() {
            return Err(GraphError::OutputTaken {
                node: source.to_string(),
                handle: source_handle.unwrap_or("default").to_string(),
            });
        }
        let edge_id = Uuid::new_v4().to_string();
        self.edges.push(FlowEdge {
            id: edge_id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: source_handle.map(str::to_string),
        });
        Ok(edge_id)
    }

    /// Removes an edge by id.
    pub fn disconnect(&mut self, edge_id: &str) -> Result<(), GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        self.edges.remove(index);
        Ok(())
    }

    /// Removes a node and every edge attached to it. The start node cannot
    /// be removed.
    pub fn remove_node(&mut self, id: &str) -> Result<(), GraphError> {
        let node = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        if node.kind.is_start() {
            return Err(GraphError::StartNodeRemoval);
        }
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(())
    }

    /// Replaces a node's payload. The payload kind must match the node kind.
    pub fn update_data(&mut self, id: &str, data: NodeData) -> Result<(), GraphError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        if data.kind() != node.kind {
            return Err(GraphError::DataKindMismatch {
                node_id: id.to_string(),
                expected: node.kind.to_string(),
                actual: data.kind().to_string(),
            });
        }
        node.data = data;
        Ok(())
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Sets the trigger configuration, mirroring it into the start node's
    /// data so both historical homes stay in sync.
    pub fn set_trigger_config(&mut self, config: TriggerConfig) {
        if let Some(start) = self.nodes.iter_mut().find(|n| n.kind.is_start()) {
            start.data = NodeData::FlowStart(StartData {
                keywords: config.keywords.clone(),
                regex: config.regex.clone(),
                case_sensitive: config.case_sensitive,
            });
        }
        self.trigger_config = Some(config);
    }
}
