use thiserror::Error;

/// Errors that can occur while importing a persisted flow document.
///
/// Per-node and per-edge problems inside an otherwise valid document are not
/// represented here: those are logged and skipped so a single bad record
/// cannot abort the whole import.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParse(String),

    #[error("Flow JSON must be an object, found {found}")]
    NotAnObject { found: String },

    #[error("Flow JSON has no node collection ('flowNodes' or 'nodes')")]
    MissingNodes,

    #[error("Expected '{field}' to be an array, found {found}")]
    NotAnArray { field: &'static str, found: String },

    #[error("Flow contains {count} start nodes, expected exactly one")]
    MultipleStartNodes { count: usize },
}

/// Errors that can occur while exporting a flow to its persisted form.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Failed to serialize flow JSON: {0}")]
    Serialize(String),
}

/// Errors raised by the flow editing API. Every failed operation leaves the
/// flow untouched.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Node '{0}' not found in the flow")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the flow")]
    EdgeNotFound(String),

    #[error("A flow can only contain one start node")]
    DuplicateStartNode,

    #[error("The start node cannot be removed")]
    StartNodeRemoval,

    #[error("The start node cannot be duplicated")]
    StartNodeDuplication,

    #[error("The start node cannot be the target of a connection")]
    EdgeIntoStartNode,

    #[error("The start node already has an outgoing connection")]
    StartNodeFanOut,

    #[error("Output '{handle}' of node '{node}' is already connected")]
    OutputTaken { node: String, handle: String },

    #[error("A node cannot be connected to itself")]
    SelfLoop,

    #[error("Node '{node_id}' holds '{actual}' data, but '{expected}' was provided")]
    DataKindMismatch {
        node_id: String,
        expected: String,
        actual: String,
    },
}
