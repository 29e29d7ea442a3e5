//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so a single import
//! covers typical authoring and import/export work.

// Graph model and editing
pub use crate::graph::{Flow, FlowEdge, FlowNode, FlowType, Position, TriggerConfig, Viewport};

// Node kinds and payloads
pub use crate::node::{
    AddTagData, AskAddressData, AskLocationData, AskQuestionData, Button, CatalogData, ListData,
    ListItem, ListSection, MediaButtonData, MediaData, MediaType, MultiProductData, NodeData,
    NodeKind, SetCustomFieldData, SetVariableData, SingleProductData, StartData, SummaryData,
    TemplateData, TextButtonData, TextData, ValidationType,
};

// Import / export entry points
pub use crate::export::{EDGE_TYPE, export_flow, export_flow_string, sanitize_flow};
pub use crate::import::{decode_endpoint, import_flow, import_flow_str, resolve_position};

// Error types
pub use crate::error::{ExportError, GraphError, ImportError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
