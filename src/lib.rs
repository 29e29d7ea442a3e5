//! # Waflow - WhatsApp Chatbot Flow Graph Model
//!
//! **Waflow** is the authoring and serialization layer for WhatsApp chatbot
//! conversation flows: a typed node/edge graph model, an editing API that
//! enforces the graph invariants, and a forgiving import/export
//! transformation between the editor representation and the persisted
//! backend JSON (which has grown several historical shapes over time).
//!
//! ## Core Workflow
//!
//! 1.  **Author**: Build a [`graph::Flow`] with the editing API - place
//!     nodes, connect button and list-item outputs, set the trigger
//!     configuration.
//! 2.  **Save**: Serialize the flow with [`export::export_flow`]. The
//!     exporter strips nothing because the typed model never holds transient
//!     UI state; it synthesizes the redundant backend fields and writes the
//!     trigger configuration to both of its historical homes.
//! 3.  **Load**: Reconstitute editor state with [`import::import_flow`],
//!     which tolerates every legacy naming convention, decodes handle ids
//!     concatenated into edge endpoints, and drops (rather than fails on)
//!     individual unresolvable records.
//!
//! ## Quick Start
//!
//! ```rust
//! use waflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut flow = Flow::new("Welcome", FlowType::Inbound);
//!     flow.set_trigger_config(TriggerConfig {
//!         keywords: vec!["hello".to_string(), "hi".to_string()],
//!         ..TriggerConfig::default()
//!     });
//!
//!     let start_id = flow.start_node().unwrap().id.clone();
//!     let menu_id = flow.add_node(NodeKind::TextButton, Position::new(250.0, 220.0))?;
//!     let catalog_id = flow.add_node(NodeKind::Catalog, Position::new(460.0, 380.0))?;
//!
//!     let mut menu = TextButtonData {
//!         message: "What can we do for you?".to_string(),
//!         buttons: vec![Button::with_text("Browse catalog")],
//!     };
//!     let browse_handle = menu.buttons[0].handle();
//!     flow.update_data(&menu_id, NodeData::TextButton(menu))?;
//!
//!     flow.connect(&start_id, None, &menu_id)?;
//!     flow.connect(&menu_id, Some(&browse_handle), &catalog_id)?;
//!
//!     // Save, then restore editor state later.
//!     let saved = export_flow(&flow);
//!     let restored = import_flow(&saved)?;
//!     assert_eq!(restored.nodes.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod graph;
pub mod import;
pub mod node;
pub mod prelude;
