//! # History Module
//!
//! Builds a workflow execution's [`History`] from the encoded batches a history
//! service hands back.
//!
//! ## Architecture
//!
//! - **Types**: [`DataBlob`] batches in, [`History`] out, with [`HistoryEventFilterType`]
//!   selecting between the full history and its closing event
//! - **Decoding**: pluggable through [`BatchDecoder`]; [`JsonBatchDecoder`] ships built in
//! - **Assembly**: [`HistoryAssembler`] decodes batches in order, rejects empty batches as
//!   corruption and applies the filter
//!
//! ## Usage
//!
//! ```rust
//! use workflow_client_common::history::{
//!     deserialize_blob_data_to_history_events, DataBlob, HistoryEventFilterType,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let batches = vec![
//!     DataBlob::json(r#"[{"eventId": 1, "eventType": "WorkflowExecutionStarted"}]"#),
//!     DataBlob::json(r#"[{"eventId": 2, "eventType": "WorkflowExecutionCompleted"}]"#),
//! ];
//!
//! let close = deserialize_blob_data_to_history_events(&batches, HistoryEventFilterType::CloseEvent)?;
//! assert_eq!(close.len(), 1);
//! assert!(close.events()[0].is_close_event());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod decoder;
pub mod errors;
pub mod types;

pub use assembler::{deserialize_blob_data_to_history_events, HistoryAssembler};
pub use decoder::{BatchDecoder, FnDecoder, JsonBatchDecoder};
pub use errors::{DecodeError, HistoryError};
pub use types::{DataBlob, EncodingType, History, HistoryEvent, HistoryEventFilterType, HistoryEventType};
