#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Workflow Client Common
//!
//! Shared utilities for a workflow execution client.
//!
//! ## Overview
//!
//! Two independent pieces live here:
//!
//! - **History assembly**: a history service returns an execution's events as a list of
//!   separately encoded batches. [`history::HistoryAssembler`] decodes them in order through
//!   an injected decoder, treats an empty batch as corruption, and can narrow the result to
//!   the execution's closing event.
//! - **Bounded waits**: [`sync::await_wait_group`] and friends join a group of concurrent
//!   members but give up after a deadline, reporting `true` (joined) or `false` (timed out).
//!
//! ## Module Organization
//!
//! - [`history`] - Batch decoding and history assembly
//! - [`sync`] - Wait groups and deadline-bounded joins
//! - [`config`] - Layered configuration loading
//! - [`logging`] - Tracing subscriber setup and structured logging macros
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use workflow_client_common::history::{DataBlob, HistoryAssembler, HistoryEventFilterType};
//! use workflow_client_common::sync::{await_wait_group_blocking, WaitGroup};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assembler = HistoryAssembler::json();
//! let history = assembler.assemble(
//!     &[DataBlob::json(r#"[{"eventId": 1, "eventType": "WorkflowExecutionStarted"}]"#)],
//!     HistoryEventFilterType::AllEvent,
//! )?;
//! assert_eq!(history.len(), 1);
//!
//! let wg = WaitGroup::new();
//! assert!(await_wait_group_blocking(&wg, Duration::from_millis(10)));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod history;
pub mod logging;
pub mod sync;

pub use config::{ClientConfig, ConfigManager, ConfigurationError};
pub use history::{
    BatchDecoder, DataBlob, History, HistoryAssembler, HistoryError, HistoryEvent,
    HistoryEventFilterType,
};
pub use sync::{BoundedWait, JoinTarget, WaitGroup};
