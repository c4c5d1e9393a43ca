//! History data model: encoded batches, events, and assembled histories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding tag carried by every [`DataBlob`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingType {
    ThriftRw,
    Json,
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingType::ThriftRw => write!(f, "thriftrw"),
            EncodingType::Json => write!(f, "json"),
        }
    }
}

/// One encoded batch of history events as produced upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBlob {
    pub encoding: EncodingType,
    pub data: Vec<u8>,
}

impl DataBlob {
    pub fn new(encoding: EncodingType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            encoding,
            data: data.into(),
        }
    }

    /// Convenience constructor for a JSON-encoded batch
    pub fn json(data: impl Into<Vec<u8>>) -> Self {
        Self::new(EncodingType::Json, data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Post-processing applied to an assembled history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventFilterType {
    /// Keep every event
    #[default]
    #[serde(alias = "all")]
    AllEvent,
    /// Keep only the final (closing) event
    #[serde(alias = "close_event_only")]
    CloseEvent,
}

impl fmt::Display for HistoryEventFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEventFilterType::AllEvent => write!(f, "all_event"),
            HistoryEventFilterType::CloseEvent => write!(f, "close_event"),
        }
    }
}

impl FromStr for HistoryEventFilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "all_event" => Ok(HistoryEventFilterType::AllEvent),
            "close_event" | "close_event_only" => Ok(HistoryEventFilterType::CloseEvent),
            other => Err(format!("Unknown history event filter type: {other}")),
        }
    }
}

/// Kind of state transition recorded by a [`HistoryEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryEventType {
    WorkflowExecutionStarted,
    WorkflowExecutionCompleted,
    WorkflowExecutionFailed,
    WorkflowExecutionTimedOut,
    WorkflowExecutionCanceled,
    WorkflowExecutionTerminated,
    WorkflowExecutionContinuedAsNew,
    WorkflowExecutionCancelRequested,
    WorkflowExecutionSignaled,
    DecisionTaskScheduled,
    DecisionTaskStarted,
    DecisionTaskCompleted,
    DecisionTaskTimedOut,
    DecisionTaskFailed,
    ActivityTaskScheduled,
    ActivityTaskStarted,
    ActivityTaskCompleted,
    ActivityTaskFailed,
    ActivityTaskTimedOut,
    ActivityTaskCancelRequested,
    ActivityTaskCanceled,
    TimerStarted,
    TimerFired,
    TimerCanceled,
    MarkerRecorded,
    StartChildWorkflowExecutionInitiated,
    ChildWorkflowExecutionStarted,
    ChildWorkflowExecutionCompleted,
    ChildWorkflowExecutionFailed,
    SignalExternalWorkflowExecutionInitiated,
    UpsertWorkflowSearchAttributes,
}

impl HistoryEventType {
    /// Whether this event type terminates a workflow execution
    pub fn is_close_event(&self) -> bool {
        matches!(
            self,
            HistoryEventType::WorkflowExecutionCompleted
                | HistoryEventType::WorkflowExecutionFailed
                | HistoryEventType::WorkflowExecutionTimedOut
                | HistoryEventType::WorkflowExecutionCanceled
                | HistoryEventType::WorkflowExecutionTerminated
                | HistoryEventType::WorkflowExecutionContinuedAsNew
        )
    }
}

/// One recorded state transition of a workflow execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub event_id: i64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: HistoryEventType,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub task_id: i64,
    /// Event-type specific attributes, kept undecoded
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl HistoryEvent {
    pub fn new(event_id: i64, event_type: HistoryEventType) -> Self {
        Self {
            event_id,
            timestamp: None,
            event_type,
            version: 0,
            task_id: 0,
            attributes: serde_json::Value::Null,
        }
    }

    pub fn is_close_event(&self) -> bool {
        self.event_type.is_close_event()
    }
}

/// Ordered sequence of events for one workflow execution
///
/// Order matches the order of the input batches and, within a batch, the order
/// in which the decoder emitted the events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<E = HistoryEvent> {
    events: Vec<E>,
}

impl<E> History<E> {
    pub fn new(events: Vec<E>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn into_events(self) -> Vec<E> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last_event(&self) -> Option<&E> {
        self.events.last()
    }
}

impl<E> IntoIterator for History<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a History<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
