//! # History Error Types
//!
//! Errors surfaced while turning encoded batches into a [`History`](super::History).

use super::types::EncodingType;
use thiserror::Error;

/// Failure of a history assembly call
///
/// Generic over the decoder's own error type so the decoder's failure is handed back
/// to the caller untouched. Assembly is all-or-nothing: any variant means no history
/// was produced.
#[derive(Debug, Error)]
pub enum HistoryError<E> {
    /// The decoder rejected a batch
    #[error("Failed to decode history batch {batch_index}: {source}")]
    Decode {
        batch_index: usize,
        #[source]
        source: E,
    },

    /// A batch decoded successfully but contained no events
    #[error("Corrupted history event batch {batch_index}, empty events")]
    CorruptedBatch { batch_index: usize },

    /// A close-event-only history was requested over zero batches
    #[error("Cannot select close event: history contains no events")]
    EmptyHistory,
}

impl<E> HistoryError<E> {
    /// Index of the batch that caused the failure, if any
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            HistoryError::Decode { batch_index, .. } => Some(*batch_index),
            HistoryError::CorruptedBatch { batch_index } => Some(*batch_index),
            HistoryError::EmptyHistory => None,
        }
    }

    /// The decoder's error, if the failure came from decoding
    pub fn decode_error(&self) -> Option<&E> {
        match self {
            HistoryError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Take ownership of the decoder's error, if the failure came from decoding
    pub fn into_decode_error(self) -> Option<E> {
        match self {
            HistoryError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_corrupted_batch(&self) -> bool {
        matches!(self, HistoryError::CorruptedBatch { .. })
    }
}

/// Errors produced by the built-in [`JsonBatchDecoder`](super::JsonBatchDecoder)
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported history batch encoding: {encoding}")]
    UnsupportedEncoding { encoding: EncodingType },

    #[error("History batch deserialization error: {message}")]
    Deserialization { message: String },
}

impl DecodeError {
    pub fn unsupported_encoding(encoding: EncodingType) -> Self {
        Self::UnsupportedEncoding { encoding }
    }

    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::deserialization(err.to_string())
    }
}
