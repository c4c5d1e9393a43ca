//! Batch decoding seam.
//!
//! [`HistoryAssembler`](super::HistoryAssembler) never parses payloads itself; it hands
//! each [`DataBlob`] to a [`BatchDecoder`]. The built-in [`JsonBatchDecoder`] covers
//! JSON-encoded batches, and [`FnDecoder`] adapts a closure for tests or custom codecs.

use super::errors::DecodeError;
use super::types::{DataBlob, EncodingType, HistoryEvent};
use std::sync::Arc;

/// Decodes one encoded batch into its events
///
/// Implementations must return events in the order they occurred within the batch.
/// An empty result is not an error at this level; the assembler treats it as corruption.
pub trait BatchDecoder {
    type Event;
    type Error;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<Self::Event>, Self::Error>;
}

impl<D: BatchDecoder + ?Sized> BatchDecoder for &D {
    type Event = D::Event;
    type Error = D::Error;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<Self::Event>, Self::Error> {
        (**self).decode(blob)
    }
}

impl<D: BatchDecoder + ?Sized> BatchDecoder for Arc<D> {
    type Event = D::Event;
    type Error = D::Error;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<Self::Event>, Self::Error> {
        (**self).decode(blob)
    }
}

/// Decoder for batches whose payload is a JSON array of [`HistoryEvent`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBatchDecoder;

impl BatchDecoder for JsonBatchDecoder {
    type Event = HistoryEvent;
    type Error = DecodeError;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<HistoryEvent>, DecodeError> {
        match blob.encoding {
            EncodingType::Json => Ok(serde_json::from_slice(&blob.data)?),
            other => Err(DecodeError::unsupported_encoding(other)),
        }
    }
}

/// Function wrapper that implements [`BatchDecoder`]
pub struct FnDecoder<F>(pub F);

impl<F, Ev, Err> BatchDecoder for FnDecoder<F>
where
    F: Fn(&DataBlob) -> Result<Vec<Ev>, Err>,
{
    type Event = Ev;
    type Error = Err;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<Ev>, Err> {
        (self.0)(blob)
    }
}
