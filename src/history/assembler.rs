//! # History Assembler
//!
//! Concatenates independently encoded batches into one ordered [`History`] and
//! optionally narrows it to the closing event.

use super::decoder::{BatchDecoder, JsonBatchDecoder};
use super::errors::{DecodeError, HistoryError};
use super::types::{DataBlob, History, HistoryEvent, HistoryEventFilterType};
use crate::config::HistoryConfig;
use tracing::{debug, instrument};

/// Assembles histories using an injected [`BatchDecoder`]
///
/// Holds no mutable state, so one assembler can serve concurrent callers as long as
/// its decoder can.
#[derive(Debug, Clone, Default)]
pub struct HistoryAssembler<D> {
    decoder: D,
    default_filter: HistoryEventFilterType,
}

impl<D: BatchDecoder> HistoryAssembler<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            default_filter: HistoryEventFilterType::AllEvent,
        }
    }

    /// Create an assembler whose [`assemble_default`](Self::assemble_default) uses the configured filter
    pub fn from_config(decoder: D, config: &HistoryConfig) -> Self {
        Self {
            decoder,
            default_filter: config.default_filter,
        }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn default_filter(&self) -> HistoryEventFilterType {
        self.default_filter
    }

    /// Assemble with the filter this assembler was configured with
    pub fn assemble_default(
        &self,
        batches: &[DataBlob],
    ) -> Result<History<D::Event>, HistoryError<D::Error>> {
        self.assemble(batches, self.default_filter)
    }

    /// Decode `batches` in order and apply `filter` to the concatenated events
    ///
    /// Stops at the first batch that fails to decode or decodes to nothing; later
    /// batches are never handed to the decoder. Zero batches yield an empty history
    /// for [`HistoryEventFilterType::AllEvent`] and [`HistoryError::EmptyHistory`] for
    /// [`HistoryEventFilterType::CloseEvent`].
    #[instrument(skip_all, fields(batch_count = batches.len(), filter = %filter))]
    pub fn assemble(
        &self,
        batches: &[DataBlob],
        filter: HistoryEventFilterType,
    ) -> Result<History<D::Event>, HistoryError<D::Error>> {
        let mut events = Vec::new();

        for (batch_index, batch) in batches.iter().enumerate() {
            let decoded = self.decoder.decode(batch).map_err(|source| {
                crate::log_history!(warn, "BATCH_DECODE_FAILED",
                    batch_index: batch_index,
                    encoding: batch.encoding,
                    payload_bytes: batch.len()
                );
                HistoryError::Decode {
                    batch_index,
                    source,
                }
            })?;

            if decoded.is_empty() {
                crate::log_history!(error, "CORRUPTED_BATCH",
                    batch_index: batch_index,
                    encoding: batch.encoding,
                    payload_bytes: batch.len()
                );
                return Err(HistoryError::CorruptedBatch { batch_index });
            }

            debug!(batch_index, event_count = decoded.len(), "Decoded history batch");
            events.extend(decoded);
        }

        let events = match filter {
            HistoryEventFilterType::AllEvent => events,
            HistoryEventFilterType::CloseEvent => match events.pop() {
                Some(close_event) => vec![close_event],
                None => return Err(HistoryError::EmptyHistory),
            },
        };

        debug!(event_count = events.len(), "Assembled history");
        Ok(History::new(events))
    }
}

impl HistoryAssembler<JsonBatchDecoder> {
    pub fn json() -> Self {
        Self::new(JsonBatchDecoder)
    }
}

/// Deserialize JSON-encoded batches into a history of [`HistoryEvent`]s
pub fn deserialize_blob_data_to_history_events(
    data_blobs: &[DataBlob],
    filter: HistoryEventFilterType,
) -> Result<History<HistoryEvent>, HistoryError<DecodeError>> {
    HistoryAssembler::json().assemble(data_blobs, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::decoder::FnDecoder;
    use crate::history::EncodingType;

    /// Each payload byte becomes one event; byte 0xFF makes the decoder fail.
    fn byte_decoder() -> FnDecoder<impl Fn(&DataBlob) -> Result<Vec<u8>, String>> {
        FnDecoder(|blob: &DataBlob| {
            if blob.data.contains(&0xFF) {
                Err(format!("bad byte in {}-byte batch", blob.len()))
            } else {
                Ok(blob.data.clone())
            }
        })
    }

    fn blob(bytes: &[u8]) -> DataBlob {
        DataBlob::new(EncodingType::ThriftRw, bytes.to_vec())
    }

    #[test]
    fn test_all_events_concatenated_in_order() {
        let assembler = HistoryAssembler::new(byte_decoder());
        let history = assembler
            .assemble(&[blob(&[1, 2]), blob(&[3]), blob(&[4, 5, 6])], HistoryEventFilterType::AllEvent)
            .unwrap();
        assert_eq!(history.events(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_close_event_is_last_event() {
        let assembler = HistoryAssembler::new(byte_decoder());
        let history = assembler
            .assemble(&[blob(&[1, 2]), blob(&[3, 9])], HistoryEventFilterType::CloseEvent)
            .unwrap();
        assert_eq!(history.events(), &[9]);
    }

    #[test]
    fn test_empty_batch_is_corruption() {
        let assembler = HistoryAssembler::new(byte_decoder());
        let err = assembler
            .assemble(&[blob(&[1]), blob(&[]), blob(&[2])], HistoryEventFilterType::AllEvent)
            .unwrap_err();
        assert!(err.is_corrupted_batch());
        assert_eq!(err.batch_index(), Some(1));
    }

    #[test]
    fn test_decode_error_is_passed_through() {
        let assembler = HistoryAssembler::new(byte_decoder());
        let err = assembler
            .assemble(&[blob(&[1]), blob(&[0xFF, 0xFF])], HistoryEventFilterType::AllEvent)
            .unwrap_err();
        assert_eq!(err.batch_index(), Some(1));
        assert_eq!(
            err.into_decode_error().as_deref(),
            Some("bad byte in 2-byte batch")
        );
    }

    #[test]
    fn test_no_batches() {
        let assembler = HistoryAssembler::new(byte_decoder());

        let all = assembler.assemble(&[], HistoryEventFilterType::AllEvent).unwrap();
        assert!(all.is_empty());

        let close = assembler.assemble(&[], HistoryEventFilterType::CloseEvent);
        assert!(matches!(close, Err(HistoryError::EmptyHistory)));
    }

    #[test]
    fn test_assemble_default_uses_configured_filter() {
        let config = HistoryConfig {
            default_filter: HistoryEventFilterType::CloseEvent,
        };
        let assembler = HistoryAssembler::from_config(byte_decoder(), &config);
        let history = assembler.assemble_default(&[blob(&[7, 8])]).unwrap();
        assert_eq!(history.events(), &[8]);
    }
}
