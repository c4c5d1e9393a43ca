use std::sync::atomic::{AtomicUsize, Ordering};
use workflow_client_common::history::{BatchDecoder, DataBlob, EncodingType};

/// Error produced by [`ScriptedDecoder`] for `fail:` batches
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scripted decode failure: {0}")]
pub struct ScriptedDecodeError(pub String);

/// Decoder driven by the batch payload text
///
/// - `"a,b,c"` decodes to the events `a`, `b`, `c`
/// - `""` decodes to no events
/// - `"fail:<reason>"` fails with [`ScriptedDecodeError`]
///
/// Every call is counted so tests can check that decoding stopped early.
#[derive(Debug, Default)]
pub struct ScriptedDecoder {
    calls: AtomicUsize,
}

impl ScriptedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BatchDecoder for ScriptedDecoder {
    type Event = String;
    type Error = ScriptedDecodeError;

    fn decode(&self, blob: &DataBlob) -> Result<Vec<String>, ScriptedDecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = String::from_utf8_lossy(&blob.data);
        if let Some(reason) = text.strip_prefix("fail:") {
            return Err(ScriptedDecodeError(reason.to_string()));
        }
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(text.split(',').map(str::to_string).collect())
    }
}

/// Build a scripted batch from its payload text
pub fn batch(script: &str) -> DataBlob {
    DataBlob::new(EncodingType::ThriftRw, script.as_bytes().to_vec())
}

/// Build a scripted batch holding `events`
pub fn batch_of(events: &[String]) -> DataBlob {
    batch(&events.join(","))
}
