//! Error types

use crate::state::InteractionType;

/// Failure to turn a raw interaction into a typed one.
///
/// These never leave the reducer: the offending record is dropped and the
/// error is only logged.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// No decoder registered for the wire tag
    #[error("no payload decoder registered for type tag {0}")]
    UnknownType(i32),
    /// Payload bytes did not match the expected shape
    #[error("malformed {kind:?} payload: {source}")]
    Malformed {
        kind: InteractionType,
        #[source]
        source: serde_json::Error,
    },
}
