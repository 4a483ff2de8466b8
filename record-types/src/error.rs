//! Error types for the record packet codec.

use thiserror::Error;

/// Errors raised while encoding or decoding packet bytes.
///
/// A decode error never leaves a partially populated value behind: either
/// the whole packet decodes or the caller gets one of these.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A field key carried tag 0.
    #[error("illegal tag 0 in packet data")]
    IllegalTag,

    /// Top-level field tag that names no packet variant.
    #[error("unknown packet tag: {0}")]
    UnknownPacketTag(u64),

    /// Top-level field was not length-delimited.
    #[error("wire type {wire_type} does not match length-delimited packet field {tag}")]
    WireTypeMismatch {
        /// Field tag.
        tag: u64,
        /// Wire type found in the key.
        wire_type: u64,
    },

    /// A length prefix runs past the end of the buffer.
    #[error("truncated packet data: need {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the length prefix claims.
        needed: u64,
        /// Bytes actually left in the buffer.
        remaining: usize,
    },

    /// More than one packet variant was present in a single envelope.
    #[error("packet data carries more than one packet variant")]
    MultiplePackets,

    /// Protobuf decoding failed.
    #[error("protobuf decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Protobuf encoding failed.
    #[error("protobuf encode failed: {0}")]
    Encode(#[from] prost::EncodeError),

    /// JSON acknowledgment encoding failed.
    #[error("acknowledgment JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CodecError::UnknownPacketTag(9);
        assert_eq!(err.to_string(), "unknown packet tag: 9");

        let err = CodecError::Truncated {
            needed: 12,
            remaining: 3,
        };
        assert_eq!(
            err.to_string(),
            "truncated packet data: need 12 bytes, 3 remaining"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecError>();
    }
}
