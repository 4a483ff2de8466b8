//! Channel-level acknowledgement returned by the receiving chain.
//!
//! Field tags 21 and 22 match the host channel layer's own
//! `Acknowledgement` message so the bytes are interchangeable with it.

use prost::Message;

use crate::CodecError;

/// Outcome reported by the receiving chain's channel layer.
#[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
pub enum Response {
    /// Application result bytes (a JSON packet ack).
    #[prost(bytes = "vec", tag = "21")]
    Result(Vec<u8>),
    /// The receiving chain rejected the packet.
    #[prost(string, tag = "22")]
    Error(String),
}

/// Acknowledgement envelope. `response: None` is the unknown shape.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Acknowledgement {
    /// Result or error, if either was set.
    #[prost(oneof = "Response", tags = "21, 22")]
    pub response: Option<Response>,
}

impl Acknowledgement {
    /// Successful acknowledgement carrying application result bytes.
    pub fn result(bytes: Vec<u8>) -> Self {
        Self {
            response: Some(Response::Result(bytes)),
        }
    }

    /// Error acknowledgement carrying a reason string.
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            response: Some(Response::Error(reason.into())),
        }
    }

    /// Whether this is a result acknowledgement.
    pub fn is_success(&self) -> bool {
        matches!(self.response, Some(Response::Result(_)))
    }

    /// Serialize to protobuf bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Deserialize from protobuf bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(Self::decode(bytes)?)
    }
}
