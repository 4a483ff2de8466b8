//! Error types for the packet lifecycle.

use thiserror::Error;
use xrecord_types::{CodecError, InvalidRecordId, RecordId};

use crate::channel::ChannelError;

/// Errors produced by transmit, receipt, acknowledgement and timeout
/// handling.
///
/// Every failing operation returns one of these before touching the record
/// stores, so a failure never leaves a partial mutation behind.
#[derive(Debug, Error)]
pub enum PacketError {
    /// No channel end registered for the source port/channel.
    #[error("channel not found: port ID ({port}) channel ID ({channel})")]
    ChannelNotFound {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// The channel has no send-sequence state.
    #[error("sequence send not found: source port: {port}, source channel: {channel}")]
    SequenceNotFound {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// This module does not hold the channel capability.
    #[error("module does not own channel capability: port ID ({port}) channel ID ({channel})")]
    CapabilityNotOwned {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// Packet serialization failed.
    #[error("cannot marshal the packet: {0}")]
    Encoding(#[source] CodecError),

    /// The channel transport refused the packet. Passed through verbatim.
    #[error(transparent)]
    Transport(#[from] ChannelError),

    /// Record id was not a decimal u64.
    #[error(transparent)]
    InvalidRecordId(#[from] InvalidRecordId),

    /// Receipt side: no record with this id.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// The requester does not own the record.
    #[error("{editor} is not the owner of record {id}")]
    NotAuthorized {
        /// Record being edited.
        id: RecordId,
        /// Address that asked for the edit.
        editor: String,
    },

    /// The acknowledgement result did not have the expected shape.
    #[error("cannot unmarshal acknowledgment: {0}")]
    AckDecode(#[source] CodecError),

    /// The counterparty reported the edit as not applied.
    #[error("edit rejected by counterparty, sent record left unchanged")]
    EditRejected,

    /// Sender side: no shadow for this record id.
    #[error("sent record not found: {0}")]
    SentRecordNotFound(RecordId),

    /// The acknowledgement carried neither a result nor an error.
    #[error("invalid acknowledgment format")]
    UnknownAckFormat,

    /// Packet payload failed structural validation.
    #[error("invalid packet: {reason}")]
    InvalidPacket {
        /// What was wrong.
        reason: String,
    },

    /// Inbound command failed validation.
    #[error("invalid message: {reason}")]
    InvalidMessage {
        /// What was wrong.
        reason: String,
    },

    /// Packet bytes could not be decoded into an envelope.
    #[error("cannot unmarshal packet data: {0}")]
    PacketDecode(#[source] CodecError),

    /// The envelope carried no packet this module handles.
    #[error("unrecognized packet type")]
    UnrecognizedPacket,

    /// Packet was delivered for a port this module is not bound to.
    #[error("packet for port {got}, module is bound to {expected}")]
    WrongPort {
        /// Port the module is bound to.
        expected: String,
        /// Port named by the packet.
        got: String,
    },
}

/// Result type alias for packet operations.
pub type Result<T> = std::result::Result<T, PacketError>;
