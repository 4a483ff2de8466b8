//! # record-types
//!
//! Wire format types for the cross-chain record edit protocol.
//!
//! This crate provides the types that travel over a channel between two
//! chains:
//! - [`RecordPacketData`] / [`Packet`] - the envelope and its variants
//! - [`CreateRecordPacketData`], [`EditRecordPacketData`] - payloads
//! - [`CreateRecordPacketAck`], [`EditRecordPacketAck`] - application results
//! - [`Acknowledgement`] - channel-level result/error wrapper
//! - [`RecordId`] - strict decimal record identifiers
//! - [`CodecError`] - encode/decode failures

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ack;
mod envelope;
mod error;
mod ids;
mod packets;

pub use ack::{Acknowledgement, Response};
pub use envelope::{Packet, RecordPacketData};
pub use error::CodecError;
pub use ids::{InvalidRecordId, RecordId};
pub use packets::{
    CreateRecordPacketAck, CreateRecordPacketData, EditRecordPacketAck, EditRecordPacketData,
    NoData,
};
