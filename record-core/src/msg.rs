//! Inbound commands that start a packet lifecycle.
//!
//! The message layer has already verified the creator's signature by the
//! time these run. Validation here is purely structural.

use crate::builder::{CreateRequest, EditRequest};
use crate::channel::{ChannelKeeper, Height};
use crate::config::PacketConfig;
use crate::error::{PacketError, Result};
use crate::transmit::transmit;

/// Ask the counterparty to edit a record the creator owns there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgSendEditRecord {
    /// Signer, and the editor named in the packet.
    pub creator: String,
    /// Local port to send on.
    pub port: String,
    /// Local channel to send on.
    pub channel_id: String,
    /// Counterparty time in nanoseconds after which the packet times out.
    pub timeout_timestamp: u64,
    /// Counterparty record id.
    pub record_id: String,
    /// Replacement title.
    pub title: String,
    /// Replacement content.
    pub content: String,
}

/// Ask the counterparty to create a record owned by the creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgSendCreateRecord {
    /// Signer, and the owner of the new record.
    pub creator: String,
    /// Local port to send on.
    pub port: String,
    /// Local channel to send on.
    pub channel_id: String,
    /// Counterparty time in nanoseconds after which the packet times out.
    pub timeout_timestamp: u64,
    /// Title of the new record.
    pub title: String,
    /// Body of the new record.
    pub content: String,
}

fn check_route(creator: &str, port: &str, channel_id: &str, timeout_timestamp: u64) -> Result<()> {
    let reason = if creator.is_empty() {
        "invalid creator address"
    } else if port.is_empty() {
        "invalid packet port"
    } else if channel_id.is_empty() {
        "invalid packet channel"
    } else if timeout_timestamp == 0 {
        "invalid packet timeout"
    } else {
        return Ok(());
    };

    Err(PacketError::InvalidMessage {
        reason: reason.to_string(),
    })
}

impl MsgSendEditRecord {
    /// Structural checks: creator, port, channel and timeout must be set.
    pub fn validate_basic(&self) -> Result<()> {
        check_route(
            &self.creator,
            &self.port,
            &self.channel_id,
            self.timeout_timestamp,
        )
    }

    /// Set the timeout to the configured relative timeout past
    /// `block_time_nanos`.
    pub fn with_default_timeout(mut self, config: &PacketConfig, block_time_nanos: u64) -> Self {
        self.timeout_timestamp = config.timeout_timestamp(block_time_nanos);
        self
    }

    /// The edit request this message describes. The editor is the signer.
    pub fn to_request(&self) -> EditRequest {
        EditRequest {
            record_id: self.record_id.clone(),
            new_title: self.title.clone(),
            new_content: self.content.clone(),
            editor: self.creator.clone(),
        }
    }
}

impl MsgSendCreateRecord {
    /// Structural checks: creator, port, channel and timeout must be set.
    pub fn validate_basic(&self) -> Result<()> {
        check_route(
            &self.creator,
            &self.port,
            &self.channel_id,
            self.timeout_timestamp,
        )
    }

    /// See [`MsgSendEditRecord::with_default_timeout`].
    pub fn with_default_timeout(mut self, config: &PacketConfig, block_time_nanos: u64) -> Self {
        self.timeout_timestamp = config.timeout_timestamp(block_time_nanos);
        self
    }

    /// The create request this message describes. The owner is the signer.
    pub fn to_request(&self) -> CreateRequest {
        CreateRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            creator: self.creator.clone(),
        }
    }
}

/// Validate, build and transmit an edit packet. Returns the sequence.
///
/// Nothing is written to the sender's stores; the shadow changes only when
/// the acknowledgement confirms the edit.
pub fn submit_edit<C: ChannelKeeper>(channels: &mut C, msg: &MsgSendEditRecord) -> Result<u64> {
    msg.validate_basic()?;
    transmit(
        channels,
        &msg.to_request().to_envelope(),
        &msg.port,
        &msg.channel_id,
        Height::zero(),
        msg.timeout_timestamp,
    )
}

/// Validate, build and transmit a create packet. Returns the sequence.
pub fn submit_create<C: ChannelKeeper>(
    channels: &mut C,
    msg: &MsgSendCreateRecord,
) -> Result<u64> {
    msg.validate_basic()?;
    transmit(
        channels,
        &msg.to_request().to_envelope(),
        &msg.port,
        &msg.channel_id,
        Height::zero(),
        msg.timeout_timestamp,
    )
}
