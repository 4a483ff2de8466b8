//! Packet construction.
//!
//! Turns a local request into the wire envelope. Pure transform: no
//! validation beyond field presence, no store access. Semantic checks
//! happen on the receiving chain.

use xrecord_types::{CreateRecordPacketData, EditRecordPacketData, RecordPacketData};

use crate::error::{PacketError, Result};

/// Local request to edit a record owned on the counterparty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Counterparty record id, as a decimal string.
    pub record_id: String,
    /// Replacement title.
    pub new_title: String,
    /// Replacement content.
    pub new_content: String,
    /// Address of the local account asking for the edit.
    pub editor: String,
}

impl EditRequest {
    /// Build the edit payload.
    pub fn to_packet_data(&self) -> EditRecordPacketData {
        EditRecordPacketData {
            record_id: self.record_id.clone(),
            title: self.new_title.clone(),
            content: self.new_content.clone(),
            editor: self.editor.clone(),
        }
    }

    /// Build the envelope carrying the edit payload.
    pub fn to_envelope(&self) -> RecordPacketData {
        RecordPacketData::from(self.to_packet_data())
    }

    /// Build and serialize the envelope.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(&self.to_envelope())
    }
}

/// Local request to create a record on the counterparty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Title of the new record.
    pub title: String,
    /// Body of the new record.
    pub content: String,
    /// Address of the local account that will own the record.
    pub creator: String,
}

impl CreateRequest {
    /// Build the create payload.
    pub fn to_packet_data(&self) -> CreateRecordPacketData {
        CreateRecordPacketData {
            title: self.title.clone(),
            content: self.content.clone(),
            creator: self.creator.clone(),
        }
    }

    /// Build the envelope carrying the create payload.
    pub fn to_envelope(&self) -> RecordPacketData {
        RecordPacketData::from(self.to_packet_data())
    }
}

/// Serialize an envelope, mapping codec failures to [`PacketError::Encoding`].
pub fn encode(envelope: &RecordPacketData) -> Result<Vec<u8>> {
    envelope.to_bytes().map_err(PacketError::Encoding)
}
