//! Envelope - the wire wrapper carrying exactly one packet variant.
//!
//! Layout (protobuf, stable tags):
//!
//! | tag | variant         | payload                                   |
//! |-----|-----------------|-------------------------------------------|
//! | 1   | `NoData`        | empty message                             |
//! | 2   | `CreateRecord`  | `{title, content, creator}`               |
//! | 3   | `EditRecord`    | `{record_id, title, content, editor}`     |
//!
//! Decoding is stricter at the top level than plain protobuf: the key
//! stream is scanned first and anything other than a single
//! length-delimited field with tag 1, 2 or 3 is rejected. Unknown fields
//! inside a payload are still skipped.

use prost::bytes::Buf;
use prost::Message;

use crate::{CodecError, CreateRecordPacketData, EditRecordPacketData, NoData};

const WIRE_TYPE_LEN: u64 = 2;

/// Packet variant carried by a [`RecordPacketData`].
#[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
pub enum Packet {
    /// Empty marker.
    #[prost(message, tag = "1")]
    NoData(NoData),
    /// Create a record on the counterparty.
    #[prost(message, tag = "2")]
    CreateRecord(CreateRecordPacketData),
    /// Edit a record owned on the counterparty.
    #[prost(message, tag = "3")]
    EditRecord(EditRecordPacketData),
}

/// The envelope placed on the channel.
///
/// `packet: None` is a valid, degenerate value: it encodes to zero bytes.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RecordPacketData {
    /// The single populated variant, if any.
    #[prost(oneof = "Packet", tags = "1, 2, 3")]
    pub packet: Option<Packet>,
}

impl RecordPacketData {
    /// Wrap a packet variant.
    pub fn new(packet: Packet) -> Self {
        Self {
            packet: Some(packet),
        }
    }

    /// Serialize to protobuf bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Deserialize from protobuf bytes.
    ///
    /// Either the whole envelope decodes or an error is returned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        scan_top_level(bytes)?;
        Ok(Self::decode(bytes)?)
    }
}

impl From<EditRecordPacketData> for RecordPacketData {
    fn from(data: EditRecordPacketData) -> Self {
        Self::new(Packet::EditRecord(data))
    }
}

impl From<CreateRecordPacketData> for RecordPacketData {
    fn from(data: CreateRecordPacketData) -> Self {
        Self::new(Packet::CreateRecord(data))
    }
}

/// Walk the top-level keys, rejecting anything that is not a single
/// known, length-delimited packet field.
fn scan_top_level(mut buf: &[u8]) -> Result<(), CodecError> {
    let mut fields = 0usize;

    while buf.has_remaining() {
        let key = prost::encoding::decode_varint(&mut buf)?;
        let tag = key >> 3;
        let wire_type = key & 0x7;

        if tag == 0 {
            return Err(CodecError::IllegalTag);
        }
        if !(1..=3).contains(&tag) {
            return Err(CodecError::UnknownPacketTag(tag));
        }
        if wire_type != WIRE_TYPE_LEN {
            return Err(CodecError::WireTypeMismatch { tag, wire_type });
        }

        let len = prost::encoding::decode_varint(&mut buf)?;
        if len > buf.remaining() as u64 {
            return Err(CodecError::Truncated {
                needed: len,
                remaining: buf.remaining(),
            });
        }
        buf.advance(len as usize);

        fields += 1;
        if fields > 1 {
            return Err(CodecError::MultiplePackets);
        }
    }

    Ok(())
}
