//! Packet payloads and their acknowledgments.
//!
//! Payloads are protobuf messages with stable field tags so that bytes
//! interoperate with existing deployments. Acknowledgment *results* are
//! JSON documents, which is how the receiving chain writes them into the
//! channel acknowledgement; the ack types also carry protobuf tags for
//! callers that want the binary form.

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Marker payload with no content.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct NoData {}

/// Request to create a record on the counterparty chain.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct CreateRecordPacketData {
    /// Title of the new record.
    #[prost(string, tag = "1")]
    pub title: String,
    /// Body of the new record.
    #[prost(string, tag = "2")]
    pub content: String,
    /// Address of the account that will own the record.
    #[prost(string, tag = "3")]
    pub creator: String,
}

/// Result of a create request, written by the receiving chain.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct CreateRecordPacketAck {
    /// Id assigned to the new record, as a decimal string.
    #[prost(string, tag = "1")]
    #[serde(rename = "recordID", default)]
    pub record_id: String,
}

/// Request to edit a record owned on the counterparty chain.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct EditRecordPacketData {
    /// Id of the record to edit, as a decimal string.
    #[prost(string, tag = "1")]
    #[serde(rename = "recordID")]
    pub record_id: String,
    /// Replacement title.
    #[prost(string, tag = "2")]
    pub title: String,
    /// Replacement content.
    #[prost(string, tag = "3")]
    pub content: String,
    /// Address of the account requesting the edit.
    #[prost(string, tag = "4")]
    pub editor: String,
}

/// Result of an edit request, written by the receiving chain.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct EditRecordPacketAck {
    /// Whether the edit was applied.
    #[prost(bool, tag = "1")]
    #[serde(default)]
    pub ok: bool,
}

macro_rules! json_ack {
    ($ty:ty) => {
        impl $ty {
            /// Serialize to the JSON form stored in a result acknowledgement.
            pub fn to_json(&self) -> Result<Vec<u8>, CodecError> {
                serde_json::to_vec(self).map_err(CodecError::Json)
            }

            /// Deserialize from the JSON form stored in a result acknowledgement.
            pub fn from_json(bytes: &[u8]) -> Result<Self, CodecError> {
                serde_json::from_slice(bytes).map_err(CodecError::Json)
            }
        }
    };
}

json_ack!(CreateRecordPacketAck);
json_ack!(EditRecordPacketAck);

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn edit_packet_field_tags_are_stable() {
        let data = EditRecordPacketData {
            record_id: "7".into(),
            title: "T".into(),
            content: "C".into(),
            editor: "alice".into(),
        };
        let bytes = data.encode_to_vec();
        // field 1, length-delimited, len 1, "7"
        assert_eq!(&bytes[..3], &[0x0a, 0x01, b'7']);
        // field 4 comes last
        assert_eq!(bytes[9], 0x22);
    }

    #[test]
    fn edit_ack_ok_is_field_one() {
        let bytes = EditRecordPacketAck { ok: true }.encode_to_vec();
        assert_eq!(bytes, vec![0x08, 0x01]);
        assert!(EditRecordPacketAck { ok: false }.encode_to_vec().is_empty());
    }

    #[test]
    fn edit_ack_json_shape() {
        let json = EditRecordPacketAck { ok: true }.to_json().unwrap();
        assert_eq!(json, br#"{"ok":true}"#);
    }

    #[test]
    fn edit_ack_missing_ok_is_false() {
        let ack = EditRecordPacketAck::from_json(b"{}").unwrap();
        assert!(!ack.ok);
    }

    #[test]
    fn edit_ack_rejects_wrong_shape() {
        assert!(EditRecordPacketAck::from_json(b"not json").is_err());
        assert!(EditRecordPacketAck::from_json(br#"{"ok":"yes"}"#).is_err());
    }

    #[test]
    fn create_ack_json_uses_record_id_key() {
        let ack = CreateRecordPacketAck {
            record_id: "3".into(),
        };
        let json = ack.to_json().unwrap();
        assert_eq!(json, br#"{"recordID":"3"}"#);
        assert_eq!(CreateRecordPacketAck::from_json(&json).unwrap(), ack);
    }

    #[test]
    fn unknown_payload_fields_are_skipped() {
        let mut bytes = EditRecordPacketData {
            record_id: "1".into(),
            title: "t".into(),
            content: "c".into(),
            editor: "e".into(),
        }
        .encode_to_vec();
        // field 15, varint, value 5
        bytes.extend_from_slice(&[0x78, 0x05]);
        let decoded = EditRecordPacketData::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.record_id, "1");
        assert_eq!(decoded.editor, "e");
    }
}
