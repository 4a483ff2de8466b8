//! Acknowledgement reconciliation on the sending chain.
//!
//! The sender-side shadow is written only here, and only after the
//! counterparty confirms success. Nothing is written at send time.

use xrecord_types::{
    Acknowledgement, CreateRecordPacketAck, CreateRecordPacketData, EditRecordPacketAck,
    EditRecordPacketData, RecordId, Response,
};

use crate::error::{PacketError, Result};
use crate::hooks::PacketHooks;
use crate::store::{SentRecord, SentRecordStore};

/// Reconcile the acknowledgement of an edit packet.
///
/// - Error acknowledgement: handed to the hook, no state change.
/// - Result `ok: false`: [`PacketError::EditRejected`], no state change.
/// - Result `ok: true`: the shadow's title is replaced, provided the
///   original editor owns the shadow.
/// - Neither: [`PacketError::UnknownAckFormat`].
pub fn on_ack_edit<S, H>(
    store: &mut S,
    hooks: &mut H,
    data: &EditRecordPacketData,
    ack: &Acknowledgement,
) -> Result<()>
where
    S: SentRecordStore,
    H: PacketHooks,
{
    match &ack.response {
        Some(Response::Error(reason)) => {
            tracing::warn!(
                "Edit of record {} failed on counterparty: {}",
                data.record_id,
                reason
            );
            hooks.on_edit_error_ack(data, reason)
        }
        Some(Response::Result(bytes)) => {
            let packet_ack = EditRecordPacketAck::from_json(bytes).map_err(PacketError::AckDecode)?;

            if !packet_ack.ok {
                return Err(PacketError::EditRejected);
            }

            let id: RecordId = data.record_id.parse()?;

            let mut sent = store
                .sent_record(id)
                .ok_or(PacketError::SentRecordNotFound(id))?;
            if sent.owner != data.editor {
                return Err(PacketError::NotAuthorized {
                    id,
                    editor: data.editor.clone(),
                });
            }

            sent.title = data.title.clone();
            store.set_sent_record(sent);

            tracing::debug!("Updated sent record {} after confirmed edit", id);
            Ok(())
        }
        None => Err(PacketError::UnknownAckFormat),
    }
}

/// Reconcile the acknowledgement of a create packet.
///
/// On success a shadow is stored under the id the counterparty assigned.
pub fn on_ack_create<S, H>(
    store: &mut S,
    hooks: &mut H,
    data: &CreateRecordPacketData,
    ack: &Acknowledgement,
) -> Result<()>
where
    S: SentRecordStore,
    H: PacketHooks,
{
    match &ack.response {
        Some(Response::Error(reason)) => {
            tracing::warn!("Create of {:?} failed on counterparty: {}", data.title, reason);
            hooks.on_create_error_ack(data, reason)
        }
        Some(Response::Result(bytes)) => {
            let packet_ack =
                CreateRecordPacketAck::from_json(bytes).map_err(PacketError::AckDecode)?;
            let id: RecordId = packet_ack.record_id.parse()?;

            store.set_sent_record(SentRecord {
                id,
                title: data.title.clone(),
                owner: data.creator.clone(),
            });

            tracing::debug!("Stored sent record {} for {}", id, data.creator);
            Ok(())
        }
        None => Err(PacketError::UnknownAckFormat),
    }
}
