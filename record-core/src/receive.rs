//! Receipt handling on the chain that owns the records.
//!
//! Any failure is returned as an error before the store is written; the
//! router turns it into an error acknowledgement. A successful edit always
//! answers `ok: true`.
//!
//! Receipt does not deduplicate. Delivering the same payload twice applies
//! it twice; exactly-once delivery per sequence is the channel's job.

use xrecord_types::{
    CreateRecordPacketAck, CreateRecordPacketData, EditRecordPacketAck, EditRecordPacketData,
    RecordId,
};

use crate::config::ValidationConfig;
use crate::error::{PacketError, Result};
use crate::store::RecordStore;
use crate::validate::ValidateBasic;

/// Apply an edit request to a locally owned record.
///
/// Only the record's owner may edit it. The check compares the packet's
/// `editor` with the stored owner; signature verification already happened
/// on the sending chain.
pub fn on_recv_edit<S: RecordStore>(
    store: &mut S,
    policy: &ValidationConfig,
    data: &EditRecordPacketData,
) -> Result<EditRecordPacketAck> {
    data.validate_basic(policy)?;

    let id: RecordId = data.record_id.parse()?;

    let mut record = store.record(id).ok_or(PacketError::RecordNotFound(id))?;
    if record.owner != data.editor {
        tracing::warn!(
            "Rejected edit of record {}: {} is not the owner",
            id,
            data.editor
        );
        return Err(PacketError::NotAuthorized {
            id,
            editor: data.editor.clone(),
        });
    }

    record.title = data.title.clone();
    record.content = data.content.clone();
    store.set_record(record);

    tracing::debug!("Applied edit to record {} from {}", id, data.editor);

    Ok(EditRecordPacketAck { ok: true })
}

/// Create a record owned by the packet's creator.
pub fn on_recv_create<S: RecordStore>(
    store: &mut S,
    policy: &ValidationConfig,
    data: &CreateRecordPacketData,
) -> Result<CreateRecordPacketAck> {
    data.validate_basic(policy)?;

    let id = store.append_record(
        data.title.clone(),
        data.content.clone(),
        data.creator.clone(),
    );

    tracing::debug!("Created record {} for {}", id, data.creator);

    Ok(CreateRecordPacketAck {
        record_id: id.to_string(),
    })
}
