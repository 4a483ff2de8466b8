//! Timeout handling on the sending chain.
//!
//! A timeout proves the packet never reached the counterparty, so it is
//! treated like a rejection: no store is touched. These functions take no
//! store at all. Compensation belongs in [`PacketHooks`].

use xrecord_types::{CreateRecordPacketData, EditRecordPacketData};

use crate::error::Result;
use crate::hooks::PacketHooks;

/// Handle a timed-out edit packet.
pub fn on_timeout_edit<H: PacketHooks>(hooks: &mut H, data: &EditRecordPacketData) -> Result<()> {
    tracing::info!("Edit of record {} timed out before delivery", data.record_id);
    hooks.on_edit_timeout(data)
}

/// Handle a timed-out create packet.
pub fn on_timeout_create<H: PacketHooks>(
    hooks: &mut H,
    data: &CreateRecordPacketData,
) -> Result<()> {
    tracing::info!("Create of {:?} timed out before delivery", data.title);
    hooks.on_create_timeout(data)
}
