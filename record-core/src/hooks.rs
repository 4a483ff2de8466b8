//! Extension points for error acknowledgements and timeouts.
//!
//! When the counterparty's channel layer rejects a packet, or a packet
//! provably times out, the sender's record stores are left untouched. These
//! hooks are where compensation or resubmission logic plugs in. Every
//! method defaults to doing nothing and succeeding.

use xrecord_types::{CreateRecordPacketData, EditRecordPacketData};

use crate::error::Result;

/// Callbacks invoked on the terminal failure branches of a packet.
pub trait PacketHooks {
    /// The counterparty answered an edit packet with an error acknowledgement.
    fn on_edit_error_ack(&mut self, data: &EditRecordPacketData, reason: &str) -> Result<()> {
        let _ = (data, reason);
        Ok(())
    }

    /// An edit packet timed out before delivery.
    fn on_edit_timeout(&mut self, data: &EditRecordPacketData) -> Result<()> {
        let _ = data;
        Ok(())
    }

    /// The counterparty answered a create packet with an error acknowledgement.
    fn on_create_error_ack(&mut self, data: &CreateRecordPacketData, reason: &str) -> Result<()> {
        let _ = (data, reason);
        Ok(())
    }

    /// A create packet timed out before delivery.
    fn on_create_timeout(&mut self, data: &CreateRecordPacketData) -> Result<()> {
        let _ = data;
        Ok(())
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl PacketHooks for NoHooks {}
