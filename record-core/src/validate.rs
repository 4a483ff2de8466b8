//! Structural validation of inbound packet payloads.
//!
//! Runs as the first step of receipt. The policy comes from
//! [`ValidationConfig`]; with the default policy every payload passes.

use xrecord_types::{CreateRecordPacketData, EditRecordPacketData};

use crate::config::ValidationConfig;
use crate::error::{PacketError, Result};

/// Payloads that can be checked against a [`ValidationConfig`].
pub trait ValidateBasic {
    /// Check the payload's title/content against the policy.
    fn validate_basic(&self, policy: &ValidationConfig) -> Result<()>;
}

impl ValidateBasic for EditRecordPacketData {
    fn validate_basic(&self, policy: &ValidationConfig) -> Result<()> {
        check_text(policy, &self.title, &self.content)
    }
}

impl ValidateBasic for CreateRecordPacketData {
    fn validate_basic(&self, policy: &ValidationConfig) -> Result<()> {
        check_text(policy, &self.title, &self.content)
    }
}

fn check_text(policy: &ValidationConfig, title: &str, content: &str) -> Result<()> {
    if policy.require_title && title.is_empty() {
        return Err(PacketError::InvalidPacket {
            reason: "title is empty".into(),
        });
    }
    if let Some(max) = policy.max_title_len {
        if title.len() > max {
            return Err(PacketError::InvalidPacket {
                reason: format!("title is {} bytes (limit: {})", title.len(), max),
            });
        }
    }
    if let Some(max) = policy.max_content_len {
        if content.len() > max {
            return Err(PacketError::InvalidPacket {
                reason: format!("content is {} bytes (limit: {})", content.len(), max),
            });
        }
    }
    Ok(())
}
