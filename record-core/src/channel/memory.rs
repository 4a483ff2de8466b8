//! In-memory channel keeper for tests and embedding.
//!
//! Holds channel ends, send sequences and capabilities, and captures every
//! committed packet in an outbox that a test harness can relay to the
//! counterparty.

use std::collections::HashMap;

use super::{
    Capability, ChannelEnd, ChannelError, ChannelKeeper, ChannelPacket, ChannelState,
    Counterparty,
};

type ChannelKey = (String, String);

/// In-memory channel keeper.
///
/// Mirrors the checks a real channel layer performs in `send_packet`:
/// capability authentication, open state, non-zero timeout and exact
/// sequence match, then advances the sequence.
#[derive(Debug, Default)]
pub struct MemoryChannelKeeper {
    ends: HashMap<ChannelKey, ChannelEnd>,
    next_sequence_send: HashMap<ChannelKey, u64>,
    capabilities: HashMap<ChannelKey, Capability>,
    next_capability: u64,
    outbox: Vec<ChannelPacket>,
    max_packet_size: Option<usize>,
    fail_next_send: Option<String>,
}

fn key(port: &str, channel: &str) -> ChannelKey {
    (port.to_string(), channel.to_string())
}

impl MemoryChannelKeeper {
    /// Create an empty keeper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open channel with a fresh send sequence of 1 and claim
    /// its capability.
    pub fn open_channel(
        &mut self,
        port: &str,
        channel: &str,
        counterparty_port: &str,
        counterparty_channel: &str,
    ) -> Capability {
        self.insert_channel(
            port,
            channel,
            ChannelEnd {
                state: ChannelState::Open,
                counterparty: Counterparty {
                    port_id: counterparty_port.to_string(),
                    channel_id: counterparty_channel.to_string(),
                },
            },
        );
        self.set_next_sequence_send(port, channel, 1);
        self.claim_capability(port, channel)
    }

    /// Register a channel end without sequence or capability state.
    pub fn insert_channel(&mut self, port: &str, channel: &str, end: ChannelEnd) {
        self.ends.insert(key(port, channel), end);
    }

    /// Set the next send sequence for a channel.
    pub fn set_next_sequence_send(&mut self, port: &str, channel: &str, sequence: u64) {
        self.next_sequence_send.insert(key(port, channel), sequence);
    }

    /// Mint and record a capability for a channel.
    pub fn claim_capability(&mut self, port: &str, channel: &str) -> Capability {
        self.next_capability += 1;
        let capability = Capability::new(self.next_capability);
        self.capabilities.insert(key(port, channel), capability);
        capability
    }

    /// Drop this module's capability for a channel.
    pub fn release_capability(&mut self, port: &str, channel: &str) {
        self.capabilities.remove(&key(port, channel));
    }

    /// Mark a channel closed.
    pub fn close_channel(&mut self, port: &str, channel: &str) {
        if let Some(end) = self.ends.get_mut(&key(port, channel)) {
            end.state = ChannelState::Closed;
        }
    }

    /// Limit the size of packet data accepted by `send_packet`.
    pub fn set_max_packet_size(&mut self, limit: usize) {
        self.max_packet_size = Some(limit);
    }

    /// Cause the next `send_packet` to fail with the given reason.
    pub fn fail_next_send(&mut self, reason: &str) {
        self.fail_next_send = Some(reason.to_string());
    }

    /// All packets committed so far, oldest first.
    pub fn sent_packets(&self) -> &[ChannelPacket] {
        &self.outbox
    }

    /// Remove and return all committed packets.
    pub fn take_outbox(&mut self) -> Vec<ChannelPacket> {
        std::mem::take(&mut self.outbox)
    }
}

impl ChannelKeeper for MemoryChannelKeeper {
    fn channel(&self, port: &str, channel: &str) -> Option<ChannelEnd> {
        self.ends.get(&key(port, channel)).cloned()
    }

    fn next_sequence_send(&self, port: &str, channel: &str) -> Option<u64> {
        self.next_sequence_send.get(&key(port, channel)).copied()
    }

    fn channel_capability(&self, port: &str, channel: &str) -> Option<Capability> {
        self.capabilities.get(&key(port, channel)).copied()
    }

    fn send_packet(
        &mut self,
        capability: &Capability,
        packet: ChannelPacket,
    ) -> Result<(), ChannelError> {
        if let Some(reason) = self.fail_next_send.take() {
            return Err(ChannelError::Rejected(reason));
        }

        let k = key(&packet.source_port, &packet.source_channel);

        let end = self.ends.get(&k).ok_or_else(|| ChannelError::NotFound {
            port: packet.source_port.clone(),
            channel: packet.source_channel.clone(),
        })?;
        if end.state != ChannelState::Open {
            return Err(ChannelError::Closed {
                port: packet.source_port.clone(),
                channel: packet.source_channel.clone(),
            });
        }

        if self.capabilities.get(&k) != Some(capability) {
            return Err(ChannelError::CapabilityMismatch);
        }

        if packet.timeout_height.is_zero() && packet.timeout_timestamp == 0 {
            return Err(ChannelError::InvalidTimeout);
        }

        if let Some(limit) = self.max_packet_size {
            if packet.data.len() > limit {
                return Err(ChannelError::PacketTooLarge {
                    size: packet.data.len(),
                    limit,
                });
            }
        }

        let expected = self.next_sequence_send.get(&k).copied().unwrap_or(0);
        if packet.sequence != expected {
            return Err(ChannelError::SequenceMismatch {
                expected,
                got: packet.sequence,
            });
        }

        self.next_sequence_send.insert(k, expected + 1);
        self.outbox.push(packet);
        Ok(())
    }
}
