//! Channel layer abstraction.
//!
//! The channel layer (connection handshakes, channel ends, send sequences,
//! capabilities) lives outside this crate. This module defines the narrow
//! interface the packet lifecycle needs from it:
//! - `channel()` resolves a local channel end and its counterparty
//! - `next_sequence_send()` reads the outbound sequence counter
//! - `channel_capability()` looks up the capability this module holds
//! - `send_packet()` commits a packet to the channel
//!
//! [`MemoryChannelKeeper`] is an in-memory implementation for tests and
//! embedding.

mod memory;

pub use memory::MemoryChannelKeeper;

use thiserror::Error;

/// Errors raised by the channel transport when committing a packet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Channel is not open.
    #[error("channel is closed: port ID ({port}) channel ID ({channel})")]
    Closed {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// Channel end does not exist.
    #[error("channel does not exist: port ID ({port}) channel ID ({channel})")]
    NotFound {
        /// Source port.
        port: String,
        /// Source channel.
        channel: String,
    },

    /// Capability does not authenticate for this channel.
    #[error("caller does not own capability for channel")]
    CapabilityMismatch,

    /// Packet sequence is not the next send sequence.
    #[error("packet sequence {got} does not match next send sequence {expected}")]
    SequenceMismatch {
        /// Next send sequence held by the channel.
        expected: u64,
        /// Sequence carried by the packet.
        got: u64,
    },

    /// Both timeout height and timestamp are zero.
    #[error("packet timeout height and timeout timestamp cannot both be 0")]
    InvalidTimeout,

    /// Packet data exceeds the transport's size limit.
    #[error("packet data too large: {size} bytes (limit: {limit} bytes)")]
    PacketTooLarge {
        /// Size of the packet data.
        size: usize,
        /// Maximum allowed size.
        limit: usize,
    },

    /// Send refused for a transport-specific reason.
    #[error("send rejected: {0}")]
    Rejected(String),
}

/// Height on the counterparty chain, split by revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height {
    /// Revision (chain upgrade) number.
    pub revision_number: u64,
    /// Block height within the revision.
    pub revision_height: u64,
}

impl Height {
    /// Create a height.
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    /// The zero height, meaning "no height timeout".
    pub fn zero() -> Self {
        Self::default()
    }

    /// Check whether this is the zero height.
    pub fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

/// Lifecycle state of a channel end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Handshake finished, packets may flow.
    Open,
    /// Channel closed, no further sends.
    Closed,
}

/// The remote end of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterparty {
    /// Port on the counterparty chain.
    pub port_id: String,
    /// Channel on the counterparty chain.
    pub channel_id: String,
}

/// Local view of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEnd {
    /// Current state.
    pub state: ChannelState,
    /// Where packets sent on this channel are delivered.
    pub counterparty: Counterparty,
}

/// Unforgeable token proving the holder may act on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    index: u64,
}

impl Capability {
    /// Create a capability with the given index.
    ///
    /// Only the channel layer should mint capabilities.
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    /// Get the capability index.
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// A packet as committed to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPacket {
    /// Serialized envelope bytes.
    pub data: Vec<u8>,
    /// Per-channel send sequence.
    pub sequence: u64,
    /// Port on the sending chain.
    pub source_port: String,
    /// Channel on the sending chain.
    pub source_channel: String,
    /// Port on the receiving chain.
    pub destination_port: String,
    /// Channel on the receiving chain.
    pub destination_channel: String,
    /// Counterparty height after which the packet times out (zero = none).
    pub timeout_height: Height,
    /// Counterparty time in nanoseconds after which the packet times out (0 = none).
    pub timeout_timestamp: u64,
}

/// Interface to the channel layer consumed by the packet lifecycle.
///
/// All methods run inside a single state transition; nothing here blocks
/// or suspends.
pub trait ChannelKeeper {
    /// Look up the channel end for a local port/channel.
    fn channel(&self, port: &str, channel: &str) -> Option<ChannelEnd>;

    /// Get the next outbound sequence for a local port/channel.
    fn next_sequence_send(&self, port: &str, channel: &str) -> Option<u64>;

    /// Get the capability this module holds for a local port/channel.
    fn channel_capability(&self, port: &str, channel: &str) -> Option<Capability>;

    /// Commit a packet to the channel.
    ///
    /// On success the channel's next send sequence advances by one.
    fn send_packet(
        &mut self,
        capability: &Capability,
        packet: ChannelPacket,
    ) -> Result<(), ChannelError>;
}
