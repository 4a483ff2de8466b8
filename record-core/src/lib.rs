//! # record-core
//!
//! Pure packet lifecycle logic for cross-chain record edits (no I/O,
//! instant tests).
//!
//! An account on one chain asks the counterparty chain to edit a record it
//! owns there. The lifecycle is:
//!
//! ```text
//! submit_edit ──► builder ──► transmit ──► (channel) ──► on_recv_edit
//!                                                           │
//!          on_ack_edit ◄──────────── (channel) ◄────── acknowledgement
//!          on_timeout_edit  (instead of an ack, if never delivered)
//! ```
//!
//! ## Design Philosophy
//!
//! Every handler is a single synchronous state transition. Collaborators
//! (the channel layer, the record stores, failure hooks) are passed in
//! explicitly; there is no global state. Handlers check everything before
//! writing, so a failed transition leaves no partial mutation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acknowledge;
pub mod builder;
pub mod channel;
pub mod config;
pub mod error;
pub mod hooks;
pub mod module;
pub mod msg;
pub mod receive;
pub mod store;
pub mod timeout;
pub mod transmit;
pub mod validate;

pub use acknowledge::{on_ack_create, on_ack_edit};
pub use builder::{CreateRequest, EditRequest};
pub use channel::{
    Capability, ChannelEnd, ChannelError, ChannelKeeper, ChannelPacket, ChannelState,
    Counterparty, Height, MemoryChannelKeeper,
};
pub use config::{Config, ConfigError, PacketConfig, ValidationConfig};
pub use error::{PacketError, Result};
pub use hooks::{NoHooks, PacketHooks};
pub use module::RecordModule;
pub use msg::{submit_create, submit_edit, MsgSendCreateRecord, MsgSendEditRecord};
pub use receive::{on_recv_create, on_recv_edit};
pub use store::{MemoryRecordStore, Record, RecordStore, SentRecord, SentRecordStore};
pub use timeout::{on_timeout_create, on_timeout_edit};
pub use transmit::transmit;
pub use validate::ValidateBasic;
