//! Record storage interfaces.
//!
//! Two stores back the protocol:
//! - [`RecordStore`] holds records this chain owns. Only the receipt side
//!   mutates it.
//! - [`SentRecordStore`] holds shadows: what this chain believes the
//!   counterparty's copy of a record looks like. Only acknowledgement
//!   reconciliation mutates it.
//!
//! Both are passed explicitly into every handler; there is no ambient store.

mod memory;

pub use memory::MemoryRecordStore;

use xrecord_types::RecordId;

/// A record owned by this chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Store-assigned id.
    pub id: RecordId,
    /// Current title.
    pub title: String,
    /// Current body.
    pub content: String,
    /// Address that created the record. Never changes.
    pub owner: String,
}

/// Sender-side shadow of a record that lives on the counterparty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    /// Id of the record on the counterparty.
    pub id: RecordId,
    /// Title last confirmed by the counterparty.
    pub title: String,
    /// Address that created the record.
    pub owner: String,
}

/// Store of locally owned records.
pub trait RecordStore {
    /// Look up a record by id.
    fn record(&self, id: RecordId) -> Option<Record>;

    /// Insert or overwrite a record.
    fn set_record(&mut self, record: Record);

    /// Create a record under the next free id and return that id.
    fn append_record(&mut self, title: String, content: String, owner: String) -> RecordId;
}

/// Store of sender-side shadows.
pub trait SentRecordStore {
    /// Look up a shadow by counterparty record id.
    fn sent_record(&self, id: RecordId) -> Option<SentRecord>;

    /// Insert or overwrite a shadow.
    fn set_sent_record(&mut self, record: SentRecord);
}
