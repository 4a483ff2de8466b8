//! In-memory record store.

use std::collections::BTreeMap;

use xrecord_types::RecordId;

use super::{Record, RecordStore, SentRecord, SentRecordStore};

/// In-memory implementation of both record stores.
///
/// Ids are assigned from a counter starting at 0, matching a chain that
/// numbers records by their creation count.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    records: BTreeMap<RecordId, Record>,
    sent: BTreeMap<RecordId, SentRecord>,
    next_id: u64,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owned records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of shadows.
    pub fn sent_record_count(&self) -> usize {
        self.sent.len()
    }
}

impl RecordStore for MemoryRecordStore {
    fn record(&self, id: RecordId) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    fn set_record(&mut self, record: Record) {
        // keep the counter ahead of explicitly inserted ids
        if record.id.value() >= self.next_id {
            self.next_id = record.id.value().saturating_add(1);
        }
        self.records.insert(record.id, record);
    }

    fn append_record(&mut self, title: String, content: String, owner: String) -> RecordId {
        let id = RecordId::new(self.next_id);
        self.set_record(Record {
            id,
            title,
            content,
            owner,
        });
        id
    }
}

impl SentRecordStore for MemoryRecordStore {
    fn sent_record(&self, id: RecordId) -> Option<SentRecord> {
        self.sent.get(&id).cloned()
    }

    fn set_sent_record(&mut self, record: SentRecord) {
        self.sent.insert(record.id, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_sequential_ids() {
        let mut store = MemoryRecordStore::new();
        let a = store.append_record("a".into(), "x".into(), "alice".into());
        let b = store.append_record("b".into(), "y".into(), "bob".into());

        assert_eq!(a, RecordId::new(0));
        assert_eq!(b, RecordId::new(1));
        assert_eq!(store.record(b).unwrap().owner, "bob");
    }

    #[test]
    fn append_skips_explicitly_inserted_ids() {
        let mut store = MemoryRecordStore::new();
        store.set_record(Record {
            id: RecordId::new(7),
            title: "t".into(),
            content: "c".into(),
            owner: "alice".into(),
        });

        let id = store.append_record("n".into(), "c".into(), "bob".into());
        assert_eq!(id, RecordId::new(8));
        assert_eq!(store.record_count(), 2);
    }

    #[test]
    fn sent_records_are_separate_from_owned_records() {
        let mut store = MemoryRecordStore::new();
        store.set_sent_record(SentRecord {
            id: RecordId::new(3),
            title: "remote".into(),
            owner: "alice".into(),
        });

        assert!(store.record(RecordId::new(3)).is_none());
        assert_eq!(store.sent_record(RecordId::new(3)).unwrap().title, "remote");
        assert_eq!(store.sent_record_count(), 1);
    }
}
