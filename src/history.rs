use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "travelQueries";
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl QueryRecord {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Most-recent-first, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<QueryRecord>", into = "Vec<QueryRecord>")]
pub struct HistoryLog {
    records: Vec<QueryRecord>,
}

impl From<Vec<QueryRecord>> for HistoryLog {
    fn from(records: Vec<QueryRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<HistoryLog> for Vec<QueryRecord> {
    fn from(log: HistoryLog) -> Self {
        log.records
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut records: Vec<QueryRecord>) -> Self {
        records.truncate(HISTORY_CAPACITY);
        Self { records }
    }

    pub fn prepend(&mut self, record: QueryRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<&QueryRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(HISTORY_KEY) else {
            return Self::new();
        };

        match serde_json::from_str::<Self>(&raw) {
            Ok(log) => log,
            Err(e) => {
                warn!(error = %e, "discarding unreadable query history");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(&self.records)?;
        store.set(HISTORY_KEY, serialized)
    }
}
