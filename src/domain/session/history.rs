use chrono::{DateTime, Utc};
use serde::Serialize;

/// One finished transcription, as kept in memory and served to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionRecord {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Captured audio length in seconds
    pub duration_secs: f64,
}

impl TranscriptionRecord {
    pub fn new(text: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
            duration_secs,
        }
    }
}

/// Bounded in-memory history of transcriptions, newest first.
///
/// The limit is clamped to 1..=1000 so a bad config value can neither disable
/// history entirely nor grow it without bound.
#[derive(Debug)]
pub struct TranscriptionHistory {
    records: Vec<TranscriptionRecord>,
    limit: usize,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
const MAX_HISTORY_LIMIT: usize = 1000;

impl TranscriptionHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: limit.clamp(1, MAX_HISTORY_LIMIT),
        }
    }

    pub fn push(&mut self, record: TranscriptionRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.limit);
    }

    pub fn records(&self) -> &[TranscriptionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for TranscriptionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
