//! Recently generated QR payloads.
//!
//! The list is ordered most recent first, holds each value at most once and
//! never grows past [`MAX_HISTORY`] entries. Every change is written through
//! to the `local_storage` record [`HISTORY_KEY`] as a JSON array of strings.

use tracing::{debug, warn};

use crate::{Database, DbError};

/// Storage key of the persisted history record.
pub const HISTORY_KEY: &str = "qrHistory";

/// Maximum number of entries kept.
pub const MAX_HISTORY: usize = 10;

/// In-memory history list backed by a persisted record.
pub struct HistoryStore {
    db: Database,
    entries: Vec<String>,
}

impl HistoryStore {
    /// Read the persisted list. A missing record yields an empty history.
    ///
    /// A record that does not decode as a list of strings is ignored with a
    /// warning, since this store never writes one. Blank and repeated values
    /// are dropped (first occurrence wins) before the list is capped.
    pub fn load(db: Database) -> Result<Self, DbError> {
        let entries = match db.get_item(HISTORY_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => normalize(list),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed history record");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = entries.len(), "History loaded");
        Ok(Self { db, entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `value` to the front, dropping the oldest entry past the cap.
    ///
    /// Blank values are ignored. The in-memory list only changes once the new
    /// list has been persisted.
    pub fn record(&mut self, value: &str) -> Result<(), DbError> {
        if value.trim().is_empty() {
            return Ok(());
        }

        let next = push_front_unique(&self.entries, value);
        self.persist(&next)?;
        self.entries = next;
        debug!(count = self.entries.len(), "History entry recorded");
        Ok(())
    }

    /// Empty the list and delete the persisted record.
    pub fn clear(&mut self) -> Result<(), DbError> {
        self.db.remove_item(HISTORY_KEY)?;
        self.entries.clear();
        debug!("History cleared");
        Ok(())
    }

    fn persist(&self, entries: &[String]) -> Result<(), DbError> {
        let json =
            serde_json::to_string(entries).map_err(|e| DbError::InvalidData(e.to_string()))?;
        self.db.set_item(HISTORY_KEY, &json)
    }
}

fn normalize(list: Vec<String>) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(MAX_HISTORY);
    for value in list {
        if entries.len() == MAX_HISTORY {
            break;
        }
        if !value.trim().is_empty() && !entries.contains(&value) {
            entries.push(value);
        }
    }
    entries
}

fn push_front_unique(entries: &[String], value: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(MAX_HISTORY);
    next.push(value.to_string());
    next.extend(entries.iter().filter(|e| e.as_str() != value).cloned());
    next.truncate(MAX_HISTORY);
    next
}
