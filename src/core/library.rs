//! Local movie library: favorites, watched movies, notes and sponsored entries.
//!
//! Records are keyed by movie id and stored as a JSON array. Every write
//! rewrites the file before returning, keeping the previous version as a
//! `.backup` next to it.

use crate::models::local::LocalRecord;
use crate::models::movie::ListItem;
use crate::utils::fs::{load_json, save_json};
use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Library of locally saved movies.
#[derive(Debug, Default)]
pub struct Library {
    path: Option<PathBuf>,
    records: BTreeMap<i64, LocalRecord>,
}

impl Library {
    /// Open the library at `path`, starting empty when the file is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let stored: Option<Vec<LocalRecord>> = load_json(path)
            .map_err(|e| Error::InvalidLibraryFile(format!("{}: {}", path.display(), e)))?;

        let mut records = BTreeMap::new();
        for record in stored.unwrap_or_default() {
            if records.insert(record.id, record).is_some() {
                tracing::warn!("Duplicate movie id in {}, keeping the last entry", path.display());
            }
        }

        tracing::debug!("Loaded {} library records from {}", records.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            records,
        })
    }

    /// Library that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a new record. Fails if the id is already stored.
    pub fn insert(&mut self, mut record: LocalRecord) -> Result<()> {
        if self.records.contains_key(&record.id) {
            return Err(Error::RecordExists(record.id));
        }
        stamp(&mut record);
        let (id, title) = (record.id, record.title.clone());
        self.commit(|records| {
            records.insert(record.id, record);
        })?;
        tracing::info!("Saved \"{}\" ({}) to the library", title, id);
        Ok(())
    }

    /// Replace an existing record. Fails if the id is not stored.
    pub fn update(&mut self, mut record: LocalRecord) -> Result<()> {
        if !self.records.contains_key(&record.id) {
            return Err(Error::RecordNotFound(record.id));
        }
        stamp(&mut record);
        self.commit(|records| {
            records.insert(record.id, record);
        })
    }

    /// Insert or replace a record, keeping an existing note when the new
    /// record has none.
    pub fn upsert(&mut self, mut record: LocalRecord) -> Result<()> {
        if let Some(existing) = self.records.get(&record.id) {
            if record.note.is_empty() {
                record.note = existing.note.clone();
            }
        }
        stamp(&mut record);
        self.commit(|records| {
            records.insert(record.id, record);
        })
    }

    /// Remove a record. Returns whether anything was removed; a missing id is
    /// not an error.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let Some(title) = self.records.get(&id).map(|r| r.title.clone()) else {
            return Ok(false);
        };
        self.commit(|records| {
            records.remove(&id);
        })?;
        tracing::info!("Removed \"{}\" ({}) from the library", title, id);
        Ok(true)
    }

    /// Record for `id`.
    pub fn query_one(&self, id: i64) -> Option<&LocalRecord> {
        self.records.get(&id)
    }

    /// All records, newest release first. Undated records come last.
    pub fn query_all(&self) -> Vec<&LocalRecord> {
        let mut records: Vec<&LocalRecord> = self.records.values().collect();
        records.sort_by(|a, b| by_release_desc(a, b));
        records
    }

    /// Records marked as favorite.
    pub fn favorites(&self) -> Vec<&LocalRecord> {
        self.filtered(|r| r.favorite)
    }

    /// Records marked as watched.
    pub fn watched(&self) -> Vec<&LocalRecord> {
        self.filtered(|r| r.watched)
    }

    /// Producer-added records.
    pub fn sponsored(&self) -> Vec<&LocalRecord> {
        self.filtered(|r| r.sponsored)
    }

    /// Attach a personal note to a stored movie.
    pub fn set_note(&mut self, id: i64, note: &str) -> Result<()> {
        self.modify(id, |r| r.note = note.trim().to_string())
    }

    /// Mark a stored movie as watched or not.
    pub fn set_watched(&mut self, id: i64, watched: bool) -> Result<()> {
        self.modify(id, |r| r.watched = watched)
    }

    /// Mark a stored movie as favorite or not.
    pub fn set_favorite(&mut self, id: i64, favorite: bool) -> Result<()> {
        self.modify(id, |r| r.favorite = favorite)
    }

    /// Id for a new sponsored entry.
    ///
    /// Sponsored entries use negative ids so they never collide with catalog
    /// movies.
    pub fn next_sponsored_id(&self) -> i64 {
        self.records
            .keys()
            .next()
            .map(|lowest| (*lowest).min(0) - 1)
            .unwrap_or(-1)
    }

    /// Copy favorite and watched flags from the library onto list items.
    pub fn overlay_flags(&self, items: &mut [ListItem]) {
        for item in items.iter_mut() {
            if let Some(record) = self.records.get(&item.id) {
                item.favorite = record.favorite;
                item.watched = record.watched;
                item.sponsored = record.sponsored;
            }
        }
    }

    fn filtered<F: Fn(&LocalRecord) -> bool>(&self, keep: F) -> Vec<&LocalRecord> {
        self.query_all().into_iter().filter(|r| keep(*r)).collect()
    }

    fn modify<F: FnOnce(&mut LocalRecord)>(&mut self, id: i64, change: F) -> Result<()> {
        if !self.records.contains_key(&id) {
            return Err(Error::RecordNotFound(id));
        }
        self.commit(|records| {
            if let Some(record) = records.get_mut(&id) {
                change(&mut *record);
                stamp(record);
            }
        })
    }

    /// Apply `change` to a copy of the records and adopt it only once it has
    /// been written. A failed write leaves the library untouched.
    fn commit<F: FnOnce(&mut BTreeMap<i64, LocalRecord>)>(&mut self, change: F) -> Result<()> {
        let mut next = self.records.clone();
        change(&mut next);

        if let Some(ref path) = self.path {
            let records: Vec<&LocalRecord> = next.values().collect();
            save_json(path, &records)?;
            tracing::debug!("Library saved to: {}", path.display());
        }

        self.records = next;
        Ok(())
    }
}

fn stamp(record: &mut LocalRecord) {
    record.saved_at = chrono::Utc::now().to_rfc3339();
}

fn by_release_desc(a: &LocalRecord, b: &LocalRecord) -> Ordering {
    match (a.released_on, b.released_on) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str) -> LocalRecord {
        LocalRecord {
            id,
            title: title.to_string(),
            favorite: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_next_sponsored_id() {
        let mut library = Library::in_memory();
        assert_eq!(library.next_sponsored_id(), -1);

        library.insert(record(603, "The Matrix")).unwrap();
        assert_eq!(library.next_sponsored_id(), -1);

        library.insert(record(-1, "Sponsored")).unwrap();
        library.insert(record(-4, "Sponsored too")).unwrap();
        assert_eq!(library.next_sponsored_id(), -5);
    }

    #[test]
    fn test_modify_missing_record() {
        let mut library = Library::in_memory();
        assert!(matches!(
            library.set_note(1, "great"),
            Err(Error::RecordNotFound(1))
        ));
    }

    #[test]
    fn test_upsert_keeps_note() {
        let mut library = Library::in_memory();
        library.insert(record(11, "Star Wars")).unwrap();
        library.set_note(11, "  rewatch with kids ").unwrap();

        library.upsert(record(11, "Star Wars: A New Hope")).unwrap();
        let stored = library.query_one(11).unwrap();
        assert_eq!(stored.title, "Star Wars: A New Hope");
        assert_eq!(stored.note, "rewatch with kids");
        assert!(!stored.saved_at.is_empty());
    }
}
