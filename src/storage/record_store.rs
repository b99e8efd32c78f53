//! Generic record stores over line-delimited JSON files
//!
//! A `RecordStore` maps a primary key to exactly one record. A
//! `GroupedRecordStore` maps a key to an ordered sequence of records (used
//! for enrollments, grouped by student number).
//!
//! Stores hold no records between calls: `load` reads the whole file into an
//! owned map and `save` rewrites the whole file from one. Both maps keep
//! insertion order, which is also the on-disk order.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::EnrollmentResult;

use super::file_io::{read_json_lines, write_json_lines_atomic};

/// A record that can live in a store, identified by a string key
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The key this record is filed under
    fn key(&self) -> &str;
}

/// Insertion-ordered map from key to a single record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMap<R> {
    records: Vec<R>,
}

impl<R> Default for RecordMap<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordMap<R> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by key
    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Get a mutable record by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.key() == key)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a record, replacing any record with the same key in place
    ///
    /// Returns the replaced record. New keys go to the end.
    pub fn insert(&mut self, record: R) -> Option<R> {
        match self.records.iter().position(|r| r.key() == record.key()) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    /// Remove a record by key, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<R> {
        let index = self.records.iter().position(|r| r.key() == key)?;
        Some(self.records.remove(index))
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key())
    }
}

impl<R: Record> FromIterator<R> for RecordMap<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

impl<'a, R> IntoIterator for &'a RecordMap<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Insertion-ordered map from key to a sequence of records
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRecords<R> {
    groups: Vec<(String, Vec<R>)>,
}

impl<R> Default for GroupedRecords<R> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<R: Record> GroupedRecords<R> {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups (distinct keys)
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all groups
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    /// Records filed under `key`, in insertion order (empty if none)
    pub fn get(&self, key: &str) -> &[R] {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[])
    }

    /// Append a record to the end of its key's group
    pub fn push(&mut self, record: R) {
        match self.groups.iter_mut().find(|(k, _)| k == record.key()) {
            Some((_, records)) => records.push(record),
            None => self.groups.push((record.key().to_string(), vec![record])),
        }
    }

    /// Iterate `(key, records)` groups in first-seen order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[R])> {
        self.groups
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Iterate all records, group by group
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.groups.iter().flat_map(|(_, records)| records.iter())
    }
}

impl<R: Record> FromIterator<R> for GroupedRecords<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for record in iter {
            grouped.push(record);
        }
        grouped
    }
}

/// File-backed store of single records keyed by `Record::key`
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordStore<R> {
    /// Create a store backed by `path` (the file need not exist)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record; a missing file loads as an empty map
    ///
    /// A key that appears on several lines keeps its first position and its
    /// last value.
    pub fn load(&self) -> EnrollmentResult<RecordMap<R>> {
        let records: Vec<R> = read_json_lines(&self.path)?;
        Ok(records.into_iter().collect())
    }

    /// Rewrite the file from `records`
    pub fn save(&self, records: &RecordMap<R>) -> EnrollmentResult<()> {
        write_json_lines_atomic(&self.path, records)
    }
}

/// File-backed store of record sequences grouped by `Record::key`
#[derive(Debug, Clone)]
pub struct GroupedRecordStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> GroupedRecordStore<R> {
    /// Create a store backed by `path` (the file need not exist)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record, grouped by key in file order
    pub fn load(&self) -> EnrollmentResult<GroupedRecords<R>> {
        let records: Vec<R> = read_json_lines(&self.path)?;
        Ok(records.into_iter().collect())
    }

    /// Rewrite the file from `grouped`, one record per line, group by group
    pub fn save(&self, grouped: &GroupedRecords<R>) -> EnrollmentResult<()> {
        write_json_lines_atomic(&self.path, grouped.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        value: i32,
    }

    impl Record for Item {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: i32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    fn create_test_store() -> (TempDir, RecordStore<Item>) {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(temp_dir.path().join("items.txt"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp_dir, store) = create_test_store();
        let map = store.load().unwrap();
        assert!(map.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, store) = create_test_store();
        let map: RecordMap<Item> = vec![item("b", 2), item("a", 1)].into_iter().collect();

        store.save(&map).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, map);
        let keys: Vec<_> = loaded.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map: RecordMap<Item> = vec![item("a", 1), item("b", 2)].into_iter().collect();

        let replaced = map.insert(item("a", 10));

        assert_eq!(replaced, Some(item("a", 1)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(&item("a", 10)));
    }

    #[test]
    fn test_remove_then_insert_moves_to_end() {
        let mut map: RecordMap<Item> = vec![item("a", 1), item("b", 2)].into_iter().collect();

        assert_eq!(map.remove("a"), Some(item("a", 1)));
        assert_eq!(map.remove("a"), None);
        map.insert(item("a", 3));

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_keys_keep_first_position_last_value() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "{\"id\":\"a\",\"value\":1}\n{\"id\":\"b\",\"value\":2}\n{\"id\":\"a\",\"value\":3}\n",
        )
        .unwrap();

        let map = store.load().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&item("a", 3)));
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "{\"id\": \"x\", \"value\": 7}\n\n{\"id\": \"y\", \"value\": 8}\n",
        )
        .unwrap();

        store.save(&store.load().unwrap()).unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_grouped_store_groups_and_flattens() {
        let temp_dir = TempDir::new().unwrap();
        let store: GroupedRecordStore<Item> =
            GroupedRecordStore::new(temp_dir.path().join("grouped.txt"));
        fs::write(
            store.path(),
            "{\"id\":\"s1\",\"value\":1}\n{\"id\":\"s2\",\"value\":2}\n{\"id\":\"s1\",\"value\":3}\n",
        )
        .unwrap();

        let grouped = store.load().unwrap();
        assert_eq!(grouped.group_count(), 2);
        assert_eq!(grouped.record_count(), 3);
        assert_eq!(grouped.get("s1"), &[item("s1", 1), item("s1", 3)]);
        assert!(grouped.get("missing").is_empty());

        store.save(&grouped).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "{\"id\":\"s1\",\"value\":1}\n{\"id\":\"s1\",\"value\":3}\n{\"id\":\"s2\",\"value\":2}\n"
        );
    }

    #[test]
    fn test_grouped_push_appends_to_existing_group() {
        let mut grouped = GroupedRecords::new();
        grouped.push(item("s1", 1));
        grouped.push(item("s2", 2));
        grouped.push(item("s1", 3));

        let keys: Vec<_> = grouped.groups().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["s1", "s2"]);
        assert_eq!(grouped.get("s1").len(), 2);
    }
}
