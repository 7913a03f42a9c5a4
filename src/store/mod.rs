//! Immutable in-memory table of character records.
//!
//! The table is built in one pass by [`load`] (or [`RecordStore::from_records`]) and never
//! mutated afterwards. Every uniqueness rule is checked while building, so a store that
//! exists is always consistent. Rebuilding at runtime goes through [`SharedStore`].

mod loading;
mod shared;

use std::collections::HashMap;

pub use loading::{LoadOptions, SourceLayout, load, load_path};
pub use shared::SharedStore;

use crate::error::{LookupError, LookupResult};
use crate::file_id::FileId;
use crate::models::CharacterRecord;

/// Loaded character table with indexes by file ID and by name.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
  records: Vec<CharacterRecord>,
  by_file_id: HashMap<FileId, usize>,
  by_name: HashMap<String, usize>,
}

impl RecordStore {
  /// Build a store from already constructed records.
  ///
  /// Records are numbered from 1 in iteration order for error reporting.
  pub fn from_records(records: impl IntoIterator<Item = CharacterRecord>) -> LookupResult<Self> {
    let mut store = Self::default();
    for (index, record) in records.into_iter().enumerate() {
      store.insert(record, index + 1)?;
    }
    Ok(store)
  }

  /// All records in source order.
  pub fn all_records(&self) -> &[CharacterRecord] {
    &self.records
  }

  /// Look up a record by file ID. The code is parsed, so `ch0145` and `CH0145` are equivalent.
  pub fn by_file_id(&self, code: &str) -> Option<&CharacterRecord> {
    FileId::parse(code).and_then(|id| self.get(id))
  }

  /// Look up a record by an already parsed file ID.
  pub fn get(&self, id: FileId) -> Option<&CharacterRecord> {
    self.by_file_id.get(&id).map(|&index| &self.records[index])
  }

  /// Exact, case-sensitive lookup on display names and aliases.
  pub fn by_name(&self, name: &str) -> Option<&CharacterRecord> {
    self.by_name.get(name).map(|&index| &self.records[index])
  }

  /// Number of records.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Returns true when the table holds no records.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub(crate) fn insert(&mut self, record: CharacterRecord, row: usize) -> LookupResult<()> {
    if self.by_file_id.contains_key(&record.file_id) {
      return Err(LookupError::DuplicateKey {
        key: record.file_id.to_string(),
        row,
      });
    }
    if let Some(name) = record.names().find(|name| self.by_name.contains_key(*name)) {
      return Err(LookupError::DuplicateKey {
        key: name.to_string(),
        row,
      });
    }

    let index = self.records.len();
    self.by_file_id.insert(record.file_id, index);
    for name in record.names() {
      self.by_name.insert(name.to_string(), index);
    }
    self.records.push(record);
    Ok(())
  }
}

impl PartialEq for RecordStore {
  fn eq(&self, other: &Self) -> bool {
    self.records == other.records
  }
}

impl Eq for RecordStore {}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(name: &str, aliases: &[&str], id: &str) -> CharacterRecord {
    CharacterRecord::new(
      name,
      aliases.iter().map(|alias| alias.to_string()),
      FileId::parse(id).unwrap(),
    )
  }

  #[test]
  fn indexes_by_file_id_and_names() {
    let store = RecordStore::from_records(vec![
      record("Shiroko", &["シロコ"], "CH0145"),
      record("Hoshino", &[], "CH0063"),
    ])
    .unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.by_file_id("ch0145").unwrap().display_name, "Shiroko");
    assert_eq!(store.by_name("シロコ").unwrap().file_id.to_string(), "CH0145");
    assert!(store.by_name("shiroko").is_none());
    assert!(store.by_file_id("CH9999").is_none());
    assert!(store.by_file_id("not an id").is_none());
  }

  #[test]
  fn preserves_insertion_order() {
    let store = RecordStore::from_records(vec![
      record("B", &[], "CH0002"),
      record("A", &[], "CH0001"),
    ])
    .unwrap();

    let names: Vec<&str> = store
      .all_records()
      .iter()
      .map(|record| record.display_name.as_str())
      .collect();
    assert_eq!(names, vec!["B", "A"]);
  }

  #[test]
  fn rejects_duplicate_file_ids() {
    let err = RecordStore::from_records(vec![
      record("A", &[], "CH0001"),
      record("B", &[], "ch0001"),
    ])
    .unwrap_err();

    assert!(matches!(err, LookupError::DuplicateKey { key, row: 2 } if key == "CH0001"));
  }

  #[test]
  fn rejects_alias_colliding_with_display_name() {
    let err = RecordStore::from_records(vec![
      record("Shiroko", &[], "CH0145"),
      record("Shiroko (Riding)", &["Shiroko"], "CH0146"),
    ])
    .unwrap_err();

    assert!(matches!(err, LookupError::DuplicateKey { key, row: 2 } if key == "Shiroko"));
  }

  #[test]
  fn equality_ignores_index_internals() {
    let left = RecordStore::from_records(vec![record("A", &["a"], "CH0001")]).unwrap();
    let right = RecordStore::from_records(vec![record("A", &["a"], "CH0001")]).unwrap();
    assert_eq!(left, right);
  }
}
