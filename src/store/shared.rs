//! Atomically swappable handle to the current record store.

use std::io::Read;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::error::LookupResult;
use crate::store::{LoadOptions, RecordStore, load};

/// Shared, hot-reloadable record store.
///
/// Readers take a snapshot and keep using it for as long as they like; a reload builds the
/// replacement table completely before publishing it, so no reader ever sees a partial one.
#[derive(Debug)]
pub struct SharedStore {
  current: RwLock<Arc<RecordStore>>,
}

impl SharedStore {
  /// Wrap an initial store.
  pub fn new(store: RecordStore) -> Self {
    Self {
      current: RwLock::new(Arc::new(store)),
    }
  }

  /// Cheap handle to the currently published store.
  pub fn snapshot(&self) -> Arc<RecordStore> {
    self
      .current
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Publish an already built store, returning the previous one.
  pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
    let next = Arc::new(store);
    let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, next)
  }

  /// Load a new table from `source` and publish it.
  ///
  /// On failure the previously published store stays in place.
  pub fn reload<R: Read>(&self, source: R, options: &LoadOptions) -> LookupResult<Arc<RecordStore>> {
    let store = match load(source, options) {
      Ok(store) => store,
      Err(err) => {
        warn!(error = %err, "reload rejected, keeping current table");
        return Err(err);
      }
    };
    let records = store.len();
    let next = Arc::new(store);
    *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
    info!(records, "published reloaded character table");
    Ok(next)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::LookupError;

  fn initial() -> RecordStore {
    load(
      "display_name,aliases,file_id\nShiroko,,CH0145\n".as_bytes(),
      &LoadOptions::default(),
    )
    .unwrap()
  }

  #[test]
  fn reload_publishes_new_table() {
    let shared = SharedStore::new(initial());
    let before = shared.snapshot();

    let after = shared
      .reload(
        "display_name,aliases,file_id\nShiroko,,CH0145\nHoshino,,CH0063\n".as_bytes(),
        &LoadOptions::default(),
      )
      .unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
    assert_eq!(shared.snapshot().len(), 2);
  }

  #[test]
  fn reload_returns_the_table_it_published() {
    let shared = SharedStore::new(initial());
    let loaded = shared
      .reload(
        "display_name,aliases,file_id\nHoshino,,CH0063\n".as_bytes(),
        &LoadOptions::default(),
      )
      .unwrap();
    let replaced = shared.replace(initial());

    assert!(Arc::ptr_eq(&loaded, &replaced));
    assert!(loaded.by_file_id("CH0063").is_some());
    assert!(shared.snapshot().by_file_id("CH0063").is_none());
  }

  #[test]
  fn failed_reload_keeps_previous_table() {
    let shared = SharedStore::new(initial());

    let err = shared
      .reload(
        "display_name,aliases,file_id\nA,,CH0001\nB,,CH0001\n".as_bytes(),
        &LoadOptions::default(),
      )
      .unwrap_err();

    assert!(matches!(err, LookupError::DuplicateKey { .. }));
    assert_eq!(*shared.snapshot(), initial());
  }

  #[test]
  fn snapshots_are_shareable_across_threads() {
    let shared = Arc::new(SharedStore::new(initial()));
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || shared.snapshot().by_file_id("CH0145").is_some())
      })
      .collect();

    for handle in handles {
      assert!(handle.join().unwrap());
    }
  }
}
