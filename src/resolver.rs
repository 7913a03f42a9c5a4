//! Query resolution against a loaded [`RecordStore`].

use tracing::debug;

use crate::error::{LookupError, LookupResult};
use crate::file_id::FileId;
use crate::models::CharacterRecord;
use crate::store::RecordStore;

/// Resolves user supplied names or file IDs to exactly one record.
///
/// Names match exactly and case-sensitively, since the same letters can mean different
/// things across scripts. Only the structured file-ID form is case-folded.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
  store: &'a RecordStore,
}

impl<'a> Resolver<'a> {
  /// Create a resolver borrowing `store`.
  pub fn new(store: &'a RecordStore) -> Self {
    Self { store }
  }

  /// Resolve a single query.
  pub fn resolve(&self, query: &str) -> LookupResult<&'a CharacterRecord> {
    let query = query.trim();
    if query.is_empty() {
      return Err(LookupError::NotFound(String::new()));
    }

    let by_name = self.store.by_name(query);
    let by_file_id = FileId::parse(query).and_then(|id| self.store.get(id));

    match (by_name, by_file_id) {
      (Some(named), Some(coded)) if named.file_id != coded.file_id => {
        Err(LookupError::AmbiguousQuery {
          query: query.to_string(),
          candidates: vec![named.file_id.to_string(), coded.file_id.to_string()],
        })
      }
      (Some(record), _) | (None, Some(record)) => {
        debug!(query, file_id = %record.file_id, "resolved query");
        Ok(record)
      }
      (None, None) => Err(LookupError::NotFound(query.to_string())),
    }
  }

  /// Resolve several queries, stopping at the first failure.
  pub fn resolve_all<'q>(
    &self,
    queries: impl IntoIterator<Item = &'q str>,
  ) -> LookupResult<Vec<&'a CharacterRecord>> {
    queries.into_iter().map(|query| self.resolve(query)).collect()
  }
}
