//! Error type shared by the record store, resolver and pattern generator.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur while loading the table or answering queries.
#[derive(Debug, Error)]
pub enum LookupError {
  /// A source row could not be turned into a record.
  #[error("malformed source at row {row}: {reason}")]
  MalformedSource {
    /// One-based data row number (the header is row 0).
    row: usize,
    /// What was wrong with the row.
    reason: String,
  },
  /// A file ID, display name or alias appeared more than once.
  #[error("duplicate key {key:?} at row {row}")]
  DuplicateKey {
    /// The colliding key as it appeared in the source.
    key: String,
    /// One-based data row number of the second occurrence.
    row: usize,
  },
  /// No record matched the query.
  #[error("no character matches {0:?}")]
  NotFound(String),
  /// More than one record matched the query.
  #[error("query {query:?} matches several characters: {}", candidates.join(", "))]
  AmbiguousQuery {
    /// The normalised query.
    query: String,
    /// File IDs of the matching records.
    candidates: Vec<String>,
  },
  /// The value does not have the `CH####` shape expected by the pattern generator.
  #[error("unknown file id {0:?}")]
  UnknownFileId(String),
  /// A platform profile breaks one of the profile invariants.
  #[error("invalid {platform} profile: {reason}")]
  InvalidProfile {
    /// Platform the profile was declared for.
    platform: String,
    /// Violated rule.
    reason: String,
  },
  /// Failed to read a source file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The CSV reader rejected the input.
  #[error(transparent)]
  Csv(#[from] csv::Error),
}
