//! CSV ingestion for the record store.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{LookupError, LookupResult};
use crate::file_id::FileId;
use crate::models::{CharacterRecord, DatasetRow, SimpleRow};
use crate::store::RecordStore;

/// Options controlling how a source table is interpreted.
#[derive(Debug, Clone)]
pub struct LoadOptions {
  /// Separator between names inside the `aliases` cell of the simple layout.
  pub alias_delimiter: char,
}

impl Default for LoadOptions {
  fn default() -> Self {
    Self {
      alias_delimiter: '|',
    }
  }
}

/// Column layout detected from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
  /// `display_name,aliases,file_id`.
  Simple,
  /// The full multi-language dataset layout.
  Dataset,
}

impl SourceLayout {
  fn detect(headers: &StringRecord) -> Option<Self> {
    let has = |name: &str| headers.iter().any(|header| header == name);
    if has("display_name") && has("file_id") {
      Some(Self::Simple)
    } else if has("file_id") && (has("name_cn") || has("name")) {
      Some(Self::Dataset)
    } else {
      None
    }
  }
}

/// Read a CSV source into a fully validated store.
///
/// Either every row is accepted and a complete store is returned, or the first offending
/// row is reported and nothing is returned.
pub fn load<R: Read>(source: R, options: &LoadOptions) -> LookupResult<RecordStore> {
  let mut reader = ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_reader(source);

  let headers: StringRecord = reader
    .headers()?
    .iter()
    .map(|header| header.trim_start_matches('\u{feff}').trim())
    .collect();
  let layout = SourceLayout::detect(&headers).ok_or_else(|| LookupError::MalformedSource {
    row: 0,
    reason: format!("unrecognised header: {}", headers.iter().collect::<Vec<_>>().join(",")),
  })?;
  reader.set_headers(headers);
  debug!(?layout, "detected source layout");

  let mut store = RecordStore::default();
  match layout {
    SourceLayout::Simple => read_rows(&mut reader, &mut store, |row: SimpleRow, number| {
      simple_record(row, number, options.alias_delimiter)
    })?,
    SourceLayout::Dataset => read_rows(&mut reader, &mut store, dataset_record)?,
  }

  info!(records = store.len(), "loaded character table");
  Ok(store)
}

/// Open and load a CSV file from disk.
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> LookupResult<RecordStore> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| LookupError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  load(file, options)
}

fn read_rows<R, T, F>(
  reader: &mut csv::Reader<R>,
  store: &mut RecordStore,
  mut convert: F,
) -> LookupResult<()>
where
  R: Read,
  T: DeserializeOwned,
  F: FnMut(T, usize) -> LookupResult<CharacterRecord>,
{
  for (index, result) in reader.deserialize::<T>().enumerate() {
    let number = index + 1;
    let row = result.map_err(|err| LookupError::MalformedSource {
      row: number,
      reason: err.to_string(),
    })?;
    let record = convert(row, number)?;
    debug!(row = number, file_id = %record.file_id, name = %record.display_name, "accepted row");
    store.insert(record, number)?;
  }
  Ok(())
}

fn simple_record(row: SimpleRow, number: usize, delimiter: char) -> LookupResult<CharacterRecord> {
  let display_name = required(&row.display_name, "display_name", number)?;
  let file_id = parse_file_id(&row.file_id, number)?;
  let aliases = row.aliases.split(delimiter).map(str::to_string);
  Ok(CharacterRecord::new(display_name, aliases, file_id))
}

fn dataset_record(row: DatasetRow, number: usize) -> LookupResult<CharacterRecord> {
  let file_id = parse_file_id(&row.file_id, number)?;
  let display_name = if row.name_cn.is_empty() {
    required(&row.name, "name_cn", number)?
  } else {
    row.name_cn.as_str()
  };

  let skin_name = (!row.skin_name.is_empty()).then(|| row.skin_name.clone());

  // name, name_en and name_kr carry no outfit qualifier and repeat across forms. name_jp and
  // name_tw only carry one when the wiki has a localised outfit name.
  let mut aliases = Vec::new();
  for localised in [&row.name_jp, &row.name_tw] {
    if skin_name.is_none() || has_outfit_qualifier(localised) {
      aliases.push(localised.clone());
    }
  }
  if skin_name.is_none() {
    aliases.extend([row.name.clone(), row.name_en.clone(), row.name_kr.clone()]);
  }

  let mut record = CharacterRecord::new(display_name, aliases, file_id);
  record.wiki_id = optional_number(&row.kivo_wiki_id, "kivo_wiki_id", number)?;
  record.spine_id = optional_number(&row.spine_id, "spine_id", number)?;
  record.skin_name = skin_name;
  Ok(record)
}

/// Whether a name ends with a full-width parenthesised outfit name, as in `砂狼シロコ （水着）`.
fn has_outfit_qualifier(name: &str) -> bool {
  name
    .strip_suffix('）')
    .and_then(|rest| rest.rfind('（'))
    .is_some_and(|open| open > 0)
}

fn required<'a>(value: &'a str, field: &str, row: usize) -> LookupResult<&'a str> {
  if value.is_empty() {
    return Err(LookupError::MalformedSource {
      row,
      reason: format!("missing {field}"),
    });
  }
  Ok(value)
}

fn parse_file_id(value: &str, row: usize) -> LookupResult<FileId> {
  let value = required(value, "file_id", row)?;
  FileId::parse(value).ok_or_else(|| LookupError::MalformedSource {
    row,
    reason: format!("invalid file_id {value:?}"),
  })
}

fn optional_number(value: &str, field: &str, row: usize) -> LookupResult<Option<u32>> {
  if value.is_empty() {
    return Ok(None);
  }
  value
    .parse()
    .map(Some)
    .map_err(|_| LookupError::MalformedSource {
      row,
      reason: format!("{field} is not a number: {value:?}"),
    })
}
