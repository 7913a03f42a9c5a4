//! Data structures produced while loading the character table.

use serde::{Deserialize, Serialize};

use crate::file_id::FileId;

/// A single character form and every name it can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
  /// Human readable name, unique across the table.
  pub display_name: String,
  /// Alternate names that resolve to this record, in source order.
  pub aliases: Vec<String>,
  /// Internal file ID, unique across the table.
  pub file_id: FileId,
  /// Identifier of the character page on the wiki the table was built from.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub wiki_id: Option<u32>,
  /// Identifier of the spine resource the form was taken from.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub spine_id: Option<u32>,
  /// Outfit or form name, when the record is not the base form.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skin_name: Option<String>,
}

impl CharacterRecord {
  /// Create a record with no wiki metadata.
  ///
  /// Aliases are trimmed, empty values and repeats of the display name are dropped, and
  /// duplicates are collapsed keeping their first position.
  pub fn new(
    display_name: impl Into<String>,
    aliases: impl IntoIterator<Item = String>,
    file_id: FileId,
  ) -> Self {
    let display_name = display_name.into().trim().to_string();
    let aliases = normalise_aliases(&display_name, aliases);
    Self {
      display_name,
      aliases,
      file_id,
      wiki_id: None,
      spine_id: None,
      skin_name: None,
    }
  }

  /// Every string that should resolve to this record: the display name then the aliases.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    std::iter::once(self.display_name.as_str()).chain(self.aliases.iter().map(String::as_str))
  }
}

fn normalise_aliases(display_name: &str, aliases: impl IntoIterator<Item = String>) -> Vec<String> {
  let mut result: Vec<String> = Vec::new();
  for alias in aliases {
    let alias = alias.trim();
    if alias.is_empty() || alias == display_name || result.iter().any(|seen| seen == alias) {
      continue;
    }
    result.push(alias.to_string());
  }
  result
}

/// Row of the minimal `display_name,aliases,file_id` layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleRow {
  /// Name shown to users.
  #[serde(default)]
  pub display_name: String,
  /// Delimiter separated alternate names.
  #[serde(default)]
  pub aliases: String,
  /// Raw file ID cell.
  #[serde(default)]
  pub file_id: String,
}

/// Row of the full dataset layout written by the table collection tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetRow {
  /// Raw file ID cell.
  #[serde(default)]
  pub file_id: String,
  /// Wiki character page identifier.
  #[serde(default)]
  pub kivo_wiki_id: String,
  /// Wiki spine resource identifier.
  #[serde(default)]
  pub spine_id: String,
  /// Base name without the outfit qualifier.
  #[serde(default)]
  pub name: String,
  /// Outfit name, empty for the base form.
  #[serde(default)]
  pub skin_name: String,
  /// Simplified Chinese name including the outfit qualifier.
  #[serde(default)]
  pub name_cn: String,
  /// Japanese name including the outfit qualifier.
  #[serde(default)]
  pub name_jp: String,
  /// Traditional Chinese name including the outfit qualifier.
  #[serde(default)]
  pub name_tw: String,
  /// English base name.
  #[serde(default)]
  pub name_en: String,
  /// Korean base name.
  #[serde(default)]
  pub name_kr: String,
}
