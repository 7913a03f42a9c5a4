//! Parsing and normalisation of internal file IDs (`CH0145`, `NP0031`).

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LookupError;

fn file_id_shape() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(CH|NP)([0-9]{4})$").expect("invalid file id regex"))
}

/// Category of asset group a file ID refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileIdKind {
    /// Playable character (`CH` prefix).
    Character,
    /// Non-playable character (`NP` prefix).
    Npc,
}

/// Canonical, uppercase internal file ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId {
    kind: FileIdKind,
    number: u16,
}

impl FileId {
    /// Parse a file ID, tolerating the decorations found in the wiki data.
    ///
    /// Surrounding whitespace, a leading `J_` and a trailing `_spr` are stripped and the
    /// prefix is matched case-insensitively, so `J_ch0145_spr` parses as `CH0145`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut trimmed = value.trim();
        if let Some(rest) = strip_prefix_ignore_case(trimmed, "J_") {
            trimmed = rest;
        }
        if let Some(rest) = strip_suffix_ignore_case(trimmed, "_spr") {
            trimmed = rest;
        }

        Self::parse_canonical(trimmed)
    }

    /// Parse only the bare `CH####` / `NP####` shape, ignoring case and surrounding whitespace.
    pub fn parse_canonical(value: &str) -> Option<Self> {
        let captures = file_id_shape().captures(value.trim())?;
        let kind = if captures[1].eq_ignore_ascii_case("CH") {
            FileIdKind::Character
        } else {
            FileIdKind::Npc
        };
        let number = captures[2].parse().ok()?;
        Some(Self { kind, number })
    }

    /// Kind of asset group.
    pub fn kind(&self) -> FileIdKind {
        self.kind
    }

    /// Whether this is a playable character ID.
    pub fn is_character(&self) -> bool {
        self.kind == FileIdKind::Character
    }

    /// Lowercase form used inside bundle file names.
    pub fn lowercase(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            FileIdKind::Character => "CH",
            FileIdKind::Npc => "NP",
        };
        write!(f, "{prefix}{:04}", self.number)
    }
}

impl FromStr for FileId {
    type Err = LookupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| LookupError::UnknownFileId(value.to_string()))
    }
}

impl Serialize for FileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    let tail = value.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &value[..split])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_ids() {
        let id = FileId::parse("CH0145").unwrap();
        assert_eq!(id.kind(), FileIdKind::Character);
        assert_eq!(id.to_string(), "CH0145");
        assert_eq!(id.lowercase(), "ch0145");
    }

    #[test]
    fn folds_case_and_whitespace() {
        assert_eq!(FileId::parse("  ch0145 "), FileId::parse("CH0145"));
        assert_eq!(FileId::parse("np0031").unwrap().to_string(), "NP0031");
    }

    #[test]
    fn strips_wiki_decorations() {
        assert_eq!(FileId::parse("J_CH0203_spr").unwrap().to_string(), "CH0203");
        assert_eq!(FileId::parse("ch0070_SPR").unwrap().to_string(), "CH0070");
    }

    #[test]
    fn canonical_parse_keeps_decorations_invalid() {
        assert!(FileId::parse_canonical("J_CH0203_spr").is_none());
        assert_eq!(FileId::parse_canonical(" ch0203 ").unwrap().to_string(), "CH0203");
    }

    #[test]
    fn rejects_other_shapes() {
        for value in ["", "CH145", "CH01450", "XX0145", "shiroko_robber", "0145", "CH01a5"] {
            assert!(FileId::parse(value).is_none(), "{value} should not parse");
        }
    }

    #[test]
    fn from_str_reports_unknown_file_id() {
        let err = "CH-1".parse::<FileId>().unwrap_err();
        assert!(matches!(err, LookupError::UnknownFileId(value) if value == "CH-1"));
    }

    #[test]
    fn serialises_as_canonical_string() {
        let id = FileId::parse("ch0001").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"CH0001\"");
        let back: FileId = serde_json::from_str("\"np0002\"").unwrap();
        assert_eq!(back.to_string(), "NP0002");
    }
}
