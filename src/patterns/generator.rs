use regex::Regex;
use serde::Serialize;

use super::glob::glob_regex;
use super::profile::{FILE_ID_PLACEHOLDER, PlatformProfile};
use crate::error::{LookupError, LookupResult};
use crate::file_id::FileId;

/// Expected file name pattern for one asset category.
#[derive(Debug, Clone, Serialize)]
pub struct BundlePattern {
    /// Category the pattern belongs to.
    pub category: String,
    /// Glob with `*` wildcards.
    pub glob: String,
    #[serde(skip)]
    matcher: Regex,
}

impl BundlePattern {
    fn new(category: &str, glob: String, profile: &PlatformProfile) -> LookupResult<Self> {
        let matcher = glob_regex(&glob).map_err(|err| LookupError::InvalidProfile {
            platform: profile.platform.to_string(),
            reason: format!("template for {category:?} does not compile: {err}"),
        })?;
        Ok(Self {
            category: category.to_string(),
            glob,
            matcher,
        })
    }

    /// Whether a bundle file name matches this pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }
}

impl PartialEq for BundlePattern {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.glob == other.glob
    }
}

impl Eq for BundlePattern {}

/// Expand a `CH####` file ID into the bundle patterns declared by `profile`.
///
/// The ID is only checked for shape, not for presence in any table. Output follows the
/// profile's category order.
pub fn patterns_for(file_id: &str, profile: &PlatformProfile) -> LookupResult<Vec<BundlePattern>> {
    let id = FileId::parse_canonical(file_id)
        .filter(FileId::is_character)
        .ok_or_else(|| LookupError::UnknownFileId(file_id.to_string()))?;
    patterns_for_id(id, profile)
}

/// Typed variant of [`patterns_for`]. NPC IDs are rejected.
pub fn patterns_for_id(id: FileId, profile: &PlatformProfile) -> LookupResult<Vec<BundlePattern>> {
    if !id.is_character() {
        return Err(LookupError::UnknownFileId(id.to_string()));
    }

    let lowercase = id.lowercase();
    profile
        .asset_categories
        .iter()
        .map(|category| {
            let glob = format!(
                "{}{}",
                category.template.replace(FILE_ID_PLACEHOLDER, &lowercase),
                profile.wildcard_suffix
            );
            BundlePattern::new(&category.name, glob, profile)
        })
        .collect()
}
