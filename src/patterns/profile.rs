use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};

/// Placeholder replaced by the lowercase file ID in category templates.
pub const FILE_ID_PLACEHOLDER: &str = "{file_id}";

/// Categories every profile has to declare.
pub const REQUIRED_CATEGORIES: [&str; 3] = ["model", "portrait", "memory_lobby"];

/// Distribution channel with its own bundle naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// PC build distributed through Steam.
    SteamWindows,
    /// Android and iOS builds.
    Mobile,
}

impl Platform {
    /// Stable lowercase identifier, matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SteamWindows => "steam_windows",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named asset group and the bundle file name template used for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCategory {
    /// Category identifier such as `model` or `portrait`.
    pub name: String,
    /// File name prefix containing [`FILE_ID_PLACEHOLDER`].
    pub template: String,
}

impl AssetCategory {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Bundle naming rules for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Platform the rules apply to.
    pub platform: Platform,
    /// Wildcards appended to every template to absorb dependency and hash segments.
    pub wildcard_suffix: String,
    /// Categories in output order.
    pub asset_categories: Vec<AssetCategory>,
}

impl PlatformProfile {
    /// Built-in rules for the Steam (Windows) build.
    pub fn steam_windows() -> Self {
        Self {
            platform: Platform::SteamWindows,
            wildcard_suffix: "*_mxdependency-*.bundle".into(),
            asset_categories: vec![
                AssetCategory::new("model", "assets-_mx-characters-{file_id}"),
                AssetCategory::new("portrait", "assets-_mx-spinecharacters-{file_id}_spr"),
                AssetCategory::new("memory_lobby", "assets-_mx-spinelobbies-{file_id}_home"),
            ],
        }
    }

    /// Built-in rules for the mobile builds.
    pub fn mobile() -> Self {
        Self {
            platform: Platform::Mobile,
            wildcard_suffix: "*_assets_all_*.bundle".into(),
            asset_categories: vec![
                AssetCategory::new("model", "characters-{file_id}"),
                AssetCategory::new("portrait", "spinecharacters-{file_id}_spr"),
                AssetCategory::new("memory_lobby", "spinelobbies-{file_id}_home"),
            ],
        }
    }

    /// Built-in rules for `platform`.
    pub fn builtin(platform: Platform) -> Self {
        match platform {
            Platform::SteamWindows => Self::steam_windows(),
            Platform::Mobile => Self::mobile(),
        }
    }

    /// Check the profile declares the required categories with usable templates.
    pub fn validate(&self) -> LookupResult<()> {
        let mut seen = BTreeSet::new();
        for category in &self.asset_categories {
            if category.name.trim().is_empty() {
                return Err(self.invalid("category with empty name".into()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(self.invalid(format!("category {:?} declared twice", category.name)));
            }
            if !category.template.contains(FILE_ID_PLACEHOLDER) {
                return Err(self.invalid(format!(
                    "template for {:?} lacks {FILE_ID_PLACEHOLDER}",
                    category.name
                )));
            }
        }

        if let Some(missing) = REQUIRED_CATEGORIES
            .iter()
            .find(|required| !seen.contains(**required))
        {
            return Err(self.invalid(format!("missing required category {missing:?}")));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> LookupError {
        LookupError::InvalidProfile {
            platform: self.platform.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_are_valid() {
        PlatformProfile::steam_windows().validate().unwrap();
        PlatformProfile::mobile().validate().unwrap();
    }

    #[test]
    fn builtin_profiles_list_required_categories_first() {
        for platform in [Platform::SteamWindows, Platform::Mobile] {
            let profile = PlatformProfile::builtin(platform);
            let names: Vec<&str> = profile
                .asset_categories
                .iter()
                .map(|category| category.name.as_str())
                .collect();
            assert_eq!(names, REQUIRED_CATEGORIES);
        }
    }

    #[test]
    fn rejects_missing_required_category() {
        let mut profile = PlatformProfile::mobile();
        profile.asset_categories.retain(|category| category.name != "portrait");

        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            LookupError::InvalidProfile { ref platform, ref reason }
                if platform == "mobile" && reason.contains("portrait")
        ));
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let mut profile = PlatformProfile::steam_windows();
        profile.asset_categories[0].template = "assets-_mx-characters-".into();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_category_names() {
        let mut profile = PlatformProfile::mobile();
        profile
            .asset_categories
            .push(AssetCategory::new("model", "characters-{file_id}_alt"));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn accepts_additional_categories() {
        let mut profile = PlatformProfile::mobile();
        profile
            .asset_categories
            .push(AssetCategory::new("voice", "voice-{file_id}"));
        profile.validate().unwrap();
    }

    #[test]
    fn platform_serialises_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&Platform::SteamWindows).unwrap(),
            "\"steam_windows\""
        );
    }
}
