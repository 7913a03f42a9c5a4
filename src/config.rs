//! Platform profile configuration loader.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LookupError, LookupResult};
use crate::patterns::{Platform, PlatformProfile};

/// File name looked up by [`ProfilesConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "platform_profiles.json";

/// Bundle naming rules for every supported platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
  /// Rules for the Steam (Windows) build.
  pub steam_windows: PlatformProfile,
  /// Rules for the mobile builds.
  pub mobile: PlatformProfile,
}

impl Default for ProfilesConfig {
  fn default() -> Self {
    Self {
      steam_windows: PlatformProfile::steam_windows(),
      mobile: PlatformProfile::mobile(),
    }
  }
}

impl ProfilesConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing, unreadable or invalid file falls back to the built-in profiles.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      debug!(path = %candidate.display(), "no profile config, using built-in profiles");
      return Self::default();
    }

    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        warn!(path = %candidate.display(), error = %format!("{err:#}"), "ignoring profile config");
        Self::default()
      }
    }
  }

  /// Read configuration from a JSON or YAML file, chosen by extension, and validate it.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
      Some("yaml" | "yml") => serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?,
      Some("json") | None => serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?,
      Some(other) => bail!("unsupported profile config extension {other:?}"),
    };

    config
      .validate()
      .with_context(|| format!("invalid profiles in {}", path.display()))?;
    Ok(config)
  }

  /// Profile for `platform`.
  pub fn profile(&self, platform: Platform) -> &PlatformProfile {
    match platform {
      Platform::SteamWindows => &self.steam_windows,
      Platform::Mobile => &self.mobile,
    }
  }

  /// Validate both profiles, including that each one is filed under its own platform.
  pub fn validate(&self) -> LookupResult<()> {
    for (platform, profile) in [
      (Platform::SteamWindows, &self.steam_windows),
      (Platform::Mobile, &self.mobile),
    ] {
      if profile.platform != platform {
        return Err(LookupError::InvalidProfile {
          platform: platform.to_string(),
          reason: format!("profile declares platform {}", profile.platform),
        });
      }
      profile.validate()?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_defaults_when_file_missing() {
    let dir = tempdir().unwrap();
    assert_eq!(ProfilesConfig::discover(dir.path()), ProfilesConfig::default());
  }

  #[test]
  fn discover_defaults_when_file_invalid() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
    assert_eq!(ProfilesConfig::discover(dir.path()), ProfilesConfig::default());
  }

  #[test]
  fn json_overrides_one_platform_and_keeps_the_other() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
      &path,
      r#"{
        "mobile": {
          "platform": "mobile",
          "wildcard_suffix": "*.bundle",
          "asset_categories": [
            { "name": "model", "template": "characters-{file_id}" },
            { "name": "portrait", "template": "spinecharacters-{file_id}_spr" },
            { "name": "memory_lobby", "template": "spinelobbies-{file_id}_home" },
            { "name": "weapon", "template": "weapons-{file_id}" }
          ]
        }
      }"#,
    )
    .unwrap();

    let config = ProfilesConfig::discover(dir.path());
    assert_eq!(config.mobile.wildcard_suffix, "*.bundle");
    assert_eq!(config.mobile.asset_categories.len(), 4);
    assert_eq!(config.steam_windows, PlatformProfile::steam_windows());
  }

  #[test]
  fn reads_yaml_configuration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profiles.yaml");
    fs::write(
      &path,
      "steam_windows:
  platform: steam_windows
  wildcard_suffix: \"*.bundle\"
  asset_categories:
    - { name: model, template: \"assets-_mx-characters-{file_id}\" }
    - { name: portrait, template: \"assets-_mx-spinecharacters-{file_id}_spr\" }
    - { name: memory_lobby, template: \"assets-_mx-spinelobbies-{file_id}_home\" }
",
    )
    .unwrap();

    let config = ProfilesConfig::from_path(&path).unwrap();
    assert_eq!(config.profile(Platform::SteamWindows).wildcard_suffix, "*.bundle");
    assert_eq!(config.profile(Platform::Mobile), &PlatformProfile::mobile());
  }

  #[test]
  fn from_path_rejects_profiles_missing_categories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profiles.json");
    fs::write(
      &path,
      r#"{"mobile": {"platform": "mobile", "wildcard_suffix": "*", "asset_categories": []}}"#,
    )
    .unwrap();

    let err = ProfilesConfig::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("missing required category"));
  }

  #[test]
  fn rejects_profile_filed_under_wrong_platform() {
    let config = ProfilesConfig {
      steam_windows: PlatformProfile::mobile(),
      mobile: PlatformProfile::mobile(),
    };
    assert!(config.validate().is_err());
  }
}
