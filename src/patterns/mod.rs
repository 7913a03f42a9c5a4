//! Expansion of file IDs into platform specific bundle file name patterns.
//!
//! Profiles describe the naming convention of each platform, the generator substitutes a
//! file ID into them, and the glob helper turns the result into a matcher so callers can
//! test real file names against it. [`find_bundles`] applies the matchers to a directory.

mod generator;
mod glob;
mod profile;
mod scan;

pub use generator::{BundlePattern, patterns_for, patterns_for_id};
pub use glob::glob_regex;
pub use profile::{
    AssetCategory, FILE_ID_PLACEHOLDER, Platform, PlatformProfile, REQUIRED_CATEGORIES,
};
pub use scan::{BundleMatches, find_bundles};
