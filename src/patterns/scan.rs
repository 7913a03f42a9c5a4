//! Directory scanning for bundle files that match a set of patterns.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::generator::BundlePattern;
use crate::error::{LookupError, LookupResult};

/// Files found for one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMatches {
    /// Category of the pattern.
    pub category: String,
    /// Glob the files were matched against.
    pub glob: String,
    /// Matching files, sorted by path.
    pub files: Vec<PathBuf>,
}

/// Scan `dir` and group the files matching `patterns`, one group per pattern in order.
///
/// Hidden entries are skipped. A file matching several patterns is listed only under the
/// first one. Subdirectories are visited only when `recursive` is set.
pub fn find_bundles(
    dir: &Path,
    patterns: &[BundlePattern],
    recursive: bool,
) -> LookupResult<Vec<BundleMatches>> {
    let mut files = Vec::new();
    collect_files(dir, recursive, &mut files)?;
    debug!(files = files.len(), dir = %dir.display(), "scanned bundle directory");

    let mut groups: Vec<BundleMatches> = patterns
        .iter()
        .map(|pattern| BundleMatches {
            category: pattern.category.clone(),
            glob: pattern.glob.clone(),
            files: Vec::new(),
        })
        .collect();

    for file in files {
        let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(index) = patterns.iter().position(|pattern| pattern.matches(name)) {
            groups[index].files.push(file);
        }
    }

    for group in &mut groups {
        group.files.sort();
    }
    Ok(groups)
}

fn collect_files(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> LookupResult<()> {
    let io_error = |source| LookupError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let file_type = entry.file_type().map_err(io_error)?;
        if file_type.is_dir() {
            if recursive {
                collect_files(&entry.path(), recursive, files)?;
            }
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}
