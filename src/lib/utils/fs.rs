use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};

use super::constants::dir_names;

/// Recursively deletes `path`. A missing directory is not an error.
///
/// Returns whether something was deleted
pub fn remove_directory(path: &Path) -> Result<bool> {
    if !path.exists() {
        log::debug!("Nothing to delete at {path:?}");
        return Ok(false);
    }

    std::fs::remove_dir_all(path)
        .with_context(|| format!("Could not delete directory {path:?}"))?;
    Ok(true)
}

/// Strips the `.noindex` suffix that newer toolchains append to the intermediates root
fn without_noindex(objroot: &str) -> &str {
    objroot
        .strip_suffix(dir_names::NOINDEX_SUFFIX)
        .unwrap_or(objroot)
}

/// The derived data root of a target, given its `OBJROOT` build setting.
///
/// `None` when the intermediates root doesn't end with `/Build/Intermediates`,
/// since the parent can't be identified as a derived data directory
pub fn derived_data_dir(objroot: &str) -> Option<PathBuf> {
    without_noindex(objroot)
        .strip_suffix(dir_names::INTERMEDIATES_SUFFIX)
        .filter(|root| !root.is_empty())
        .map(PathBuf::from)
}

/// The directory where the instrumented test runs leave the coverage data,
/// given the `OBJROOT` build setting of the target
pub fn coverage_data_dir(objroot: &str) -> PathBuf {
    Path::new(without_noindex(objroot)).join(dir_names::CODE_COVERAGE)
}
