//! Source file validation for sqlbatch
//!
//! Every path given on the command line is checked up front, before any
//! database connection is attempted. A path must name an existing regular
//! file that can be opened for reading. Validation stops at the first bad
//! path; no partial list is ever returned.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{BatchError, BatchResult};

/// A path that was an existing, readable regular file when validated
///
/// The file may of course change between validation and execution; reading
/// it later can still fail, which the engine reports separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Validate a single path
    pub fn validate(path: &str) -> BatchResult<Self> {
        let candidate = Path::new(path);

        let is_file = fs::metadata(candidate)
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(BatchError::NotAFile(path.to_string()));
        }

        // Opening is the only portable readability check
        File::open(candidate).map_err(|source| BatchError::NotReadable {
            path: path.to_string(),
            source,
        })?;

        Ok(SourceFile {
            path: candidate.to_path_buf(),
        })
    }

    /// The validated path, as given
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path resolved against the working directory, for messages
    pub fn display_path(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

/// Validate every path in order, failing on the first invalid one
///
/// # Arguments
/// * `paths` - File paths in execution order
///
/// # Returns
/// * `Ok(Vec<SourceFile>)` in the same order as `paths`
/// * `Err(BatchError::NoFiles)` if `paths` is empty
/// * `Err(BatchError::NotAFile | NotReadable)` for the first bad path
pub fn validate_files<S: AsRef<str>>(paths: &[S]) -> BatchResult<Vec<SourceFile>> {
    if paths.is_empty() {
        return Err(BatchError::NoFiles);
    }

    paths
        .iter()
        .map(|path| SourceFile::validate(path.as_ref()))
        .collect()
}
