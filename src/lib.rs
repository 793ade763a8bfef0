pub mod config;
pub mod textmap;

use std::{
    collections::HashSet,
    error::Error,
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::textmap::TextMap;

#[derive(Debug)]
pub enum TrimError {
    /// A required file was missing, unreadable, or could not be written.
    FileAccess { path: PathBuf, details: String },
    /// A file's content did not match the expected JSON shape.
    Parse { path: PathBuf, details: String },
}

impl TrimError {
    pub(crate) fn file_access(path: &Path, details: String) -> Self {
        TrimError::FileAccess {
            path: path.to_owned(),
            details,
        }
    }

    pub(crate) fn parse(path: &Path, details: String) -> Self {
        TrimError::Parse {
            path: path.to_owned(),
            details,
        }
    }
}

impl Display for TrimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrimError::FileAccess { path, details } => {
                write!(f, "Unable to access {}. {}", path.display(), details)
            }
            TrimError::Parse { path, details } => {
                write!(f, "Unable to parse {}. {}", path.display(), details)
            }
        }
    }
}

impl Error for TrimError {}

#[derive(Debug, Clone)]
pub struct TrimOptions {
    /// Config tables whose `nameTextMapHash` fields select the entries to keep.
    pub sources: Vec<PathBuf>,
    /// The text map filtered in place.
    pub textmap: PathBuf,
    /// Suffix appended to the text map's file name for the pre-filter backup.
    pub backup_suffix: String,
}

#[derive(Debug)]
pub struct TrimSummary {
    /// Number of entries left in the text map after filtering.
    pub kept: usize,
    /// Where the pre-filter copy of the text map was written.
    pub backup: PathBuf,
}

/// Runs the whole pipeline: collect hashes from every source table, back the
/// text map up, then rewrite it with only the referenced entries.
///
/// The backup is on disk before the text map is read, so a failure at any
/// later point leaves a recoverable copy. The first error aborts the run.
pub fn run(options: &TrimOptions) -> Result<TrimSummary, TrimError> {
    let mut hashes = HashSet::new();

    for source in &options.sources {
        hashes.extend(config::extract_hashes(source)?);
    }

    let backup = textmap::back_up(&options.textmap, &options.backup_suffix)?;

    let filtered = TextMap::load(&options.textmap)?.retain_keys(&hashes);

    filtered.write(&options.textmap)?;

    Ok(TrimSummary {
        kept: filtered.len(),
        backup,
    })
}
