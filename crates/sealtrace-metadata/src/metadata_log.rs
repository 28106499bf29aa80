use sealtrace_core::{LookupOutcome, MetadataError};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Header-less two-column CSV log of `(id, metadata)` rows.
pub struct MetadataLog {
    path: PathBuf,
}

impl MetadataLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the metadata of the first row whose ID column equals `id`.
    ///
    /// A missing log file is reported as [`LookupOutcome::LogMissing`];
    /// any other read failure is an error.
    pub fn lookup(&self, id: &str) -> Result<LookupOutcome, MetadataError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "metadata log not found");
                return Ok(LookupOutcome::LogMissing);
            }
            Err(e) => return Err(MetadataError::Read(e)),
        };
        lookup_in(file, id)
    }
}

/// Scan CSV rows from `reader` for `id`.
pub fn lookup_in<R: Read>(reader: R, id: &str) -> Result<LookupOutcome, MetadataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| MetadataError::Parse(e.to_string()))?;
        if row.len() < 2 {
            tracing::debug!(line = line + 1, fields = row.len(), "skipping short row");
            continue;
        }
        if row.get(0) == Some(id) {
            let metadata = row.get(1).unwrap_or_default().to_string();
            return Ok(LookupOutcome::Found(metadata));
        }
    }

    Ok(LookupOutcome::NotFound)
}
