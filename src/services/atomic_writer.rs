use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::ConvertError;

/// Fully written contents waiting to replace a destination file.
///
/// The data sits in a temporary file in the destination directory. Dropping
/// a `StagedFile` without committing removes the temporary file and leaves
/// the destination untouched.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    path: PathBuf,
    bytes: usize,
}

/// Write `data` next to `path` without touching `path` itself.
pub fn stage(path: &Path, data: &[u8]) -> Result<StagedFile, ConvertError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ConvertError::io(tmp.path(), e))?;

    Ok(StagedFile {
        tmp,
        path: path.to_path_buf(),
        bytes: data.len(),
    })
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the staged data over the destination, so readers see either
    /// the old file or the complete new one.
    pub fn commit(self) -> Result<(), ConvertError> {
        let StagedFile { tmp, path, bytes } = self;
        tmp.persist(&path)
            .map_err(|e| ConvertError::io(&path, e.error))?;

        tracing::debug!(path = %path.display(), bytes, "Wrote file");
        Ok(())
    }
}
