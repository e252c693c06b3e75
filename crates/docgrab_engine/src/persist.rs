use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// True for an existing regular file; directories and broken links do not count.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// Ensure output directory exists; create it (mode 0755 on Unix) if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir {
                path: dir.to_path_buf(),
                reason: "path is not a directory".into(),
            });
        }
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|e| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Append `data` to `path`, creating the file (mode 0644 on Unix) if needed.
pub fn append_to_file(path: &Path, data: &[u8]) -> Result<(), PersistError> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(path).map_err(|e| PersistError::io(path, e))?;
    file.write_all(data).map_err(|e| PersistError::io(path, e))?;
    Ok(())
}

/// Write `data` to `path` through a temp file in the same directory, then
/// rename it into place. A failed write leaves nothing at `path`.
pub fn write_new_file(path: &Path, data: &[u8]) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistError::io(dir, e))?;
    tmp.write_all(data).map_err(|e| PersistError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| PersistError::io(tmp.path(), e))?;
    tmp.as_file_mut()
        .sync_all()
        .map_err(|e| PersistError::io(tmp.path(), e))?;

    // Temp files are created 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(FILE_MODE))
            .map_err(|e| PersistError::io(tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| PersistError::io(path, e.error))?;
    Ok(path.to_path_buf())
}
