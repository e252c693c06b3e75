use std::path::{Path, PathBuf};

use docgrab_core::{sanitized_filename, FileKind};
use docgrab_logging::{grab_info, grab_warn};
use thiserror::Error;

use crate::fetch::{ContentRule, Fetcher};
use crate::persist::{self, PersistError};
use crate::FetchError;

/// How a fetched body lands on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Append to the destination, creating it if absent. Empty bodies are written as-is.
    Append,
    /// Replace the destination atomically. Empty bodies are rejected.
    CreateNew,
}

#[derive(Debug, Clone, Copy)]
pub struct PersistRequest<'a> {
    pub url: &'a str,
    pub rule: ContentRule,
    pub destination: &'a Path,
    pub mode: PersistMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFile {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub content_type: Option<String>,
    /// Where the body actually came from after redirects.
    pub final_url: String,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("empty response body")]
    EmptyBody,
    #[error("write failed: {0}")]
    Persist(#[from] PersistError),
}

/// GET `request.url`, check it against `request.rule`, and store the body at
/// `request.destination`. Shared by the index cache and every document download.
pub async fn fetch_and_persist(
    fetcher: &dyn Fetcher,
    request: PersistRequest<'_>,
) -> Result<PersistedFile, DownloadError> {
    let output = fetcher.fetch(request.url, request.rule).await?;
    if output.metadata.final_url != output.metadata.original_url {
        grab_info!(
            "{} redirected to {}",
            output.metadata.original_url,
            output.metadata.final_url
        );
    }

    let path = match request.mode {
        PersistMode::Append => {
            persist::append_to_file(request.destination, &output.bytes)?;
            request.destination.to_path_buf()
        }
        PersistMode::CreateNew => {
            if output.bytes.is_empty() {
                return Err(DownloadError::EmptyBody);
            }
            persist::write_new_file(request.destination, &output.bytes)?
        }
    };

    Ok(PersistedFile {
        path,
        bytes_written: output.metadata.byte_len,
        content_type: output.metadata.content_type,
        final_url: output.metadata.final_url,
    })
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded(PersistedFile),
    /// A file with the target name was already present; nothing was requested.
    Skipped { path: PathBuf },
    Failed { url: String, error: DownloadError },
}

/// Download one document of `kind` from `url` into `output_dir`.
///
/// The target name comes from [`sanitized_filename`]. If that file already
/// exists the download is skipped without touching the network; the check is
/// made once, before the request. Failures are logged and returned, never
/// propagated.
pub async fn download_document(
    fetcher: &dyn Fetcher,
    url: &str,
    kind: FileKind,
    output_dir: &Path,
) -> DownloadOutcome {
    let path = output_dir.join(sanitized_filename(url));
    if persist::file_exists(&path) {
        grab_info!("file already exists, skipping: {}", path.display());
        return DownloadOutcome::Skipped { path };
    }

    let request = PersistRequest {
        url,
        rule: ContentRule::Kind(kind),
        destination: &path,
        mode: PersistMode::CreateNew,
    };

    match fetch_and_persist(fetcher, request).await {
        Ok(file) => {
            grab_info!(
                "downloaded {}: {} ({} bytes, {})",
                kind,
                file.path.display(),
                file.bytes_written,
                file.content_type.as_deref().unwrap_or("no content type")
            );
            DownloadOutcome::Downloaded(file)
        }
        Err(error) => {
            grab_warn!("{} download failed for {}: {}", kind, url, error);
            DownloadOutcome::Failed {
                url: url.to_string(),
                error,
            }
        }
    }
}
