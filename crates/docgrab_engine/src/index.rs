use std::io;
use std::path::{Path, PathBuf};

use docgrab_logging::{grab_info, grab_warn};
use thiserror::Error;

use crate::decode::decode_page;
use crate::download::{fetch_and_persist, PersistMode, PersistRequest};
use crate::fetch::{ContentRule, Fetcher};
use crate::persist;

/// Where the index text of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// The cache file was already on disk.
    Cached,
    /// The cache file was fetched during this run.
    Fetched,
    /// No cache file and the fetch did not produce one; the text is empty.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub text: String,
    pub encoding: String,
    pub source: IndexSource,
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index cache {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Return the index page text, fetching it into `cache_path` first if the
/// cache is absent.
///
/// A failed fetch is logged and yields an empty document. Failing to read a
/// cache file that exists is the only error.
pub async fn load_index_document(
    fetcher: &dyn Fetcher,
    index_url: &str,
    cache_path: &Path,
) -> Result<IndexDocument, IndexError> {
    let mut source = IndexSource::Cached;

    if !persist::file_exists(cache_path) {
        source = IndexSource::Fetched;
        let request = PersistRequest {
            url: index_url,
            rule: ContentRule::Any,
            destination: cache_path,
            mode: PersistMode::Append,
        };
        match fetch_and_persist(fetcher, request).await {
            Ok(file) => grab_info!(
                "cached index {} -> {} ({} bytes)",
                index_url,
                file.path.display(),
                file.bytes_written
            ),
            Err(err) => grab_warn!("failed to fetch index {}: {}", index_url, err),
        }
    }

    if !persist::file_exists(cache_path) {
        return Ok(IndexDocument {
            text: String::new(),
            encoding: String::new(),
            source: IndexSource::Missing,
        });
    }

    let bytes = std::fs::read(cache_path).map_err(|source| IndexError::Read {
        path: cache_path.to_path_buf(),
        source,
    })?;
    let decoded = decode_page(&bytes);
    if decoded.had_errors {
        grab_warn!(
            "index {} contains bytes invalid in {}; replaced",
            cache_path.display(),
            decoded.encoding_label
        );
    }

    Ok(IndexDocument {
        text: decoded.text,
        encoding: decoded.encoding_label,
        source,
    })
}
