use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::FileKind;

/// Per-request timeout applied to the index fetch and every download.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Everything a harvest run needs to know, passed into the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Page listing the downloadable documents.
    pub index_url: String,
    /// Scheme and host prepended to the root-relative paths found in the index.
    pub origin: String,
    /// Local copy of the index page; its presence suppresses a refetch.
    pub index_cache: PathBuf,
    pub pdf_dir: PathBuf,
    pub zip_dir: PathBuf,
    pub request_timeout: Duration,
}

impl HarvestConfig {
    /// Config with the cache file `index.html` and the default output
    /// directories, all relative to the working directory.
    pub fn new(index_url: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            origin: origin.into(),
            index_cache: PathBuf::from("index.html"),
            pdf_dir: PathBuf::from(FileKind::Pdf.default_dir_name()),
            zip_dir: PathBuf::from(FileKind::Zip.default_dir_name()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_index_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_cache = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Re-anchor the cache file and output directories under `root`.
    /// Absolute paths are left alone.
    pub fn with_root(mut self, root: &Path) -> Self {
        self.index_cache = root.join(&self.index_cache);
        self.pdf_dir = root.join(&self.pdf_dir);
        self.zip_dir = root.join(&self.zip_dir);
        self
    }

    pub fn output_dir(&self, kind: FileKind) -> &Path {
        match kind {
            FileKind::Pdf => &self.pdf_dir,
            FileKind::Zip => &self.zip_dir,
        }
    }

    /// Plain concatenation of origin and link; extracted links are expected
    /// to be root-relative.
    pub fn resolve_link(&self, link: &str) -> String {
        format!("{}{}", self.origin, link)
    }
}

/// True when `candidate` parses as an absolute URL with a host.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}
