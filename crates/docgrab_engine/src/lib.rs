//! Docgrab engine: HTTP fetching, persistence and the sequential harvest run.
mod decode;
mod download;
mod fetch;
mod index;
mod persist;
mod run;
mod types;

pub use decode::{decode_page, DecodedText};
pub use download::{
    download_document, fetch_and_persist, DownloadError, DownloadOutcome, PersistMode,
    PersistRequest, PersistedFile,
};
pub use fetch::{ContentRule, FetchSettings, Fetcher, ReqwestFetcher};
pub use index::{load_index_document, IndexDocument, IndexError, IndexSource};
pub use persist::{append_to_file, ensure_output_dir, file_exists, write_new_file, PersistError};
pub use run::{run, run_blocking, KindSummary, RunError, RunSummary};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
