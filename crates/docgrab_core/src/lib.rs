//! Docgrab core: pure link harvesting logic with no IO.
mod config;
mod dedup;
mod extract;
mod filename;
mod kind;

pub use config::{is_valid_url, HarvestConfig, DEFAULT_REQUEST_TIMEOUT};
pub use dedup::dedup_preserving_order;
pub use extract::{extract_links, extract_pdf_links, extract_zip_links};
pub use filename::{path_extension, sanitized_filename};
pub use kind::FileKind;
