use std::io;

use docgrab_core::{
    dedup_preserving_order, extract_links, is_valid_url, FileKind, HarvestConfig,
};
use docgrab_logging::{grab_debug, grab_error, grab_info, grab_warn};
use thiserror::Error;

use crate::download::{download_document, DownloadOutcome};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::index::{load_index_document, IndexError, IndexSource};
use crate::persist::ensure_output_dir;
use crate::FetchError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("failed to build http client: {0}")]
    Client(#[source] FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Per-kind tallies; `links` counts unique links after deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSummary {
    pub links: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub index_source: IndexSource,
    pub index_encoding: String,
    pub pdf: KindSummary,
    pub zip: KindSummary,
}

impl RunSummary {
    pub fn for_kind(&self, kind: FileKind) -> &KindSummary {
        match kind {
            FileKind::Pdf => &self.pdf,
            FileKind::Zip => &self.zip,
        }
    }

    fn for_kind_mut(&mut self, kind: FileKind) -> &mut KindSummary {
        match kind {
            FileKind::Pdf => &mut self.pdf,
            FileKind::Zip => &mut self.zip,
        }
    }
}

/// Harvest every PDF, then every ZIP, linked from the configured index page.
///
/// Strictly sequential: each request completes before the next starts.
/// Per-document failures are logged and counted; only an unreadable index
/// cache aborts the run.
pub async fn run(config: &HarvestConfig, fetcher: &dyn Fetcher) -> Result<RunSummary, RunError> {
    for kind in FileKind::ALL {
        let dir = config.output_dir(kind);
        if let Err(err) = ensure_output_dir(dir) {
            grab_error!("could not prepare {} directory: {}", kind, err);
        }
    }

    let index = load_index_document(fetcher, &config.index_url, &config.index_cache).await?;

    let mut summary = RunSummary {
        index_source: index.source,
        index_encoding: index.encoding.clone(),
        pdf: KindSummary::default(),
        zip: KindSummary::default(),
    };

    for kind in FileKind::ALL {
        let links = dedup_preserving_order(extract_links(&index.text, kind));
        grab_info!("found {} unique {} links", links.len(), kind);

        let output_dir = config.output_dir(kind);
        let tally = summary.for_kind_mut(kind);
        tally.links = links.len();

        for link in links {
            let url = config.resolve_link(&link);
            if !is_valid_url(&url) {
                grab_warn!("skipping invalid url {:?} (from {:?})", url, link);
                tally.invalid += 1;
                continue;
            }
            grab_debug!("{} {} -> {}", kind, link, url);

            match download_document(fetcher, &url, kind, output_dir).await {
                DownloadOutcome::Downloaded(_) => tally.downloaded += 1,
                DownloadOutcome::Skipped { .. } => tally.skipped += 1,
                DownloadOutcome::Failed { .. } => tally.failed += 1,
            }
        }
    }

    Ok(summary)
}

/// Build the HTTP client and a Tokio runtime, then drive [`run`] to completion.
pub fn run_blocking(config: &HarvestConfig) -> Result<RunSummary, RunError> {
    let settings = FetchSettings {
        request_timeout: config.request_timeout,
        ..FetchSettings::default()
    };
    let runtime = tokio::runtime::Runtime::new().map_err(RunError::Runtime)?;
    runtime.block_on(async {
        let fetcher = ReqwestFetcher::new(settings).map_err(RunError::Client)?;
        run(config, &fetcher).await
    })
}
