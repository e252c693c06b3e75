//! `docgrab`: mirror the PDF and ZIP downloads linked from the Yuneec download page.
use anyhow::Context;
use docgrab_core::{FileKind, HarvestConfig};
use docgrab_engine::run_blocking;
use docgrab_logging::{grab_error, grab_info, LogDestination};
use log::LevelFilter;

const INDEX_URL: &str = "https://yuneec.online/download/";
const ORIGIN: &str = "https://yuneec.online";
const INDEX_CACHE: &str = "yuneec.html";

fn harvest_config() -> HarvestConfig {
    HarvestConfig::new(INDEX_URL, ORIGIN).with_index_cache(INDEX_CACHE)
}

fn main() -> anyhow::Result<()> {
    docgrab_logging::initialize(LogDestination::default(), LevelFilter::Info);

    let config = harvest_config();
    let summary = run_blocking(&config)
        .inspect_err(|err| grab_error!("harvest aborted: {}", err))
        .with_context(|| format!("harvest of {} aborted", config.index_url))?;

    for kind in FileKind::ALL {
        let tally = summary.for_kind(kind);
        grab_info!(
            "{}: {} links, {} downloaded, {} skipped, {} failed, {} invalid",
            kind,
            tally.links,
            tally.downloaded,
            tally.skipped,
            tally.failed,
            tally.invalid
        );
    }
    Ok(())
}
