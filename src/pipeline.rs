// src/pipeline.rs

use anyhow::{Context, Result};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{info, instrument};

use crate::{
    cleanup::ScratchFiles,
    config::PipelineConfig,
    emit::write_shards_with,
    fetch::{download_zip, http_client, unzip},
    process::{group, Records},
};

/// Fetch, extract, parse, group and emit. Returns the shard paths written.
///
/// Temporary files are removed on every exit path once the CSV reader is
/// closed; shards are only written after the whole CSV parsed cleanly.
pub fn run(cfg: &PipelineConfig) -> Result<Vec<PathBuf>> {
    run_with(cfg, |_| {})
}

/// [`run`], reporting each shard path through `on_written` as it lands.
#[instrument(level = "info", skip_all, fields(url = %cfg.source_url))]
pub fn run_with<F>(cfg: &PipelineConfig, on_written: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    let start = Instant::now();

    let mut scratch = ScratchFiles::new();
    scratch.track(&cfg.download_path);
    scratch.track(&cfg.csv_path);

    let client = http_client()?;
    download_zip(&client, &cfg.source_url, &cfg.download_path)
        .with_context(|| format!("fetching {}", cfg.source_url))?;
    info!(path = %cfg.download_path.display(), "fetched");

    let extracted = unzip(&cfg.download_path, &cfg.extract_dir)
        .with_context(|| format!("extracting {}", cfg.download_path.display()))?;
    scratch.extend(extracted);
    info!(dir = %cfg.extract_dir.display(), "extracted");

    let grouped = {
        let records = Records::open(&cfg.csv_path)
            .with_context(|| format!("opening {}", cfg.csv_path.display()))?;
        group(records, &cfg.csv_path)
            .with_context(|| format!("parsing {}", cfg.csv_path.display()))?
    };
    info!(
        buckets = grouped.len(),
        records = grouped.record_count(),
        "grouped"
    );

    let written = write_shards_with(&grouped, &cfg.output_dir, on_written)
        .with_context(|| format!("writing shards to {}", cfg.output_dir.display()))?;

    drop(scratch);
    info!(shards = written.len(), elapsed = ?start.elapsed(), "done");
    Ok(written)
}
