//! Pipeline orchestration: list → enrich → shape → write

use std::fs;
use std::time::{Duration, Instant};

use anyhow::Context;
use tenderstar_core::{ProgressContext, cleanup_tmp_files, fmt_num};

use crate::api::{HttpTransport, Transport, fetch_all, fetch_tender};
use crate::config::Config;
use crate::error::EnrichError;
use crate::star::StarSchema;
use crate::tables::{ALL_TABLES, TableCounts, write_star};

/// Run the pipeline against the live API
pub fn run(config: &Config, progress: &ProgressContext) -> anyhow::Result<RunSummary> {
    run_with(config, &HttpTransport, progress)
}

/// Run the pipeline over any transport
pub fn run_with<T: Transport + ?Sized>(
    config: &Config,
    transport: &T,
    progress: &ProgressContext,
) -> anyhow::Result<RunSummary> {
    let start = Instant::now();

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    // List contracts
    log::info!("Fetching contracts data...");
    let stage = progress.stage_line("contracts");
    let contracts = fetch_all(
        transport,
        &config.contracts_url,
        config.max_pages,
        &stage,
    )?;
    stage.finish_and_clear();
    log::info!("Total contracts fetched: {}", fmt_num(contracts.len()));

    // Enrich + shape, one tender at a time in contract order
    let mut star = StarSchema::new();
    let mut skipped = 0usize;
    let pb = progress.count_bar("tenders", contracts.len() as u64);

    for contract in &contracts {
        pb.set_message(contract.tender_id.clone());
        match fetch_tender(transport, &config.tenders_url, contract) {
            Ok(tender) => {
                log::debug!("Processing tender {}", contract.tender_id);
                star.shape(&contract.tender_id, &tender, contract.actual_amount());
            }
            Err(EnrichError::Fetch(failure)) => {
                log::warn!("Error fetching data for {failure}");
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Write once, at the end
    let file_names: Vec<&str> = ALL_TABLES.iter().map(|t| t.file_name).collect();
    cleanup_tmp_files(&config.output_dir, &file_names)
        .context("Failed to clean stale tmp files")?;
    let tables = write_star(&star, &config.output_dir)?;

    let summary = RunSummary {
        contracts: contracts.len(),
        enriched: star.facts.len(),
        skipped,
        tables,
        elapsed: start.elapsed(),
    };
    summary.log();

    Ok(summary)
}

/// Summary of pipeline run
#[derive(Debug)]
pub struct RunSummary {
    pub contracts: usize,
    pub enriched: usize,
    pub skipped: usize,
    pub tables: TableCounts,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn empty() -> Self {
        Self {
            contracts: 0,
            enriched: 0,
            skipped: 0,
            tables: TableCounts::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn log(&self) {
        log::info!("=== Pipeline Summary ===");
        log::info!(
            "Tenders: {}/{} enriched ({} skipped)",
            fmt_num(self.enriched),
            fmt_num(self.contracts),
            fmt_num(self.skipped)
        );
        log::info!(
            "Dimensions: {} regions, {} participants, {} categories",
            fmt_num(self.tables.regions),
            fmt_num(self.tables.participants),
            fmt_num(self.tables.categories)
        );
        log::info!("Items: {}", fmt_num(self.tables.items));
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}
