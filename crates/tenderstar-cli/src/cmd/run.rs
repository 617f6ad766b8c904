//! Run subcommand - list contracts, enrich tenders, write the star schema

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use tenderstar_core::SharedProgress;

use crate::config::Config;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Output directory for CSV tables
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop listing contracts after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Contract list endpoint
    #[arg(long)]
    pub contracts_url: Option<String>,

    /// Tender detail endpoint (tender id is appended)
    #[arg(long)]
    pub tenders_url: Option<String>,
}

impl RunArgs {
    /// Pipeline config: CLI flags over config file values
    pub fn pipeline_config(self, config: &Config) -> tenderstar_prozorro::Config {
        tenderstar_prozorro::Config {
            output_dir: self.output.unwrap_or_else(|| config.output.dir.clone()),
            contracts_url: self
                .contracts_url
                .unwrap_or_else(|| config.api.contracts_url.clone()),
            tenders_url: self
                .tenders_url
                .unwrap_or_else(|| config.api.tenders_url.clone()),
            max_pages: self.max_pages.or(config.api.max_pages),
        }
    }
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let pipeline = args.pipeline_config(config);
    log::debug!("Pipeline config: {pipeline:?}");

    let summary = tenderstar_prozorro::run(&pipeline, progress)?;
    if summary.skipped > 0 {
        log::warn!("{} tenders skipped after fetch errors", summary.skipped);
    }
    log::info!("CSV files have been generated in {}", pipeline.output_dir.display());
    Ok(())
}
