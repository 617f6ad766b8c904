//! Prozorro pipeline configuration

use std::path::PathBuf;

/// Public openprocurement API, v2.5
pub const DEFAULT_CONTRACTS_URL: &str = "https://public.api.openprocurement.org/api/2.5/contracts";
pub const DEFAULT_TENDERS_URL: &str = "https://public.api.openprocurement.org/api/2.5/tenders";

/// Runtime configuration for the Prozorro pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Output directory for CSV tables
    pub output_dir: PathBuf,
    /// Contract list endpoint (paged)
    pub contracts_url: String,
    /// Tender detail endpoint; the tender id is appended as a path segment
    pub tenders_url: String,
    /// Stop listing after this many pages
    pub max_pages: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            contracts_url: DEFAULT_CONTRACTS_URL.to_string(),
            tenders_url: DEFAULT_TENDERS_URL.to_string(),
            max_pages: None,
        }
    }
}
