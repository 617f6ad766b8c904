//! Tenderstar Core - Common infrastructure for the procurement ETL
//!
//! Blocking HTTP over a shared client, logging, progress reporting,
//! and the CSV sink used to persist tables.

pub mod logging;
pub mod progress;
pub mod sink;
pub mod stream;

// Re-exports for convenience
pub use logging::{ProgressLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use sink::{CsvSink, cleanup_tmp_files, write_table};
pub use stream::{
    HttpConfig, SHARED_RUNTIME, StreamError, get_text, http_client, http_config, set_http_config,
    url_with_param, url_with_segment,
};
