//! Config subcommand - print the effective configuration

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use tenderstar_core::HttpConfig;
use tenderstar_prozorro::tables::ALL_TABLES;

use crate::config::Config;

pub fn render(config: &Config, http: &HttpConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        "Output directory",
        &config.output.dir.display().to_string(),
    ]);
    table.add_row(vec!["Contracts URL", &config.api.contracts_url]);
    table.add_row(vec!["Tenders URL", &config.api.tenders_url]);
    table.add_row(vec![
        "Max pages",
        &config
            .api
            .max_pages
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
    ]);
    table.add_row(vec![
        "Connect timeout",
        &format!("{}s", http.connect_timeout.as_secs()),
    ]);
    table.add_row(vec![
        "Request timeout",
        &format!("{}s", http.request_timeout.as_secs()),
    ]);
    table.add_row(vec!["User agent", &http.user_agent]);
    table.add_row(vec![
        "Tables",
        &ALL_TABLES
            .iter()
            .map(|t| t.file_name)
            .collect::<Vec<_>>()
            .join("\n"),
    ]);
    table
}

pub fn run(config: &Config, http: &HttpConfig) {
    eprintln!("\n{}", render(config, http));
}
