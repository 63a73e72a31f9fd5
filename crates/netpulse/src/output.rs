//! Output formatting: table or JSON.
//!
//! Table uses `tabled`, JSON serializes the original data via serde.
//! Status cells are colored when stdout is a terminal.

use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use netpulse_core::model::{HostStatus, ScannedHost};

use crate::cli::OutputFormat;

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(format: OutputFormat, data: &[T], to_row: impl Fn(&T) -> R) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(data),
    }
}

/// Pretty-printed JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

/// Colored status label for terminal output.
pub fn status_label(status: HostStatus) -> String {
    if !use_color() {
        return status.to_string();
    }
    match status {
        HostStatus::Online => status.to_string().green().to_string(),
        HostStatus::Warning => status.to_string().yellow().to_string(),
        HostStatus::Offline => status.to_string().red().to_string(),
    }
}

// ── Host table row ───────────────────────────────────────────────────

#[derive(Tabled)]
pub struct HostRow {
    #[tabled(rename = "IP")]
    pub ip: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub host_type: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Ping")]
    pub ping: String,
    #[tabled(rename = "Vendor")]
    pub vendor: String,
    #[tabled(rename = "Last seen")]
    pub last_seen: String,
}

impl From<&ScannedHost> for HostRow {
    fn from(host: &ScannedHost) -> Self {
        Self {
            ip: host.ip.clone(),
            name: host.name.clone(),
            host_type: host.host_type.to_string(),
            status: status_label(host.status),
            ping: host
                .ping
                .map_or_else(|| "--".into(), |p| format!("{p} ms")),
            vendor: host.vendor.clone(),
            last_seen: host.last_seen.format("%H:%M:%S").to_string(),
        }
    }
}
