//! `netpulse summary` — the composed dashboard overview.

use chrono::Utc;

use netpulse_core::model::BANDWIDTH_WINDOW;
use netpulse_core::summary::{DashboardSummary, compose_summary};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::commands::build_context;
use crate::error::CliError;
use crate::output::render_json;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = build_context(global);
    let client = ctx.client()?;

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    let snapshot = client
        .fetch_dashboard_snapshot(BANDWIDTH_WINDOW as u32)
        .await;
    let summary = compose_summary(&snapshot, Utc::now());

    if global.output == OutputFormat::Json {
        println!("{}", render_json(&summary));
    } else {
        print_plain(&summary);
    }
    Ok(())
}

fn print_plain(summary: &DashboardSummary) {
    println!(
        "bandwidth: up {:.2} Gbps / down {:.2} Gbps / wifi {:.2} Gbps ({:.0}% upstream, {:?})",
        summary.bandwidth.upstream_gbps,
        summary.bandwidth.downstream_gbps,
        summary.bandwidth.wifi_gbps,
        summary.bandwidth.upstream_percent,
        summary.bandwidth.status,
    );
    println!(
        "infrastructure: {} devices, {} active, {} critical (cpu > 80%)",
        summary.infrastructure.total_devices,
        summary.infrastructure.active_devices,
        summary.infrastructure.critical_devices,
    );
    println!(
        "gaming: {} total ({} nintendo, {} playstation, {} optimal)",
        summary.gaming.total,
        summary.gaming.nintendo,
        summary.gaming.playstation,
        summary.gaming.optimal,
    );
    println!(
        "alerts: {} ({} critical, {} warning)",
        summary.alerts.count, summary.alerts.critical, summary.alerts.warning,
    );
    for alert in &summary.alerts.recent {
        println!("  [{}] {}: {}", alert.level, alert.device, alert.msg);
    }
}
