//! `netpulse dashboard` — run the aggregator and print a metrics line
//! per refresh cycle.

use std::io::IsTerminal;
use std::time::Duration;

use owo_colors::OwoColorize;

use netpulse_core::{MonitorConfig, NetworkMonitor, SourceMode};

use crate::cli::{DashboardArgs, GlobalOpts, OutputFormat};
use crate::commands::build_context;
use crate::error::CliError;
use crate::output::render_json;

pub async fn handle(args: DashboardArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = build_context(global);

    let monitor = NetworkMonitor::new(MonitorConfig {
        api: Some(ctx.api),
        refresh_interval: Duration::from_secs(args.interval),
        seed: args.seed,
    })?;

    monitor.start().await;
    print_tick(&monitor, global.output);

    let mut refreshes = monitor.store().subscribe_last_refresh();
    let mut completed: u32 = 0;

    while args.ticks == 0 || completed < args.ticks {
        if refreshes.changed().await.is_err() {
            break;
        }
        print_tick(&monitor, global.output);
        completed = completed.saturating_add(1);
    }

    monitor.shutdown().await;
    Ok(())
}

fn print_tick(monitor: &NetworkMonitor, format: OutputFormat) {
    let metrics = monitor.metrics();

    if format == OutputFormat::Json {
        println!("{}", render_json(&metrics));
        return;
    }

    let mode = mode_label(monitor.mode());
    println!(
        "[{mode}] up {:.1} Gbps ({:.0}%)  wifi {:.1} Gbps  gaming {}  active infra {}",
        metrics.current_upstream,
        metrics.upstream_percent,
        metrics.current_wifi,
        metrics.total_gaming_devices,
        metrics.active_network_devices,
    );
}

fn mode_label(mode: SourceMode) -> String {
    let text = match mode {
        SourceMode::Live => "LIVE",
        SourceMode::Demo => "DEMO",
        SourceMode::Unknown => "....",
    };
    if std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err() {
        match mode {
            SourceMode::Live => text.green().to_string(),
            SourceMode::Demo => text.yellow().to_string(),
            SourceMode::Unknown => text.to_string(),
        }
    } else {
        text.to_string()
    }
}
