//! `netpulse scan` — manual subnet sweep with a progress bar.

use indicatif::{ProgressBar, ProgressStyle};

use netpulse_core::scanner::ScannerEngine;

use crate::cli::GlobalOpts;
use crate::commands::build_context;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = build_context(global);
    let engine = ScannerEngine::new(ctx.client()?, ctx.config, None);

    let subnet = engine
        .config()
        .subnets
        .first()
        .cloned()
        .unwrap_or_else(|| "(no subnet configured)".into());

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(format!("scanning {subnet}"));

    // Mirror engine progress onto the bar until the sweep resets it.
    let mut status_rx = engine.subscribe_status();
    let bar_task = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while status_rx.changed().await.is_ok() {
                let progress = status_rx.borrow().scan_progress;
                if progress > 0 {
                    bar.set_position(u64::from(progress));
                } else if bar.position() >= 100 {
                    break;
                }
            }
        })
    };

    engine.manual_scan().await?;
    bar_task.abort();
    bar.finish_and_clear();

    let status = engine.status();
    println!("scan complete: {} hosts found", status.devices_found);
    Ok(())
}
