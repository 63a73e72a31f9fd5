//! `netpulse hosts` — one reconciliation cycle, then the sorted and
//! filtered host table.

use netpulse_core::hosts_view::{self, SortDirection, SortKey, SortState};
use netpulse_core::scanner::ScannerEngine;

use crate::cli::{GlobalOpts, HostsArgs, OutputFormat, SortColumn};
use crate::commands::build_context;
use crate::error::CliError;
use crate::output::{HostRow, render_list};

fn sort_key(column: SortColumn) -> SortKey {
    match column {
        SortColumn::Ip => SortKey::Ip,
        SortColumn::Name => SortKey::Name,
        SortColumn::Type => SortKey::Type,
        SortColumn::Status => SortKey::Status,
        SortColumn::Ping => SortKey::Ping,
        SortColumn::LastSeen => SortKey::LastSeen,
    }
}

pub async fn handle(args: HostsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = build_context(global);
    let engine = ScannerEngine::new(ctx.client()?, ctx.config, None);

    engine.fetch_hosts().await;
    let hosts = engine.hosts();

    let state = SortState {
        key: sort_key(args.sort),
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let view = hosts_view::apply(&hosts, args.filter.as_deref().unwrap_or(""), state);

    println!("{}", render_list(global.output, &view, |h| HostRow::from(h)));

    if global.output == OutputFormat::Table {
        let counts = hosts_view::status_counts(&hosts);
        let status = engine.status();
        println!(
            "{} hosts ({} online, {} warning, {} offline){}",
            hosts.len(),
            counts.online,
            counts.warning,
            counts.offline,
            if status.error_count > 0 {
                format!("  [{} fetch error(s), demo data]", status.error_count)
            } else {
                String::new()
            },
        );
    }
    Ok(())
}
