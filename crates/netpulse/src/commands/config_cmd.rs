//! `netpulse config` — manage the persisted scanner configuration.
//!
//! Every successful mutation is written back to the storage slot.

use netpulse_config::{ScannerConfig, load_config_or_default, save_config};

use crate::cli::{ConfigAction, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::render_json;

pub fn handle(action: &ConfigAction, global: &GlobalOpts) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = load_config_or_default();
            if global.output == OutputFormat::Json {
                println!("{}", render_json(&config));
            } else {
                print_plain(&config);
            }
            Ok(())
        }

        ConfigAction::AddSubnet { subnet } => {
            let mut config = load_config_or_default();
            config.add_subnet(subnet)?;
            save_config(&config)?;
            println!("added {subnet}");
            Ok(())
        }

        ConfigAction::RemoveSubnet { subnet } => {
            let mut config = load_config_or_default();
            if config.remove_subnet(subnet) {
                save_config(&config)?;
                println!("removed {subnet}");
                Ok(())
            } else {
                Err(CliError::Validation {
                    reason: format!("subnet not configured: {subnet}"),
                })
            }
        }

        ConfigAction::SetInterval { secs } => {
            let mut config = load_config_or_default();
            config.set_scan_interval(*secs)?;
            save_config(&config)?;
            println!("scan interval set to {secs}s");
            Ok(())
        }
    }
}

fn print_plain(config: &ScannerConfig) {
    println!("api_url:        {}", config.api_url);
    println!(
        "api_key:        {}",
        if config.api_key.is_empty() {
            "(not set)"
        } else {
            "(set)"
        }
    );
    println!("snmp_community: {}", config.snmp_community);
    println!("scan_interval:  {}s", config.scan_interval_secs);
    println!("subnets:");
    for subnet in &config.subnets {
        println!("  - {subnet}");
    }
}
