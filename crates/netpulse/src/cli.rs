//! Argument definitions for the `netpulse` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "netpulse",
    about = "LAN telemetry dashboard and scanner management",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Telemetry store base URL (overrides the config slot).
    #[arg(long, global = true, env = "NETPULSE_API_URL")]
    pub api_url: Option<String>,

    /// Read-side API key (overrides env/keyring/config resolution).
    #[arg(long, global = true, env = "NETPULSE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Accept invalid TLS certificates (self-hosted stores).
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Ip,
    Name,
    Type,
    Status,
    Ping,
    LastSeen,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the live dashboard and print metrics per refresh.
    Dashboard(DashboardArgs),

    /// Fetch, merge, and render the scanned host table.
    Hosts(HostsArgs),

    /// Sweep the first configured subnet with paced progress.
    Scan,

    /// Print the composed dashboard summary.
    Summary,

    /// Manage the persisted scanner configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Number of refresh cycles to run before exiting (0 = forever).
    #[arg(long, default_value_t = 3)]
    pub ticks: u32,

    /// Seconds between refreshes.
    #[arg(long, default_value_t = 5)]
    pub interval: u64,

    /// Seed the synthetic generator (reproducible demo mode).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct HostsArgs {
    /// Sort column.
    #[arg(long, value_enum, default_value_t = SortColumn::Ip)]
    pub sort: SortColumn,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,

    /// Case-insensitive substring filter over ip/name/type/vendor.
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,

    /// Add a subnet (CIDR) to the scan list.
    AddSubnet { subnet: String },

    /// Remove a subnet from the scan list.
    RemoveSubnet { subnet: String },

    /// Set the auto-refresh interval in seconds (5–300).
    SetInterval { secs: u64 },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    pub shell: clap_complete::Shell,
}
