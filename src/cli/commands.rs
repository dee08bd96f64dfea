use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "cvetriage", version, about = "Vulnerability evidence aggregation and triage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gather evidence for a vulnerability and recommend a triage outcome
    Analyze(AnalyzeArgs),
    /// Run the decision table on explicit inputs
    Decide(DecideArgs),
    /// Look up the embedded-device threat mapped to a weakness id
    Threats(ThreatsArgs),
    /// Manage the reference catalog cache
    Cache(CacheArgs),
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Vulnerability identifier, e.g. CVE-2021-44228
    pub id: String,

    /// Override exploitation status: none, poc, active
    #[arg(long)]
    pub exploitation: Option<String>,

    /// System exposure: small, controlled, open
    #[arg(long)]
    pub exposure: Option<String>,

    /// Technical impact: partial, total
    #[arg(long)]
    pub impact: Option<String>,

    /// Tracking status for review cadence: active, mitigated, closed
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DecideArgs {
    /// Exploitation: none (N), poc (P), active (A)
    #[arg(long)]
    pub exploitation: Option<String>,

    /// System exposure: small (S), controlled (C), open (O)
    #[arg(long)]
    pub exposure: Option<String>,

    /// Technical impact: partial (P), total (T)
    #[arg(long)]
    pub impact: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ThreatsArgs {
    /// Weakness id, e.g. CWE-787 or 787
    pub weakness: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand, Clone)]
pub enum CacheAction {
    /// Drop every cached catalog
    Clear,
    /// Fetch every catalog into the cache now
    Warm,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
