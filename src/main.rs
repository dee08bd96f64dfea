use clap::Parser;
use tracing_subscriber::EnvFilter;
use cvetriage::{cli, config, errors};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = run(cli).await;

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                errors::TriageError::Config(_) => 2,
                errors::TriageError::PrimarySourceUnreachable(_) => 3,
                errors::TriageError::MalformedIdentifier(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: cli::Cli) -> Result<(), errors::TriageError> {
    match cli.command {
        cli::Commands::Analyze(args) => {
            let config = cli::load_config(cli.config.as_deref()).await?;
            cli::analyze::handle_analyze(args, config, cli.quiet).await
        }
        cli::Commands::Decide(args) => cli::decide::handle_decide(args),
        cli::Commands::Threats(args) => {
            let config = cli::load_config(cli.config.as_deref()).await?;
            cli::threats::handle_threats(args, &config)
        }
        cli::Commands::Cache(args) => {
            let config = cli::load_config(cli.config.as_deref()).await?;
            cli::cache::handle_cache(args, config).await
        }
        cli::Commands::Serve(args) => {
            let config = cli::load_config(cli.config.as_deref()).await?;
            cli::serve::handle_serve(args, config).await
        }
        cli::Commands::Validate(args) => handle_validate(args).await,
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::TriageError> {
    let path = std::path::PathBuf::from(&args.config);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
