use clap::{Parser, Subcommand};
use regime_recovery_core::ConfigLoader;

mod commands;

use commands::{AnalyzeArgs, RollingArgs};

#[derive(Parser)]
#[command(name = "regime-recovery")]
#[command(
    about = "Measure win-rate crashes and recovery lag around regime switches",
    long_about = None
)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config/Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report crash magnitude and recovery lag for each regime switch
    Analyze(AnalyzeArgs),
    /// Export cumulative and rolling win rate per step to CSV
    Rolling(RollingArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::load_from(&cli.config)?;

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(args, config)?,
        Commands::Rolling(args) => commands::run_rolling(args, config)?,
    }

    Ok(())
}
