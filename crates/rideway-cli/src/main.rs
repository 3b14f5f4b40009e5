//! Rideway console shell entry point.

use std::{io, path::PathBuf};

use clap::{Parser, ValueEnum};
use rideway_cli::{SeedAccount, Shell, ShellConfig};
use rideway_core::AppProfile;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// App build to emulate.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Combined vendor and driver app
    Frontend,
    /// Driver app
    Driver,
}

impl From<ProfileArg> for AppProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Frontend => AppProfile::Frontend,
            ProfileArg::Driver => AppProfile::DriverOnly,
        }
    }
}

/// Rideway session routing shell
#[derive(Parser, Debug)]
#[command(name = "rideway")]
#[command(about = "Drive the rideway session router from a command script")]
#[command(version)]
struct Args {
    /// App build to emulate
    #[arg(short, long, value_enum, default_value = "frontend")]
    profile: ProfileArg,

    /// Seed account as email:password:role[:name] (repeatable)
    #[arg(short, long = "account")]
    accounts: Vec<SeedAccount>,

    /// Email whose sign-in persisted from a previous run
    #[arg(long)]
    remember: Option<String>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let config = ShellConfig {
        profile: args.profile.into(),
        accounts: args.accounts,
        remember: args.remember,
    };
    let shell = Shell::new(config, io::stdout())?;

    match args.script {
        Some(path) => {
            tracing::info!(path = %path.display(), "running script");
            let file = tokio::fs::File::open(&path).await?;
            shell.run(BufReader::new(file)).await?;
        },
        None => {
            shell.run(BufReader::new(tokio::io::stdin())).await?;
        },
    }

    Ok(())
}
