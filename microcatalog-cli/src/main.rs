// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  microcatalog: Microservice catalog console
//
//  Commands:  edit / teams / show against the catalog REST API
//  Runtime:   single-threaded tokio, one command per process
//  Config:    YAML file + MICROCATALOG_* env overrides
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

mod commands;

use clap::{Parser, Subcommand};
use commands::{Context, EditArgs, OutputFormat};
use microcatalog_core::config::ConsoleConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "microcatalog", version, about = "Microservice catalog console")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "microcatalog.yaml")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Catalog backend root, overrides `api.base_url`
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a microservice, or edit one when --id is given
    Edit(EditArgs),

    /// List the teams a microservice can belong to
    Teams,

    /// Print one microservice
    Show {
        #[arg(long)]
        id: i64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // ── Config ──
    if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
    } else {
        info!("No config file found, using defaults and environment");
    }
    let mut config = ConsoleConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    info!(base_url = %config.api.base_url, "Catalog backend");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cli.command, &config))
}

async fn run(command: Command, config: &ConsoleConfig) -> anyhow::Result<ExitCode> {
    let ctx = Context::new(config)?;
    match command {
        Command::Edit(args) => {
            if ctx.edit(args).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("save failed; nothing was changed");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Teams => {
            ctx.teams().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { id, format } => {
            ctx.show(id, format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
