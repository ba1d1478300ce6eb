use anyhow::Context;
use clap::Parser;

use edu_config::EduConfig;
use edu_db::EduDb;
use edu_server::AppState;
use edu_server::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("edushare error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loads .env first so EDUSHARE_LOG from it is honored.
    let mut config =
        EduConfig::load_with_dotenv(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(cli.quiet, cli.verbose)?;

    let db = EduDb::open(&config.database)
        .await
        .context("failed to open database")?;

    match cli.command.unwrap_or_default() {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            edu_server::serve(&config.server, AppState::new(db)).await
        }
        Commands::Import(args) => {
            let count = edu_server::import::import_documents(&db, args.kind, &args.file).await?;
            println!("Imported {count} {} document(s)", args.kind);
            Ok(())
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("EDUSHARE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
