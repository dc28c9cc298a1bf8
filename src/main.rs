//! Entry point: parse CLI, load configuration and dispatch to command handlers.

use clap::Parser;
use ffl_roundup::{
    cli::{Cli, Commands},
    commands::{
        check_league::handle_check_league, narratives::handle_clear_narratives,
        report::handle_report, serve::handle_serve, with_league_override,
    },
    config::AppConfig,
    Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // before parsing so `.env` values reach clap's `env` fallbacks
    dotenv::dotenv().ok();
    let app = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ffl_roundup=info,tower_http=info")),
        )
        .init();

    let config = with_league_override(AppConfig::from_env(), app.league_id);

    match app.command {
        Commands::Serve { port, bind } => handle_serve(config, port, bind).await?,
        Commands::CheckLeague { season } => handle_check_league(&config, season).await?,
        Commands::Report { season, week, json } => {
            handle_report(&config, season, week, json).await?
        }
        Commands::ClearNarratives { season, week } => {
            handle_clear_narratives(&config, season, week)?
        }
    }

    Ok(())
}
