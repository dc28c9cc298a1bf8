//! Command implementations for the roundup CLI

pub mod check_league;
pub mod narratives;
pub mod report;
pub mod serve;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::espn::EspnClient;
use crate::llm::{ChatClient, NarrativeGenerator};
use crate::report::ReportService;
use crate::{LeagueId, Result};

/// Apply a `--league-id` override on top of the environment.
pub fn with_league_override(mut config: AppConfig, league_id: Option<LeagueId>) -> AppConfig {
    if let Some(id) = league_id {
        config.espn.league_id = id;
    }
    config
}

/// Report service over the live ESPN API, with disk caching when configured.
pub fn build_report_service(config: &AppConfig) -> Result<ReportService> {
    let client = Arc::new(EspnClient::new(&config.espn)?);
    let service = match &config.storage.cache_dir {
        Some(dir) => ReportService::with_cache_dir(client, dir),
        None => ReportService::new(client),
    };
    Ok(service)
}

/// The configured LLM client, if any.
pub fn build_narrator(config: &AppConfig) -> Option<Arc<dyn NarrativeGenerator>> {
    let settings = config.llm.clone()?;
    match ChatClient::new(settings) {
        Ok(client) => {
            let (provider, model) = client.describe();
            info!(%provider, %model, "LLM narration enabled");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "LLM client unavailable");
            None
        }
    }
}
