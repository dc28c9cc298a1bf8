//! HTTP surface: roundup pages, JSON endpoints and the logo proxy.

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod templates;

use axum::{routing::get, Router};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::jobs::JobRegistry;
use crate::llm::NarrativeGenerator;
use crate::report::ReportService;
use crate::storage::RoundupDatabase;
use crate::LeagueId;

pub use errors::ApiError;
pub use extract::ApiPath;
pub use templates::Templates;

/// Stored narratives older than this are regenerated.
pub const NARRATIVE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub league_id: LeagueId,
    pub reports: Arc<ReportService>,
    pub narrator: Option<Arc<dyn NarrativeGenerator>>,
    pub db: Arc<Mutex<RoundupDatabase>>,
    pub jobs: JobRegistry,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(
        reports: ReportService,
        narrator: Option<Arc<dyn NarrativeGenerator>>,
        db: RoundupDatabase,
    ) -> crate::Result<Self> {
        Ok(Self {
            league_id: reports.source().league_id(),
            reports: Arc::new(reports),
            narrator,
            db: Arc::new(Mutex::new(db)),
            jobs: JobRegistry::default(),
            templates: Arc::new(Templates::new()?),
        })
    }

    pub(crate) fn db(&self) -> MutexGuard<'_, RoundupDatabase> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::homepage))
        .route("/health", get(handlers::health))
        .route("/report/:year/:week", get(handlers::weekly_report_slash))
        .route("/report/:year/:week/", get(handlers::weekly_report))
        .route(
            "/report/:year/:week/narrative.json",
            get(handlers::weekly_report_narrative),
        )
        .route(
            "/report/:year/:week/overview.json",
            get(handlers::weekly_report_overview),
        )
        .route("/draft/:year", get(handlers::draft_slash))
        .route("/draft/:year/", get(handlers::draft))
        .route("/logo/:year/:team_id", get(handlers::team_logo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
