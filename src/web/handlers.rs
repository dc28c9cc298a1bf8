use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use super::{ApiError, ApiPath, AppState, NARRATIVE_MAX_AGE};
use crate::jobs::JobStatus;
use crate::llm::{generate_weekly_narrative, Narrative};
use crate::report::WeeklyReport;
use crate::{Season, TeamId, Week};

impl AppState {
    fn stored_narrative(&self, season: Season, week: Week) -> Option<Narrative> {
        match self
            .db()
            .load_narrative(self.league_id, season, week, NARRATIVE_MAX_AGE)
        {
            Ok(stored) => stored.map(|s| s.narrative),
            Err(e) => {
                warn!(error = %e, "narrative lookup failed");
                None
            }
        }
    }

    fn store_narrative(&self, season: Season, week: Week, narrative: &Narrative) {
        let Some(narrator) = self.narrator.as_ref() else {
            return;
        };
        let (provider, model) = narrator.describe();
        if let Err(e) = self.db().save_narrative(
            self.league_id,
            season,
            week,
            &provider,
            &model,
            narrative,
        ) {
            warn!(error = %e, "failed to store narrative");
        }
    }

    /// Stored narrative when fresh, otherwise a newly generated one.
    pub(crate) async fn narrative_for(&self, report: &WeeklyReport) -> Narrative {
        let week = Week::new(report.week);
        if let Some(narrative) = self.stored_narrative(report.year, week) {
            return narrative;
        }

        let narrative =
            generate_weekly_narrative(self.narrator.as_deref(), &report.prompt_inputs).await;
        self.store_narrative(report.year, week, &narrative);
        narrative
    }
}

/// GET /
pub async fn homepage(State(state): State<AppState>) -> Redirect {
    let season = Season::current();
    let week = match state.reports.league(season).await {
        Ok(league) => league.current_week,
        Err(e) => {
            warn!(error = %e, "league unavailable, defaulting to week 1");
            Week::default()
        }
    };
    Redirect::temporary(&format!("/report/{season}/{week}/"))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let narratives = match state.db().narrative_count() {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "narrative count failed");
            None
        }
    };
    Json(json!({
        "status": "ok",
        "cache": state.reports.cache_stats(),
        "jobs": state.jobs.len(),
        "narratives": narratives,
    }))
}

/// GET /report/:year/:week
pub async fn weekly_report_slash(
    ApiPath((year, week)): ApiPath<(u16, u16)>,
) -> Redirect {
    Redirect::permanent(&format!("/report/{year}/{week}/"))
}

/// GET /report/:year/:week/
pub async fn weekly_report(
    State(state): State<AppState>,
    ApiPath((year, week)): ApiPath<(u16, u16)>,
) -> Result<Html<String>, ApiError> {
    let report = state
        .reports
        .weekly_report(Season::new(year), Week::new(week))
        .await?;
    let narrative = state.narrative_for(&report).await;
    Ok(Html(state.templates.render_report(&report, &narrative)?))
}

/// GET /report/:year/:week/overview.json
pub async fn weekly_report_overview(
    State(state): State<AppState>,
    ApiPath((year, week)): ApiPath<(u16, u16)>,
) -> Result<Json<WeeklyReport>, ApiError> {
    let report = state
        .reports
        .weekly_report(Season::new(year), Week::new(week))
        .await?;
    Ok(Json(report))
}

/// GET /report/:year/:week/narrative.json
///
/// Starts generation in the background and answers 202 until it finishes.
pub async fn weekly_report_narrative(
    State(state): State<AppState>,
    ApiPath((year, week)): ApiPath<(u16, u16)>,
) -> Result<Response, ApiError> {
    let (season, week) = (Season::new(year), Week::new(week));

    if let Some(narrative) = state.stored_narrative(season, week) {
        return Ok(Json(json!({ "status": "ready", "narrative": narrative })).into_response());
    }

    let key = format!("narrative:{}:{season}:{week}", state.league_id);
    let job_state = state.clone();
    let status = state.jobs.ensure_job(&key, async move {
        let report = job_state
            .reports
            .weekly_report(season, week)
            .await
            .map_err(|e| e.to_string())?;
        let narrative = job_state.narrative_for(&report).await;
        serde_json::to_value(narrative).map_err(|e| e.to_string())
    });

    let response = match (status, state.jobs.result(&key)) {
        (JobStatus::Ready, Some(value)) => match value.get("error") {
            Some(error) => Json(json!({ "status": "error", "error": error })).into_response(),
            None => Json(json!({ "status": "ready", "narrative": value })).into_response(),
        },
        _ => (StatusCode::ACCEPTED, Json(json!({ "status": "pending" }))).into_response(),
    };
    Ok(response)
}

/// GET /draft/:year
pub async fn draft_slash(ApiPath(year): ApiPath<u16>) -> Redirect {
    Redirect::permanent(&format!("/draft/{year}/"))
}

/// GET /draft/:year/
pub async fn draft(
    State(state): State<AppState>,
    ApiPath(year): ApiPath<u16>,
) -> Result<Html<String>, ApiError> {
    let season = Season::new(year);
    let league = state.reports.league(season).await?;
    let draft = state.reports.draft_report(season).await?;
    Ok(Html(state.templates.render_draft(&league.name, season, &draft)?))
}

/// GET /logo/:year/:team_id
pub async fn team_logo(
    State(state): State<AppState>,
    ApiPath((year, team_id)): ApiPath<(u16, u32)>,
) -> Result<Response, ApiError> {
    let logo = state
        .reports
        .team_logo(Season::new(year), TeamId::new(team_id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team {team_id} has no logo")))?;

    Ok((
        [
            (header::CONTENT_TYPE, logo.content_type),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        logo.bytes,
    )
        .into_response())
}
