use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::model::{box_scores_from_response, DraftBoard, League, Logo};
use super::types::{LeagueResponse, RawPlayer};
use super::{BoxScore, LeagueSource};
use crate::config::EspnConfig;
use crate::core::filters::FANTASY_FILTER_HEADER;
use crate::core::{active_players_filter, espn_header_map, matchup_period_filter, IntoHeaderValue};
use crate::error::RoundupError;
use crate::{LeagueId, Result, Season, Week};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const LOGO_TIMEOUT: Duration = Duration::from_secs(5);


/// HTTP implementation of [`LeagueSource`].
pub struct EspnClient {
    http: Client,
    base_url: String,
    league_id: LeagueId,
    headers: HeaderMap,
}

impl EspnClient {
    pub fn new(config: &EspnConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("ffl-roundup/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            league_id: config.league_id,
            headers: espn_header_map(config.credentials.as_ref())?,
        })
    }

    fn league_url(&self, season: Season) -> String {
        format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, self.league_id
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        extra: HeaderMap,
        season: Season,
    ) -> Result<T> {
        let started = Instant::now();
        let mut headers = self.headers.clone();
        headers.extend(extra);

        let response = self
            .http
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        debug!(
            url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ESPN request"
        );
        if !status.is_success() {
            return Err(RoundupError::from_espn_status(
                status.as_u16(),
                self.league_id.as_u32(),
                season.as_u16(),
            ));
        }

        Ok(response.json::<T>().await?)
    }

    async fn league_document(
        &self,
        season: Season,
        views: &[&str],
        extra_query: &[(&str, String)],
        extra_headers: HeaderMap,
    ) -> Result<LeagueResponse> {
        let mut query: Vec<(&str, String)> =
            views.iter().map(|v| ("view", v.to_string())).collect();
        query.extend(extra_query.iter().cloned());
        self.get_json(&self.league_url(season), &query, extra_headers, season)
            .await
    }
}

fn filter_header(value: &impl serde::Serialize) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(FANTASY_FILTER_HEADER),
        value.to_header_value()?,
    );
    Ok(headers)
}

#[async_trait]
impl LeagueSource for EspnClient {
    fn league_id(&self) -> LeagueId {
        self.league_id
    }

    async fn league(&self, season: Season) -> Result<League> {
        let raw = self
            .league_document(
                season,
                &["mSettings", "mTeam", "mStatus"],
                &[],
                HeaderMap::new(),
            )
            .await?;
        let league = League::from_response(&raw, self.league_id, season);
        info!(
            league_id = %self.league_id,
            season = %season,
            teams = league.teams.len(),
            "loaded league"
        );
        Ok(league)
    }

    async fn box_scores(&self, season: Season, week: Week) -> Result<Vec<BoxScore>> {
        let raw = self
            .league_document(
                season,
                &["mMatchupScore", "mScoreboard"],
                &[("scoringPeriodId", week.to_string())],
                filter_header(&matchup_period_filter(week.as_u16()))?,
            )
            .await?;
        Ok(box_scores_from_response(&raw, week))
    }

    async fn draft(&self, season: Season) -> Result<DraftBoard> {
        let raw = self
            .league_document(
                season,
                &["mDraftDetail", "mRoster", "mTeam"],
                &[],
                HeaderMap::new(),
            )
            .await?;

        let players_url = format!("{}/seasons/{}/players", self.base_url, season);
        let players: Vec<RawPlayer> = self
            .get_json(
                &players_url,
                &[("view", "players_wl".to_string())],
                filter_header(&active_players_filter())?,
                season,
            )
            .await?;

        Ok(DraftBoard::from_responses(&raw, &players))
    }

    async fn logo(&self, url: &str) -> Result<Logo> {
        let response = self
            .http
            .get(url)
            .headers(self.headers.clone())
            .timeout(LOGO_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(Logo {
            content_type,
            bytes,
        })
    }
}
