//! Assembles weekly roundups and draft reports from a [`LeagueSource`],
//! caching league snapshots, box scores and logos.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::awards::{compute_weekly_awards, Award};
use super::draft::{draft_report, DraftReport};
use super::incentives::{
    boom_bust_by_position, compute_incentive_winner, compute_incentives, scheduled_incentive,
    BoomBustRow, IncentiveSummary, IncentiveWinner,
};
use super::performances::{player_performances, top_players, PlayerPerformance};
use super::prompt::{build_prompt_inputs, PromptInputs};
use super::scoreboard::{build_scoreboard, Matchup};
use super::standings::{compute_standings, with_movement, Standing};
use crate::core::cache::{
    BoxScoresCacheKey, LeagueCacheKey, LogoCacheKey, DATA_TTL, LOGO_TTL,
};
use crate::core::UnifiedCache;
use crate::espn::{BoxScore, League, LeagueSource, Logo};
use crate::{Position, Result, RoundupError, Season, TeamId, Week};

const LEAGUE_CACHE_CAPACITY: usize = 8;
const BOX_SCORE_CACHE_CAPACITY: usize = 64;
const LOGO_CACHE_CAPACITY: usize = 64;
const TOP_PLAYERS: usize = 10;

/// Everything shown on one week's roundup page, minus the narrative.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub league_name: String,
    pub year: Season,
    pub week: u16,
    pub first_week: u16,
    pub last_week: u16,
    pub prev_week: u16,
    pub next_week: u16,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub scoreboard: Vec<Matchup>,
    pub standings: Vec<Standing>,
    pub incentives: IncentiveSummary,
    /// The week's rotating prize; `None` after the regular season.
    pub weekly_incentive: Option<IncentiveWinner>,
    pub awards: Vec<Award>,
    pub boom_bust: Vec<BoomBustRow>,
    pub top_players: Vec<PlayerPerformance>,
    #[serde(skip)]
    pub prompt_inputs: PromptInputs,
}

/// Cache occupancy reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub leagues: usize,
    pub box_scores: usize,
    pub logos: usize,
}

pub struct ReportService {
    source: Arc<dyn LeagueSource>,
    leagues: UnifiedCache<LeagueCacheKey, League>,
    box_scores: UnifiedCache<BoxScoresCacheKey, Vec<BoxScore>>,
    logos: UnifiedCache<LogoCacheKey, Logo>,
}

impl ReportService {
    /// Memory-only caching.
    pub fn new(source: Arc<dyn LeagueSource>) -> Self {
        Self {
            source,
            leagues: UnifiedCache::new(LEAGUE_CACHE_CAPACITY, DATA_TTL),
            box_scores: UnifiedCache::new(BOX_SCORE_CACHE_CAPACITY, DATA_TTL),
            logos: UnifiedCache::new(LOGO_CACHE_CAPACITY, LOGO_TTL),
        }
    }

    /// League snapshots and box scores are also kept as JSON under `dir`.
    pub fn with_cache_dir(source: Arc<dyn LeagueSource>, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut service = Self::new(source);
        service.leagues = service.leagues.with_disk(dir.clone());
        service.box_scores = service.box_scores.with_disk(dir);
        service
    }

    pub fn source(&self) -> &dyn LeagueSource {
        self.source.as_ref()
    }

    pub async fn league(&self, season: Season) -> Result<League> {
        let key = LeagueCacheKey {
            league_id: self.source.league_id(),
            season,
        };
        if let Some(league) = self.leagues.get(&key) {
            debug!(season = %season, "league cache hit");
            return Ok(league);
        }

        let league = self.source.league(season).await?;
        self.leagues.put(key, league.clone());
        Ok(league)
    }

    /// One week of box scores. A failed fetch yields an empty week, which
    /// is not cached so the next request retries.
    pub async fn box_scores(&self, season: Season, week: Week) -> Vec<BoxScore> {
        let key = BoxScoresCacheKey {
            league_id: self.source.league_id(),
            season,
            week,
        };
        if let Some(scores) = self.box_scores.get(&key) {
            return scores;
        }

        match self.source.box_scores(season, week).await {
            Ok(scores) => {
                self.box_scores.put(key, scores.clone());
                scores
            }
            Err(e) => {
                warn!(error = %e, season = %season, week = %week, "box score fetch failed");
                Vec::new()
            }
        }
    }

    pub async fn weekly_report(&self, season: Season, week: Week) -> Result<WeeklyReport> {
        let started = Instant::now();
        let league = self.league(season).await?;

        if week.as_u16() < 1 || !league.contains_week(week) {
            return Err(RoundupError::InvalidWeek {
                week: week.as_u16(),
                first: league.first_week.as_u16(),
                last: league.last_week.as_u16(),
            });
        }

        let mut weeks = Vec::with_capacity(usize::from(week.as_u16()));
        for w in 1..=week.as_u16() {
            weeks.push(self.box_scores(season, Week::new(w)).await);
        }
        let (earlier, this_week) = weeks.split_at(weeks.len() - 1);
        let this_week = &this_week[0];

        let scoreboard = build_scoreboard(this_week, &league);
        let previous = (!earlier.is_empty()).then(|| compute_standings(&league, earlier));
        let standings = with_movement(compute_standings(&league, &weeks), previous.as_deref());

        let performances = player_performances(this_week, &league);
        let incentives = compute_incentives(&scoreboard);
        let weekly_incentive = scheduled_incentive(week.as_u16(), league.regular_season_weeks)
            .map(|kind| compute_incentive_winner(kind, &scoreboard, &incentives, &performances));
        let awards = compute_weekly_awards(&scoreboard, &standings, &performances);
        let boom_bust = boom_bust_by_position(&performances, &Position::SCORING);
        let top = top_players(&performances, TOP_PLAYERS);

        let prompt_inputs = build_prompt_inputs(
            &league.name,
            week.as_u16(),
            &scoreboard,
            &standings,
            &incentives,
            &top,
            previous.as_deref(),
        );

        info!(
            season = %season,
            week = %week,
            games = scoreboard.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "weekly report built"
        );

        Ok(WeeklyReport {
            league_name: league.name.clone(),
            year: season,
            week: week.as_u16(),
            first_week: league.first_week.as_u16(),
            last_week: league.last_week.as_u16(),
            prev_week: week.previous_within(league.first_week).as_u16(),
            next_week: week.next_within(league.last_week).as_u16(),
            prev_disabled: week <= league.first_week,
            next_disabled: week >= league.last_week,
            scoreboard,
            standings,
            incentives,
            weekly_incentive,
            awards,
            boom_bust,
            top_players: top,
            prompt_inputs,
        })
    }

    pub async fn draft_report(&self, season: Season) -> Result<DraftReport> {
        let league = self.league(season).await?;
        let board = self.source.draft(season).await?;
        Ok(draft_report(&league, &board))
    }

    /// The team's logo fetched through the league session, `None` when the
    /// team is unknown or has no logo.
    pub async fn team_logo(&self, season: Season, team_id: TeamId) -> Result<Option<Logo>> {
        let league = self.league(season).await?;
        let Some(url) = league.team(team_id).and_then(|t| t.logo_url.clone()) else {
            return Ok(None);
        };

        let key = LogoCacheKey { url };
        if let Some(logo) = self.logos.get(&key) {
            return Ok(Some(logo));
        }
        let logo = self.source.logo(&key.url).await?;
        self.logos.put(key, logo.clone());
        Ok(Some(logo))
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            leagues: self.leagues.memory_stats().0,
            box_scores: self.box_scores.memory_stats().0,
            logos: self.logos.memory_stats().0,
        }
    }
}
