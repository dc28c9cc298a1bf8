//! Shared fixtures: a small league document served by an in-memory source.

#![allow(dead_code)]

use async_trait::async_trait;
use ffl_roundup::espn::model::box_scores_from_response;
use ffl_roundup::espn::types::{LeagueResponse, RawPlayer};
use ffl_roundup::espn::{BoxScore, DraftBoard, League, LeagueSource, Logo};
use ffl_roundup::llm::{LlmError, Narrative, NarrativeGenerator};
use ffl_roundup::report::prompt::PromptInputs;
use ffl_roundup::{LeagueId, Result, Season, Week};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const LEAGUE_ID: u32 = 424242;

fn entry(id: i64, name: &str, position: i32, pro_team: u16, slot: u8, week: u16, points: f64) -> Value {
    json!({
        "playerId": id,
        "lineupSlotId": slot,
        "playerPoolEntry": {
            "id": id,
            "appliedStatTotal": points,
            "player": {
                "id": id,
                "fullName": name,
                "defaultPositionId": position,
                "proTeamId": pro_team,
                "stats": [
                    {"scoringPeriodId": week, "statSourceId": 0, "appliedTotal": points},
                    {"scoringPeriodId": week, "statSourceId": 1, "appliedTotal": 99.0}
                ]
            }
        }
    })
}

fn side(team_id: u32, week: u16, score: f64, entries: Vec<Value>) -> Value {
    json!({
        "teamId": team_id,
        "totalPoints": score,
        "pointsByScoringPeriod": { week.to_string(): score },
        "rosterForCurrentScoringPeriod": { "entries": entries }
    })
}

/// Four teams, two weeks played, a short draft.
pub fn league_document() -> Value {
    json!({
        "id": LEAGUE_ID,
        "seasonId": 2024,
        "settings": {
            "name": "Sunday Scaries",
            "scheduleSettings": {"matchupPeriodCount": 14}
        },
        "status": {
            "firstScoringPeriod": 1,
            "finalScoringPeriod": 17,
            "currentMatchupPeriod": 2
        },
        "members": [
            {"id": "{A}", "firstName": "Dana", "lastName": "Reyes"},
            {"id": "{B}", "displayName": "gurus_gm"},
            {"id": "{C}", "firstName": "Sam", "lastName": "Ortiz"},
            {"id": "{D}", "firstName": "Lee", "lastName": "Park"}
        ],
        "teams": [
            {"id": 1, "abbrev": "TACO", "name": "Taco Corp", "logo": "https://logos.example/1.png", "primaryOwner": "{A}", "owners": ["{A}"]},
            {"id": 2, "abbrev": "GURU", "location": "Gridiron", "nickname": "Gurus", "owners": ["{B}"]},
            {"id": 3, "abbrev": "BNCH", "name": "Bench Warmers", "owners": ["{C}"]},
            {"id": 4, "abbrev": "HAIL", "name": "Hail <Marys>", "owners": ["{D}"]}
        ],
        "schedule": [
            {
                "matchupPeriodId": 1,
                "home": side(1, 1, 130.0, vec![entry(10, "Josh Allen", 1, 2, 0, 1, 31.4)]),
                "away": side(2, 1, 80.0, vec![])
            },
            {
                "matchupPeriodId": 1,
                "home": side(3, 1, 110.0, vec![]),
                "away": side(4, 1, 100.0, vec![])
            },
            {
                "matchupPeriodId": 2,
                "home": side(2, 2, 101.26, vec![
                    entry(20, "Bijan Robinson", 2, 1, 2, 2, 24.0),
                    entry(21, "Puka Nacua", 3, 14, 20, 2, 17.5)
                ]),
                "away": side(1, 2, 99.0, vec![
                    entry(10, "Josh Allen", 1, 2, 0, 2, 28.2),
                    entry(-16002, "Bills D/ST", 16, 2, 16, 2, 9.0)
                ])
            },
            {
                "matchupPeriodId": 2,
                "home": side(3, 2, 140.04, vec![entry(30, "Tyreek Hill", 3, 15, 4, 2, 35.1)]),
                "away": side(4, 2, 90.0, vec![])
            },
            {
                "matchupPeriodId": 3,
                "home": side(1, 3, 0.0, vec![]),
                "away": side(3, 3, 0.0, vec![])
            }
        ],
        "draftDetail": {
            "drafted": true,
            "picks": [
                {"overallPickNumber": 1, "roundId": 1, "roundPickNumber": 1, "playerId": 10, "teamId": 1},
                {"overallPickNumber": 2, "roundId": 1, "roundPickNumber": 2, "playerId": 20, "teamId": 2},
                {"overallPickNumber": 3, "roundId": 2, "roundPickNumber": 1, "playerId": 21, "teamId": 2},
                {"overallPickNumber": 4, "roundId": 2, "roundPickNumber": 2, "playerId": 555, "teamId": 1}
            ]
        }
    })
}

pub fn league_response() -> LeagueResponse {
    serde_json::from_value(league_document()).expect("fixture parses")
}

/// Serves the fixture document the way the HTTP client would.
pub struct FixtureSource {
    pub raw: LeagueResponse,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            raw: league_response(),
        }
    }

    /// Stand-in for the `players_wl` list: everyone on a weekly roster.
    fn player_pool(&self) -> Vec<RawPlayer> {
        self.raw
            .schedule
            .iter()
            .flat_map(|m| m.home.iter().chain(m.away.iter()))
            .filter_map(|side| side.roster_for_current_scoring_period.as_ref())
            .flat_map(|roster| roster.entries.iter())
            .filter_map(|entry| entry.player_pool_entry.as_ref())
            .map(|pool| pool.player.clone())
            .collect()
    }
}

#[async_trait]
impl LeagueSource for FixtureSource {
    fn league_id(&self) -> LeagueId {
        LeagueId::new(LEAGUE_ID)
    }

    async fn league(&self, season: Season) -> Result<League> {
        Ok(League::from_response(&self.raw, self.league_id(), season))
    }

    async fn box_scores(&self, _season: Season, week: Week) -> Result<Vec<BoxScore>> {
        Ok(box_scores_from_response(&self.raw, week))
    }

    async fn draft(&self, _season: Season) -> Result<DraftBoard> {
        Ok(DraftBoard::from_responses(&self.raw, &self.player_pool()))
    }

    async fn logo(&self, url: &str) -> Result<Logo> {
        Ok(Logo {
            content_type: "image/png".to_string(),
            bytes: format!("logo:{url}").into_bytes(),
        })
    }
}

/// Narrator that answers with a fixed narrative and counts its calls.
pub struct CountingNarrator {
    pub calls: AtomicUsize,
    pub narrative: Narrative,
}

impl CountingNarrator {
    pub fn new(narrative: Narrative) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            narrative,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrativeGenerator for CountingNarrator {
    async fn generate(&self, _inputs: &PromptInputs) -> std::result::Result<Narrative, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.narrative.clone())
    }

    fn describe(&self) -> (String, String) {
        ("test".to_string(), "counting".to_string())
    }
}

/// Narrator whose provider always errors.
pub struct FailingNarrator;

#[async_trait]
impl NarrativeGenerator for FailingNarrator {
    async fn generate(&self, _inputs: &PromptInputs) -> std::result::Result<Narrative, LlmError> {
        Err(LlmError::Api {
            status: 500,
            body: "model overloaded".to_string(),
        })
    }

    fn describe(&self) -> (String, String) {
        ("test".to_string(), "failing".to_string())
    }
}
