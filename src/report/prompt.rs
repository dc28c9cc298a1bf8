//! Compact week summary handed to the narrative model.

use serde::Serialize;
use std::collections::HashMap;

use super::incentives::IncentiveSummary;
use super::performances::PlayerPerformance;
use super::scoreboard::Matchup;
use super::standings::Standing;
use crate::TeamId;

/// Games decided by less than this are called out as close.
const CLOSE_GAME_MARGIN: f64 = 5.0;
const STANDINGS_SHOWN: usize = 5;
const FACTS_SHOWN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactMatchup {
    pub home: String,
    pub away: String,
    pub home_score: f64,
    pub away_score: f64,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseGame {
    pub home: String,
    pub away: String,
    pub margin: f64,
    pub winner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptInputs {
    pub league_name: String,
    pub week: u16,
    pub scoreboard: Vec<CompactMatchup>,
    pub standings_top5: Vec<Standing>,
    pub incentives: IncentiveSummary,
    pub top_players: Vec<PlayerPerformance>,
    pub close_games: Vec<CloseGame>,
    pub undefeated_teams: Vec<String>,
    pub first_wins: Vec<String>,
}

/// Reduce a computed week to the facts worth narrating.
///
/// `previous_standings` are the standings through the prior week; teams
/// missing from them can't score a first win.
pub fn build_prompt_inputs(
    league_name: &str,
    week: u16,
    scoreboard: &[Matchup],
    standings: &[Standing],
    incentives: &IncentiveSummary,
    top_players: &[PlayerPerformance],
    previous_standings: Option<&[Standing]>,
) -> PromptInputs {
    let standings_top5: Vec<Standing> = standings.iter().take(STANDINGS_SHOWN).cloned().collect();

    let compact = scoreboard
        .iter()
        .map(|m| CompactMatchup {
            home: m.home_team.clone(),
            away: m.away_team.clone(),
            home_score: m.home_score,
            away_score: m.away_score,
            winner: m.winner.clone(),
        })
        .collect();

    let close_games = scoreboard
        .iter()
        .filter(|m| m.margin < CLOSE_GAME_MARGIN)
        .filter_map(|m| {
            Some(CloseGame {
                home: m.home_team.clone(),
                away: m.away_team.clone(),
                margin: m.margin,
                winner: m.winner.clone()?,
            })
        })
        .take(FACTS_SHOWN)
        .collect();

    let undefeated_teams = standings_top5
        .iter()
        .filter(|s| s.losses == 0 && s.wins > 0)
        .map(|s| s.team_name.clone())
        .take(FACTS_SHOWN)
        .collect();

    let prev_wins: HashMap<TeamId, u32> = previous_standings
        .unwrap_or_default()
        .iter()
        .map(|s| (s.team_id, s.wins))
        .collect();
    let first_wins = standings
        .iter()
        .filter(|s| s.wins > 0 && prev_wins.get(&s.team_id) == Some(&0))
        .map(|s| s.team_name.clone())
        .take(FACTS_SHOWN)
        .collect();

    PromptInputs {
        league_name: league_name.to_string(),
        week,
        scoreboard: compact,
        standings_top5,
        incentives: incentives.clone(),
        top_players: top_players.iter().take(FACTS_SHOWN).cloned().collect(),
        close_games,
        undefeated_teams,
        first_wins,
    }
}
