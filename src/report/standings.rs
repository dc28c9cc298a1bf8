//! Standings computed from box scores, with week-over-week movement.

use serde::Serialize;
use std::collections::HashMap;

use super::round1;
use crate::espn::{BoxScore, League};
use crate::TeamId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub team_abbrev: Option<String>,
    pub logo_url: Option<String>,
    pub owner_name: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    /// 1-based
    pub rank: usize,
    pub record: String,
    /// Places gained since last week; negative when dropping.
    pub movement: Option<i32>,
    /// `None` when the rank did not change.
    pub movement_is_up: Option<bool>,
    pub movement_abs: Option<u32>,
}

pub fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    if ties > 0 {
        format!("{wins}-{losses}-{ties}")
    } else {
        format!("{wins}-{losses}")
    }
}

/// Standings over the given weeks of box scores (normally weeks 1..=N).
///
/// Sorted by wins then points-for, both descending; ties keep league order.
pub fn compute_standings(league: &League, weeks: &[Vec<BoxScore>]) -> Vec<Standing> {
    let mut table: Vec<Standing> = league
        .teams
        .iter()
        .map(|t| Standing {
            team_id: t.team_id,
            team_name: t.name.clone(),
            team_abbrev: t.abbrev.clone(),
            logo_url: t.logo_url.clone(),
            owner_name: t.owner_name.clone(),
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0.0,
            points_against: 0.0,
            rank: 0,
            record: String::new(),
            movement: None,
            movement_is_up: None,
            movement_abs: None,
        })
        .collect();
    let index: HashMap<TeamId, usize> = table
        .iter()
        .enumerate()
        .map(|(i, s)| (s.team_id, i))
        .collect();

    for game in weeks.iter().flatten() {
        let home_score = game.home_score();
        let away_score = game.away_score();
        let home = index.get(&game.home.team_id).copied();
        let away = game
            .away
            .as_ref()
            .and_then(|a| index.get(&a.team_id).copied());

        if let Some(h) = home {
            table[h].points_for += home_score;
            table[h].points_against += away_score;
        }
        if let Some(a) = away {
            table[a].points_for += away_score;
            table[a].points_against += home_score;
        }

        // byes and unplayed games record no result
        if game.away.is_none() || (home_score == 0.0 && away_score == 0.0) {
            continue;
        }

        let (home_result, away_result) = if home_score > away_score {
            (GameResult::Win, GameResult::Loss)
        } else if away_score > home_score {
            (GameResult::Loss, GameResult::Win)
        } else {
            (GameResult::Tie, GameResult::Tie)
        };
        if let Some(h) = home {
            table[h].record_result(home_result);
        }
        if let Some(a) = away {
            table[a].record_result(away_result);
        }
    }

    for s in &mut table {
        s.points_for = round1(s.points_for);
        s.record = format_record(s.wins, s.losses, s.ties);
    }
    table.sort_by(|a, b| {
        b.wins.cmp(&a.wins).then(
            b.points_for
                .partial_cmp(&a.points_for)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    for (i, s) in table.iter_mut().enumerate() {
        s.rank = i + 1;
    }
    table
}

#[derive(Clone, Copy)]
enum GameResult {
    Win,
    Loss,
    Tie,
}

impl Standing {
    fn record_result(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }
    }
}

/// Attach rank movement relative to `previous`.
///
/// Without previous standings (week one) every movement stays `None`.
pub fn with_movement(mut current: Vec<Standing>, previous: Option<&[Standing]>) -> Vec<Standing> {
    let Some(previous) = previous else {
        return current;
    };
    let prev_rank: HashMap<TeamId, usize> =
        previous.iter().map(|s| (s.team_id, s.rank)).collect();

    for s in &mut current {
        let Some(&before) = prev_rank.get(&s.team_id) else {
            continue;
        };
        let delta = before as i32 - s.rank as i32;
        s.movement = Some(delta);
        s.movement_abs = Some(delta.unsigned_abs());
        s.movement_is_up = (delta != 0).then_some(delta > 0);
    }
    current
}
