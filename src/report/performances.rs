//! Individual player lines for a week.

use serde::Serialize;
use std::cmp::Ordering;

use super::round1;
use crate::espn::{BoxScore, BoxTeam, League};
use crate::Position;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPerformance {
    pub player_name: String,
    pub position: Option<Position>,
    pub nfl_team: Option<String>,
    pub points: f64,
    pub fantasy_team: String,
    pub is_bench: bool,
}

fn by_points_desc(a: &PlayerPerformance, b: &PlayerPerformance) -> Ordering {
    b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal)
}

/// Every lineup player of every matchup, home side first.
pub fn player_performances(box_scores: &[BoxScore], league: &League) -> Vec<PlayerPerformance> {
    let team_name = |team: &BoxTeam| {
        league
            .team(team.team_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| team.team_id.to_string())
    };

    box_scores
        .iter()
        .flat_map(|b| std::iter::once(&b.home).chain(b.away.as_ref()))
        .flat_map(|team| {
            let fantasy_team = team_name(team);
            team.lineup.iter().map(move |p| PlayerPerformance {
                player_name: p.name.clone(),
                position: p.position,
                nfl_team: p.nfl_team.clone(),
                points: round1(p.points),
                fantasy_team: fantasy_team.clone(),
                is_bench: p.is_bench(),
            })
        })
        .collect()
}

pub fn starters(performances: &[PlayerPerformance]) -> impl Iterator<Item = &PlayerPerformance> {
    performances.iter().filter(|p| !p.is_bench)
}

/// Highest-scoring starters, best first.
pub fn top_players(performances: &[PlayerPerformance], n: usize) -> Vec<PlayerPerformance> {
    let mut pool: Vec<_> = starters(performances).cloned().collect();
    pool.sort_by(by_points_desc);
    pool.truncate(n);
    pool
}
