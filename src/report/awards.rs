//! Fun weekly awards shown under the scoreboard.

use serde::Serialize;
use std::collections::HashMap;

use super::performances::PlayerPerformance;
use super::scoreboard::Matchup;
use super::standings::Standing;
use super::{fmt_points, round1};
use crate::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
    pub title: String,
    pub text: String,
}

impl Award {
    fn new(title: &str, text: String) -> Self {
        Self {
            title: title.to_string(),
            text,
        }
    }
}

fn with_owner(name: &str, owner: Option<&str>) -> String {
    match owner {
        Some(owner) if !owner.is_empty() => format!("{name} ({owner})"),
        _ => name.to_string(),
    }
}

/// A decided game seen from the winner's side.
struct Decided<'a> {
    winner: &'a str,
    winner_id: Option<TeamId>,
    winner_owner: Option<&'a str>,
    winner_score: f64,
    loser: &'a str,
    loser_id: Option<TeamId>,
    loser_owner: Option<&'a str>,
    margin: f64,
}

fn decided(m: &Matchup) -> Option<Decided<'_>> {
    let winner = m.winner.as_deref()?;
    let home_won = winner == m.home_team;
    let (winner_id, loser_id) = if home_won {
        (m.home_id, m.away_id)
    } else {
        (m.away_id, m.home_id)
    };
    Some(Decided {
        winner,
        winner_id,
        winner_owner: m.winner_owner(),
        winner_score: if home_won { m.home_score } else { m.away_score },
        loser: m.loser(),
        loser_id,
        loser_owner: m.loser_owner(),
        margin: m.margin,
    })
}

/// Manager of the Week, Squeaker, Heartbreaker, Giant Killer and Bench Blunder,
/// each present only when something qualifies. Bye sides never win anything.
pub fn compute_weekly_awards(
    scoreboard: &[Matchup],
    standings: &[Standing],
    performances: &[PlayerPerformance],
) -> Vec<Award> {
    let mut awards = Vec::new();

    let mut best: Option<(&str, f64, Option<&str>)> = None;
    for side in scoreboard.iter().flat_map(Matchup::sides) {
        if best.map_or(true, |(_, score, _)| side.1 > score) {
            best = Some(side);
        }
    }
    if let Some((name, score, owner)) = best {
        awards.push(Award::new(
            "Manager of the Week",
            format!("{} – {} points", with_owner(name, owner), fmt_points(round1(score))),
        ));
    }

    // Only games between two real teams count from here on.
    let results: Vec<Decided<'_>> = scoreboard
        .iter()
        .filter_map(decided)
        .filter(|r| r.winner_id.is_some() && r.loser_id.is_some())
        .collect();

    let squeaker = results.iter().fold(None::<&Decided<'_>>, |low, r| match low {
        Some(l) if r.winner_score >= l.winner_score => Some(l),
        _ => Some(r),
    });
    if let Some(r) = squeaker {
        awards.push(Award::new(
            "Squeaker",
            format!(
                "Lowest winning score: {} – {}",
                with_owner(r.winner, r.winner_owner),
                fmt_points(round1(r.winner_score))
            ),
        ));
    }

    let heartbreak = results.iter().fold(None::<&Decided<'_>>, |low, r| match low {
        Some(l) if r.margin >= l.margin => Some(l),
        _ => Some(r),
    });
    if let Some(r) = heartbreak {
        awards.push(Award::new(
            "Heartbreaker",
            format!(
                "{} lost to {} by {}",
                with_owner(r.loser, r.loser_owner),
                with_owner(r.winner, r.winner_owner),
                fmt_points(round1(r.margin))
            ),
        ));
    }

    let ranks: HashMap<TeamId, usize> = standings.iter().map(|s| (s.team_id, s.rank)).collect();
    let mut upset: Option<(&Decided<'_>, usize)> = None;
    for r in &results {
        let (Some(w_rank), Some(l_rank)) = (
            r.winner_id.and_then(|id| ranks.get(&id)),
            r.loser_id.and_then(|id| ranks.get(&id)),
        ) else {
            continue;
        };
        if w_rank > l_rank {
            let delta = w_rank - l_rank;
            if upset.map_or(true, |(_, best)| delta > best) {
                upset = Some((r, delta));
            }
        }
    }
    if let Some((r, delta)) = upset {
        awards.push(Award::new(
            "Giant Killer",
            format!(
                "{} upset {} (by ranking, +{delta})",
                with_owner(r.winner, r.winner_owner),
                with_owner(r.loser, r.loser_owner)
            ),
        ));
    }

    let mut bench: Vec<(&str, f64)> = Vec::new();
    for p in performances
        .iter()
        .filter(|p| p.is_bench && !p.fantasy_team.is_empty())
    {
        match bench.iter_mut().find(|(team, _)| *team == p.fantasy_team) {
            Some((_, total)) => *total += p.points,
            None => bench.push((p.fantasy_team.as_str(), p.points)),
        }
    }
    let blunder = bench.iter().fold(None::<&(&str, f64)>, |top, entry| match top {
        Some(t) if entry.1 <= t.1 => Some(t),
        _ => Some(entry),
    });
    if let Some((team, total)) = blunder {
        let owner = standings
            .iter()
            .find(|s| s.team_name == *team)
            .and_then(|s| s.owner_name.as_deref());
        awards.push(Award::new(
            "Bench Blunder",
            format!(
                "{} – {} points left on bench",
                with_owner(team, owner),
                fmt_points(round1(*total))
            ),
        ));
    }

    awards
}
