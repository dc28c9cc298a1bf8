//! Weekly incentives: the game summary, the rotating weekly prize and the
//! per-position boom/bust board.

use serde::Serialize;
use std::cmp::Ordering;

use super::performances::{starters, PlayerPerformance};
use super::scoreboard::Matchup;
use super::{fmt_points, round1};
use crate::Position;

const NFL_LOGO_BASE: &str = "https://static.www.nfl.com/league/api/clubs/logos";

const NFL_TEAM_CODES: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAC", "LAR", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

/// A game reduced to its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDescription {
    pub winner: Option<String>,
    pub loser: String,
    pub winner_score: f64,
    pub loser_score: f64,
    pub margin: f64,
}

impl GameDescription {
    fn from_matchup(m: &Matchup) -> Self {
        Self {
            winner: m.winner.clone(),
            loser: m.loser().to_string(),
            winner_score: m.home_score.max(m.away_score),
            loser_score: m.home_score.min(m.away_score),
            margin: m.margin,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncentiveSummary {
    pub highest_score: Option<GameDescription>,
    pub closest_game: Option<GameDescription>,
    pub biggest_blowout: Option<GameDescription>,
}

/// First element with the greatest key, like a stable max.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    items.iter().fold(None, |best, item| match best {
        Some(b) if key(item) <= key(b) => Some(b),
        _ => Some(item),
    })
}

fn first_min_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    items.iter().fold(None, |best, item| match best {
        Some(b) if key(item) >= key(b) => Some(b),
        _ => Some(item),
    })
}

/// Highest-scoring game, closest game and biggest blowout of the week.
pub fn compute_incentives(scoreboard: &[Matchup]) -> IncentiveSummary {
    IncentiveSummary {
        highest_score: first_max_by(scoreboard, |m| m.home_score.max(m.away_score))
            .map(GameDescription::from_matchup),
        closest_game: first_min_by(scoreboard, |m| m.margin).map(GameDescription::from_matchup),
        biggest_blowout: first_max_by(scoreboard, |m| m.margin).map(GameDescription::from_matchup),
    }
}

/// The rotating weekly prize. Each regular-season week gets a different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncentiveKind {
    HighestTeamScore,
    LowestTeamScore,
    ClosestGame,
    BiggestBlowout,
    HighestScoringStarter,
    HighestScoringBench,
    HighestScoringDefense,
    HighestScoringQb,
    HighestScoringRb,
    HighestScoringWr,
    HighestScoringTe,
    HighestScoringK,
    HighestScoringFlex,
    HighestTeamBenchPoints,
    MostTwentyPointStarters,
    HighestStartingLineupPoints,
    MostTenPointBenchPlayers,
    MostFifteenPointStarters,
    /// Placeholder for seasons longer than the catalog; carries its week.
    Custom(u16),
}

impl IncentiveKind {
    /// Catalog order; week N of the schedule uses entry N-1.
    pub const CATALOG: [IncentiveKind; 18] = [
        IncentiveKind::HighestTeamScore,
        IncentiveKind::LowestTeamScore,
        IncentiveKind::ClosestGame,
        IncentiveKind::BiggestBlowout,
        IncentiveKind::HighestScoringStarter,
        IncentiveKind::HighestScoringBench,
        IncentiveKind::HighestScoringDefense,
        IncentiveKind::HighestScoringQb,
        IncentiveKind::HighestScoringRb,
        IncentiveKind::HighestScoringWr,
        IncentiveKind::HighestScoringTe,
        IncentiveKind::HighestScoringK,
        IncentiveKind::HighestScoringFlex,
        IncentiveKind::HighestTeamBenchPoints,
        IncentiveKind::MostTwentyPointStarters,
        IncentiveKind::HighestStartingLineupPoints,
        IncentiveKind::MostTenPointBenchPlayers,
        IncentiveKind::MostFifteenPointStarters,
    ];

    pub fn key(&self) -> String {
        let key = match self {
            IncentiveKind::HighestTeamScore => "highest_team_score",
            IncentiveKind::LowestTeamScore => "lowest_team_score",
            IncentiveKind::ClosestGame => "closest_game",
            IncentiveKind::BiggestBlowout => "biggest_blowout",
            IncentiveKind::HighestScoringStarter => "highest_scoring_player_starter",
            IncentiveKind::HighestScoringBench => "highest_scoring_player_bench",
            IncentiveKind::HighestScoringDefense => "highest_scoring_defense_starter",
            IncentiveKind::HighestScoringQb => "highest_scoring_qb_starter",
            IncentiveKind::HighestScoringRb => "highest_scoring_rb_starter",
            IncentiveKind::HighestScoringWr => "highest_scoring_wr_starter",
            IncentiveKind::HighestScoringTe => "highest_scoring_te_starter",
            IncentiveKind::HighestScoringK => "highest_scoring_k_starter",
            IncentiveKind::HighestScoringFlex => "highest_scoring_flex_starter",
            IncentiveKind::HighestTeamBenchPoints => "highest_team_bench_points",
            IncentiveKind::MostTwentyPointStarters => "most_20_plus_point_starters",
            IncentiveKind::HighestStartingLineupPoints => "highest_starting_lineup_points",
            IncentiveKind::MostTenPointBenchPlayers => "most_10_plus_point_bench_players",
            IncentiveKind::MostFifteenPointStarters => "most_15_plus_point_starters",
            IncentiveKind::Custom(week) => return format!("custom_incentive_week_{week}"),
        };
        key.to_string()
    }

    pub fn title(&self) -> String {
        let title = match self {
            IncentiveKind::HighestTeamScore => "Highest Scoring Team",
            IncentiveKind::LowestTeamScore => "Lowest Scoring Team",
            IncentiveKind::ClosestGame => "Closest Win",
            IncentiveKind::BiggestBlowout => "Biggest Blowout",
            IncentiveKind::HighestScoringStarter => "Highest Scoring Starter",
            IncentiveKind::HighestScoringBench => "Highest Scoring Benched Player",
            IncentiveKind::HighestScoringDefense => "Highest Scoring Defense (Starter)",
            IncentiveKind::HighestScoringQb => "Highest Scoring QB (Starter)",
            IncentiveKind::HighestScoringRb => "Highest Scoring RB (Starter)",
            IncentiveKind::HighestScoringWr => "Highest Scoring WR (Starter)",
            IncentiveKind::HighestScoringTe => "Highest Scoring TE (Starter)",
            IncentiveKind::HighestScoringK => "Highest Scoring K (Starter)",
            IncentiveKind::HighestScoringFlex => "Highest Scoring FLEX (RB/WR/TE Starter)",
            IncentiveKind::HighestTeamBenchPoints => "Highest Total Bench Points (Team)",
            IncentiveKind::MostTwentyPointStarters => "Most 20+ Point Starters (Team)",
            IncentiveKind::HighestStartingLineupPoints => {
                "Highest Total Starting Lineup Points (Team)"
            }
            IncentiveKind::MostTenPointBenchPlayers => "Most 10+ Point Bench Players (Team)",
            IncentiveKind::MostFifteenPointStarters => "Most 15+ Point Starters (Team)",
            IncentiveKind::Custom(_) => return title_case_key(&self.key()),
        };
        title.to_string()
    }
}

/// `custom_incentive_week_19` -> `Custom Incentive Week 19`
fn title_case_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// One incentive per regular-season week, never repeating.
pub fn weekly_incentive_schedule(regular_season_weeks: u16) -> Vec<IncentiveKind> {
    let weeks = usize::from(regular_season_weeks);
    let mut schedule: Vec<IncentiveKind> =
        IncentiveKind::CATALOG.iter().copied().take(weeks).collect();
    while schedule.len() < weeks {
        schedule.push(IncentiveKind::Custom(schedule.len() as u16 + 1));
    }
    schedule
}

/// The incentive awarded in `week`; `None` outside the regular season.
pub fn scheduled_incentive(week: u16, regular_season_weeks: u16) -> Option<IncentiveKind> {
    let index = usize::from(week.checked_sub(1)?);
    weekly_incentive_schedule(regular_season_weeks)
        .get(index)
        .copied()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveWinner {
    pub key: String,
    pub title: String,
    /// Empty when nobody qualifies.
    pub winner_text: String,
}

fn owner_suffix(owner: Option<&str>) -> String {
    owner.map(|o| format!(" ({o})")).unwrap_or_default()
}

fn best_player<'a>(
    performances: &'a [PlayerPerformance],
    bench: bool,
    accept: impl Fn(&PlayerPerformance) -> bool,
) -> Option<&'a PlayerPerformance> {
    let pool: Vec<&PlayerPerformance> = performances
        .iter()
        .filter(|p| p.is_bench == bench && accept(p))
        .collect();
    first_max_by(&pool, |p| p.points).copied()
}

fn player_label(p: &PlayerPerformance) -> String {
    format!(
        "{} – {} for {}",
        p.player_name,
        fmt_points(p.points),
        p.fantasy_team
    )
}

/// Sum `value` per fantasy team, keeping first-seen team order.
fn per_team<T>(
    performances: &[PlayerPerformance],
    include: impl Fn(&PlayerPerformance) -> Option<T>,
) -> Vec<(String, T)>
where
    T: std::ops::AddAssign + Copy,
{
    let mut totals: Vec<(String, T)> = Vec::new();
    for p in performances.iter().filter(|p| !p.fantasy_team.is_empty()) {
        let Some(value) = include(p) else { continue };
        match totals.iter_mut().find(|(team, _)| *team == p.fantasy_team) {
            Some((_, total)) => *total += value,
            None => totals.push((p.fantasy_team.clone(), value)),
        }
    }
    totals
}

fn leading_team<T>(totals: &[(String, T)]) -> Option<&(String, T)>
where
    T: Copy + Into<f64>,
{
    first_max_by(totals, |(_, v)| (*v).into())
}

fn count_over(bench: bool, threshold: f64) -> impl Fn(&PlayerPerformance) -> Option<u32> {
    move |p| (p.is_bench == bench && p.points >= threshold).then_some(1)
}

/// Work out who won `kind` this week.
pub fn compute_incentive_winner(
    kind: IncentiveKind,
    scoreboard: &[Matchup],
    summary: &IncentiveSummary,
    performances: &[PlayerPerformance],
) -> IncentiveWinner {
    let team_sides: Vec<(&str, f64, Option<&str>)> =
        scoreboard.iter().flat_map(Matchup::sides).collect();

    let winner_text = match kind {
        IncentiveKind::HighestTeamScore => first_max_by(&team_sides, |s| s.1)
            .map(|(name, pts, owner)| format!("{name}{} ({})", owner_suffix(*owner), fmt_points(*pts))),
        IncentiveKind::LowestTeamScore => first_min_by(&team_sides, |s| s.1)
            .map(|(name, pts, owner)| format!("{name}{} ({})", owner_suffix(*owner), fmt_points(*pts))),
        IncentiveKind::ClosestGame => summary.closest_game.as_ref().and_then(won_by),
        IncentiveKind::BiggestBlowout => summary.biggest_blowout.as_ref().and_then(won_by),
        IncentiveKind::HighestScoringStarter => {
            best_player(performances, false, |_| true).map(player_label)
        }
        IncentiveKind::HighestScoringBench => {
            best_player(performances, true, |_| true).map(player_label)
        }
        IncentiveKind::HighestScoringDefense => best_at(performances, Position::DEF),
        IncentiveKind::HighestScoringQb => best_at(performances, Position::QB),
        IncentiveKind::HighestScoringRb => best_at(performances, Position::RB),
        IncentiveKind::HighestScoringWr => best_at(performances, Position::WR),
        IncentiveKind::HighestScoringTe => best_at(performances, Position::TE),
        IncentiveKind::HighestScoringK => best_at(performances, Position::K),
        IncentiveKind::HighestScoringFlex => best_player(performances, false, |p| {
            p.position.is_some_and(|pos| pos.is_flex_eligible())
        })
        .map(player_label),
        IncentiveKind::HighestTeamBenchPoints => {
            let totals = per_team(performances, |p| p.is_bench.then_some(p.points));
            leading_team(&totals)
                .map(|(team, total)| format!("{team} – {} bench pts", fmt_points(round1(*total))))
        }
        IncentiveKind::HighestStartingLineupPoints => {
            let totals = per_team(performances, |p| (!p.is_bench).then_some(p.points));
            leading_team(&totals).map(|(team, total)| {
                format!("{team} – {} starting lineup pts", fmt_points(round1(*total)))
            })
        }
        IncentiveKind::MostTwentyPointStarters => {
            let counts = per_team(performances, count_over(false, 20.0));
            leading_team(&counts).map(|(team, n)| format!("{team} – {n} starters with 20+"))
        }
        IncentiveKind::MostFifteenPointStarters => {
            let counts = per_team(performances, count_over(false, 15.0));
            leading_team(&counts).map(|(team, n)| format!("{team} – {n} starters with 15+"))
        }
        IncentiveKind::MostTenPointBenchPlayers => {
            let counts = per_team(performances, count_over(true, 10.0));
            leading_team(&counts).map(|(team, n)| format!("{team} – {n} bench players with 10+"))
        }
        IncentiveKind::Custom(_) => None,
    };

    IncentiveWinner {
        key: kind.key(),
        title: kind.title(),
        winner_text: winner_text.unwrap_or_default(),
    }
}

fn won_by(game: &GameDescription) -> Option<String> {
    let winner = game.winner.as_ref()?;
    Some(format!("{winner} (won by {})", fmt_points(game.margin)))
}

fn best_at(performances: &[PlayerPerformance], position: Position) -> Option<String> {
    best_player(performances, false, |p| p.position == Some(position)).map(player_label)
}

/// Official NFL club logo for a team abbreviation, after mapping legacy codes.
pub fn nfl_logo_url(code: &str) -> Option<String> {
    let upper = code.trim().to_uppercase();
    let abbr = match upper.as_str() {
        "JAC" => "JAX",
        "WSH" => "WAS",
        "LA" | "STL" => "LAR",
        "SD" => "LAC",
        "OAK" => "LV",
        other => other,
    };
    NFL_TEAM_CODES
        .contains(&abbr)
        .then(|| format!("{NFL_LOGO_BASE}/{abbr}.svg"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoomBustPlayer {
    pub player_name: String,
    pub points: f64,
    pub fantasy_team: String,
    pub nfl_team: String,
    pub nfl_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoomBustRow {
    pub position: Position,
    pub booms: Vec<BoomBustPlayer>,
    pub busts: Vec<BoomBustPlayer>,
}

/// Top three and bottom three starters per position.
///
/// Busts are the last three of the best-first ordering, so they read
/// highest to lowest.
pub fn boom_bust_by_position(
    performances: &[PlayerPerformance],
    positions: &[Position],
) -> Vec<BoomBustRow> {
    let project = |p: &PlayerPerformance| {
        let nfl_team = p.nfl_team.clone().unwrap_or_default();
        BoomBustPlayer {
            player_name: p.player_name.clone(),
            points: round1(p.points),
            fantasy_team: p.fantasy_team.clone(),
            nfl_logo: nfl_logo_url(&nfl_team),
            nfl_team,
        }
    };

    positions
        .iter()
        .map(|&position| {
            let mut pool: Vec<&PlayerPerformance> = starters(performances)
                .filter(|p| p.position == Some(position))
                .collect();
            pool.sort_by(|a, b| b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal));

            let booms = pool.iter().take(3).map(|p| project(p)).collect();
            let busts = pool[pool.len().saturating_sub(3)..]
                .iter()
                .map(|p| project(p))
                .collect();

            BoomBustRow {
                position,
                booms,
                busts,
            }
        })
        .collect()
}
