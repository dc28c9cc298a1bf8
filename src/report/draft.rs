//! Draft board rows, per-team draft summaries and simple draft grades.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::espn::{DraftBoard, League};
use crate::{PlayerId, Position, TeamId};

const UNKNOWN_PLAYER: &str = "Unknown Player";
const UNKNOWN_TEAM: &str = "Unknown Team";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftPickRow {
    pub round: u16,
    pub pick_number: u16,
    /// 1-based position in the draft order.
    pub overall_pick: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub nfl_team: Option<String>,
    pub position: Option<Position>,
    pub team_id: TeamId,
    pub team_name: String,
    pub team_abbrev: Option<String>,
    pub team_logo: Option<String>,
    pub owner_name: Option<String>,
    pub keeper: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DraftStrategy {
    #[serde(rename = "Early Round Focus")]
    EarlyRoundFocus,
    #[serde(rename = "Balanced Approach")]
    BalancedApproach,
    #[serde(rename = "Late Round Value")]
    LateRoundValue,
    #[serde(rename = "Mixed Strategy")]
    MixedStrategy,
}

impl fmt::Display for DraftStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DraftStrategy::EarlyRoundFocus => "Early Round Focus",
            DraftStrategy::BalancedApproach => "Balanced Approach",
            DraftStrategy::LateRoundValue => "Late Round Value",
            DraftStrategy::MixedStrategy => "Mixed Strategy",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DraftGrade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for DraftGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Pick counts by draft phase: rounds 1-3, 4-8 and 9 onwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RoundMix {
    early: usize,
    mid: usize,
    late: usize,
}

impl RoundMix {
    fn of(picks: &[DraftPickRow]) -> Self {
        picks.iter().fold(Self::default(), |mut mix, p| {
            match p.round {
                0..=3 => mix.early += 1,
                4..=8 => mix.mid += 1,
                _ => mix.late += 1,
            }
            mix
        })
    }

    fn strategy(&self) -> DraftStrategy {
        if self.early >= 2 {
            DraftStrategy::EarlyRoundFocus
        } else if self.mid >= 3 {
            DraftStrategy::BalancedApproach
        } else if self.late >= 4 {
            DraftStrategy::LateRoundValue
        } else {
            DraftStrategy::MixedStrategy
        }
    }

    fn grade(&self) -> DraftGrade {
        match (self.early, self.mid) {
            (e, m) if e >= 2 && m >= 2 => DraftGrade::A,
            (e, m) if e >= 1 && m >= 2 => DraftGrade::B,
            (_, m) if m >= 2 => DraftGrade::C,
            _ => DraftGrade::D,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDraft {
    pub team_id: TeamId,
    pub team_name: String,
    pub team_abbrev: Option<String>,
    pub team_logo: Option<String>,
    pub owner_name: Option<String>,
    pub picks: Vec<DraftPickRow>,
    pub total_picks: usize,
    /// Sorted, without duplicates.
    pub rounds_covered: Vec<u16>,
    /// In the order first drafted.
    pub positions_drafted: Vec<Position>,
    pub draft_strategy: DraftStrategy,
    pub draft_grade: DraftGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftAnalysis {
    pub total_teams: usize,
    /// Always carries A through D, zero when unused.
    pub grade_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftReport {
    pub draft_picks: Vec<DraftPickRow>,
    pub team_drafts: Vec<TeamDraft>,
    pub rounds: u16,
    pub total_picks: usize,
    pub teams_count: usize,
    /// `None` when the league has not drafted.
    pub analysis: Option<DraftAnalysis>,
}

pub fn draft_report(league: &League, board: &DraftBoard) -> DraftReport {
    let draft_picks: Vec<DraftPickRow> = board
        .picks
        .iter()
        .enumerate()
        .map(|(i, pick)| {
            let player = board.player(pick.player_id);
            let team = league.team(pick.team_id);
            DraftPickRow {
                round: pick.round,
                pick_number: pick.round_pick,
                overall_pick: i + 1,
                player_id: pick.player_id,
                player_name: player
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                nfl_team: player.and_then(|p| p.nfl_team.clone()),
                position: player.and_then(|p| p.position),
                team_id: pick.team_id,
                team_name: team
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
                team_abbrev: team.and_then(|t| t.abbrev.clone()),
                team_logo: team.and_then(|t| t.logo_url.clone()),
                owner_name: team.and_then(|t| t.owner_name.clone()),
                keeper: pick.keeper,
            }
        })
        .collect();

    let mut grouped: Vec<(TeamId, Vec<DraftPickRow>)> = Vec::new();
    for pick in &draft_picks {
        match grouped.iter_mut().find(|(id, _)| *id == pick.team_id) {
            Some((_, picks)) => picks.push(pick.clone()),
            None => grouped.push((pick.team_id, vec![pick.clone()])),
        }
    }

    let team_drafts: Vec<TeamDraft> = grouped
        .into_iter()
        .map(|(team_id, picks)| summarize_team(team_id, picks))
        .collect();

    let analysis = (!draft_picks.is_empty()).then(|| {
        let mut grade_distribution: BTreeMap<String, usize> =
            [DraftGrade::A, DraftGrade::B, DraftGrade::C, DraftGrade::D]
                .iter()
                .map(|g| (g.to_string(), 0))
                .collect();
        for team in &team_drafts {
            *grade_distribution
                .entry(team.draft_grade.to_string())
                .or_default() += 1;
        }
        DraftAnalysis {
            total_teams: team_drafts.len(),
            grade_distribution,
        }
    });

    DraftReport {
        rounds: draft_picks.iter().map(|p| p.round).max().unwrap_or(0),
        total_picks: draft_picks.len(),
        teams_count: team_drafts.len(),
        draft_picks,
        team_drafts,
        analysis,
    }
}

fn summarize_team(team_id: TeamId, picks: Vec<DraftPickRow>) -> TeamDraft {
    let mut rounds_covered: Vec<u16> = picks.iter().map(|p| p.round).collect();
    rounds_covered.sort_unstable();
    rounds_covered.dedup();

    let mut positions_drafted: Vec<Position> = Vec::new();
    for position in picks.iter().filter_map(|p| p.position) {
        if !positions_drafted.contains(&position) {
            positions_drafted.push(position);
        }
    }

    let mix = RoundMix::of(&picks);
    let first = &picks[0];

    TeamDraft {
        team_id,
        team_name: first.team_name.clone(),
        team_abbrev: first.team_abbrev.clone(),
        team_logo: first.team_logo.clone(),
        owner_name: first.owner_name.clone(),
        total_picks: picks.len(),
        rounds_covered,
        positions_drafted,
        draft_strategy: mix.strategy(),
        draft_grade: mix.grade(),
        picks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn::{DraftPick, PlayerInfo};
    use crate::report::scoreboard::tests::{league, team};
    use std::collections::HashMap;

    fn pick(round: u16, round_pick: u16, player: i64, team: u32) -> DraftPick {
        DraftPick {
            overall: 0,
            round,
            round_pick,
            player_id: PlayerId::new(player),
            team_id: TeamId::new(team),
            keeper: false,
        }
    }

    fn info(name: &str, position: Position) -> PlayerInfo {
        PlayerInfo {
            name: name.to_string(),
            position: Some(position),
            nfl_team: Some("BUF".to_string()),
        }
    }

    fn board(picks: Vec<DraftPick>) -> DraftBoard {
        let players: HashMap<PlayerId, PlayerInfo> = [
            (PlayerId::new(10), info("Josh Allen", Position::QB)),
            (PlayerId::new(11), info("James Cook", Position::RB)),
            (PlayerId::new(-16002), info("Bills D/ST", Position::DEF)),
        ]
        .into_iter()
        .collect();
        DraftBoard { picks, players }
    }

    #[test]
    fn test_empty_draft() {
        let report = draft_report(&league(vec![]), &DraftBoard::default());
        assert_eq!(report.rounds, 0);
        assert_eq!(report.total_picks, 0);
        assert_eq!(report.teams_count, 0);
        assert!(report.analysis.is_none());
    }

    #[test]
    fn test_pick_rows_resolve_names() {
        let league = league(vec![team(1, "Taco Corp", Some("Dana Reyes"))]);
        let report = draft_report(
            &league,
            &board(vec![pick(1, 1, 10, 1), pick(1, 2, 99, 5), pick(2, 1, -16002, 1)]),
        );

        let rows = &report.draft_picks;
        assert_eq!(rows[0].overall_pick, 1);
        assert_eq!(rows[0].player_name, "Josh Allen");
        assert_eq!(rows[0].owner_name.as_deref(), Some("Dana Reyes"));
        assert_eq!(rows[1].player_name, "Unknown Player");
        assert_eq!(rows[1].team_name, "Unknown Team");
        assert_eq!(rows[1].position, None);
        assert_eq!(rows[2].position, Some(Position::DEF));
        assert_eq!(rows[2].overall_pick, 3);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.teams_count, 2);
    }

    #[test]
    fn test_team_grouping_and_grades() {
        let league = league(vec![team(1, "Taco Corp", None), team(2, "Gridiron Gurus", None)]);
        let mut picks = Vec::new();
        for round in 1..=10u16 {
            picks.push(pick(round, 1, 10, 2));
            picks.push(pick(round, 2, 11, 1));
        }
        // team 2 also gets the extra late picks
        picks.push(pick(12, 1, -16002, 2));

        let report = draft_report(&league, &board(picks));
        let teams = &report.team_drafts;
        assert_eq!(teams[0].team_name, "Gridiron Gurus");
        assert_eq!(teams[0].total_picks, 11);
        assert_eq!(teams[0].rounds_covered.last(), Some(&12));
        assert_eq!(teams[0].positions_drafted, vec![Position::QB, Position::DEF]);
        assert_eq!(teams[0].draft_strategy, DraftStrategy::EarlyRoundFocus);
        assert_eq!(teams[0].draft_grade, DraftGrade::A);

        let analysis = report.analysis.unwrap();
        assert_eq!(analysis.total_teams, 2);
        assert_eq!(analysis.grade_distribution["A"], 2);
        assert_eq!(analysis.grade_distribution["D"], 0);
    }

    #[test]
    fn test_round_mix_rules() {
        let mix = |early, mid, late| RoundMix { early, mid, late };
        assert_eq!(mix(1, 3, 0).strategy(), DraftStrategy::BalancedApproach);
        assert_eq!(mix(1, 2, 5).strategy(), DraftStrategy::LateRoundValue);
        assert_eq!(mix(1, 1, 1).strategy(), DraftStrategy::MixedStrategy);
        assert_eq!(mix(1, 2, 0).grade(), DraftGrade::B);
        assert_eq!(mix(0, 5, 0).grade(), DraftGrade::C);
        assert_eq!(mix(3, 1, 9).grade(), DraftGrade::D);
    }

    #[test]
    fn test_strategy_serializes_as_label() {
        let json = serde_json::to_string(&DraftStrategy::LateRoundValue).unwrap();
        assert_eq!(json, "\"Late Round Value\"");
        assert_eq!(serde_json::to_string(&DraftGrade::B).unwrap(), "\"B\"");
    }
}
