//! Weekly matchup rows.

use serde::Serialize;

use super::round2;
use crate::espn::{BoxScore, BoxTeam, League};
use crate::TeamId;

pub const BYE: &str = "Bye";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub home_id: Option<TeamId>,
    pub away_id: Option<TeamId>,
    pub home_team: String,
    pub away_team: String,
    pub home_owner: Option<String>,
    pub away_owner: Option<String>,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
    pub home_score: f64,
    pub away_score: f64,
    pub margin: f64,
    /// Name of the higher-scoring side; `None` on a tie.
    pub winner: Option<String>,
}

impl Matchup {
    /// The side that didn't win; the away side when tied.
    pub fn loser(&self) -> &str {
        if self.winner.as_deref() == Some(self.away_team.as_str()) {
            &self.home_team
        } else {
            &self.away_team
        }
    }

    pub fn winner_owner(&self) -> Option<&str> {
        match self.winner.as_deref() {
            Some(w) if w == self.home_team => self.home_owner.as_deref(),
            Some(_) => self.away_owner.as_deref(),
            None => None,
        }
    }

    pub fn loser_owner(&self) -> Option<&str> {
        if self.loser() == self.home_team {
            self.home_owner.as_deref()
        } else {
            self.away_owner.as_deref()
        }
    }

    pub fn winner_score(&self) -> Option<f64> {
        match self.winner.as_deref() {
            Some(w) if w == self.home_team => Some(self.home_score),
            Some(_) => Some(self.away_score),
            None => None,
        }
    }

    /// `(name, score, owner)` for each real team, skipping byes.
    pub fn sides(&self) -> impl Iterator<Item = (&str, f64, Option<&str>)> {
        [
            (
                self.home_id,
                self.home_team.as_str(),
                self.home_score,
                self.home_owner.as_deref(),
            ),
            (
                self.away_id,
                self.away_team.as_str(),
                self.away_score,
                self.away_owner.as_deref(),
            ),
        ]
        .into_iter()
        .filter(|(id, ..)| id.is_some())
        .map(|(_, name, score, owner)| (name, score, owner))
    }
}

struct Side {
    id: Option<TeamId>,
    name: String,
    owner: Option<String>,
    logo: Option<String>,
    score: f64,
}

impl Side {
    fn from_team(team: Option<&BoxTeam>, league: &League, fallback: &str) -> Self {
        let Some(team) = team else {
            return Self::bye(0.0);
        };
        let info = league.team(team.team_id);
        Self {
            id: Some(team.team_id),
            name: info
                .map(|t| t.name.clone())
                .unwrap_or_else(|| team.team_id.to_string()),
            owner: info.and_then(|t| t.owner_name.clone()),
            logo: info.and_then(|t| t.logo_url.clone()),
            score: team.score,
        }
        .or_named(fallback)
    }

    fn bye(score: f64) -> Self {
        Self {
            id: None,
            name: BYE.to_string(),
            owner: None,
            logo: None,
            score,
        }
    }

    fn or_named(mut self, fallback: &str) -> Self {
        if self.name.is_empty() {
            self.name = fallback.to_string();
        }
        self
    }
}

/// One row per box score. When one side scored nothing and the other did,
/// the empty side is shown as a bye.
pub fn build_scoreboard(box_scores: &[BoxScore], league: &League) -> Vec<Matchup> {
    box_scores
        .iter()
        .map(|b| {
            let mut home = Side::from_team(Some(&b.home), league, "Home");
            let mut away = Side::from_team(b.away.as_ref(), league, "Away");

            if home.score == 0.0 && away.score > 0.0 {
                home = Side::bye(home.score);
            } else if away.score == 0.0 && home.score > 0.0 {
                away = Side::bye(away.score);
            }

            let diff = home.score - away.score;
            let winner = if diff > 0.0 {
                Some(home.name.clone())
            } else if diff < 0.0 {
                Some(away.name.clone())
            } else {
                None
            };

            Matchup {
                home_id: home.id,
                away_id: away.id,
                home_team: home.name,
                away_team: away.name,
                home_owner: home.owner,
                away_owner: away.owner,
                home_logo: home.logo,
                away_logo: away.logo,
                home_score: home.score,
                away_score: away.score,
                margin: round2(diff.abs()),
                winner,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::espn::Team;
    use crate::{LeagueId, Season, Week};

    pub(crate) fn team(id: u32, name: &str, owner: Option<&str>) -> Team {
        Team {
            team_id: TeamId::new(id),
            name: name.to_string(),
            abbrev: None,
            logo_url: Some(format!("https://cdn/{id}.png")),
            owner_name: owner.map(str::to_string),
        }
    }

    pub(crate) fn league(teams: Vec<Team>) -> League {
        League {
            league_id: LeagueId::new(1),
            season: Season::new(2024),
            name: "Test League".to_string(),
            first_week: Week::new(1),
            last_week: Week::new(17),
            current_week: Week::new(3),
            regular_season_weeks: 14,
            teams,
        }
    }

    pub(crate) fn game(home: (u32, f64), away: Option<(u32, f64)>) -> BoxScore {
        BoxScore {
            home: BoxTeam {
                team_id: TeamId::new(home.0),
                score: home.1,
                lineup: Vec::new(),
            },
            away: away.map(|(id, score)| BoxTeam {
                team_id: TeamId::new(id),
                score,
                lineup: Vec::new(),
            }),
        }
    }

    fn four_teams() -> League {
        league(vec![
            team(1, "Taco Corp", Some("Dana Reyes")),
            team(2, "Gridiron Gurus", None),
            team(3, "Bench Warmers", Some("Sam Ortiz")),
            team(4, "Hail Marys", Some("Lee Park")),
        ])
    }

    #[test]
    fn test_winner_margin_and_owner() {
        let rows = build_scoreboard(&[game((1, 120.5), Some((2, 117.08)))], &four_teams());
        let row = &rows[0];

        assert_eq!(row.home_team, "Taco Corp");
        assert_eq!(row.home_owner.as_deref(), Some("Dana Reyes"));
        assert_eq!(row.away_logo.as_deref(), Some("https://cdn/2.png"));
        assert_eq!(row.winner.as_deref(), Some("Taco Corp"));
        assert_eq!(row.margin, 3.42);
        assert_eq!(row.loser(), "Gridiron Gurus");
        assert_eq!(row.winner_score(), Some(120.5));
        assert_eq!(row.loser_owner(), None);
    }

    #[test]
    fn test_zero_side_becomes_bye() {
        let rows = build_scoreboard(&[game((3, 0.0), Some((4, 88.2)))], &four_teams());
        let row = &rows[0];

        assert_eq!(row.home_team, BYE);
        assert_eq!(row.home_id, None);
        assert_eq!(row.home_logo, None);
        assert_eq!(row.home_owner, None);
        assert_eq!(row.winner.as_deref(), Some("Hail Marys"));
        assert_eq!(row.sides().count(), 1);
    }

    #[test]
    fn test_missing_opponent_is_bye() {
        let rows = build_scoreboard(&[game((1, 95.0), None)], &four_teams());
        assert_eq!(rows[0].away_team, BYE);
        assert_eq!(rows[0].winner.as_deref(), Some("Taco Corp"));
    }

    #[test]
    fn test_tie_and_unscored_week() {
        let rows = build_scoreboard(
            &[game((1, 100.0), Some((2, 100.0))), game((3, 0.0), Some((4, 0.0)))],
            &four_teams(),
        );

        assert_eq!(rows[0].winner, None);
        assert_eq!(rows[0].margin, 0.0);
        assert_eq!(rows[0].loser(), "Gridiron Gurus");
        // both zero: no bye labelling
        assert_eq!(rows[1].home_team, "Bench Warmers");
        assert_eq!(rows[1].away_team, "Hail Marys");
        assert_eq!(rows[1].winner, None);
    }

    #[test]
    fn test_unknown_team_falls_back_to_id() {
        let rows = build_scoreboard(&[game((9, 50.0), Some((1, 40.0)))], &four_teams());
        assert_eq!(rows[0].home_team, "9");
        assert_eq!(rows[0].home_id, Some(TeamId::new(9)));
    }
}
