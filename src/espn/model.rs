//! Domain view of a league, built from the raw ESPN payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{LeagueResponse, RawMember, RawPlayer, RawRosterEntry, RawTeam};
use crate::report::round2;
use crate::{LeagueId, PlayerId, Position, Season, TeamId, Week};

const DEFAULT_FIRST_WEEK: u16 = 1;
const DEFAULT_LAST_WEEK: u16 = 18;
const DEFAULT_REGULAR_SEASON_WEEKS: u16 = 14;

/// NFL team abbreviation for an ESPN `proTeamId`.
pub fn pro_team_abbrev(id: u16) -> Option<&'static str> {
    let abbrev = match id {
        1 => "ATL",
        2 => "BUF",
        3 => "CHI",
        4 => "CIN",
        5 => "CLE",
        6 => "DAL",
        7 => "DEN",
        8 => "DET",
        9 => "GB",
        10 => "TEN",
        11 => "IND",
        12 => "KC",
        13 => "OAK",
        14 => "LAR",
        15 => "MIA",
        16 => "MIN",
        17 => "NE",
        18 => "NO",
        19 => "NYG",
        20 => "NYJ",
        21 => "PHI",
        22 => "ARI",
        23 => "PIT",
        24 => "LAC",
        25 => "SF",
        26 => "SEA",
        27 => "TB",
        28 => "WSH",
        29 => "CAR",
        30 => "JAX",
        33 => "BAL",
        34 => "HOU",
        _ => return None,
    };
    Some(abbrev)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub abbrev: Option<String>,
    pub logo_url: Option<String>,
    pub owner_name: Option<String>,
}

impl Team {
    fn from_raw(raw: &RawTeam, members: &[RawMember]) -> Self {
        let name = non_empty(raw.name.as_deref())
            .or_else(|| {
                let joined = format!(
                    "{} {}",
                    raw.location.as_deref().unwrap_or_default(),
                    raw.nickname.as_deref().unwrap_or_default()
                );
                non_empty(Some(&joined))
            })
            .unwrap_or_else(|| raw.id.to_string());

        Self {
            team_id: TeamId::new(raw.id),
            name,
            abbrev: non_empty(raw.abbrev.as_deref()),
            logo_url: non_empty(raw.logo.as_deref()),
            owner_name: owner_name(raw, members),
        }
    }
}

/// `firstName lastName` of the team's primary owner, else their display name.
fn owner_name(team: &RawTeam, members: &[RawMember]) -> Option<String> {
    let owner_id = team.primary_owner.as_ref().or_else(|| team.owners.first())?;
    let member = members.iter().find(|m| &m.id == owner_id)?;
    let full = format!(
        "{} {}",
        member.first_name.as_deref().unwrap_or_default(),
        member.last_name.as_deref().unwrap_or_default()
    );
    non_empty(Some(&full)).or_else(|| non_empty(member.display_name.as_deref()))
}

/// League snapshot: identity, schedule bounds and teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: LeagueId,
    pub season: Season,
    pub name: String,
    pub first_week: Week,
    pub last_week: Week,
    pub current_week: Week,
    pub regular_season_weeks: u16,
    pub teams: Vec<Team>,
}

impl League {
    pub fn from_response(raw: &LeagueResponse, league_id: LeagueId, season: Season) -> Self {
        let status = raw.status.as_ref();
        let settings = raw.settings.as_ref();

        let first = status
            .and_then(|s| s.first_scoring_period)
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_FIRST_WEEK);
        let last = status
            .and_then(|s| s.final_scoring_period)
            .filter(|w| *w >= first)
            .unwrap_or(DEFAULT_LAST_WEEK.max(first));
        let current = status
            .and_then(|s| s.current_matchup_period.or(s.latest_scoring_period))
            .unwrap_or(first)
            .clamp(first, last);

        let name = non_empty(settings.and_then(|s| s.name.as_deref()))
            .unwrap_or_else(|| league_id.to_string());

        let regular_season_weeks = settings
            .and_then(|s| s.schedule_settings.as_ref())
            .and_then(|s| s.matchup_period_count)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_REGULAR_SEASON_WEEKS);

        Self {
            league_id,
            season,
            name,
            first_week: Week::new(first),
            last_week: Week::new(last),
            current_week: Week::new(current),
            regular_season_weeks,
            teams: raw
                .teams
                .iter()
                .map(|t| Team::from_raw(t, &raw.members))
                .collect(),
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_id == id)
    }

    pub fn contains_week(&self, week: Week) -> bool {
        week >= Week::new(1) && week <= self.last_week
    }
}

/// A rostered player's line for one scoring period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<Position>,
    pub nfl_team: Option<String>,
    pub slot: Option<Position>,
    pub points: f64,
}

impl BoxPlayer {
    fn from_entry(entry: &RawRosterEntry, week: Week) -> Self {
        let pool = entry.player_pool_entry.as_ref();
        let player = pool.map(|p| &p.player);

        let actual = player.and_then(|p| {
            p.stats
                .iter()
                .find(|s| s.is_actual() && s.scoring_period_id == week.as_u16())
                .and_then(|s| s.applied_total)
        });

        Self {
            player_id: PlayerId::new(entry.player_id),
            name: non_empty(player.and_then(|p| p.full_name.as_deref()))
                .unwrap_or_else(|| "Player".to_string()),
            position: player
                .and_then(|p| p.default_position_id)
                .and_then(|id| Position::from_default_position_id(id).ok()),
            nfl_team: player
                .and_then(|p| p.pro_team_id)
                .and_then(pro_team_abbrev)
                .map(str::to_string),
            slot: entry.lineup_slot_id.and_then(Position::from_slot_id),
            points: actual
                .or_else(|| pool.and_then(|p| p.applied_stat_total))
                .unwrap_or(0.0),
        }
    }

    /// Bench and IR players don't count toward the team score.
    pub fn is_bench(&self) -> bool {
        self.slot.is_some_and(|slot| slot.is_reserve())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTeam {
    pub team_id: TeamId,
    pub score: f64,
    pub lineup: Vec<BoxPlayer>,
}

/// One matchup; `away` is absent for a bye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScore {
    pub home: BoxTeam,
    pub away: Option<BoxTeam>,
}

impl BoxScore {
    pub fn home_score(&self) -> f64 {
        self.home.score
    }

    pub fn away_score(&self) -> f64 {
        self.away.as_ref().map_or(0.0, |t| t.score)
    }
}

/// Extract the matchups of `week` from a scoreboard response.
pub fn box_scores_from_response(raw: &LeagueResponse, week: Week) -> Vec<BoxScore> {
    let period = week.as_u16();
    let to_team = |side: &super::types::RawMatchupTeam| {
        let score = side
            .points_by_scoring_period
            .get(&period)
            .copied()
            .or(side.total_points_live)
            .or(side.total_points)
            .unwrap_or(0.0);
        BoxTeam {
            team_id: TeamId::new(side.team_id),
            score: round2(score),
            lineup: side
                .roster_for_current_scoring_period
                .as_ref()
                .map(|r| r.entries.iter().map(|e| BoxPlayer::from_entry(e, week)).collect())
                .unwrap_or_default(),
        }
    };

    raw.schedule
        .iter()
        .filter(|m| m.matchup_period_id == period)
        .filter_map(|m| {
            Some(BoxScore {
                home: to_team(m.home.as_ref()?),
                away: m.away.as_ref().map(to_team),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub overall: u16,
    pub round: u16,
    pub round_pick: u16,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub keeper: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub position: Option<Position>,
    pub nfl_team: Option<String>,
}

impl PlayerInfo {
    fn from_raw(player: &RawPlayer) -> Option<Self> {
        Some(Self {
            name: non_empty(player.full_name.as_deref())?,
            position: player
                .default_position_id
                .and_then(|id| Position::from_default_position_id(id).ok()),
            nfl_team: player
                .pro_team_id
                .and_then(pro_team_abbrev)
                .map(str::to_string),
        })
    }
}

/// Draft picks in selection order plus whatever is known about the players.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftBoard {
    pub picks: Vec<DraftPick>,
    pub players: HashMap<PlayerId, PlayerInfo>,
}

impl DraftBoard {
    /// Combine `mDraftDetail` picks with roster players and the `players_wl` list.
    pub fn from_responses(league: &LeagueResponse, players: &[RawPlayer]) -> Self {
        let picks = league
            .draft_detail
            .as_ref()
            .map(|d| {
                d.picks
                    .iter()
                    .map(|p| DraftPick {
                        overall: p.overall_pick_number,
                        round: p.round_id,
                        round_pick: p.round_pick_number,
                        player_id: PlayerId::new(p.player_id),
                        team_id: TeamId::new(p.team_id),
                        keeper: p.keeper,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut known = HashMap::new();
        let rostered = league
            .teams
            .iter()
            .filter_map(|t| t.roster.as_ref())
            .flat_map(|r| r.entries.iter())
            .filter_map(|e| e.player_pool_entry.as_ref())
            .map(|p| &p.player);
        for player in players.iter().chain(rostered) {
            if let Some(info) = PlayerInfo::from_raw(player) {
                known.entry(PlayerId::new(player.id)).or_insert(info);
            }
        }

        Self {
            picks,
            players: known,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerInfo> {
        self.players.get(&id)
    }
}

/// Image bytes fetched from ESPN's CDN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
