//! Raw ESPN v3 payloads, deserialized as-is.
//!
//! ESPN omits fields freely depending on the requested views, so nearly
//! everything here is optional or defaulted. Conversion into the tidy
//! domain types lives in [`crate::espn::model`].

use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;


fn de_str_key_map_u16_f64<'de, D>(deserializer: D) -> Result<BTreeMap<u16, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, f64> = Deserialize::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| k.parse::<u16>().map(|kk| (kk, v)).map_err(D::Error::custom))
        .collect()
}

/// Top-level league document returned for any combination of league views.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeagueResponse {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "seasonId", default)]
    pub season_id: Option<u16>,
    #[serde(default)]
    pub settings: Option<RawSettings>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub teams: Vec<RawTeam>,
    #[serde(default)]
    pub members: Vec<RawMember>,
    #[serde(default)]
    pub schedule: Vec<RawMatchup>,
    #[serde(rename = "draftDetail", default)]
    pub draft_detail: Option<RawDraftDetail>,
}

/// `mSettings`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSettings {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "scheduleSettings", default)]
    pub schedule_settings: Option<RawScheduleSettings>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawScheduleSettings {
    #[serde(rename = "matchupPeriodCount", default)]
    pub matchup_period_count: Option<u16>,
}

/// `mStatus`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStatus {
    #[serde(rename = "firstScoringPeriod", default)]
    pub first_scoring_period: Option<u16>,
    #[serde(rename = "finalScoringPeriod", default)]
    pub final_scoring_period: Option<u16>,
    #[serde(rename = "currentMatchupPeriod", default)]
    pub current_matchup_period: Option<u16>,
    #[serde(rename = "latestScoringPeriod", default)]
    pub latest_scoring_period: Option<u16>,
}

/// `mTeam` / `mRoster`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTeam {
    pub id: u32,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(rename = "primaryOwner", default)]
    pub primary_owner: Option<String>,
    #[serde(default)]
    pub roster: Option<RawRoster>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMember {
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRoster {
    #[serde(default)]
    pub entries: Vec<RawRosterEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRosterEntry {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    #[serde(rename = "lineupSlotId", default)]
    pub lineup_slot_id: Option<u8>,
    #[serde(rename = "playerPoolEntry", default)]
    pub player_pool_entry: Option<RawPlayerPoolEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlayerPoolEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "appliedStatTotal", default)]
    pub applied_stat_total: Option<f64>,
    pub player: RawPlayer,
}

/// Player document; also the element type of the `players_wl` list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlayer {
    pub id: i64,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "defaultPositionId", default)]
    pub default_position_id: Option<i32>,
    #[serde(rename = "proTeamId", default)]
    pub pro_team_id: Option<u16>,
    #[serde(default)]
    pub stats: Vec<RawPlayerStat>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlayerStat {
    #[serde(rename = "seasonId", default)]
    pub season_id: Option<u16>,
    #[serde(rename = "scoringPeriodId", default)]
    pub scoring_period_id: u16,
    /// 0 = actual, 1 = projected
    #[serde(rename = "statSourceId", default)]
    pub stat_source_id: u8,
    #[serde(rename = "statSplitTypeId", default)]
    pub stat_split_type_id: u8,
    #[serde(rename = "appliedTotal", default)]
    pub applied_total: Option<f64>,
}

impl RawPlayerStat {
    pub fn is_actual(&self) -> bool {
        self.stat_source_id == 0
    }
}

/// One entry of `schedule` (`mMatchupScore` / `mScoreboard`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMatchup {
    #[serde(rename = "matchupPeriodId", default)]
    pub matchup_period_id: u16,
    #[serde(default)]
    pub home: Option<RawMatchupTeam>,
    #[serde(default)]
    pub away: Option<RawMatchupTeam>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMatchupTeam {
    #[serde(rename = "teamId")]
    pub team_id: u32,
    #[serde(rename = "totalPoints", default)]
    pub total_points: Option<f64>,
    #[serde(rename = "totalPointsLive", default)]
    pub total_points_live: Option<f64>,
    #[serde(
        rename = "pointsByScoringPeriod",
        deserialize_with = "de_str_key_map_u16_f64",
        default
    )]
    pub points_by_scoring_period: BTreeMap<u16, f64>,
    #[serde(rename = "rosterForCurrentScoringPeriod", default)]
    pub roster_for_current_scoring_period: Option<RawRoster>,
}

/// `mDraftDetail`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDraftDetail {
    #[serde(default)]
    pub drafted: bool,
    #[serde(default)]
    pub picks: Vec<RawPick>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPick {
    #[serde(rename = "overallPickNumber", default)]
    pub overall_pick_number: u16,
    #[serde(rename = "roundId", default)]
    pub round_id: u16,
    #[serde(rename = "roundPickNumber", default)]
    pub round_pick_number: u16,
    #[serde(rename = "playerId")]
    pub player_id: i64,
    #[serde(rename = "teamId")]
    pub team_id: u32,
    #[serde(default)]
    pub keeper: bool,
}
