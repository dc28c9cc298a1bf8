//! ESPN `x-fantasy-filter` header values.
//!
//! ESPN narrows some responses server-side when a JSON filter is sent in the
//! `x-fantasy-filter` header. Every filter value is wrapped in an object with
//! a `value` field, e.g. `{"filterActive": {"value": true}}`.

use crate::Result;
use reqwest::header::HeaderValue;
use serde::Serialize;

/// Header carrying the JSON filter.
pub const FANTASY_FILTER_HEADER: &str = "x-fantasy-filter";

/// Wrapper for ESPN-style filter values.
#[derive(Debug, Serialize)]
pub struct Val<T> {
    pub value: T,
}

/// Filter parameters for the `/players` endpoint.
#[derive(Debug, Default, Serialize)]
pub struct PlayersFilter {
    #[serde(rename = "filterActive", skip_serializing_if = "Option::is_none")]
    pub filter_active: Option<Val<bool>>,
}

/// Restricts `schedule` to the given matchup periods.
#[derive(Debug, Serialize)]
pub struct ScheduleFilter {
    pub schedule: MatchupPeriodFilter,
}

#[derive(Debug, Serialize)]
pub struct MatchupPeriodFilter {
    #[serde(rename = "filterMatchupPeriodIds")]
    pub filter_matchup_period_ids: Val<Vec<u16>>,
}

/// General-purpose helper: any Serialize → JSON → HeaderValue
pub trait IntoHeaderValue {
    fn to_header_value(&self) -> Result<HeaderValue>;
}

impl<T> IntoHeaderValue for T
where
    T: Serialize,
{
    fn to_header_value(&self) -> Result<HeaderValue> {
        let s = serde_json::to_string(self)?;
        Ok(HeaderValue::from_str(&s)?)
    }
}

/// Only active players; ESPN otherwise returns thousands of retired entries.
pub fn active_players_filter() -> PlayersFilter {
    PlayersFilter {
        filter_active: Some(Val { value: true }),
    }
}

/// Filter the league schedule down to one matchup period.
pub fn matchup_period_filter(period: u16) -> ScheduleFilter {
    ScheduleFilter {
        schedule: MatchupPeriodFilter {
            filter_matchup_period_ids: Val {
                value: vec![period],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_header_value() {
        let val = Val { value: "test" };
        let header_value = val.to_header_value().unwrap();
        assert_eq!(header_value.to_str().unwrap(), r#"{"value":"test"}"#);
    }

    #[test]
    fn test_players_filter_serialization() {
        let json = serde_json::to_string(&active_players_filter()).unwrap();
        assert_eq!(json, r#"{"filterActive":{"value":true}}"#);

        let empty = serde_json::to_string(&PlayersFilter::default()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn test_matchup_period_filter_serialization() {
        let header = matchup_period_filter(7).to_header_value().unwrap();
        assert_eq!(
            header.to_str().unwrap(),
            r#"{"schedule":{"filterMatchupPeriodIds":{"value":[7]}}}"#
        );
    }
}
