//! Time-related types for ESPN Fantasy Football seasons and weeks.

use crate::error::{Result, RoundupError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month in which a new season's league data appears.
pub const SEASON_START_MONTH: u32 = 8;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season in progress today.
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// The season a date falls in. ESPN ids a season by the year it starts,
    /// and its playoffs run into January, so dates before
    /// [`SEASON_START_MONTH`] belong to the previous year's season.
    pub fn containing(date: NaiveDate) -> Self {
        let year = if date.month() < SEASON_START_MONTH {
            date.year() - 1
        } else {
            date.year()
        };
        Self(u16::try_from(year).unwrap_or(u16::MAX))
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = RoundupError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for Week numbers (ESPN scoring periods)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The week before this one, never going below `first`.
    pub fn previous_within(&self, first: Week) -> Week {
        Week(self.0.saturating_sub(1).max(first.0))
    }

    /// The week after this one, never going past `last`.
    pub fn next_within(&self, last: Week) -> Week {
        Week(self.0.saturating_add(1).min(last.0))
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = RoundupError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_navigation_is_clamped() {
        let first = Week::new(1);
        let last = Week::new(17);

        assert_eq!(Week::new(1).previous_within(first), Week::new(1));
        assert_eq!(Week::new(5).previous_within(first), Week::new(4));
        assert_eq!(Week::new(17).next_within(last), Week::new(17));
        assert_eq!(Week::new(5).next_within(last), Week::new(6));
    }

    #[test]
    fn test_current_season_is_plausible() {
        assert!(Season::current().as_u16() >= 2024);
    }

    #[test]
    fn test_january_playoffs_belong_to_previous_season() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(Season::containing(date(2026, 1, 10)), Season::new(2025));
        assert_eq!(Season::containing(date(2026, 7, 31)), Season::new(2025));
        assert_eq!(Season::containing(date(2026, 8, 1)), Season::new(2026));
        assert_eq!(Season::containing(date(2025, 12, 28)), Season::new(2025));
    }

    #[test]
    fn test_parse_season_and_week() {
        assert_eq!("2024".parse::<Season>().unwrap(), Season::new(2024));
        assert_eq!("3".parse::<Week>().unwrap(), Week::new(3));
        assert!("week3".parse::<Week>().is_err());
    }
}
