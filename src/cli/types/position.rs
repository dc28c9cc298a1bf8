//! Fantasy football position types and utilities.

use crate::error::RoundupError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions and lineup slots.
///
/// # Position Types
///
/// - **Individual positions**: QB, RB, WR, TE, K, D/ST
/// - **Flexible positions**: FLEX (RB/WR/TE)
/// - **Roster slots**: BE (bench), IR (injured reserve)
///
/// # Examples
///
/// ```rust
/// use ffl_roundup::Position;
///
/// let dst: Position = "DST".parse().unwrap();
/// assert_eq!(dst, Position::DEF);
/// assert_eq!(dst.to_string(), "D/ST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DEF,
    K,
    FLEX,
    BE,
    IR,
}

impl Position {
    /// Positions shown in per-position leader boards, in display order.
    pub const SCORING: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    /// Convert a player's ESPN `defaultPositionId` to a Position.
    pub fn from_default_position_id(id: i32) -> Result<Self, RoundupError> {
        match id {
            0 | 1 => Ok(Position::QB), // ESPN uses both 0 and 1 for QB
            2 => Ok(Position::RB),
            3 => Ok(Position::WR),
            4 | 6 => Ok(Position::TE),
            5 | 17 => Ok(Position::K),
            16 => Ok(Position::DEF),
            _ => Err(RoundupError::InvalidPosition {
                position: id.to_string(),
            }),
        }
    }

    /// Convert an ESPN `lineupSlotId` to the slot it represents.
    ///
    /// IDP and superflex slots have no counterpart here and map to `None`.
    pub fn from_slot_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Position::QB),
            2 => Some(Position::RB),
            4 => Some(Position::WR),
            6 => Some(Position::TE),
            16 => Some(Position::DEF),
            17 => Some(Position::K),
            20 => Some(Position::BE),
            21 => Some(Position::IR),
            23 => Some(Position::FLEX),
            _ => None,
        }
    }

    /// Bench and injured-reserve slots don't count toward a team's score.
    pub fn is_reserve(&self) -> bool {
        matches!(self, Position::BE | Position::IR)
    }

    /// Positions eligible for the FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(self, Position::RB | Position::WR | Position::TE)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DEF => "D/ST",
            Position::K => "K",
            Position::FLEX => "FLEX",
            Position::BE => "BE",
            Position::IR => "IR",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = RoundupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "DEF" | "D/ST" | "DST" | "D-ST" | "D ST" => Ok(Position::DEF),
            "K" => Ok(Position::K),
            "FLEX" => Ok(Position::FLEX),
            "BE" | "BENCH" => Ok(Position::BE),
            "IR" | "IR-R" => Ok(Position::IR),
            other => Err(RoundupError::InvalidPosition {
                position: other.to_string(),
            }),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
