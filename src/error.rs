//! Error types for the fantasy roundup service

use thiserror::Error;


pub type Result<T> = std::result::Result<T, RoundupError>;

#[derive(Error, Debug)]
pub enum RoundupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("ESPN rejected the session credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("League {league_id} not found for season {season}")]
    LeagueNotFound { league_id: u32, season: u16 },

    #[error("ESPN rate limit reached, try again later")]
    RateLimited,

    #[error("ESPN API returned status {status}")]
    Upstream { status: u16 },

    #[error("Week {week} is outside the season (weeks {first}-{last})")]
    InvalidWeek { week: u16, first: u16, last: u16 },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl RoundupError {
    /// Map a non-success ESPN status code onto the matching variant.
    pub fn from_espn_status(status: u16, league_id: u32, season: u16) -> Self {
        match status {
            401 | 403 => RoundupError::Unauthorized { status },
            404 => RoundupError::LeagueNotFound { league_id, season },
            429 => RoundupError::RateLimited,
            _ => RoundupError::Upstream { status },
        }
    }
}

impl From<anyhow::Error> for RoundupError {
    fn from(err: anyhow::Error) -> Self {
        RoundupError::Database {
            message: err.to_string(),
        }
    }
}
