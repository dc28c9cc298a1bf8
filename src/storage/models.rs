//! Data models for the storage layer

use crate::llm::Narrative;
use crate::{LeagueId, Season, Week};
use serde::{Deserialize, Serialize};

/// A generated narrative and where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNarrative {
    pub league_id: LeagueId,
    pub season: Season,
    pub week: Week,
    pub provider: String,
    pub model: String,
    pub narrative: Narrative,
    /// Unix seconds
    pub created_at: u64,
}
