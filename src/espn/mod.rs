//! ESPN Fantasy Football v3 read client.
//!
//! [`LeagueSource`] is the seam the report service depends on; [`EspnClient`]
//! implements it over HTTP and tests substitute canned data.

pub mod http;
pub mod model;
pub mod types;

use async_trait::async_trait;

use crate::{LeagueId, Result, Season, Week};

pub use http::EspnClient;
pub use model::{BoxPlayer, BoxScore, BoxTeam, DraftBoard, DraftPick, League, Logo, PlayerInfo, Team};

/// Read access to one fantasy league.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    fn league_id(&self) -> LeagueId;

    /// Settings, status and teams for a season.
    async fn league(&self, season: Season) -> Result<League>;

    /// Matchups of a single week, with lineups.
    async fn box_scores(&self, season: Season, week: Week) -> Result<Vec<BoxScore>>;

    async fn draft(&self, season: Season) -> Result<DraftBoard>;

    /// Fetch an image (team logo) with the league's session.
    async fn logo(&self, url: &str) -> Result<Logo>;
}
