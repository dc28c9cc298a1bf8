//! Core utilities shared by the ESPN client and the report service
//!
//! - `cache`: two-tier TTL cache
//! - `filters`: ESPN API filter headers
//! - `http`: default ESPN request headers

pub mod cache;
pub mod filters;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{CacheKey, UnifiedCache};
pub use filters::{active_players_filter, matchup_period_filter, IntoHeaderValue};
pub use http::espn_header_map;
