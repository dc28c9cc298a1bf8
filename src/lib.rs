//! ESPN Fantasy Football Weekly Roundup
//!
//! Reads an ESPN fantasy football league and turns each week into a roundup:
//! scoreboard, standings with movement, the week's rotating incentive, fun
//! awards, boom/bust players by position and an optional LLM-written
//! narrative. A draft board with simple grades is available per season.
//!
//! ## Layout
//!
//! - [`espn`]: v3 API client and domain model
//! - [`report`]: pure report builders and the caching [`report::ReportService`]
//! - [`llm`]: narrative generation over OpenAI-compatible chat APIs
//! - [`web`]: axum routes and minijinja pages
//! - [`storage`]: SQLite store for generated narratives
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ffl_roundup::{config::AppConfig, espn::EspnClient, report::ReportService, Season, Week};
//!
//! # async fn example() -> ffl_roundup::Result<()> {
//! let config = AppConfig::from_env();
//! let service = ReportService::new(Arc::new(EspnClient::new(&config.espn)?));
//! let report = service.weekly_report(Season::new(2024), Week::new(3)).await?;
//! println!("{} games", report.scoreboard.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export ESPN_LEAGUE_ID=123456
//! export ESPN_SWID='{...}' ESPN_S2='...'   # private leagues only
//! export LLM_PROVIDER=groq GROQ_API_KEY=...  # optional narration
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod espn;
pub mod jobs;
pub mod llm;
pub mod report;
pub mod storage;
pub mod web;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, Position, Season, TeamId, Week};
pub use error::{Result, RoundupError};
