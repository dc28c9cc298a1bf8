//! League connectivity check

use super::build_report_service;
use crate::config::AppConfig;
use crate::{Result, Season};

/// Load the league and print its name, weeks and teams.
pub async fn handle_check_league(config: &AppConfig, season: Season) -> Result<()> {
    println!(
        "Checking league {} for {}{}...",
        config.espn.league_id,
        season,
        if config.espn.credentials.is_some() {
            " with ESPN session cookies"
        } else {
            " without credentials"
        }
    );

    let service = build_report_service(config)?;
    let league = service.league(season).await?;

    println!("✓ {}", league.name);
    println!(
        "Weeks {}-{} (current {}, regular season {})",
        league.first_week, league.last_week, league.current_week, league.regular_season_weeks
    );
    println!("{} teams:", league.teams.len());
    for team in &league.teams {
        match &team.owner_name {
            Some(owner) => println!("  {:>3}  {} ({})", team.team_id, team.name, owner),
            None => println!("  {:>3}  {}", team.team_id, team.name),
        }
    }

    Ok(())
}
