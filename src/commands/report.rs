//! Weekly report command

use serde_json::json;

use super::{build_narrator, build_report_service};
use crate::config::AppConfig;
use crate::llm::generate_weekly_narrative;
use crate::{Result, Season, Week};

pub async fn handle_report(config: &AppConfig, season: Season, week: Week, as_json: bool) -> Result<()> {
    let service = build_report_service(config)?;
    let report = service.weekly_report(season, week).await?;
    let narrator = build_narrator(config);
    let narrative = generate_weekly_narrative(narrator.as_deref(), &report.prompt_inputs).await;

    if as_json {
        let out = json!({ "report": report, "narrative": narrative });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} – {} week {}", report.league_name, season, week);
    println!();
    println!("{}", narrative.overview);
    for section in [
        &narrative.storylines,
        &narrative.matchup_highlights,
        &narrative.standings_blurb,
        &narrative.incentives_blurb,
    ] {
        if !section.is_empty() {
            println!();
            println!("{section}");
        }
    }

    println!();
    println!("Scoreboard");
    for m in &report.scoreboard {
        println!(
            "  {:<28} {:>7.2}  {:>7.2}  {}",
            m.home_team, m.home_score, m.away_score, m.away_team
        );
    }

    if let Some(incentive) = &report.weekly_incentive {
        println!();
        println!("{}: {}", incentive.title, incentive.winner_text);
    }

    if !report.awards.is_empty() {
        println!();
        for award in &report.awards {
            println!("{}: {}", award.title, award.text);
        }
    }

    println!();
    println!("Standings");
    for s in &report.standings {
        println!("  {:>2}. {:<28} {:>7}  {:>7.1}", s.rank, s.team_name, s.record, s.points_for);
    }

    Ok(())
}
