//! Weekly roundups built end to end from a parsed league document.

mod common;

use std::sync::Arc;

use common::FixtureSource;
use ffl_roundup::report::ReportService;
use ffl_roundup::{Position, RoundupError, Season, Week};

fn service() -> ReportService {
    ReportService::new(Arc::new(FixtureSource::new()))
}

#[tokio::test]
async fn test_league_snapshot_from_document() {
    let league = service().league(Season::new(2024)).await.unwrap();

    assert_eq!(league.name, "Sunday Scaries");
    assert_eq!(league.current_week, Week::new(2));
    assert_eq!(league.last_week, Week::new(17));
    assert_eq!(league.regular_season_weeks, 14);
    assert_eq!(league.teams[1].name, "Gridiron Gurus");
    assert_eq!(league.teams[1].owner_name.as_deref(), Some("gurus_gm"));
    assert_eq!(league.teams[0].owner_name.as_deref(), Some("Dana Reyes"));
}

#[tokio::test]
async fn test_week_two_roundup() {
    let report = service()
        .weekly_report(Season::new(2024), Week::new(2))
        .await
        .unwrap();

    assert_eq!(report.scoreboard.len(), 2);
    let first = &report.scoreboard[0];
    assert_eq!(first.home_team, "Gridiron Gurus");
    assert_eq!(first.winner.as_deref(), Some("Gridiron Gurus"));
    assert_eq!(first.margin, 2.26);

    let order: Vec<&str> = report.standings.iter().map(|s| s.team_name.as_str()).collect();
    assert_eq!(
        order,
        vec!["Bench Warmers", "Taco Corp", "Gridiron Gurus", "Hail <Marys>"]
    );
    assert_eq!(report.standings[0].record, "2-0");
    assert_eq!(report.standings[0].movement, Some(1));
    assert_eq!(report.standings[1].movement_is_up, Some(false));

    let incentive = report.weekly_incentive.as_ref().unwrap();
    assert_eq!(incentive.title, "Lowest Scoring Team");
    assert_eq!(incentive.winner_text, "Hail <Marys> (Lee Park) (90.0)");

    let giant_killer = report
        .awards
        .iter()
        .find(|a| a.title == "Giant Killer")
        .unwrap();
    assert_eq!(
        giant_killer.text,
        "Gridiron Gurus (gurus_gm) upset Taco Corp (Dana Reyes) (by ranking, +1)"
    );

    // bench players never make the top list
    assert_eq!(report.top_players[0].player_name, "Tyreek Hill");
    assert!(report.top_players.iter().all(|p| !p.is_bench));
    assert_eq!(report.top_players[1].points, 28.2);

    let dst = report
        .boom_bust
        .iter()
        .find(|row| row.position == Position::DEF)
        .unwrap();
    assert_eq!(dst.booms[0].player_name, "Bills D/ST");
    assert!(dst.booms[0].nfl_logo.as_deref().unwrap().ends_with("/BUF.svg"));

    let wr = report
        .boom_bust
        .iter()
        .find(|row| row.position == Position::WR)
        .unwrap();
    // Tyreek Hill started; Puka Nacua sat
    assert_eq!(wr.booms.len(), 1);

    assert_eq!(report.prompt_inputs.league_name, "Sunday Scaries");
    assert_eq!(report.prompt_inputs.close_games.len(), 1);
    assert_eq!(report.prompt_inputs.first_wins, vec!["Gridiron Gurus"]);
    assert_eq!(report.prompt_inputs.undefeated_teams, vec!["Bench Warmers"]);
}

#[tokio::test]
async fn test_unplayed_week_records_nothing() {
    let report = service()
        .weekly_report(Season::new(2024), Week::new(3))
        .await
        .unwrap();

    assert_eq!(report.scoreboard[0].winner, None);
    assert_eq!(report.scoreboard[0].home_team, "Taco Corp");
    let games: u32 = report
        .standings
        .iter()
        .map(|s| s.wins + s.losses + s.ties)
        .sum();
    assert_eq!(games, 8);
    assert!(report.standings.iter().all(|s| s.movement == Some(0)));
}

#[tokio::test]
async fn test_overview_json_skips_prompt_inputs() {
    let report = service()
        .weekly_report(Season::new(2024), Week::new(1))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["league_name"], "Sunday Scaries");
    assert_eq!(json["prev_disabled"], true);
    assert_eq!(json["weekly_incentive"]["key"], "highest_team_score");
    assert_eq!(
        json["weekly_incentive"]["winner_text"],
        "Taco Corp (Dana Reyes) (130.0)"
    );
    assert!(json.get("prompt_inputs").is_none());
}

#[tokio::test]
async fn test_week_beyond_season_is_invalid() {
    let err = service()
        .weekly_report(Season::new(2024), Week::new(19))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RoundupError::InvalidWeek {
            week: 19,
            first: 1,
            last: 17
        }
    ));
}

#[tokio::test]
async fn test_draft_report_from_document() {
    let draft = service().draft_report(Season::new(2024)).await.unwrap();

    assert_eq!(draft.total_picks, 4);
    assert_eq!(draft.rounds, 2);
    assert_eq!(draft.teams_count, 2);
    assert_eq!(draft.draft_picks[0].player_name, "Josh Allen");
    assert_eq!(draft.draft_picks[0].nfl_team.as_deref(), Some("BUF"));
    assert_eq!(draft.draft_picks[3].player_name, "Unknown Player");
    assert_eq!(draft.team_drafts[0].team_name, "Taco Corp");
    assert_eq!(draft.team_drafts[1].rounds_covered, vec![1, 2]);

    let analysis = draft.analysis.unwrap();
    assert_eq!(analysis.total_teams, 2);
    // two early picks but no mid-round picks
    assert_eq!(analysis.grade_distribution["D"], 2);
}
