//! Unit tests for storage functionality

use super::*;
use crate::llm::{Narrative, FALLBACK_FAILED, FALLBACK_UNCONFIGURED};
use crate::{LeagueId, Season, Week};
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn create_test_db() -> RoundupDatabase {
    RoundupDatabase::in_memory().unwrap()
}

fn narrative(overview: &str) -> Narrative {
    Narrative {
        overview: overview.to_string(),
        storylines: "Upsets everywhere".to_string(),
        matchup_highlights: "Taco Corp by a hair".to_string(),
        standings_blurb: "Three teams at 3-1".to_string(),
        incentives_blurb: "Bench points galore".to_string(),
    }
}

fn key() -> (LeagueId, Season, Week) {
    (LeagueId::new(12345), Season::new(2024), Week::new(3))
}

#[test]
fn test_save_and_load_round_trip() {
    let db = create_test_db();
    let (league, season, week) = key();

    assert!(db
        .save_narrative(league, season, week, "groq", "llama3", &narrative("Wild week"))
        .unwrap());

    let stored = db.load_narrative(league, season, week, DAY).unwrap().unwrap();
    assert_eq!(stored.provider, "groq");
    assert_eq!(stored.model, "llama3");
    assert_eq!(stored.week, week);
    assert_eq!(stored.narrative, narrative("Wild week"));
    assert!(stored.created_at > 0);
}

#[test]
fn test_save_replaces_existing_week() {
    let db = create_test_db();
    let (league, season, week) = key();

    db.save_narrative(league, season, week, "groq", "a", &narrative("First"))
        .unwrap();
    db.save_narrative(league, season, week, "openai", "b", &narrative("Second"))
        .unwrap();

    let stored = db.load_narrative(league, season, week, DAY).unwrap().unwrap();
    assert_eq!(stored.narrative.overview, "Second");
    assert_eq!(stored.provider, "openai");
    assert_eq!(db.narrative_count().unwrap(), 1);
}

#[test]
fn test_fallback_narratives_are_not_stored() {
    let db = create_test_db();
    let (league, season, week) = key();

    for text in [FALLBACK_UNCONFIGURED, FALLBACK_FAILED] {
        let saved = db
            .save_narrative(league, season, week, "none", "none", &Narrative::fallback(text))
            .unwrap();
        assert!(!saved);
    }
    assert!(db.load_narrative(league, season, week, DAY).unwrap().is_none());
}

#[test]
fn test_load_respects_max_age() {
    let db = create_test_db();
    let (league, season, week) = key();

    db.conn
        .execute(
            "INSERT INTO narratives VALUES (?, ?, ?, 'groq', 'm', 'old', '', '', '', '', 1000)",
            rusqlite::params![league.as_u32(), season.as_u16(), week.as_u16()],
        )
        .unwrap();

    assert!(db.load_narrative(league, season, week, DAY).unwrap().is_none());
    assert!(db
        .load_narrative(league, season, week, Duration::from_secs(u64::MAX))
        .unwrap()
        .is_some());
}

#[test]
fn test_weeks_and_leagues_are_separate() {
    let db = create_test_db();
    let (league, season, week) = key();

    db.save_narrative(league, season, week, "groq", "m", &narrative("Week 3"))
        .unwrap();

    assert!(db
        .load_narrative(league, season, Week::new(4), DAY)
        .unwrap()
        .is_none());
    assert!(db
        .load_narrative(LeagueId::new(1), season, week, DAY)
        .unwrap()
        .is_none());
}

#[test]
fn test_delete_and_clear() {
    let db = create_test_db();
    let (league, season, week) = key();

    db.save_narrative(league, season, week, "groq", "m", &narrative("Week 3"))
        .unwrap();
    db.save_narrative(league, season, Week::new(4), "groq", "m", &narrative("Week 4"))
        .unwrap();

    assert!(db.delete_narrative(league, season, week).unwrap());
    assert!(!db.delete_narrative(league, season, week).unwrap());
    assert_eq!(db.narrative_count().unwrap(), 1);

    assert_eq!(db.clear().unwrap(), 1);
    assert_eq!(db.narrative_count().unwrap(), 0);
}

#[test]
fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("roundup.db");
    let (league, season, week) = key();

    {
        let db = RoundupDatabase::new(&path).unwrap();
        db.save_narrative(league, season, week, "groq", "m", &narrative("Saved"))
            .unwrap();
    }

    let db = RoundupDatabase::new(&path).unwrap();
    let stored = db.load_narrative(league, season, week, DAY).unwrap().unwrap();
    assert_eq!(stored.narrative.overview, "Saved");
}
