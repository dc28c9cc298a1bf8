//! Stored narrative maintenance

use tracing::info;

use crate::config::AppConfig;
use crate::storage::RoundupDatabase;
use crate::{LeagueId, Result, Season, Week};

/// Delete one week's narrative, or every stored narrative when `week` is `None`.
///
/// Returns how many narratives were removed.
pub fn clear_narratives(
    db: &RoundupDatabase,
    league_id: LeagueId,
    season: Season,
    week: Option<Week>,
) -> Result<usize> {
    let removed = match week {
        Some(week) => usize::from(db.delete_narrative(league_id, season, week)?),
        None => db.clear()?,
    };
    Ok(removed)
}

pub fn handle_clear_narratives(config: &AppConfig, season: Season, week: Option<Week>) -> Result<()> {
    let db = RoundupDatabase::new(&config.storage.db_path)?;
    let removed = clear_narratives(&db, config.espn.league_id, season, week)?;
    let remaining = db.narrative_count()?;
    info!(removed, remaining, "narratives cleared");

    match week {
        Some(week) => println!("Removed {removed} narrative(s) for {season} week {week}"),
        None => println!("Removed {removed} narrative(s)"),
    }
    println!("{remaining} narrative(s) still stored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Narrative;

    fn seeded() -> RoundupDatabase {
        let db = RoundupDatabase::in_memory().unwrap();
        let narrative = Narrative {
            overview: "Chaos reigns".to_string(),
            ..Narrative::default()
        };
        for week in [1, 2] {
            db.save_narrative(
                LeagueId::new(7),
                Season::new(2024),
                Week::new(week),
                "groq",
                "llama3",
                &narrative,
            )
            .unwrap();
        }
        db
    }

    #[test]
    fn test_clear_single_week() {
        let db = seeded();
        let removed =
            clear_narratives(&db, LeagueId::new(7), Season::new(2024), Some(Week::new(2))).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(db.narrative_count().unwrap(), 1);

        // already gone
        let removed =
            clear_narratives(&db, LeagueId::new(7), Season::new(2024), Some(Week::new(2))).unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_clear_everything() {
        let db = seeded();
        let removed = clear_narratives(&db, LeagueId::new(7), Season::new(2024), None).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(db.narrative_count().unwrap(), 0);
    }
}
