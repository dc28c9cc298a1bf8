//! Narrative query operations

use super::{models::StoredNarrative, schema::RoundupDatabase};
use crate::llm::Narrative;
use crate::{LeagueId, Season, Week};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn now_secs() -> Result<i64> {
    Ok(i64::try_from(
        SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    )?)
}

fn narrative_from_row(row: &Row) -> rusqlite::Result<StoredNarrative> {
    Ok(StoredNarrative {
        league_id: LeagueId::new(row.get(0)?),
        season: Season::new(row.get(1)?),
        week: Week::new(row.get(2)?),
        provider: row.get(3)?,
        model: row.get(4)?,
        narrative: Narrative {
            overview: row.get(5)?,
            storylines: row.get(6)?,
            matchup_highlights: row.get(7)?,
            standings_blurb: row.get(8)?,
            incentives_blurb: row.get(9)?,
        },
        created_at: row.get::<_, i64>(10)?.max(0) as u64,
    })
}

impl RoundupDatabase {
    /// Insert or replace the narrative for a league week.
    ///
    /// Fallback narratives are skipped; returns whether a row was written.
    pub fn save_narrative(
        &self,
        league_id: LeagueId,
        season: Season,
        week: Week,
        provider: &str,
        model: &str,
        narrative: &Narrative,
    ) -> Result<bool> {
        if narrative.is_fallback() {
            return Ok(false);
        }

        let rows = self.conn.execute(
            "INSERT OR REPLACE INTO narratives
             (league_id, season, week, provider, model, overview, storylines,
              matchup_highlights, standings_blurb, incentives_blurb, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                league_id.as_u32(),
                season.as_u16(),
                week.as_u16(),
                provider,
                model,
                narrative.overview,
                narrative.storylines,
                narrative.matchup_highlights,
                narrative.standings_blurb,
                narrative.incentives_blurb,
                now_secs()?
            ],
        )?;
        Ok(rows > 0)
    }

    /// The stored narrative, if one exists and is younger than `max_age`.
    pub fn load_narrative(
        &self,
        league_id: LeagueId,
        season: Season,
        week: Week,
        max_age: Duration,
    ) -> Result<Option<StoredNarrative>> {
        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        let oldest = now_secs()?.saturating_sub(max_age);
        let stored = self
            .conn
            .query_row(
                "SELECT league_id, season, week, provider, model, overview, storylines,
                        matchup_highlights, standings_blurb, incentives_blurb, created_at
                 FROM narratives
                 WHERE league_id = ? AND season = ? AND week = ? AND created_at >= ?",
                params![league_id.as_u32(), season.as_u16(), week.as_u16(), oldest],
                narrative_from_row,
            )
            .optional()?;
        Ok(stored)
    }

    pub fn delete_narrative(&self, league_id: LeagueId, season: Season, week: Week) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM narratives WHERE league_id = ? AND season = ? AND week = ?",
            params![league_id.as_u32(), season.as_u16(), week.as_u16()],
        )?;
        Ok(rows > 0)
    }

    /// Remove every stored narrative; returns how many were deleted.
    pub fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM narratives", [])?)
    }

    pub fn narrative_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM narratives", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }
}
