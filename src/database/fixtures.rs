use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::Fixture;
use crate::rating::types::FixtureId;

pub fn insert_fixture(conn: &Connection, fixture: &Fixture) -> Result<()> {
    let sql = "INSERT INTO fixtures (id, home_team_id, away_team_id, home_score, away_score, timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            fixture.id,
            fixture.home_team_id,
            fixture.away_team_id,
            fixture.home_score,
            fixture.away_score,
            fixture.timestamp
        ],
    )
    .with_context(|| format!("Failed to insert fixture {}", fixture.id))
    .map(|_| ())
}

pub fn exists(conn: &Connection, id: FixtureId) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM fixtures WHERE id = ?1)";

    conn.query_row(sql, params![id], |row| row.get(0))
        .context("Failed to check fixture existence")
}

fn parse_fixture_row(row: &rusqlite::Row) -> rusqlite::Result<Fixture> {
    Ok(Fixture {
        id: row.get(0)?,
        home_team_id: row.get(1)?,
        away_team_id: row.get(2)?,
        home_score: row.get(3)?,
        away_score: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

/// All fixtures in ascending id order, the order ratings are folded in
pub fn list_all(conn: &Connection) -> Result<Vec<Fixture>> {
    let sql = "SELECT id, home_team_id, away_team_id, home_score, away_score, timestamp FROM fixtures ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_fixture_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
