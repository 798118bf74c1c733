use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Team;
use crate::rating::types::TeamId;

pub fn upsert_team(conn: &Connection, id: TeamId, name: &str) -> Result<()> {
    let sql = "INSERT INTO teams (id, name) VALUES (?1, ?2) ON CONFLICT(id) DO UPDATE SET name = excluded.name";

    conn.execute(sql, params![id, name])
        .context("Failed to upsert team")
        .map(|_| ())
}

fn parse_team_row(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn find_by_id(conn: &Connection, id: TeamId) -> Result<Option<Team>> {
    let sql = "SELECT id, name FROM teams WHERE id = ?1";

    conn.query_row(sql, params![id], parse_team_row)
        .optional()
        .context("Failed to query team by id")
}

/// Case-insensitive name lookup
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Team>> {
    let sql = "SELECT id, name FROM teams WHERE LOWER(name) = LOWER(?1) ORDER BY id LIMIT 1";

    conn.query_row(sql, params![name.trim()], parse_team_row)
        .optional()
        .context("Failed to query team by name")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Team>> {
    let sql = "SELECT id, name FROM teams ORDER BY name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_team_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
