use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::Statistic;
use crate::rating::types::{FixtureId, Metric, TeamId};

pub fn insert_statistic(
    conn: &Connection,
    fixture_id: FixtureId,
    team_id: TeamId,
    metric: Metric,
    value: f64,
) -> Result<()> {
    let sql = "INSERT OR REPLACE INTO statistics (fixture_id, team_id, metric, value) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(sql, params![fixture_id, team_id, metric.as_str(), value])
        .context("Failed to insert statistic")
        .map(|_| ())
}

fn parse_statistic_row(row: &rusqlite::Row) -> rusqlite::Result<Statistic> {
    Ok(Statistic {
        fixture_id: row.get(0)?,
        team_id: row.get(1)?,
        metric: row.get(2)?,
        value: row.get(3)?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<Statistic>> {
    let sql = "SELECT fixture_id, team_id, metric, value FROM statistics ORDER BY fixture_id, team_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_statistic_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
