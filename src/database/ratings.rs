use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::RankingRow;
use crate::rating::types::{Dimension, DimensionRatings, RatingValue, TeamId, TeamRatings};

/// The two rating tables: raw Elo state and its rescaled, derived copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTable {
    Elo,
    Normalized,
}

impl RatingTable {
    pub fn as_str(&self) -> &str {
        match self {
            RatingTable::Elo => "elo_ratings",
            RatingTable::Normalized => "normalized_ratings",
        }
    }
}

fn column(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Goal => "goal_elo",
        Dimension::Winner => "winner_elo",
        Dimension::TotalShots => "total_shots_elo",
        Dimension::BallPossession => "ball_possession_elo",
    }
}

fn parse_team_ratings_row(row: &rusqlite::Row) -> rusqlite::Result<TeamRatings> {
    Ok(TeamRatings {
        team_id: row.get(0)?,
        ratings: DimensionRatings {
            goal: row.get(1)?,
            winner: row.get(2)?,
            total_shots: row.get(3)?,
            ball_possession: row.get(4)?,
        },
    })
}

pub fn find_for_team(conn: &Connection, table: RatingTable, team_id: TeamId) -> Result<Option<TeamRatings>> {
    let sql = format!(
        "SELECT team_id, goal_elo, winner_elo, total_shots_elo, ball_possession_elo FROM {} WHERE team_id = ?1",
        table.as_str()
    );

    conn.query_row(&sql, params![team_id], parse_team_ratings_row)
        .optional()
        .context("Failed to query team ratings")
}

/// Inserts an all-default row unless one already exists
pub fn insert_default(conn: &Connection, table: RatingTable, team_id: TeamId, default_rating: RatingValue) -> Result<()> {
    let sql = format!(
        "INSERT OR IGNORE INTO {} (team_id, goal_elo, winner_elo, total_shots_elo, ball_possession_elo) VALUES (?1, ?2, ?2, ?2, ?2)",
        table.as_str()
    );

    conn.execute(&sql, params![team_id, default_rating])
        .context("Failed to insert default ratings")
        .map(|_| ())
}

pub fn update_rating(
    conn: &Connection,
    table: RatingTable,
    team_id: TeamId,
    dimension: Dimension,
    value: RatingValue,
) -> Result<usize> {
    let sql = format!(
        "UPDATE {} SET {} = ?1 WHERE team_id = ?2",
        table.as_str(),
        column(dimension)
    );

    conn.execute(&sql, params![value, team_id])
        .context("Failed to update rating")
}

pub fn list_all(conn: &Connection, table: RatingTable) -> Result<Vec<TeamRatings>> {
    let sql = format!(
        "SELECT team_id, goal_elo, winner_elo, total_shots_elo, ball_possession_elo FROM {} ORDER BY team_id",
        table.as_str()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_team_ratings_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn clear(conn: &Connection, table: RatingTable) -> Result<()> {
    let sql = format!("DELETE FROM {}", table.as_str());

    conn.execute(&sql, [])
        .context("Failed to clear ratings")
        .map(|_| ())
}

pub fn set_composite(
    conn: &Connection,
    team_id: TeamId,
    composite: RatingValue,
    calculated_at: NaiveDateTime,
) -> Result<()> {
    let sql = "UPDATE normalized_ratings SET composite_elo = ?1, calculated_at = ?2 WHERE team_id = ?3";

    conn.execute(sql, params![composite, calculated_at, team_id])
        .context("Failed to store composite rating")
        .map(|_| ())
}

pub fn list_rankings(conn: &Connection, limit: usize) -> Result<Vec<RankingRow>> {
    let sql = "
        SELECT
            r.team_id,
            t.name,
            r.goal_elo,
            r.winner_elo,
            r.total_shots_elo,
            r.ball_possession_elo,
            r.composite_elo,
            r.calculated_at
        FROM normalized_ratings r
        LEFT JOIN teams t ON t.id = r.team_id
        ORDER BY r.composite_elo DESC, r.team_id
        LIMIT ?1
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(RankingRow {
                team_id: row.get(0)?,
                name: row.get(1)?,
                ratings: DimensionRatings {
                    goal: row.get(2)?,
                    winner: row.get(3)?,
                    total_shots: row.get(4)?,
                    ball_possession: row.get(5)?,
                },
                composite: row.get(6)?,
                calculated_at: row.get(7)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
