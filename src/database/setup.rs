use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

const DROP_SQL: &str = "
    DROP TABLE IF EXISTS normalized_ratings;
    DROP TABLE IF EXISTS elo_ratings;
    DROP TABLE IF EXISTS statistics;
    DROP TABLE IF EXISTS fixtures;
    DROP TABLE IF EXISTS teams;
";

/// Creates any missing tables; existing data is kept
pub fn initialize_database(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    Ok(())
}

pub fn reset_database(conn: &Connection) -> Result<()> {
    for statement in split_sql_statements(DROP_SQL) {
        execute_sql(conn, &statement)?;
    }
    initialize_database(conn)?;

    info!("Database schema reset successfully");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
