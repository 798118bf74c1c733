use anyhow::{Context, Result};

use super::connection::{get_connection, DbPool};
use super::ratings::{self, RatingTable};
use crate::errors::store_context;
use crate::rating::store::RatingStore;
use crate::rating::types::{Dimension, RatingValue, TeamId, TeamRatings};

/// `RatingStore` over one of the SQLite rating tables.
///
/// A connection is taken from the pool per operation.
pub struct SqliteRatingStore {
    pool: DbPool,
    table: RatingTable,
    default_rating: RatingValue,
}

impl SqliteRatingStore {
    pub fn new(pool: DbPool, table: RatingTable, default_rating: RatingValue) -> Self {
        Self {
            pool,
            table,
            default_rating,
        }
    }
}

impl RatingStore for SqliteRatingStore {
    fn get_rating(&mut self, team_id: TeamId, dimension: Dimension) -> Result<RatingValue> {
        let conn = get_connection(&self.pool)?;

        if let Some(row) = ratings::find_for_team(&conn, self.table, team_id)
            .with_context(|| store_context("read", self.table.as_str()))?
        {
            return Ok(row.ratings.get(dimension));
        }

        ratings::insert_default(&conn, self.table, team_id, self.default_rating)
            .with_context(|| store_context("materialize", self.table.as_str()))?;
        Ok(self.default_rating)
    }

    fn set_rating(&mut self, team_id: TeamId, dimension: Dimension, value: RatingValue) -> Result<()> {
        let conn = get_connection(&self.pool)?;

        ratings::insert_default(&conn, self.table, team_id, self.default_rating)
            .and_then(|_| ratings::update_rating(&conn, self.table, team_id, dimension, value))
            .with_context(|| store_context("write", self.table.as_str()))
            .map(|_| ())
    }

    fn team_ratings(&mut self) -> Result<Vec<TeamRatings>> {
        let conn = get_connection(&self.pool)?;
        ratings::list_all(&conn, self.table).with_context(|| store_context("list", self.table.as_str()))
    }

    fn clear(&mut self) -> Result<()> {
        let conn = get_connection(&self.pool)?;
        ratings::clear(&conn, self.table).with_context(|| store_context("clear", self.table.as_str()))
    }
}
