use anyhow::{anyhow, Result};

use crate::config::settings::RatingSettings;
use crate::database::{self, DbPool, RankingRow, RatingTable, SqliteRatingStore, Team};
use crate::rating::{Prediction, Predictor};

#[derive(Debug, Clone)]
pub struct MatchPrediction {
    pub team1: Team,
    pub team2: Team,
    pub prediction: Prediction,
}

/// Matchup predictions and the rankings table, read from normalized ratings
pub struct PredictionService {
    pool: DbPool,
    settings: RatingSettings,
}

impl PredictionService {
    pub fn new(pool: DbPool, settings: RatingSettings) -> Result<Self> {
        settings.validate()?;
        let conn = database::get_connection(&pool)?;
        database::setup::initialize_database(&conn)?;
        drop(conn);

        Ok(Self { pool, settings })
    }

    /// Resolves a numeric team id or a case-insensitive team name
    pub fn resolve_team(&self, query: &str) -> Result<Team> {
        let conn = database::get_connection(&self.pool)?;

        if let Ok(id) = query.trim().parse::<i64>() {
            let team = database::teams::find_by_id(&conn, id)?;
            return Ok(team.unwrap_or_else(|| Team {
                id,
                name: id.to_string(),
            }));
        }

        database::teams::find_by_name(&conn, query)?
            .ok_or_else(|| anyhow!("Team not found: {}", query))
    }

    pub fn predict(&self, team1: &str, team2: &str) -> Result<MatchPrediction> {
        let team1 = self.resolve_team(team1)?;
        let team2 = self.resolve_team(team2)?;

        let mut store = SqliteRatingStore::new(
            self.pool.clone(),
            RatingTable::Normalized,
            self.settings.default_rating,
        );
        let prediction = Predictor::new(&mut store, &self.settings.weights).predict(team1.id, team2.id)?;

        Ok(MatchPrediction {
            team1,
            team2,
            prediction,
        })
    }

    pub fn rankings(&self, limit: usize) -> Result<Vec<RankingRow>> {
        let conn = database::get_connection(&self.pool)?;
        database::ratings::list_rankings(&conn, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;
    use crate::rating::{Dimension, RatingStore};

    fn service() -> PredictionService {
        let pool = create_memory_pool().unwrap();
        let service = PredictionService::new(pool.clone(), RatingSettings::default()).unwrap();

        let conn = database::get_connection(&pool).unwrap();
        database::teams::upsert_team(&conn, 1013, "Grasshoppers").unwrap();
        database::teams::upsert_team(&conn, 551, "FC Basel").unwrap();
        drop(conn);

        let mut store = SqliteRatingStore::new(pool, RatingTable::Normalized, 1000.0);
        for dimension in Dimension::ALL {
            store.set_rating(1013, dimension, 1200.0).unwrap();
            store.set_rating(551, dimension, 1800.0).unwrap();
        }
        service
    }

    #[test]
    fn test_resolve_by_name_or_id() {
        let service = service();

        assert_eq!(service.resolve_team("fc BASEL").unwrap().id, 551);
        assert_eq!(service.resolve_team("1013").unwrap().name, "Grasshoppers");
        assert_eq!(service.resolve_team("42").unwrap().name, "42");
        assert!(service.resolve_team("Lausanne").is_err());
    }

    #[test]
    fn test_predict_favours_higher_composite() {
        let service = service();

        let result = service.predict("grasshoppers", "fc basel").unwrap();

        assert_eq!(result.team1.id, 1013);
        assert!((result.prediction.team1_composite - 1200.0).abs() < 1e-9);
        assert!((result.prediction.team2_composite - 1800.0).abs() < 1e-9);
        let expected = 1.0 / (1.0 + 10f64.powf(600.0 / 400.0));
        assert!((result.prediction.team1_chance - expected).abs() < 1e-9);
        assert!((result.prediction.team1_chance + result.prediction.team2_chance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_team_is_even() {
        let service = service();
        let result = service.predict("551", "FC Basel").unwrap();
        assert_eq!(result.prediction.team1_chance, 0.5);
        assert_eq!(result.prediction.team2_chance, 0.5);
    }
}
