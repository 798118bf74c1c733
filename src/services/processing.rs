use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};

use crate::config::settings::RatingSettings;
use crate::database::{self, DbPool, Fixture, RatingTable, SqliteRatingStore, Statistic};
use crate::rating::normalization::apply_cross_dimension;
use crate::rating::predictor::composite_rating;
use crate::rating::types::{FixtureId, MatchRecord, Metric, SideRecord, TeamId};
use crate::rating::{AggregationSummary, DimensionAggregator, RatingStore};

#[derive(Debug, Clone, Default)]
pub struct RecomputeSummary {
    pub aggregation: AggregationSummary,
    pub teams: usize,
}

/// Full recompute: fold every fixture into raw Elo ratings, then derive the
/// normalized ratings and composites from them.
pub struct ProcessingService {
    pool: DbPool,
    settings: RatingSettings,
}

impl ProcessingService {
    pub fn new(pool: DbPool, settings: RatingSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { pool, settings })
    }

    pub fn run(&self) -> Result<RecomputeSummary> {
        info!("=== Starting Rating Recompute ===\n");

        let records = self.load_match_records()?;
        info!("  → Loaded {} fixtures\n", records.len());

        let mut raw = self.store(RatingTable::Elo);
        raw.clear()?;
        let aggregation = DimensionAggregator::new(&mut raw, &self.settings, &records).process_all(&records)?;
        for (dimension, applied) in &aggregation.applied {
            info!(
                "    → {}: {} applied, {} skipped",
                dimension.as_str(),
                applied,
                aggregation.skipped(*dimension)
            );
        }

        let mut normalized = self.store(RatingTable::Normalized);
        let rescaled = apply_cross_dimension(&mut raw, &mut normalized, self.settings.band)?;
        self.save_composites(&rescaled)?;
        info!("  → Saved normalized ratings for {} teams\n", rescaled.len());

        info!("=== Recompute Complete ===");
        Ok(RecomputeSummary {
            aggregation,
            teams: rescaled.len(),
        })
    }

    fn store(&self, table: RatingTable) -> SqliteRatingStore {
        SqliteRatingStore::new(self.pool.clone(), table, self.settings.default_rating)
    }

    fn load_match_records(&self) -> Result<Vec<MatchRecord>> {
        let conn = database::get_connection(&self.pool)?;
        database::setup::initialize_database(&conn)?;

        let fixtures = database::fixtures::list_all(&conn)?;
        let statistics = database::statistics::list_all(&conn)?;
        Ok(build_match_records(&fixtures, &statistics))
    }

    fn save_composites(&self, teams: &[crate::rating::TeamRatings]) -> Result<()> {
        let conn = database::get_connection(&self.pool)?;
        let calculated_at = Utc::now().naive_utc();

        for team in teams {
            let composite = composite_rating(&team.ratings, &self.settings.weights);
            database::ratings::set_composite(&conn, team.team_id, composite, calculated_at)?;
        }
        Ok(())
    }
}

/// Joins fixtures with their per-team statistics
pub fn build_match_records(fixtures: &[Fixture], statistics: &[Statistic]) -> Vec<MatchRecord> {
    let mut observed: HashMap<(FixtureId, TeamId, Metric), f64> = HashMap::new();
    for stat in statistics {
        match Metric::from_name(&stat.metric) {
            Some(metric) => {
                observed.insert((stat.fixture_id, stat.team_id, metric), stat.value);
            }
            None => debug!("Ignoring unknown metric {} on fixture {}", stat.metric, stat.fixture_id),
        }
    }

    let side = |fixture_id: FixtureId, team_id: TeamId, goals: Option<u32>| SideRecord {
        team_id,
        goals,
        total_shots: observed.get(&(fixture_id, team_id, Metric::TotalShots)).copied(),
        ball_possession: observed.get(&(fixture_id, team_id, Metric::BallPossession)).copied(),
    };

    fixtures
        .iter()
        .map(|f| MatchRecord {
            fixture_id: f.id,
            timestamp: f.timestamp,
            home: side(f.id, f.home_team_id, f.home_score),
            away: side(f.id, f.away_team_id, f.away_score),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;
    use crate::rating::types::Dimension;

    const EPS: f64 = 1e-9;

    fn fixture(id: FixtureId, home: TeamId, away: TeamId, score: (u32, u32)) -> Fixture {
        Fixture {
            id,
            home_team_id: home,
            away_team_id: away,
            home_score: Some(score.0),
            away_score: Some(score.1),
            timestamp: 1_704_120_085 + id,
        }
    }

    fn seed(pool: &DbPool, fixtures: &[Fixture], stats: &[(FixtureId, TeamId, Metric, f64)]) {
        let conn = database::get_connection(pool).unwrap();
        database::setup::initialize_database(&conn).unwrap();
        for f in fixtures {
            database::fixtures::insert_fixture(&conn, f).unwrap();
        }
        for &(fixture_id, team_id, metric, value) in stats {
            database::statistics::insert_statistic(&conn, fixture_id, team_id, metric, value).unwrap();
        }
    }

    fn scenario_pool() -> DbPool {
        let pool = create_memory_pool().unwrap();
        seed(
            &pool,
            &[fixture(1, 1, 2, (3, 1))],
            &[
                (1, 1, Metric::TotalShots, 10.0),
                (1, 2, Metric::TotalShots, 6.0),
                (1, 1, Metric::BallPossession, 60.0),
                (1, 2, Metric::BallPossession, 40.0),
            ],
        );
        pool
    }

    #[test]
    fn test_build_match_records_joins_statistics() {
        let fixtures = vec![fixture(1, 10, 20, (2, 0))];
        let statistics = vec![
            Statistic { fixture_id: 1, team_id: 10, metric: "totalShots".into(), value: 9.0 },
            Statistic { fixture_id: 1, team_id: 20, metric: "ballPossession".into(), value: 44.0 },
            Statistic { fixture_id: 1, team_id: 20, metric: "passes".into(), value: 81.0 },
        ];

        let records = build_match_records(&fixtures, &statistics);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home.goals, Some(2));
        assert_eq!(records[0].home.total_shots, Some(9.0));
        assert_eq!(records[0].home.ball_possession, None);
        assert_eq!(records[0].away.ball_possession, Some(44.0));
    }

    #[test]
    fn test_recompute_scenario_raw_ratings() {
        let pool = scenario_pool();
        let summary = ProcessingService::new(pool.clone(), RatingSettings::default())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(summary.aggregation.fixtures, 1);
        assert_eq!(summary.teams, 2);

        let mut raw = SqliteRatingStore::new(pool, RatingTable::Elo, 1000.0);
        let a = raw.get_ratings(1).unwrap();
        let b = raw.get_ratings(2).unwrap();

        assert!((a.winner - 1012.5).abs() < EPS);
        assert!((b.winner - 987.5).abs() < EPS);
        for dimension in Dimension::ALL {
            let gain = a.get(dimension) - 1000.0;
            let loss = 1000.0 - b.get(dimension);
            assert!(gain > 0.0);
            assert!((gain - loss).abs() < EPS);
        }
    }

    #[test]
    fn test_recompute_is_repeatable() {
        let pool = scenario_pool();
        let service = ProcessingService::new(pool.clone(), RatingSettings::default()).unwrap();

        service.run().unwrap();
        let mut normalized = SqliteRatingStore::new(pool.clone(), RatingTable::Normalized, 1000.0);
        let first = normalized.team_ratings().unwrap();

        service.run().unwrap();
        let second = normalized.team_ratings().unwrap();
        let raw = SqliteRatingStore::new(pool, RatingTable::Elo, 1000.0)
            .team_ratings()
            .unwrap();

        assert_eq!(first, second);
        assert!((raw[0].ratings.winner - 1012.5).abs() < EPS);
        assert_eq!(second[0].ratings.goal, 2000.0);
        assert_eq!(second[1].ratings.goal, 1000.0);
    }

    #[test]
    fn test_recompute_writes_composites() {
        let pool = scenario_pool();
        ProcessingService::new(pool.clone(), RatingSettings::default())
            .unwrap()
            .run()
            .unwrap();

        let conn = database::get_connection(&pool).unwrap();
        let rows = database::ratings::list_rankings(&conn, 10).unwrap();
        assert_eq!(rows[0].team_id, 1);
        assert!((rows[0].composite.unwrap() - 2000.0).abs() < EPS);
        assert!((rows[1].composite.unwrap() - 1000.0).abs() < EPS);
        assert!(rows[0].calculated_at.is_some());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = RatingSettings::default().with_k_factor(-1.0);
        assert!(ProcessingService::new(create_memory_pool().unwrap(), settings).is_err());
    }
}
