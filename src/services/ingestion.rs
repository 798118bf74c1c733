use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;

use crate::database::{self, DbPool, Fixture};
use crate::feed::{self, Feed, FeedFixture, FeedStatistics};
use crate::rating::types::Metric;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    pub not_started: usize,
    pub before_cutoff: usize,
    pub statistics: usize,
}

enum ImportOutcome {
    Imported { statistics: usize },
    Duplicate,
    NotStarted,
    BeforeCutoff,
}

/// Commits feed fixtures to the database, once per fixture id
pub struct IngestionService {
    pool: DbPool,
    since: Option<i64>,
}

impl IngestionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool, since: None }
    }

    /// Only fixtures kicking off at or after `timestamp` are imported
    pub fn with_cutoff(mut self, timestamp: Option<i64>) -> Self {
        self.since = timestamp;
        self
    }

    pub fn run(&self, path: &Path) -> Result<ImportSummary> {
        info!("=== Starting Feed Import ===\n");

        let feed = feed::load_feed(path)?;
        let summary = self.import(&feed)?;

        info!(
            "  → Imported {} fixtures ({} statistics), skipped {} duplicates, {} not started, {} before cutoff",
            summary.imported,
            summary.statistics,
            summary.duplicates,
            summary.not_started,
            summary.before_cutoff
        );
        info!("=== Import Complete ===");
        Ok(summary)
    }

    pub fn import(&self, feed: &Feed) -> Result<ImportSummary> {
        let mut conn = database::get_connection(&self.pool)?;
        database::setup::initialize_database(&conn)?;

        let tx = conn.transaction().context("Failed to start import transaction")?;
        let mut summary = ImportSummary::default();

        for fixture in &feed.fixtures {
            match self.import_fixture(&tx, fixture)? {
                ImportOutcome::Imported { statistics } => {
                    summary.imported += 1;
                    summary.statistics += statistics;
                }
                ImportOutcome::Duplicate => summary.duplicates += 1,
                ImportOutcome::NotStarted => summary.not_started += 1,
                ImportOutcome::BeforeCutoff => summary.before_cutoff += 1,
            }
        }

        tx.commit().context("Failed to commit import transaction")?;
        Ok(summary)
    }

    fn import_fixture(&self, conn: &Connection, fixture: &FeedFixture) -> Result<ImportOutcome> {
        if fixture.is_not_started() {
            debug!("Fixture {} has not started yet", fixture.id);
            return Ok(ImportOutcome::NotStarted);
        }

        if self.since.is_some_and(|since| fixture.timestamp < since) {
            return Ok(ImportOutcome::BeforeCutoff);
        }

        if database::fixtures::exists(conn, fixture.id)? {
            debug!("Fixture {} already recorded", fixture.id);
            return Ok(ImportOutcome::Duplicate);
        }

        database::teams::upsert_team(conn, fixture.home.id, &fixture.home.name)?;
        database::teams::upsert_team(conn, fixture.away.id, &fixture.away.name)?;

        if fixture.goals.home.is_none() || fixture.goals.away.is_none() {
            warn!("Fixture {} is missing a final score", fixture.id);
        }

        database::fixtures::insert_fixture(
            conn,
            &Fixture {
                id: fixture.id,
                home_team_id: fixture.home.id,
                away_team_id: fixture.away.id,
                home_score: fixture.goals.home,
                away_score: fixture.goals.away,
                timestamp: fixture.timestamp,
            },
        )?;

        let mut statistics = 0;
        for stats in &fixture.statistics {
            statistics += self.import_statistics(conn, fixture, stats)?;
        }

        Ok(ImportOutcome::Imported { statistics })
    }

    fn import_statistics(&self, conn: &Connection, fixture: &FeedFixture, stats: &FeedStatistics) -> Result<usize> {
        if stats.team_id != fixture.home.id && stats.team_id != fixture.away.id {
            warn!(
                "Fixture {} has statistics for team {} which did not play in it",
                fixture.id, stats.team_id
            );
            return Ok(0);
        }

        let mut stored = 0;
        for metric in Metric::ALL {
            let raw = match metric {
                Metric::TotalShots => stats.total_shots.as_ref(),
                Metric::BallPossession => stats.ball_possession.as_ref(),
            };

            match raw.and_then(|v| v.as_f64()) {
                Some(value) => {
                    database::statistics::insert_statistic(conn, fixture.id, stats.team_id, metric, value)?;
                    stored += 1;
                }
                None => warn!(
                    "Fixture {} has no usable {} for team {}",
                    fixture.id,
                    metric.as_str(),
                    stats.team_id
                ),
            }
        }

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    const FEED: &str = r#"{"fixtures": [
        {
            "id": 1, "timestamp": 1704200000, "status": "FT",
            "home": {"id": 551, "name": "FC Basel"}, "away": {"id": 565, "name": "Young Boys"},
            "goals": {"home": 3, "away": 1},
            "statistics": [
                {"team_id": 551, "total_shots": 10, "ball_possession": "60%"},
                {"team_id": 565, "total_shots": 6, "ball_possession": "40%"}
            ]
        },
        {
            "id": 2, "timestamp": 1704300000, "status": "NS",
            "home": {"id": 565, "name": "Young Boys"}, "away": {"id": 630, "name": "Sion"}
        },
        {
            "id": 3, "timestamp": 1600000000, "status": "FT",
            "home": {"id": 630, "name": "Sion"}, "away": {"id": 551, "name": "FC Basel"},
            "goals": {"home": 0, "away": 0}
        },
        {
            "id": 4, "timestamp": 1704400000, "status": "FT",
            "home": {"id": 630, "name": "Sion"}, "away": {"id": 565, "name": "Young Boys"},
            "goals": {"home": 1, "away": 1},
            "statistics": [
                {"team_id": 630, "total_shots": 7, "ball_possession": "--"},
                {"team_id": 999, "total_shots": 3}
            ]
        }
    ]}"#;

    fn service() -> IngestionService {
        IngestionService::new(create_memory_pool().unwrap()).with_cutoff(Some(1_704_120_085))
    }

    #[test]
    fn test_import_applies_feed_rules() {
        let service = service();
        let feed = feed::parse_feed(FEED).unwrap();

        let summary = service.import(&feed).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                duplicates: 0,
                not_started: 1,
                before_cutoff: 1,
                statistics: 5,
            }
        );

        let conn = database::get_connection(&service.pool).unwrap();
        let fixtures = database::fixtures::list_all(&conn).unwrap();
        assert_eq!(fixtures.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(database::teams::list_all(&conn).unwrap().len(), 3);
    }

    #[test]
    fn test_reimport_skips_recorded_fixtures() {
        let service = service();
        let feed = feed::parse_feed(FEED).unwrap();

        service.import(&feed).unwrap();
        let second = service.import(&feed).unwrap();

        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicates, 2);

        let conn = database::get_connection(&service.pool).unwrap();
        assert_eq!(database::fixtures::list_all(&conn).unwrap().len(), 2);
        assert_eq!(database::statistics::list_all(&conn).unwrap().len(), 5);
    }

    #[test]
    fn test_non_finite_statistic_is_dropped_without_aborting_import() {
        let service = IngestionService::new(create_memory_pool().unwrap());
        let feed = feed::parse_feed(
            r#"{"fixtures": [
                {
                    "id": 1, "timestamp": 1704200000, "status": "FT",
                    "home": {"id": 551, "name": "FC Basel"}, "away": {"id": 565, "name": "Young Boys"},
                    "goals": {"home": 2, "away": 2},
                    "statistics": [
                        {"team_id": 551, "total_shots": 9, "ball_possession": "NaN%"},
                        {"team_id": 565, "total_shots": 8, "ball_possession": "inf%"}
                    ]
                },
                {
                    "id": 2, "timestamp": 1704300000, "status": "FT",
                    "home": {"id": 565, "name": "Young Boys"}, "away": {"id": 630, "name": "Sion"},
                    "goals": {"home": 1, "away": 0}
                }
            ]}"#,
        )
        .unwrap();

        let summary = service.import(&feed).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.statistics, 2);

        let conn = database::get_connection(&service.pool).unwrap();
        assert_eq!(database::fixtures::list_all(&conn).unwrap().len(), 2);
        let stored = database::statistics::list_all(&conn).unwrap();
        assert!(stored.iter().all(|s| s.value.is_finite() && s.metric == "totalShots"));
    }
}
