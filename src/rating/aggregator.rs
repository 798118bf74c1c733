use std::collections::BTreeMap;

use anyhow::Result;
use log::{debug, info, warn};

use super::elo::{expected_pair, updated_rating};
use super::normalization::{NEUTRAL_SCORE, Populations};
use super::store::RatingStore;
use super::types::{Dimension, DrawPolicy, FixtureId, MatchRecord, RatingValue, TeamId};
use crate::config::settings::RatingSettings;
use crate::errors::SkipReason;

/// A single team's movement for one dimension of one fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStep {
    pub team_id: TeamId,
    pub before: RatingValue,
    pub expected: f64,
    pub actual: f64,
    pub after: RatingValue,
}

impl RatingStep {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DimensionOutcome {
    Applied {
        dimension: Dimension,
        home: RatingStep,
        away: RatingStep,
    },
    Skipped {
        dimension: Dimension,
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationSummary {
    pub fixtures: usize,
    pub applied: BTreeMap<Dimension, usize>,
    pub skipped: BTreeMap<Dimension, usize>,
}

impl AggregationSummary {
    fn record(&mut self, outcome: &DimensionOutcome) {
        let (counter, dimension) = match outcome {
            DimensionOutcome::Applied { dimension, .. } => (&mut self.applied, dimension),
            DimensionOutcome::Skipped { dimension, .. } => (&mut self.skipped, dimension),
        };
        *counter.entry(*dimension).or_insert(0) += 1;
    }

    pub fn applied(&self, dimension: Dimension) -> usize {
        self.applied.get(&dimension).copied().unwrap_or(0)
    }

    pub fn skipped(&self, dimension: Dimension) -> usize {
        self.skipped.get(&dimension).copied().unwrap_or(0)
    }
}

/// Folds fixtures through the per-dimension Elo pipeline.
///
/// Population bounds are fixed at construction from the full record set.
/// Store failures abort the fold; malformed records only skip the affected
/// dimension.
pub struct DimensionAggregator<'a, S: RatingStore> {
    store: &'a mut S,
    settings: &'a RatingSettings,
    populations: Populations,
}

impl<'a, S: RatingStore> DimensionAggregator<'a, S> {
    pub fn new(store: &'a mut S, settings: &'a RatingSettings, records: &[MatchRecord]) -> Self {
        Self {
            store,
            settings,
            populations: Populations::from_records(records),
        }
    }

    /// Processes every record in ascending fixture id order
    pub fn process_all(&mut self, records: &[MatchRecord]) -> Result<AggregationSummary> {
        info!("Folding {} fixtures through {} dimensions", records.len(), Dimension::ALL.len());

        let mut ordered: Vec<&MatchRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.fixture_id);

        let mut summary = AggregationSummary::default();
        for (idx, record) in ordered.iter().enumerate() {
            if (idx + 1) % 100 == 0 || idx + 1 == ordered.len() {
                info!("  Processing fixture {}/{}", idx + 1, ordered.len());
            }

            for outcome in self.process_fixture(record)? {
                summary.record(&outcome);
            }
            summary.fixtures += 1;
        }

        Ok(summary)
    }

    pub fn process_fixture(&mut self, record: &MatchRecord) -> Result<Vec<DimensionOutcome>> {
        let mut outcomes = Vec::with_capacity(Dimension::ALL.len());
        for dimension in Dimension::ALL {
            let outcome = self.process_dimension(record, dimension)?;
            if let DimensionOutcome::Skipped { reason, .. } = &outcome {
                warn!("Skipping {} for fixture {}: {}", dimension.as_str(), record.fixture_id, reason);
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn process_dimension(&mut self, record: &MatchRecord, dimension: Dimension) -> Result<DimensionOutcome> {
        let home_id = record.home.team_id;
        let away_id = record.away.team_id;

        let home_rating = self.store.get_rating(home_id, dimension)?;
        let away_rating = self.store.get_rating(away_id, dimension)?;

        let (home_actual, away_actual) = match self.actual_scores(record, dimension) {
            Ok(scores) => scores,
            Err(reason) => return Ok(DimensionOutcome::Skipped { dimension, reason }),
        };

        let (home_expected, away_expected) = expected_pair(home_rating, away_rating);
        let k = self.settings.k_factor(dimension);

        let home = RatingStep {
            team_id: home_id,
            before: home_rating,
            expected: home_expected,
            actual: home_actual,
            after: updated_rating(home_rating, home_expected, home_actual, k),
        };
        let away = RatingStep {
            team_id: away_id,
            before: away_rating,
            expected: away_expected,
            actual: away_actual,
            after: updated_rating(away_rating, away_expected, away_actual, k),
        };

        self.store.set_rating(home_id, dimension, home.after)?;
        self.store.set_rating(away_id, dimension, away.after)?;

        debug!(
            "fixture {} {}: {} {:.2} -> {:.2}, {} {:.2} -> {:.2}",
            record.fixture_id,
            dimension.as_str(),
            home_id,
            home.before,
            home.after,
            away_id,
            away.before,
            away.after
        );

        Ok(DimensionOutcome::Applied { dimension, home, away })
    }

    /// Normalized (home, away) outcome for one dimension
    fn actual_scores(&self, record: &MatchRecord, dimension: Dimension) -> Result<(f64, f64), SkipReason> {
        if record.home.team_id == record.away.team_id {
            return Err(SkipReason::SelfMatch {
                fixture_id: record.fixture_id,
                team_id: record.home.team_id,
            });
        }

        match dimension {
            Dimension::Winner => self.winner_scores(record),
            _ => {
                let home = raw_value(record, dimension, true)?;
                let away = raw_value(record, dimension, false)?;
                Ok(match self.populations.range(dimension) {
                    Some(range) => (range.normalize(home), range.normalize(away)),
                    None => (NEUTRAL_SCORE, NEUTRAL_SCORE),
                })
            }
        }
    }

    fn winner_scores(&self, record: &MatchRecord) -> Result<(f64, f64), SkipReason> {
        let (home_goals, away_goals) = match (record.home.goals, record.away.goals) {
            (Some(h), Some(a)) => (h, a),
            _ => return Err(missing_score(record.fixture_id)),
        };

        Ok(if home_goals > away_goals {
            (1.0, 0.0)
        } else if home_goals < away_goals {
            (0.0, 1.0)
        } else {
            match self.settings.draw_policy {
                DrawPolicy::Split => (0.5, 0.5),
                DrawPolicy::AwayWin => (0.0, 1.0),
            }
        })
    }
}

fn raw_value(record: &MatchRecord, dimension: Dimension, home: bool) -> Result<f64, SkipReason> {
    let side = if home { &record.home } else { &record.away };
    side.raw_value(dimension)
        .ok_or_else(|| match dimension.metric() {
            Some(metric) => SkipReason::MissingStatistic {
                fixture_id: record.fixture_id,
                team_id: side.team_id,
                metric,
            },
            None => missing_score(record.fixture_id),
        })
}

fn missing_score(fixture_id: FixtureId) -> SkipReason {
    SkipReason::MissingScore { fixture_id }
}
