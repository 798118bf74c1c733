use std::collections::BTreeMap;

use anyhow::Result;
use log::{debug, info};

use super::store::RatingStore;
use super::types::{Dimension, MatchRecord, PerDimension, TeamRatings};

/// Score assigned when a population has no spread to normalize against
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Maps `value` onto [0, 1] relative to the observed population bounds.
///
/// A degenerate population (`max <= min`, or non-finite bounds) yields
/// `NEUTRAL_SCORE` instead of dividing by zero.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return NEUTRAL_SCORE;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Observed min/max of a metric across the whole known population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<MetricRange>, v| match range {
                None => Some(MetricRange { min: v, max: v }),
                Some(r) => Some(MetricRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// Per-dimension population bounds over every recorded fixture
#[derive(Debug, Clone, Default)]
pub struct Populations {
    ranges: BTreeMap<Dimension, MetricRange>,
}

impl Populations {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut ranges = BTreeMap::new();

        for dimension in Dimension::ALL {
            let values = records
                .iter()
                .flat_map(|r| [&r.home, &r.away])
                .filter_map(|side| side.raw_value(dimension));

            if let Some(range) = MetricRange::from_values(values) {
                if range.is_degenerate() {
                    debug!(
                        "{} population has a single value ({}), scoring it as neutral",
                        dimension.as_str(),
                        range.min
                    );
                }
                ranges.insert(dimension, range);
            }
        }

        Self { ranges }
    }

    pub fn range(&self, dimension: Dimension) -> Option<MetricRange> {
        self.ranges.get(&dimension).copied()
    }
}

/// Target band the cross-dimension pass rescales every dimension onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBand {
    pub base: f64,
    pub span: f64,
}

impl RatingBand {
    fn place(&self, unit: f64) -> f64 {
        self.base + self.span * unit
    }
}

/// Rescales each dimension's distribution onto the same band.
///
/// Every dimension is handled independently: min/max are taken across all
/// teams for that dimension, then each rating becomes
/// `base + span * normalize(rating, min, max)`. Input is left untouched, so
/// running this again on the same raw ratings gives the same output.
pub fn rescale_dimensions(raw: &[TeamRatings], band: RatingBand) -> Vec<TeamRatings> {
    let ranges: PerDimension<Option<MetricRange>> = {
        let mut ranges = PerDimension::uniform(None);
        for dimension in Dimension::ALL {
            let range = MetricRange::from_values(raw.iter().map(|t| t.ratings.get(dimension)));
            ranges.set(dimension, range);
        }
        ranges
    };

    raw.iter()
        .map(|team| {
            let mut ratings = team.ratings;
            for dimension in Dimension::ALL {
                let unit = ranges
                    .get(dimension)
                    .map(|range| range.normalize(team.ratings.get(dimension)))
                    .unwrap_or(NEUTRAL_SCORE);
                ratings.set(dimension, band.place(unit));
            }
            TeamRatings {
                team_id: team.team_id,
                ratings,
            }
        })
        .collect()
}

/// Cross-dimension pass from a raw store into a derived one.
///
/// The target is cleared and rewritten; the source is only read.
pub fn apply_cross_dimension<R, T>(source: &mut R, target: &mut T, band: RatingBand) -> Result<Vec<TeamRatings>>
where
    R: RatingStore,
    T: RatingStore,
{
    let raw = source.team_ratings()?;
    let rescaled = rescale_dimensions(&raw, band);

    target.clear()?;
    for team in &rescaled {
        for dimension in Dimension::ALL {
            target.set_rating(team.team_id, dimension, team.ratings.get(dimension))?;
        }
    }

    info!("Rescaled {} teams onto [{}, {}]", rescaled.len(), band.base, band.base + band.span);
    Ok(rescaled)
}
