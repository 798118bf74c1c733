pub mod aggregator;
pub mod elo;
pub mod normalization;
pub mod predictor;
pub mod store;
pub mod types;

pub use aggregator::{AggregationSummary, DimensionAggregator, DimensionOutcome, RatingStep};
pub use normalization::{apply_cross_dimension, normalize, rescale_dimensions, Populations, RatingBand};
pub use predictor::{composite_rating, Prediction, Predictor};
pub use store::{MemoryRatingStore, RatingStore};
pub use types::{Dimension, DimensionRatings, MatchRecord, Metric, SideRecord, TeamId, TeamRatings};
