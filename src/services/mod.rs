pub mod ingestion;
pub mod prediction;
pub mod processing;

pub use ingestion::{ImportSummary, IngestionService};
pub use prediction::{MatchPrediction, PredictionService};
pub use processing::{ProcessingService, RecomputeSummary};
