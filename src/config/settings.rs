use anyhow::{bail, Result};

use crate::rating::normalization::RatingBand;
use crate::rating::types::{Dimension, DrawPolicy, PerDimension};

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub default_rating: f64,
    pub k_factors: PerDimension<f64>,
    pub weights: PerDimension<f64>,
    pub band: RatingBand,
    pub draw_policy: DrawPolicy,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: 1000.0,
            k_factors: PerDimension::uniform(25.0),
            weights: PerDimension {
                goal: 0.30,
                winner: 0.30,
                total_shots: 0.15,
                ball_possession: 0.25,
            },
            band: RatingBand {
                base: 1000.0,
                span: 1000.0,
            },
            draw_policy: DrawPolicy::Split,
        }
    }
}

impl RatingSettings {
    pub fn k_factor(&self, dimension: Dimension) -> f64 {
        self.k_factors.get(dimension)
    }

    pub fn with_k_factor(mut self, k_factor: f64) -> Self {
        self.k_factors = PerDimension::uniform(k_factor);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let k = self.k_factor(dimension);
            if !k.is_finite() || k <= 0.0 {
                bail!("K-factor for {} must be positive, got {}", dimension.as_str(), k);
            }
            let w = self.weights.get(dimension);
            if !w.is_finite() || w < 0.0 {
                bail!("Weight for {} must be non-negative, got {}", dimension.as_str(), w);
            }
        }

        let total: f64 = Dimension::ALL.iter().map(|d| self.weights.get(*d)).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            bail!("Composite weights must sum to 1.0, got {}", total);
        }

        if !self.band.span.is_finite() || self.band.span <= 0.0 {
            bail!("Normalization span must be positive, got {}", self.band.span);
        }

        Ok(())
    }
}

pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "football_tracker.db".to_string()),
        }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
