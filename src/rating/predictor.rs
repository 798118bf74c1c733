use anyhow::Result;

use super::elo::expected_score;
use super::store::RatingStore;
use super::types::{Dimension, DimensionRatings, PerDimension, RatingValue, TeamId};

/// Weighted blend of the four dimension ratings
pub fn composite_rating(ratings: &DimensionRatings, weights: &PerDimension<f64>) -> RatingValue {
    Dimension::ALL
        .iter()
        .map(|&d| ratings.get(d) * weights.get(d))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_composite: RatingValue,
    pub team2_composite: RatingValue,
    pub team1_chance: f64,
    pub team2_chance: f64,
}

pub struct Predictor<'a, S: RatingStore> {
    store: &'a mut S,
    weights: &'a PerDimension<f64>,
}

impl<'a, S: RatingStore> Predictor<'a, S> {
    pub fn new(store: &'a mut S, weights: &'a PerDimension<f64>) -> Self {
        Self { store, weights }
    }

    pub fn composite(&mut self, team_id: TeamId) -> Result<RatingValue> {
        let ratings = self.store.get_ratings(team_id)?;
        Ok(composite_rating(&ratings, self.weights))
    }

    /// Win chances for a matchup; the two chances always sum to one
    pub fn predict(&mut self, team1_id: TeamId, team2_id: TeamId) -> Result<Prediction> {
        let team1_composite = self.composite(team1_id)?;
        let team2_composite = self.composite(team2_id)?;
        let team1_chance = expected_score(team2_composite, team1_composite);

        Ok(Prediction {
            team1_id,
            team2_id,
            team1_composite,
            team2_composite,
            team1_chance,
            team2_chance: 1.0 - team1_chance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RatingSettings;
    use crate::rating::store::MemoryRatingStore;

    #[test]
    fn test_composite_uses_weights() {
        let weights = RatingSettings::default().weights;
        let ratings = PerDimension {
            goal: 2000.0,
            winner: 1000.0,
            total_shots: 1000.0,
            ball_possession: 1000.0,
        };
        assert!((composite_rating(&ratings, &weights) - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_teams_split_evenly() {
        let weights = RatingSettings::default().weights;
        let mut store = MemoryRatingStore::new(1000.0);
        for dimension in Dimension::ALL {
            store.set_rating(1, dimension, 1400.0).unwrap();
            store.set_rating(2, dimension, 1400.0).unwrap();
        }

        let prediction = Predictor::new(&mut store, &weights).predict(1, 2).unwrap();

        assert_eq!(prediction.team1_chance, 0.5);
        assert_eq!(prediction.team2_chance, 0.5);
    }

    #[test]
    fn test_unknown_teams_fall_back_to_default() {
        let weights = RatingSettings::default().weights;
        let mut store = MemoryRatingStore::new(1000.0);

        let prediction = Predictor::new(&mut store, &weights).predict(606, 551).unwrap();

        assert!((prediction.team1_composite - 1000.0).abs() < 1e-9);
        assert_eq!(prediction.team1_chance, 0.5);
    }

    #[test]
    fn test_stronger_team_is_favoured() {
        let weights = RatingSettings::default().weights;
        let mut store = MemoryRatingStore::new(1000.0);
        store.set_rating(1, Dimension::Winner, 1800.0).unwrap();
        store.set_rating(1, Dimension::Goal, 1600.0).unwrap();
        store.set_rating(2, Dimension::Winner, 1200.0).unwrap();

        let prediction = Predictor::new(&mut store, &weights).predict(1, 2).unwrap();

        assert!(prediction.team1_chance > 0.5);
        assert!((prediction.team1_chance + prediction.team2_chance - 1.0).abs() < 1e-12);
        let reversed = Predictor::new(&mut store, &weights).predict(2, 1).unwrap();
        assert!((reversed.team2_chance - prediction.team1_chance).abs() < 1e-12);
    }
}
