use std::collections::BTreeMap;

use anyhow::Result;

use super::types::{Dimension, DimensionRatings, RatingValue, TeamId, TeamRatings};

/// Key-value access to per-team, per-dimension ratings.
///
/// `get_rating` is not a pure read: a team without a row gets one holding
/// the default rating, which is persisted before being returned.
pub trait RatingStore {
    fn get_rating(&mut self, team_id: TeamId, dimension: Dimension) -> Result<RatingValue>;

    /// Last writer wins.
    fn set_rating(&mut self, team_id: TeamId, dimension: Dimension, value: RatingValue) -> Result<()>;

    fn team_ratings(&mut self) -> Result<Vec<TeamRatings>>;

    fn clear(&mut self) -> Result<()>;

    fn get_ratings(&mut self, team_id: TeamId) -> Result<DimensionRatings> {
        let mut ratings = DimensionRatings::default();
        for dimension in Dimension::ALL {
            ratings.set(dimension, self.get_rating(team_id, dimension)?);
        }
        Ok(ratings)
    }
}

/// In-process store, ordered by team id
#[derive(Debug, Clone)]
pub struct MemoryRatingStore {
    default_rating: RatingValue,
    ratings: BTreeMap<TeamId, DimensionRatings>,
}

impl MemoryRatingStore {
    pub fn new(default_rating: RatingValue) -> Self {
        Self {
            default_rating,
            ratings: BTreeMap::new(),
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.ratings.contains_key(&team_id)
    }

    fn row(&mut self, team_id: TeamId) -> &mut DimensionRatings {
        let default_rating = self.default_rating;
        self.ratings
            .entry(team_id)
            .or_insert_with(|| DimensionRatings::uniform(default_rating))
    }
}

impl RatingStore for MemoryRatingStore {
    fn get_rating(&mut self, team_id: TeamId, dimension: Dimension) -> Result<RatingValue> {
        Ok(self.row(team_id).get(dimension))
    }

    fn set_rating(&mut self, team_id: TeamId, dimension: Dimension, value: RatingValue) -> Result<()> {
        self.row(team_id).set(dimension, value);
        Ok(())
    }

    fn team_ratings(&mut self) -> Result<Vec<TeamRatings>> {
        Ok(self
            .ratings
            .iter()
            .map(|(&team_id, &ratings)| TeamRatings { team_id, ratings })
            .collect())
    }

    fn clear(&mut self) -> Result<()> {
        self.ratings.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_read_materializes_default() {
        let mut store = MemoryRatingStore::new(1000.0);
        assert!(!store.contains(42));

        assert_eq!(store.get_rating(42, Dimension::Goal).unwrap(), 1000.0);
        assert!(store.contains(42));
        assert_eq!(store.get_rating(42, Dimension::Goal).unwrap(), 1000.0);
        assert_eq!(store.team_ratings().unwrap().len(), 1);
    }

    #[test]
    fn test_set_overwrites_single_dimension() {
        let mut store = MemoryRatingStore::new(1000.0);
        store.set_rating(1, Dimension::Winner, 1012.5).unwrap();
        store.set_rating(1, Dimension::Winner, 1020.0).unwrap();

        let ratings = store.get_ratings(1).unwrap();
        assert_eq!(ratings.winner, 1020.0);
        assert_eq!(ratings.goal, 1000.0);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut store = MemoryRatingStore::new(1000.0);
        store.set_rating(1, Dimension::Goal, 900.0).unwrap();
        store.clear().unwrap();

        assert!(store.team_ratings().unwrap().is_empty());
        assert_eq!(store.get_rating(1, Dimension::Goal).unwrap(), 1000.0);
    }
}
