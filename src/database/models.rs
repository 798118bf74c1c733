use chrono::NaiveDateTime;

use crate::rating::types::{DimensionRatings, FixtureId, TeamId};

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: FixtureId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub fixture_id: FixtureId,
    pub team_id: TeamId,
    pub metric: String,
    pub value: f64,
}

// DTO for the rankings report
#[derive(Debug, Clone)]
pub struct RankingRow {
    pub team_id: TeamId,
    pub name: Option<String>,
    pub ratings: DimensionRatings,
    pub composite: Option<f64>,
    pub calculated_at: Option<NaiveDateTime>,
}
