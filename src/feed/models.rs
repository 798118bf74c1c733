use serde::{Deserialize, Serialize};

use crate::rating::types::{FixtureId, TeamId};

/// Status short code for fixtures that have not kicked off
pub const NOT_STARTED: &str = "NS";

/// Typed match feed handed over by the fetch collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub fixtures: Vec<FeedFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedFixture {
    pub id: FixtureId,
    pub timestamp: i64,
    #[serde(default)]
    pub status: Option<String>,
    pub home: FeedTeam,
    pub away: FeedTeam,
    #[serde(default)]
    pub goals: FeedGoals,
    #[serde(default)]
    pub statistics: Vec<FeedStatistics>,
}

impl FeedFixture {
    pub fn is_not_started(&self) -> bool {
        self.status.as_deref() == Some(NOT_STARTED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedTeam {
    pub id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatistics {
    pub team_id: TeamId,
    #[serde(default)]
    pub total_shots: Option<StatValue>,
    #[serde(default)]
    pub ball_possession: Option<StatValue>,
}

/// Statistic as delivered upstream: a number, or a string such as `"55%"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            StatValue::Text(s) => s
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
        }
    }
}
