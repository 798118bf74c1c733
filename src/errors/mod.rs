use thiserror::Error;

use crate::rating::types::{FixtureId, Metric, TeamId};

/// Why a single (fixture, dimension) pair was left out of the rating fold
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("fixture {fixture_id} has no final score")]
    MissingScore { fixture_id: FixtureId },

    #[error("fixture {fixture_id} has no {} for team {team_id}", metric.as_str())]
    MissingStatistic {
        fixture_id: FixtureId,
        team_id: TeamId,
        metric: Metric,
    },

    #[error("fixture {fixture_id} pairs team {team_id} with itself")]
    SelfMatch { fixture_id: FixtureId, team_id: TeamId },
}

/// Add context to rating store errors
pub fn store_context(operation: &str, table: &str) -> String {
    format!("Rating store unavailable: failed to {} {}", operation, table)
}

/// Add context to feed errors
pub fn feed_context(path: &std::path::Path) -> String {
    format!("Failed to load match feed from {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_messages_name_the_record() {
        let reason = SkipReason::MissingStatistic {
            fixture_id: 1035,
            team_id: 551,
            metric: Metric::BallPossession,
        };
        assert_eq!(
            reason.to_string(),
            "fixture 1035 has no ballPossession for team 551"
        );
        assert_eq!(
            SkipReason::MissingScore { fixture_id: 9 }.to_string(),
            "fixture 9 has no final score"
        );
    }
}
