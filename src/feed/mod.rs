pub mod loader;
pub mod models;

pub use loader::{load_feed, parse_feed};
pub use models::{Feed, FeedFixture, FeedStatistics, FeedTeam, StatValue};
