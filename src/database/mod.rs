pub mod connection;
pub mod fixtures;
pub mod models;
pub mod rating_store;
pub mod ratings;
pub mod setup;
pub mod statistics;
pub mod teams;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use rating_store::SqliteRatingStore;
pub use ratings::RatingTable;
