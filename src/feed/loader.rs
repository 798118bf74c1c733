use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::models::Feed;
use crate::errors::feed_context;

/// Reads and parses a feed file
pub fn load_feed(path: &Path) -> Result<Feed> {
    let json = fs::read_to_string(path).with_context(|| feed_context(path))?;
    let feed = parse_feed(&json).with_context(|| feed_context(path))?;

    info!("Loaded {} fixtures from {}", feed.fixtures.len(), path.display());
    Ok(feed)
}

pub fn parse_feed(json: &str) -> Result<Feed> {
    serde_json::from_str(json).with_context(|| {
        format!(
            "Failed to parse feed JSON. First 200 chars: {}",
            json.chars().take(200).collect::<String>()
        )
    })
}
