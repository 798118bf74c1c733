pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod feed;
pub mod rating;
pub mod services;

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::services::{IngestionService, PredictionService, ProcessingService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_pool(config: &AppConfig) -> Result<DbPool> {
    database::create_pool(&config.storage.database_path)
}

pub fn handle_import(path: &Path, since: Option<NaiveDate>) -> Result<()> {
    let config = AppConfig::new();
    let cutoff = since
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp());

    let service = IngestionService::new(open_pool(&config)?).with_cutoff(cutoff);
    let summary = service.run(path)?;

    println!(
        "Imported {} fixtures, skipped {} already recorded",
        summary.imported.to_string().green(),
        summary.duplicates
    );
    Ok(())
}

pub fn handle_process(k_factor: Option<f64>) -> Result<()> {
    let mut config = AppConfig::new();
    if let Some(k) = k_factor {
        config.rating = config.rating.with_k_factor(k);
    }

    let pool = open_pool(&config)?;
    let service = ProcessingService::new(pool, config.rating)?;
    let summary = service.run()?;

    println!(
        "Rated {} teams from {} fixtures",
        summary.teams.to_string().green(),
        summary.aggregation.fixtures
    );
    Ok(())
}

pub fn handle_predict(team1: &str, team2: &str) -> Result<()> {
    let config = AppConfig::new();
    let pool = open_pool(&config)?;
    let service = PredictionService::new(pool, config.rating)?;
    let result = service.predict(team1, team2)?;

    println!(
        "Team {} chances: {}%",
        result.team1.name.bold(),
        format!("{:.2}", result.prediction.team1_chance * 100.0).cyan()
    );
    println!(
        "Team {} chances: {}%",
        result.team2.name.bold(),
        format!("{:.2}", result.prediction.team2_chance * 100.0).cyan()
    );
    Ok(())
}

pub fn handle_rankings(limit: usize) -> Result<()> {
    let config = AppConfig::new();
    let pool = open_pool(&config)?;
    let service = PredictionService::new(pool, config.rating)?;
    let rows = service.rankings(limit)?;

    if rows.is_empty() {
        println!("No ratings yet, run `process` first");
        return Ok(());
    }

    println!(
        "{:>4}  {:<28} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "#", "Team", "Composite", "Goals", "Winner", "Shots", "Possess."
    );
    for (idx, row) in rows.iter().enumerate() {
        let name = row.name.clone().unwrap_or_else(|| row.team_id.to_string());
        let composite = row
            .composite
            .map(|c| format!("{:.1}", c))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<28} {:>9} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            idx + 1,
            name,
            composite.bold(),
            row.ratings.goal,
            row.ratings.winner,
            row.ratings.total_shots,
            row.ratings.ball_possession
        );
    }
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::new();
    let pool = open_pool(&config)?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}
