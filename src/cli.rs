use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "football-tracker multi-factor Elo ratings")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Store fixtures and statistics from a match feed file
    Import {
        /// Path to the feed JSON
        path: PathBuf,
        /// Ignore fixtures that kicked off before this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,
    },
    /// Recompute every team's ratings from the stored fixtures
    Process {
        /// K-factor applied to every dimension (defaults to 25)
        #[arg(short, long)]
        k_factor: Option<f64>,
    },
    /// Win chances for a matchup, by team name or id
    Predict { team1: String, team2: String },
    /// List teams by composite rating
    Rankings {
        /// Number of teams to show (optional, defaults to 20)
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Drop and recreate every table
    Reset,
}
