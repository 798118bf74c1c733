use anyhow::Result;

use football_tracker::cli::Command;
use football_tracker::{handle_import, handle_predict, handle_process, handle_rankings, handle_reset, interpret};

fn main() {
    load_env();
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn load_env() {
    dotenvy::dotenv().ok();
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Import { path, since } => handle_import(path, *since),
        Command::Process { k_factor } => handle_process(*k_factor),
        Command::Predict { team1, team2 } => handle_predict(team1, team2),
        Command::Rankings { limit } => handle_rankings(*limit),
        Command::Reset => handle_reset(),
    }
}
