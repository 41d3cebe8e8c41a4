//! `reskit` - CLI for rescuekit
//!
//! This binary inspects and drives the locally stored onboarding session and
//! searches the service's navigation catalog.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use rescuekit::cli::{Cli, Command, ConfigCommand, LogoutCommand, SearchCommand, StatusCommand};
use rescuekit::onboarding::{OnboardingStatus, OnboardingStep};
use rescuekit::search::SearchIndex;
use rescuekit::session::{SessionStore, SqliteStore};
use rescuekit::{init_logging, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Status(status_cmd) => handle_status(&config, &status_cmd),
        Command::Next => handle_next(&config),
        Command::Search(search_cmd) => {
            handle_search(&config, &search_cmd);
            Ok(())
        }
        Command::Logout(logout_cmd) => handle_logout(&config, &logout_cmd),
        Command::Config(config_cmd) => handle_config(&config, &config_cmd),
    }
}

fn open_session(config: &Config) -> Result<SessionStore<SqliteStore>> {
    let store = SqliteStore::open(config.session_database_path())?;
    Ok(SessionStore::new(store))
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> Result<()> {
    let session = open_session(config)?;
    let status = OnboardingStatus::evaluate(&session.artifacts()?);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Registered:          {}", yes_no(status.is_registered));
        println!("Personal info:       {}", yes_no(status.has_personal_info));
        println!("Ability check:       {}", yes_no(status.has_ability_check));
        println!(
            "Detailed abilities:  {}",
            yes_no(status.has_detailed_abilities)
        );
        println!("Complete:            {}", yes_no(status.is_complete));
    }
    Ok(())
}

fn handle_next(config: &Config) -> Result<()> {
    let session = open_session(config)?;
    let status = OnboardingStatus::evaluate(&session.artifacts()?);
    let step = OnboardingStep::next(&status);

    println!("{} ({})", step, step.path());
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) {
    let index = SearchIndex::builtin();
    let limit = cmd.limit.unwrap_or(config.search.max_results);

    let ranked = index.ranked(&cmd.query);
    if ranked.is_empty() {
        println!("No results for '{}'", cmd.query);
        return;
    }

    for scored in ranked.iter().take(limit) {
        let anchor = scored
            .item
            .anchor
            .as_ref()
            .map(|a| format!("#{a}"))
            .unwrap_or_default();
        println!(
            "{:>4}  [{}] {} ({}{})",
            scored.score, scored.item.kind, scored.item.title, scored.item.path, anchor
        );
    }
}

fn handle_logout(config: &Config, cmd: &LogoutCommand) -> Result<()> {
    if !cmd.yes {
        println!("This clears the stored identity, onboarding artifacts and tokens.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let session = open_session(config)?;
    session.logout()?;
    println!("Session cleared.");
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
