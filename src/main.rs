use std::process::ExitCode;

use suntrack::{SlotSuggester, SuntrackConfig, SuntrackError, WeatherApiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match SuntrackConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let Some(query) = std::env::args().nth(1) else {
        eprintln!("Usage: suntrack <location>");
        return ExitCode::FAILURE;
    };

    let client = match WeatherApiClient::new(&config.weather) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    let suggester = SlotSuggester::new(client);

    match suggester.current_conditions(&query).await {
        Ok(conditions) => {
            println!(
                "{} ({})",
                conditions.location.name,
                conditions.location.format_coordinates()
            );
            println!("Current UV index: {:.1}", conditions.uv_index);
            println!(
                "Best time for sunbathing today: {}",
                conditions.best_slot_label()
            );
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            return exit_code_for(&e);
        }
    }

    match suggester.suggest(&query).await {
        Ok(suggestions) => {
            println!("\nSunbathing suggestions:");
            for day in &suggestions.days {
                println!("{}", day.format_date());
                if day.slots.is_empty() {
                    println!("  no recommended slots");
                }
                for slot in &day.slots {
                    println!("  {} (UV: {:.1})", slot.time, slot.uv_index);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &SuntrackError) -> ExitCode {
    match error {
        SuntrackError::LocationNotFound { .. } | SuntrackError::InvalidInput { .. } => {
            ExitCode::from(2)
        }
        _ => ExitCode::FAILURE,
    }
}
