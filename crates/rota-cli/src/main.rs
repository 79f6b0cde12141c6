use clap::Parser;
use owo_colors::{OwoColorize, Style};
use rota_core::db;
use rota_core::error::CoreError;
use rota_core::repository::SqliteRepository;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Class(command) => {
            commands::class::class_command(&repository, command).await
        }
        cli::Commands::Pattern(command) => {
            commands::pattern::pattern_command(&repository, command).await
        }
        cli::Commands::Schedule(command) => {
            commands::schedule::show_schedule(&repository, command, &config).await
        }
        cli::Commands::Retime(command) => {
            commands::occurrence::retime_occurrence(&repository, command).await
        }
        cli::Commands::Cancel(command) => {
            commands::occurrence::cancel_occurrence(&repository, command).await
        }
        cli::Commands::Move(command) => {
            commands::occurrence::move_occurrence(&repository, command).await
        }
        cli::Commands::Holiday(command) => {
            commands::holiday::holiday_command(&repository, command).await
        }
        cli::Commands::Event(command) => {
            commands::event::event_command(&repository, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidWindow(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(candidates) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, name) in candidates {
                    eprintln!("  {} ({})", id.yellow(), name);
                }
            }
            CoreError::OverrideWriteFailed {
                step,
                of,
                pattern_id,
                date,
                source,
            } => {
                eprintln!(
                    "{} Write {} of {} failed for pattern {} on {}: {}",
                    "Error:".style(error_style),
                    step,
                    of,
                    &pattern_id.to_string()[..7],
                    date,
                    source
                );
                if *of == 2 && *step == 2 {
                    eprintln!(
                        "{}",
                        "The cancellation on the original date was already applied; \
                         re-run the move or cancel it back."
                            .yellow()
                    );
                }
            }
            other => {
                eprintln!("{} {}", "Error:".style(error_style), other);
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
