use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use rota_core::repository::Repository;
use rota_core::schedule::{OccurrenceKind, ScheduleWindow};
use uuid::Uuid;

use crate::cli::ScheduleCommand;
use crate::config::Config;
use crate::parser::parse_date;
use crate::views::table::{display_occurrences, ViewOccurrence};

pub async fn show_schedule(
    repo: &impl Repository,
    command: ScheduleCommand,
    config: &Config,
) -> Result<()> {
    let from = match &command.from {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let window = match (&command.to, command.days) {
        (Some(to), _) => ScheduleWindow::new(from, parse_date(to)?)?,
        (None, Some(days)) => ScheduleWindow::starting_at(from, days)?,
        (None, None) => ScheduleWindow::starting_at(from, config.lookahead_days)?,
    };

    let resolution = repo.resolve_schedule(window).await?;

    let classes = repo.find_classes().await?;
    let names: HashMap<Uuid, String> = classes.into_iter().map(|c| (c.id, c.name)).collect();

    let view: Vec<ViewOccurrence> = resolution
        .occurrences
        .iter()
        .map(|occ| ViewOccurrence {
            date: occ.date,
            starts_at: occ.starts_at,
            ends_at: occ.ends_at,
            class_name: occ.class_id.and_then(|id| names.get(&id).cloned()),
            title: occ.title.clone(),
            is_adhoc: occ.kind == OccurrenceKind::Event,
            moved: occ.moved,
            retimed: occ.override_id.is_some() && !occ.moved,
            badge: occ.badge.as_ref().map(|b| format!("{}: {}", b.kind, b.title)),
        })
        .collect();

    println!(
        "Schedule {} to {} (exclusive)",
        window.start().to_string().bright_white().bold(),
        window.end().to_string().bright_white().bold(),
    );
    display_occurrences(&view);

    for issue in &resolution.issues {
        let short = issue.pattern_id.to_string();
        eprintln!(
            "{} pattern {}: {}",
            "Warning:".yellow().bold(),
            (&short[..7]).yellow(),
            issue.message
        );
    }

    Ok(())
}
