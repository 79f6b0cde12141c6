use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rota_core::error::CoreError;
use rota_core::repository::Repository;
use rota_core::schedule::{plan_mutation, Occurrence, OccurrenceChange, ScheduleWindow};
use uuid::Uuid;

use crate::cli::{CancelCommand, MoveCommand, RetimeCommand};
use crate::parser::{parse_date, parse_time};
use crate::util::resolve_pattern_id;

/// Resolves the single occurrence of `pattern_id` on `date`, going through
/// the full engine so the occurrence carries the applied override identity.
async fn resolve_occurrence(
    repo: &impl Repository,
    pattern_id: Uuid,
    date: NaiveDate,
) -> Result<Occurrence> {
    let window = ScheduleWindow::starting_at(date, 1)?;
    let resolution = repo.resolve_schedule(window).await?;

    resolution
        .occurrences
        .into_iter()
        .find(|occ| occ.pattern_id == Some(pattern_id) && occ.date == date)
        .ok_or_else(|| {
            anyhow!(CoreError::NotFound(format!(
                "No occurrence of this pattern on {} (cancelled, holiday, or not scheduled)",
                date
            )))
        })
}

async fn apply_plan(
    repo: &impl Repository,
    pattern_id: Uuid,
    occurrence: &Occurrence,
    change: OccurrenceChange,
) -> Result<()> {
    let existing = repo.find_overrides_for_pattern(pattern_id).await?;
    let writes = plan_mutation(occurrence, change, &existing)?;
    repo.apply_override_writes(writes).await?;
    Ok(())
}

pub async fn retime_occurrence(repo: &impl Repository, command: RetimeCommand) -> Result<()> {
    let pattern_id = resolve_pattern_id(repo, &command.pattern).await?;
    let date = parse_date(&command.date)?;
    let occurrence = resolve_occurrence(repo, pattern_id, date).await?;

    let starts_at = parse_time(&command.start)?;
    let ends_at = parse_time(&command.end)?;
    apply_plan(
        repo,
        pattern_id,
        &occurrence,
        OccurrenceChange::Retime { starts_at, ends_at },
    )
    .await?;

    println!(
        "{} Retimed {} to {}-{}",
        "✓".green().bold(),
        date.to_string().bright_white().bold(),
        starts_at.format("%H:%M"),
        ends_at.format("%H:%M"),
    );
    println!("  The weekly pattern itself is unchanged.");
    Ok(())
}

pub async fn cancel_occurrence(repo: &impl Repository, command: CancelCommand) -> Result<()> {
    let pattern_id = resolve_pattern_id(repo, &command.pattern).await?;
    let date = parse_date(&command.date)?;
    let occurrence = resolve_occurrence(repo, pattern_id, date).await?;

    apply_plan(repo, pattern_id, &occurrence, OccurrenceChange::CancelOne).await?;

    println!(
        "{} Cancelled the occurrence on {}",
        "✓".green().bold(),
        date.to_string().bright_white().bold(),
    );
    println!("  Following weeks continue as scheduled.");
    Ok(())
}

pub async fn move_occurrence(repo: &impl Repository, command: MoveCommand) -> Result<()> {
    let pattern_id = resolve_pattern_id(repo, &command.pattern).await?;
    let date = parse_date(&command.date)?;
    let occurrence = resolve_occurrence(repo, pattern_id, date).await?;

    let new_date = parse_date(&command.to)?;
    let starts_at = command.start.as_deref().map(parse_time).transpose()?;
    let ends_at = command.end.as_deref().map(parse_time).transpose()?;

    apply_plan(
        repo,
        pattern_id,
        &occurrence,
        OccurrenceChange::MoveTo {
            date: new_date,
            starts_at,
            ends_at,
        },
    )
    .await?;

    println!(
        "{} Moved {} to {}",
        "✓".green().bold(),
        date.to_string().bright_white().bold(),
        new_date.to_string().bright_white().bold(),
    );
    match (starts_at, ends_at) {
        (Some(s), Some(e)) => println!("  New times: {}-{}", s.format("%H:%M"), e.format("%H:%M")),
        _ => println!("  Base pattern times apply on the new date."),
    }
    Ok(())
}
