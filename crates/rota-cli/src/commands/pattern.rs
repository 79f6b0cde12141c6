use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use rota_core::models::{NewPatternData, PatternDay, UpdatePatternData};
use rota_core::repository::Repository;
use uuid::Uuid;

use crate::cli::{PatternAction, PatternCommand};
use crate::parser::{parse_date, parse_time};
use crate::util::{resolve_class_id, resolve_pattern_id, short_id};
use crate::views::table::{display_patterns, ViewPattern};

pub async fn pattern_command(repo: &impl Repository, command: PatternCommand) -> Result<()> {
    match command.action {
        PatternAction::Add(cmd) => {
            let class_id = resolve_class_id(repo, &cmd.class).await?;
            let weekday = PatternDay::from_str(&cmd.day)?;

            let pattern = repo
                .add_pattern(NewPatternData {
                    class_id,
                    weekday,
                    starts_at: parse_time(&cmd.start)?,
                    ends_at: parse_time(&cmd.end)?,
                    valid_from: cmd.from.as_deref().map(parse_date).transpose()?,
                    valid_until: cmd.until.as_deref().map(parse_date).transpose()?,
                    position: cmd.position,
                })
                .await?;

            println!(
                "{} Created pattern: {} {}-{}",
                "✓".green().bold(),
                pattern.weekday.to_string().bright_white().bold(),
                pattern.starts_at.format("%H:%M"),
                pattern.ends_at.format("%H:%M"),
            );
            println!("  ID: {}", short_id(&pattern.id).yellow());
            Ok(())
        }
        PatternAction::List(cmd) => {
            let patterns = match cmd.class {
                Some(class) => {
                    let class_id = resolve_class_id(repo, &class).await?;
                    repo.find_patterns_for_class(class_id).await?
                }
                None => repo.find_patterns().await?,
            };

            let classes = repo.find_classes().await?;
            let names: HashMap<Uuid, String> =
                classes.into_iter().map(|c| (c.id, c.name)).collect();

            let view: Vec<ViewPattern> = patterns
                .into_iter()
                .map(|p| ViewPattern {
                    id: p.id,
                    class_name: names
                        .get(&p.class_id)
                        .cloned()
                        .unwrap_or_else(|| "?".to_string()),
                    weekday: p.weekday,
                    starts_at: p.starts_at,
                    ends_at: p.ends_at,
                    valid_from: p.valid_from,
                    valid_until: p.valid_until,
                    position: p.position,
                })
                .collect();
            display_patterns(&view);
            Ok(())
        }
        PatternAction::Edit(cmd) => {
            let id = resolve_pattern_id(repo, &cmd.id).await?;

            let data = UpdatePatternData {
                weekday: cmd.day.as_deref().map(PatternDay::from_str).transpose()?,
                starts_at: cmd.start.as_deref().map(parse_time).transpose()?,
                ends_at: cmd.end.as_deref().map(parse_time).transpose()?,
                valid_from: if cmd.from_clear {
                    Some(None)
                } else {
                    cmd.from.as_deref().map(parse_date).transpose()?.map(Some)
                },
                valid_until: if cmd.until_clear {
                    Some(None)
                } else {
                    cmd.until.as_deref().map(parse_date).transpose()?.map(Some)
                },
                position: cmd.position,
            };

            let pattern = repo.update_pattern(id, data).await?;
            println!(
                "{} Updated pattern: {} {}-{}",
                "✓".green().bold(),
                pattern.weekday,
                pattern.starts_at.format("%H:%M"),
                pattern.ends_at.format("%H:%M"),
            );
            Ok(())
        }
        PatternAction::Delete(cmd) => {
            let id = resolve_pattern_id(repo, &cmd.id).await?;
            let pattern = repo
                .find_pattern_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Pattern not found"))?;

            if !cmd.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete pattern {} {}-{} and its overrides?",
                        pattern.weekday,
                        pattern.starts_at.format("%H:%M"),
                        pattern.ends_at.format("%H:%M"),
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            repo.delete_pattern(id).await?;
            println!("{} Deleted pattern.", "✓".green().bold());
            Ok(())
        }
    }
}
