use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use rota_core::models::{EventKind, NewEventData};
use rota_core::repository::Repository;
use uuid::Uuid;

use crate::cli::{EventAction, EventCommand};
use crate::parser::{parse_date, parse_time};
use crate::util::{resolve_class_id, resolve_event_id, short_id};
use crate::views::table::{display_events, ViewEvent};

pub async fn event_command(repo: &impl Repository, command: EventCommand) -> Result<()> {
    match command.action {
        EventAction::Add(cmd) => {
            let class_id = match cmd.class {
                Some(class) => Some(resolve_class_id(repo, &class).await?),
                None => None,
            };

            let event = repo
                .add_event(NewEventData {
                    class_id,
                    date: parse_date(&cmd.date)?,
                    starts_at: parse_time(&cmd.start)?,
                    ends_at: parse_time(&cmd.end)?,
                    title: cmd.title,
                    kind: EventKind::from_str(&cmd.kind)?,
                })
                .await?;

            println!(
                "{} Created {}: {} on {}",
                "✓".green().bold(),
                event.kind,
                event.title.bright_white().bold(),
                event.date,
            );
            println!("  ID: {}", short_id(&event.id).yellow());
            if event.class_id.is_some() {
                println!("  It will fold into a coinciding class occurrence.");
            }
            Ok(())
        }
        EventAction::List => {
            let events = repo.find_events().await?;
            let classes = repo.find_classes().await?;
            let names: HashMap<Uuid, String> =
                classes.into_iter().map(|c| (c.id, c.name)).collect();

            let view: Vec<ViewEvent> = events
                .into_iter()
                .map(|e| ViewEvent {
                    id: e.id,
                    title: e.title,
                    kind: e.kind,
                    date: e.date,
                    starts_at: e.starts_at,
                    ends_at: e.ends_at,
                    class_name: e.class_id.and_then(|id| names.get(&id).cloned()),
                })
                .collect();
            display_events(&view);
            Ok(())
        }
        EventAction::Delete(cmd) => {
            let id = resolve_event_id(repo, &cmd.id).await?;
            let event = repo
                .find_event_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Event not found"))?;

            if !cmd.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!("Delete event '{}'?", event.title))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            repo.delete_event(id).await?;
            println!("{} Deleted event '{}'.", "✓".green().bold(), event.title);
            Ok(())
        }
    }
}
