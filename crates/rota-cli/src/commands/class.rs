use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use rota_core::models::{NewClassData, UpdateClassData};
use rota_core::repository::Repository;

use crate::cli::{ClassAction, ClassCommand};
use crate::util::{resolve_class_id, short_id};
use crate::views::table::{display_classes, ViewClass};

pub async fn class_command(repo: &impl Repository, command: ClassCommand) -> Result<()> {
    match command.action {
        ClassAction::Add(cmd) => {
            let class = repo
                .add_class(NewClassData {
                    name: cmd.name,
                    subject: cmd.subject,
                    level: cmd.level,
                    tutor: cmd.tutor,
                })
                .await?;

            let success_style = Style::new().green().bold();
            println!(
                "{} Created class: {}",
                "✓".style(success_style),
                class.name.bright_white().bold()
            );
            println!("  ID: {}", short_id(&class.id).yellow());
            Ok(())
        }
        ClassAction::List => {
            let classes = repo.find_classes().await?;
            let view: Vec<ViewClass> = classes
                .into_iter()
                .map(|c| ViewClass {
                    id: c.id,
                    name: c.name,
                    subject: c.subject,
                    level: c.level,
                    tutor: c.tutor,
                })
                .collect();
            display_classes(&view);
            Ok(())
        }
        ClassAction::Edit(cmd) => {
            let id = resolve_class_id(repo, &cmd.id).await?;

            let data = UpdateClassData {
                name: cmd.name,
                subject: if cmd.subject_clear {
                    Some(None)
                } else {
                    cmd.subject.map(Some)
                },
                level: if cmd.level_clear {
                    Some(None)
                } else {
                    cmd.level.map(Some)
                },
                tutor: if cmd.tutor_clear {
                    Some(None)
                } else {
                    cmd.tutor.map(Some)
                },
            };

            let class = repo.update_class(id, data).await?;
            println!(
                "{} Updated class: {}",
                "✓".green().bold(),
                class.name.bright_white().bold()
            );
            Ok(())
        }
        ClassAction::Delete(cmd) => {
            let id = resolve_class_id(repo, &cmd.id).await?;
            let class = repo
                .find_class_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Class not found"))?;

            if !cmd.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete class '{}' with all its patterns and events?",
                        class.name
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            repo.delete_class(id).await?;
            println!("{} Deleted class '{}'.", "✓".green().bold(), class.name);
            Ok(())
        }
    }
}
