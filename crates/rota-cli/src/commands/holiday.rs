use anyhow::Result;
use owo_colors::OwoColorize;
use rota_core::repository::Repository;

use crate::cli::{HolidayAction, HolidayCommand};
use crate::parser::parse_date;
use crate::views::table::{display_holidays, ViewHoliday};

pub async fn holiday_command(repo: &impl Repository, command: HolidayCommand) -> Result<()> {
    match command.action {
        HolidayAction::Add(cmd) => {
            let date = parse_date(&cmd.date)?;
            let holiday = repo.add_holiday(date, cmd.name).await?;

            println!(
                "{} Added holiday on {}{}",
                "✓".green().bold(),
                holiday.date.to_string().bright_white().bold(),
                holiday
                    .name
                    .map(|n| format!(" ({})", n))
                    .unwrap_or_default(),
            );
            println!("  Nothing will be scheduled on that date.");
            Ok(())
        }
        HolidayAction::Remove(cmd) => {
            let date = parse_date(&cmd.date)?;
            repo.remove_holiday(date).await?;
            println!(
                "{} Removed holiday on {}",
                "✓".green().bold(),
                date.to_string().bright_white().bold(),
            );
            Ok(())
        }
        HolidayAction::List => {
            let holidays = repo.find_holidays().await?;
            let view: Vec<ViewHoliday> = holidays
                .into_iter()
                .map(|h| ViewHoliday {
                    date: h.date,
                    name: h.name,
                })
                .collect();
            display_holidays(&view);
            Ok(())
        }
    }
}
