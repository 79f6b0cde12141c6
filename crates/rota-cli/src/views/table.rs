use chrono::{Datelike, NaiveDate, NaiveTime};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use rota_core::models::{EventKind, PatternDay};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ViewOccurrence {
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub class_name: Option<String>,
    pub title: Option<String>,
    pub is_adhoc: bool,
    pub moved: bool,
    pub retimed: bool,
    pub badge: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewClass {
    pub id: Uuid,
    pub name: String,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub tutor: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewPattern {
    pub id: Uuid,
    pub class_name: String,
    pub weekday: PatternDay,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub position: i64,
}

#[derive(Debug, Clone)]
pub struct ViewHoliday {
    pub date: NaiveDate,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub id: Uuid,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub class_name: Option<String>,
}

fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

fn format_times(starts_at: NaiveTime, ends_at: NaiveTime) -> String {
    format!(
        "{}-{}",
        starts_at.format("%H:%M"),
        ends_at.format("%H:%M")
    )
}

pub fn display_occurrences(occurrences: &[ViewOccurrence]) {
    if occurrences.is_empty() {
        println!("Nothing scheduled in this window.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Day", "Time", "Class", "Notes"]);

    for occ in occurrences {
        let mut row = Row::new();
        row.add_cell(Cell::new(occ.date.to_string()));
        row.add_cell(Cell::new(weekday_label(occ.date)));
        row.add_cell(Cell::new(format_times(occ.starts_at, occ.ends_at)));

        let name = occ
            .class_name
            .clone()
            .or_else(|| occ.title.clone())
            .unwrap_or_else(|| "(school-wide)".to_string());
        let mut name_cell = Cell::new(&name);
        if occ.is_adhoc {
            name_cell = name_cell.fg(Color::Cyan);
        }
        row.add_cell(name_cell);

        let mut notes = Vec::new();
        if occ.is_adhoc {
            if let Some(title) = &occ.title {
                if occ.class_name.is_some() {
                    notes.push(title.clone());
                }
            }
        }
        if occ.moved {
            notes.push("moved".to_string());
        } else if occ.retimed {
            notes.push("retimed".to_string());
        }
        if let Some(badge) = &occ.badge {
            notes.push(badge.clone());
        }

        let notes_text = notes.join(", ");
        let notes_cell = if occ.moved {
            Cell::new(notes_text).fg(Color::Yellow)
        } else if occ.badge.is_some() {
            Cell::new(notes_text).fg(Color::Magenta).add_attribute(Attribute::Bold)
        } else {
            Cell::new(notes_text)
        };
        row.add_cell(notes_cell);

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_classes(classes: &[ViewClass]) {
    if classes.is_empty() {
        println!("No classes found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Subject", "Level", "Tutor"]);

    for class in classes {
        let mut row = Row::new();
        row.add_cell(Cell::new(&class.id.to_string()[..7]));
        row.add_cell(Cell::new(&class.name).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(class.subject.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(class.level.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(class.tutor.as_deref().unwrap_or("None")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_patterns(patterns: &[ViewPattern]) {
    if patterns.is_empty() {
        println!("No patterns found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Class", "Day", "Time", "Valid", "Pos"]);

    for pattern in patterns {
        let mut row = Row::new();
        row.add_cell(Cell::new(&pattern.id.to_string()[..7]));
        row.add_cell(Cell::new(&pattern.class_name));
        row.add_cell(Cell::new(pattern.weekday.to_string()));
        row.add_cell(Cell::new(format_times(pattern.starts_at, pattern.ends_at)));

        let validity = match (pattern.valid_from, pattern.valid_until) {
            (None, None) => "always".to_string(),
            (Some(from), None) => format!("from {}", from),
            (None, Some(until)) => format!("until {}", until),
            (Some(from), Some(until)) => format!("{} to {}", from, until),
        };
        row.add_cell(Cell::new(validity));
        row.add_cell(Cell::new(pattern.position.to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_holidays(holidays: &[ViewHoliday]) {
    if holidays.is_empty() {
        println!("No holidays found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Day", "Name"]);

    for holiday in holidays {
        let mut row = Row::new();
        row.add_cell(Cell::new(holiday.date.to_string()));
        row.add_cell(Cell::new(weekday_label(holiday.date)));
        row.add_cell(Cell::new(holiday.name.as_deref().unwrap_or("")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_events(events: &[ViewEvent]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Kind", "Date", "Time", "Class"]);

    for event in events {
        let mut row = Row::new();
        row.add_cell(Cell::new(&event.id.to_string()[..7]));
        row.add_cell(Cell::new(&event.title).add_attribute(Attribute::Bold));

        let kind_cell = match event.kind {
            EventKind::Test => Cell::new("test").fg(Color::Red),
            EventKind::Event => Cell::new("event").fg(Color::Cyan),
        };
        row.add_cell(kind_cell);

        row.add_cell(Cell::new(event.date.to_string()));
        row.add_cell(Cell::new(format_times(event.starts_at, event.ends_at)));
        row.add_cell(Cell::new(
            event.class_name.as_deref().unwrap_or("school-wide"),
        ));
        table.add_row(row);
    }

    println!("{table}");
}
