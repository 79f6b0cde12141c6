use clap::{Parser, Subcommand};

/// School timetable administration from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage classes
    Class(ClassCommand),
    /// Manage weekly patterns
    Pattern(PatternCommand),
    /// Show the resolved schedule for a window
    Schedule(ScheduleCommand),
    /// Change the times of one occurrence
    Retime(RetimeCommand),
    /// Cancel one occurrence; the weekly series continues
    Cancel(CancelCommand),
    /// Move one occurrence to a different date
    Move(MoveCommand),
    /// Manage holidays
    Holiday(HolidayCommand),
    /// Manage ad-hoc events (tests, school events)
    Event(EventCommand),
}

// ----------------------------------------------------------------------------
// Classes
// ----------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
pub struct ClassCommand {
    #[command(subcommand)]
    pub action: ClassAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ClassAction {
    /// Add a new class
    Add(ClassAddCommand),
    /// List classes
    List,
    /// Edit a class
    Edit(ClassEditCommand),
    /// Delete a class and everything scheduled for it
    Delete(ClassDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassAddCommand {
    /// The name of the class
    pub name: String,
    /// Subject taught
    #[clap(short, long)]
    pub subject: Option<String>,
    /// Level (e.g. B2, grade 7)
    #[clap(short, long)]
    pub level: Option<String>,
    /// Tutor name
    #[clap(short, long)]
    pub tutor: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ClassEditCommand {
    /// The ID of the class to edit
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long, conflicts_with = "subject")]
    pub subject_clear: bool,

    #[arg(long)]
    pub level: Option<String>,
    #[arg(long, conflicts_with = "level")]
    pub level_clear: bool,

    #[arg(long)]
    pub tutor: Option<String>,
    #[arg(long, conflicts_with = "tutor")]
    pub tutor_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ClassDeleteCommand {
    /// The ID of the class to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

// ----------------------------------------------------------------------------
// Patterns
// ----------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
pub struct PatternCommand {
    #[command(subcommand)]
    pub action: PatternAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PatternAction {
    /// Add a weekly pattern to a class
    Add(PatternAddCommand),
    /// List weekly patterns
    List(PatternListCommand),
    /// Edit a weekly pattern
    Edit(PatternEditCommand),
    /// Delete a weekly pattern and its overrides
    Delete(PatternDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct PatternAddCommand {
    /// The ID of the class the pattern belongs to
    pub class: String,
    /// Day of week (mon..sun)
    #[clap(short, long)]
    pub day: String,
    /// Start time (HH:MM)
    #[clap(short, long)]
    pub start: String,
    /// End time (HH:MM)
    #[clap(short, long)]
    pub end: String,
    /// First date the pattern is active
    #[clap(long)]
    pub from: Option<String>,
    /// Last date the pattern is active (inclusive)
    #[clap(long)]
    pub until: Option<String>,
    /// Ordering position among same-day patterns
    #[clap(long)]
    pub position: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct PatternListCommand {
    /// Only patterns of this class
    #[clap(short, long)]
    pub class: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PatternEditCommand {
    /// The ID of the pattern to edit
    pub id: String,

    /// Day of week (mon..sun)
    #[arg(long)]
    pub day: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub from: Option<String>,
    #[arg(long, conflicts_with = "from")]
    pub from_clear: bool,

    #[arg(long)]
    pub until: Option<String>,
    #[arg(long, conflicts_with = "until")]
    pub until_clear: bool,

    #[arg(long)]
    pub position: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct PatternDeleteCommand {
    /// The ID of the pattern to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

// ----------------------------------------------------------------------------
// Schedule & occurrence edits
// ----------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
pub struct ScheduleCommand {
    /// First date of the window (defaults to today)
    #[clap(long)]
    pub from: Option<String>,
    /// Exclusive end date of the window
    #[clap(long, conflicts_with = "days")]
    pub to: Option<String>,
    /// Window length in days (defaults to the configured lookahead)
    #[clap(long)]
    pub days: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct RetimeCommand {
    /// The ID of the pattern the occurrence belongs to
    pub pattern: String,
    /// The occurrence date
    pub date: String,
    /// New start time (HH:MM)
    #[clap(short, long)]
    pub start: String,
    /// New end time (HH:MM)
    #[clap(short, long)]
    pub end: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CancelCommand {
    /// The ID of the pattern the occurrence belongs to
    pub pattern: String,
    /// The occurrence date
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// The ID of the pattern the occurrence belongs to
    pub pattern: String,
    /// The occurrence date
    pub date: String,
    /// The new date
    #[clap(long)]
    pub to: String,
    /// Start time on the new date (HH:MM); keeps base times when omitted
    #[clap(short, long, requires = "end")]
    pub start: Option<String>,
    /// End time on the new date (HH:MM)
    #[clap(short, long, requires = "start")]
    pub end: Option<String>,
}

// ----------------------------------------------------------------------------
// Holidays & ad-hoc events
// ----------------------------------------------------------------------------

#[derive(Parser, Debug, Clone)]
pub struct HolidayCommand {
    #[command(subcommand)]
    pub action: HolidayAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HolidayAction {
    /// Exclude a date school-wide
    Add(HolidayAddCommand),
    /// Remove an excluded date
    Remove(HolidayRemoveCommand),
    /// List holidays
    List,
}

#[derive(Parser, Debug, Clone)]
pub struct HolidayAddCommand {
    /// The date to exclude
    pub date: String,
    /// Display name
    #[clap(short, long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HolidayRemoveCommand {
    /// The date to re-include
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EventCommand {
    #[command(subcommand)]
    pub action: EventAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EventAction {
    /// Add a single-date event
    Add(EventAddCommand),
    /// List events
    List,
    /// Delete an event
    Delete(EventDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct EventAddCommand {
    /// Event title
    pub title: String,
    /// Event date
    pub date: String,
    /// Start time (HH:MM)
    #[clap(short, long)]
    pub start: String,
    /// End time (HH:MM)
    #[clap(short, long)]
    pub end: String,
    /// Owning class; omit for a school-wide event
    #[clap(short, long)]
    pub class: Option<String>,
    /// Kind of event (test|event)
    #[clap(short, long, default_value = "event")]
    pub kind: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EventDeleteCommand {
    /// The ID of the event to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}
