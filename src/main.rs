use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use lif::app::Dashboard;
use lif::config::Config;
use lif::domain::{reminder_display, status_badge, streak_display, Priority};
use lif::logging;
use lif::notifications::{ChannelNotifier, LogNotifier};
use lif::persistence::{init_local_dir, JsonStore};
use lif::ticker::Ticker;
use std::thread;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lif")]
#[command(about = "Daily tasks with streaks, rolling todos and reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .lif directory in the current directory
    Init,
    /// Keep ticking: reset dailies at 3AM and announce reminders (default)
    Run,
    /// Show every task, todo and reminder
    Status,
    /// Run one reset sweep and expiry check, then exit
    Sweep,
    /// Manage daily tasks
    Daily {
        #[command(subcommand)]
        action: DailyAction,
    },
    /// Manage rolling todos
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// Manage reminders
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },
}

#[derive(Subcommand)]
enum DailyAction {
    /// Add a daily task
    Add {
        text: String,
        /// HIGH, MEDIUM or LOW
        #[arg(short, long, default_value = "MEDIUM")]
        priority: String,
        #[arg(short, long, default_value = "")]
        category: String,
        /// Free-text deadline label
        #[arg(short, long, default_value = "")]
        deadline: String,
    },
    /// Toggle a task between DONE and INCOMPLETE
    Done { id: String },
    /// Delete a task
    Remove { id: String },
    List,
}

#[derive(Subcommand)]
enum TodoAction {
    Add {
        text: String,
        #[arg(short, long, default_value = "MEDIUM")]
        priority: String,
        #[arg(short, long, default_value = "")]
        category: String,
        #[arg(short, long, default_value = "")]
        deadline: String,
    },
    Remove { id: String },
    List,
}

#[derive(Subcommand)]
enum ReminderAction {
    /// Add a reminder; SPEC is a countdown (30m, 2h, 1d) or a time (3:04PM, 15:04)
    Add {
        label: String,
        spec: String,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Replace the alarm or countdown text and re-arm
    Edit { id: String, spec: String },
    Start { id: String },
    Pause { id: String },
    Reset { id: String },
    Remove { id: String },
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    logging::init(config.log_level);
    for warning in &config.warnings {
        warn!("{}", warning);
    }

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("failed to read current directory")?;
            let local_dir = init_local_dir(&current_dir)?;
            println!("Initialized lif directory: {}", local_dir.display());
            println!();
            println!("lif will now keep its data in this directory.");
            Ok(())
        }
        Some(Commands::Run) | None => run(&config),
        Some(Commands::Status) => {
            let now = Local::now();
            let (store, mut dashboard) = open(&config, &now)?;
            print_dailies(&dashboard);
            println!();
            print_todos(&dashboard);
            println!();
            print_reminders(&dashboard, &now);
            dashboard.save(&store)?;
            Ok(())
        }
        Some(Commands::Sweep) => {
            let now = Local::now();
            let (store, mut dashboard) = open(&config, &now)?;
            let report = dashboard.tick_now(&LogNotifier);
            for event in &report.fired {
                println!("{}: {}", event.title(), event.body());
            }
            finish(&store, &mut dashboard, true)
        }
        Some(Commands::Daily { action }) => daily(&config, action),
        Some(Commands::Todo { action }) => todo(&config, action),
        Some(Commands::Reminder { action }) => reminder(&config, action),
    }
}

fn open(config: &Config, now: &DateTime<Local>) -> Result<(JsonStore, Dashboard)> {
    let path = config.data_file()?;
    info!(path = %path.display(), "using data file");
    let store = JsonStore::new(path);
    let dashboard = Dashboard::load(&store, now)?;
    Ok((store, dashboard))
}

/// Print the status line and persist. A failed action exits non-zero.
fn finish(store: &JsonStore, dashboard: &mut Dashboard, succeeded: bool) -> Result<()> {
    let status = dashboard.take_status();
    dashboard.save(store)?;
    match status {
        Some(message) if !succeeded => bail!(message),
        Some(message) => {
            println!("{}", message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn run(config: &Config) -> Result<()> {
    let now = Local::now();
    let (store, mut dashboard) = open(config, &now)?;
    eprintln!("Using data file: {}", store.path().display());

    let (notifier, events) = ChannelNotifier::new();
    thread::spawn(move || {
        for event in events {
            println!("🔔 {}: {}", event.title(), event.body());
        }
    });

    let mut ticker = Ticker::new(config.tick);
    loop {
        let now = ticker.wait();
        // Other `lif` invocations write the same file
        if let Err(err) = dashboard.reload_if_changed(&store, &now) {
            warn!("{:#}", err);
        }
        dashboard.tick(&now, &notifier);

        if let Some(message) = dashboard.take_status() {
            eprintln!("{}", message);
        }
        if let Err(err) = dashboard.save(&store) {
            // Keep ticking; the next change retries the write
            warn!("{:#}", err);
        }
    }
}

fn daily(config: &Config, action: DailyAction) -> Result<()> {
    let now = Local::now();
    let (store, mut dashboard) = open(config, &now)?;
    let succeeded = match action {
        DailyAction::Add {
            text,
            priority,
            category,
            deadline,
        } => dashboard
            .add_daily(&text, Priority::normalize(&priority), &category, &deadline)
            .is_some(),
        DailyAction::Done { id } => dashboard.toggle_daily(&id, &now).is_some(),
        DailyAction::Remove { id } => dashboard.remove_daily(&id).is_some(),
        DailyAction::List => {
            print_dailies(&dashboard);
            true
        }
    };
    finish(&store, &mut dashboard, succeeded)
}

fn todo(config: &Config, action: TodoAction) -> Result<()> {
    let now = Local::now();
    let (store, mut dashboard) = open(config, &now)?;
    let succeeded = match action {
        TodoAction::Add {
            text,
            priority,
            category,
            deadline,
        } => dashboard
            .add_todo(&text, Priority::normalize(&priority), &category, &deadline)
            .is_some(),
        TodoAction::Remove { id } => dashboard.remove_todo(&id).is_some(),
        TodoAction::List => {
            print_todos(&dashboard);
            true
        }
    };
    finish(&store, &mut dashboard, succeeded)
}

fn reminder(config: &Config, action: ReminderAction) -> Result<()> {
    let now = Local::now();
    let (store, mut dashboard) = open(config, &now)?;
    let succeeded = match action {
        ReminderAction::Add { label, spec, note } => {
            dashboard.add_reminder(&label, &note, &spec, &now).is_some()
        }
        ReminderAction::Edit { id, spec } => dashboard.edit_reminder(&id, &spec, &now).is_some(),
        ReminderAction::Start { id } => dashboard.start_reminder(&id, &now).is_some(),
        ReminderAction::Pause { id } => dashboard.pause_reminder(&id, &now).is_some(),
        ReminderAction::Reset { id } => dashboard.reset_reminder(&id, &now).is_some(),
        ReminderAction::Remove { id } => dashboard.remove_reminder(&id).is_some(),
        ReminderAction::List => {
            print_reminders(&dashboard, &now);
            true
        }
    };
    finish(&store, &mut dashboard, succeeded)
}

fn short_id(id: &uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

fn print_dailies(dashboard: &Dashboard) {
    println!("DAILY TASKS");
    if dashboard.data.dailies.is_empty() {
        println!("  (none)");
    }
    for task in &dashboard.data.dailies {
        println!(
            "  {}  {:<10}  {:<6}  {:<30}  {} (best {})",
            short_id(&task.id),
            status_badge(task),
            task.priority.to_tag(),
            task.text,
            streak_display(task),
            task.best_streak
        );
    }
}

fn print_todos(dashboard: &Dashboard) {
    println!("ROLLING TODOS");
    if dashboard.data.rolling_todos.is_empty() {
        println!("  (none)");
    }
    for todo in &dashboard.data.rolling_todos {
        println!(
            "  {}  {:<6}  {:<30}  {}  {}",
            short_id(&todo.id),
            todo.priority.to_tag(),
            todo.text,
            todo.category,
            todo.deadline
        );
    }
}

fn print_reminders(dashboard: &Dashboard, now: &DateTime<Local>) {
    println!("REMINDERS");
    if dashboard.data.reminders.is_empty() {
        println!("  (none)");
    }
    for reminder in &dashboard.data.reminders {
        println!(
            "  {}  {:<8}  {:<20}  {}  {}",
            short_id(&reminder.id),
            reminder.status.to_tag(),
            reminder.label,
            reminder_display(reminder, now),
            reminder.note
        );
    }
}
