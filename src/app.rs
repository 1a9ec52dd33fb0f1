use crate::domain::{Completion, DailyTask, Priority, Reminder, RollingTodo, Transition};
use crate::engine::{check_expiry, sweep};
use crate::notifications::{Notifier, ReminderFired};
use crate::persistence::{AppData, Revision, Store};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a single tick changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The daily reset sweep touched at least one task
    pub reset: bool,
    /// Reminders that expired on this tick, in collection order
    pub fired: Vec<ReminderFired>,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        self.reset || !self.fired.is_empty()
    }
}

/// Main application state
pub struct Dashboard {
    pub data: AppData,
    pub needs_save: bool,
    pub status: Option<String>,
    /// Store revision the in-memory data was last loaded from or saved as
    revision: Option<Revision>,
}

impl Dashboard {
    pub fn new(data: AppData) -> Self {
        Self {
            data,
            needs_save: false,
            status: None,
            revision: None,
        }
    }

    /// Load from `store`, arm reminders that were never armed and run the
    /// reset sweep once so the first view is already current
    pub fn load<S: Store>(store: &S, now: &DateTime<Local>) -> Result<Self> {
        let mut dashboard = Self::new(AppData::default());
        dashboard.replace_from(store, now)?;
        Ok(dashboard)
    }

    /// Pick up writes made by another process since the last load or save.
    /// Returns true when the data was reloaded.
    ///
    /// Unsaved changes held in memory are dropped in favour of the file.
    pub fn reload_if_changed<S: Store>(&mut self, store: &S, now: &DateTime<Local>) -> Result<bool> {
        let current = store.revision().context("failed to check data file")?;
        if current.is_none() || current == self.revision {
            return Ok(false);
        }
        if self.needs_save {
            warn!("data file changed on disk, discarding unsaved changes");
        }
        self.replace_from(store, now)?;
        info!("data file changed on disk, reloaded");
        Ok(true)
    }

    fn replace_from<S: Store>(&mut self, store: &S, now: &DateTime<Local>) -> Result<()> {
        self.data = store.load().context("failed to load dashboard data")?;
        self.revision = store.revision().context("failed to check data file")?;

        let armed = self.data.arm_pending_reminders(now);
        let reset = sweep(&mut self.data.dailies, now);
        self.needs_save = armed || reset;

        debug!(
            dailies = self.data.dailies.len(),
            todos = self.data.rolling_todos.len(),
            reminders = self.data.reminders.len(),
            "dashboard loaded"
        );
        Ok(())
    }

    /// Run the reset sweep, then the expiry check, handing every fired
    /// reminder to `notifier`
    pub fn tick<N: Notifier + ?Sized>(&mut self, now: &DateTime<Local>, notifier: &N) -> TickReport {
        let reset = sweep(&mut self.data.dailies, now);
        if reset {
            self.status = Some("Daily tasks reset at 3AM".to_string());
        }

        let fired = check_expiry(&mut self.data.reminders, now);
        for event in &fired {
            notifier.notify(event);
            self.status = Some(format!("Reminder: {}", event.label));
        }

        let report = TickReport { reset, fired };
        if report.changed() {
            self.needs_save = true;
        }
        report
    }

    /// Tick against the wall clock
    pub fn tick_now<N: Notifier + ?Sized>(&mut self, notifier: &N) -> TickReport {
        self.tick(&Local::now(), notifier)
    }

    /// Persist if anything changed since the last save. Returns whether a
    /// write happened.
    pub fn save<S: Store>(&mut self, store: &S) -> Result<bool> {
        if !self.needs_save {
            return Ok(false);
        }
        store
            .save(&self.data)
            .context("failed to save dashboard data")?;
        self.revision = store.revision().context("failed to check data file")?;
        self.needs_save = false;
        Ok(true)
    }

    /// Take the pending status message, leaving none behind
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(status = %message, "status");
        self.status = Some(message);
    }

    // Daily tasks

    pub fn add_daily(
        &mut self,
        text: &str,
        priority: Priority,
        category: &str,
        deadline: &str,
    ) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            self.set_status("Task text cannot be empty");
            return None;
        }
        let task = DailyTask::new(text, priority, category.trim(), deadline.trim());
        let id = task.id;
        info!(task_id = %id, "daily task added");
        self.data.dailies.push(task);
        self.needs_save = true;
        self.set_status("Daily task added");
        Some(id)
    }

    /// Flip a daily task between DONE and INCOMPLETE
    pub fn toggle_daily(&mut self, id: &str, now: &DateTime<Local>) -> Option<Completion> {
        let index = self.lookup(id, Kind::Daily)?;
        let task = &mut self.data.dailies[index];
        let before = task.status;
        let completion = task.toggle(now);
        if completion != Completion::AlreadyDoneToday || task.status != before {
            self.needs_save = true;
        }
        self.set_status(completion.message());
        Some(completion)
    }

    pub fn remove_daily(&mut self, id: &str) -> Option<DailyTask> {
        let index = self.lookup(id, Kind::Daily)?;
        let task = self.data.dailies.remove(index);
        self.needs_save = true;
        self.set_status(format!("Removed: {}", task.text));
        Some(task)
    }

    // Rolling todos

    pub fn add_todo(
        &mut self,
        text: &str,
        priority: Priority,
        category: &str,
        deadline: &str,
    ) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            self.set_status("Todo text cannot be empty");
            return None;
        }
        let todo = RollingTodo::new(text, priority, category.trim(), deadline.trim());
        let id = todo.id;
        self.data.rolling_todos.push(todo);
        self.needs_save = true;
        self.set_status("Todo added");
        Some(id)
    }

    pub fn remove_todo(&mut self, id: &str) -> Option<RollingTodo> {
        let index = self.lookup(id, Kind::Todo)?;
        let todo = self.data.rolling_todos.remove(index);
        self.needs_save = true;
        self.set_status(format!("Removed: {}", todo.text));
        Some(todo)
    }

    // Reminders

    /// Create a reminder and arm it. An unparseable spec still creates the
    /// reminder, left inactive.
    pub fn add_reminder(
        &mut self,
        label: &str,
        note: &str,
        spec: &str,
        now: &DateTime<Local>,
    ) -> Option<Uuid> {
        let label = label.trim();
        if label.is_empty() {
            self.set_status("Reminder label cannot be empty");
            return None;
        }
        let reminder = Reminder::new(label, note.trim(), spec.trim(), now);
        let transition = if reminder.status.is_armed() {
            Transition::Armed
        } else {
            Transition::Unparseable
        };
        let id = reminder.id;
        info!(reminder_id = %id, "reminder added");
        self.set_status(transition.message(&reminder.label, &reminder.spec));
        self.data.reminders.push(reminder);
        self.needs_save = true;
        Some(id)
    }

    /// Replace a reminder's spec and re-arm it
    pub fn edit_reminder(&mut self, id: &str, spec: &str, now: &DateTime<Local>) -> Option<Transition> {
        self.apply_transition(id, |reminder| reminder.edit_spec(spec.trim(), now))
    }

    pub fn start_reminder(&mut self, id: &str, now: &DateTime<Local>) -> Option<Transition> {
        self.apply_transition(id, |reminder| reminder.start(now))
    }

    pub fn pause_reminder(&mut self, id: &str, now: &DateTime<Local>) -> Option<Transition> {
        self.apply_transition(id, |reminder| reminder.pause(now))
    }

    pub fn reset_reminder(&mut self, id: &str, now: &DateTime<Local>) -> Option<Transition> {
        self.apply_transition(id, |reminder| reminder.reset(now))
    }

    pub fn remove_reminder(&mut self, id: &str) -> Option<Reminder> {
        let index = self.lookup(id, Kind::Reminder)?;
        let reminder = self.data.reminders.remove(index);
        self.needs_save = true;
        self.set_status(format!("Removed: {}", reminder.label));
        Some(reminder)
    }

    fn apply_transition<F>(&mut self, id: &str, f: F) -> Option<Transition>
    where
        F: FnOnce(&mut Reminder) -> Transition,
    {
        let index = self.lookup(id, Kind::Reminder)?;
        let reminder = &mut self.data.reminders[index];
        let transition = f(reminder);
        let message = transition.message(&reminder.label, &reminder.spec);
        debug!(reminder_id = %reminder.id, ?transition, "reminder transition");
        if !transition.is_noop() {
            self.needs_save = true;
        }
        self.set_status(message);
        Some(transition)
    }

    /// Resolve an id or unique id prefix to an index, reporting misses
    /// through the status line
    fn lookup(&mut self, id: &str, kind: Kind) -> Option<usize> {
        let ids: Vec<Uuid> = match kind {
            Kind::Daily => self.data.dailies.iter().map(|t| t.id).collect(),
            Kind::Todo => self.data.rolling_todos.iter().map(|t| t.id).collect(),
            Kind::Reminder => self.data.reminders.iter().map(|r| r.id).collect(),
        };
        match resolve_prefix(&ids, id) {
            Ok(index) => Some(index),
            Err(message) => {
                self.set_status(format!("{}: {}", kind.noun(), message));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Daily,
    Todo,
    Reminder,
}

impl Kind {
    fn noun(&self) -> &'static str {
        match self {
            Self::Daily => "Daily task",
            Self::Todo => "Todo",
            Self::Reminder => "Reminder",
        }
    }
}

/// Index of the single id starting with `prefix` (hyphens optional)
fn resolve_prefix(ids: &[Uuid], prefix: &str) -> Result<usize, String> {
    let needle: String = prefix
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();
    if needle.is_empty() {
        return Err("no id given".to_string());
    }

    let mut matches = ids
        .iter()
        .enumerate()
        .filter(|(_, id)| id.simple().to_string().starts_with(&needle))
        .map(|(index, _)| index);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (None, _) => Err(format!("no match for '{}'", prefix.trim())),
        (Some(_), Some(_)) => Err(format!("'{}' is ambiguous", prefix.trim())),
    }
}
