use super::enums::ReminderStatus;
use crate::notifications::ReminderFired;
use crate::persistence::millis;
use crate::time::parse_spec;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of a reminder transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Created or edited with a parseable spec
    Armed,
    /// Left `inactive` and armed
    Started,
    /// Left `paused` with the banked time restored
    Resumed,
    Paused,
    Reset,
    /// Spec could not be parsed; the reminder is `inactive`
    Unparseable,
    AlreadyActive,
    /// `start` on a reminder that already fired
    AlreadyExpired,
    /// `pause` on a reminder that is not running
    NotActive,
}

impl Transition {
    /// True when the request was refused and nothing changed
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Self::AlreadyActive | Self::AlreadyExpired | Self::NotActive
        )
    }

    /// User-facing status line for the reminder called `label`
    pub fn message(&self, label: &str, spec: &str) -> String {
        match self {
            Self::Armed => format!("Armed: {}", label),
            Self::Started => format!("Started: {}", label),
            Self::Resumed => format!("Resumed: {}", label),
            Self::Paused => format!("Paused: {}", label),
            Self::Reset => format!("Reset: {}", label),
            Self::Unparseable => format!("Could not parse '{}', please edit", spec),
            Self::AlreadyActive => format!("{} is already active", label),
            Self::AlreadyExpired => format!("{} has already fired, reset to re-arm", label),
            Self::NotActive => format!("{} is not active", label),
        }
    }
}

/// A countdown or wall-clock alarm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub note: String,
    /// Raw spec as typed: "30m", "2w", "1:50PM", "15:04"
    #[serde(default, rename = "alarm_or_countdown")]
    pub spec: String,
    #[serde(default)]
    pub status: ReminderStatus,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub target_time: Option<DateTime<Local>>,
    #[serde(default)]
    pub is_countdown: bool,
    /// Set once the notification for the current arming has fired
    #[serde(default)]
    pub notified: bool,
    /// Banked time while paused
    #[serde(default, with = "millis")]
    pub paused_remaining: Option<Duration>,
}

impl Reminder {
    /// Create a reminder and arm it from `spec`
    pub fn new(
        label: impl Into<String>,
        note: impl Into<String>,
        spec: impl Into<String>,
        now: &DateTime<Local>,
    ) -> Self {
        let mut reminder = Self {
            id: Uuid::new_v4(),
            label: label.into(),
            note: note.into(),
            spec: spec.into(),
            status: ReminderStatus::Inactive,
            created_at: *now,
            target_time: None,
            is_countdown: false,
            notified: false,
            paused_remaining: None,
        };
        reminder.arm(now);
        reminder
    }

    /// Parse the stored spec and enter `active`, or fall back to `inactive`
    pub fn arm(&mut self, now: &DateTime<Local>) -> Transition {
        self.notified = false;
        self.paused_remaining = None;

        let Some(parsed) = parse_spec(&self.spec, now) else {
            self.status = ReminderStatus::Inactive;
            self.target_time = None;
            debug!(reminder_id = %self.id, spec = %self.spec, "reminder spec not parseable");
            return Transition::Unparseable;
        };

        self.target_time = Some(parsed.target);
        self.is_countdown = parsed.is_countdown;
        self.status = ReminderStatus::Active;
        debug!(
            reminder_id = %self.id,
            target = %parsed.target,
            countdown = parsed.is_countdown,
            "reminder armed"
        );
        Transition::Armed
    }

    /// Replace the alarm or countdown text and re-arm
    pub fn edit_spec(&mut self, spec: impl Into<String>, now: &DateTime<Local>) -> Transition {
        self.spec = spec.into();
        self.arm(now)
    }

    pub fn start(&mut self, now: &DateTime<Local>) -> Transition {
        match self.status {
            ReminderStatus::Paused => {
                let remaining = self.paused_remaining.take().unwrap_or_else(Duration::zero);
                self.target_time = Some(now.checked_add_signed(remaining).unwrap_or(*now));
                self.status = ReminderStatus::Active;
                self.notified = false;
                Transition::Resumed
            }
            ReminderStatus::Inactive => match self.arm(now) {
                Transition::Armed => Transition::Started,
                other => other,
            },
            ReminderStatus::Active => Transition::AlreadyActive,
            ReminderStatus::Expired => Transition::AlreadyExpired,
        }
    }

    /// Freeze the clock, banking whatever time is left
    pub fn pause(&mut self, now: &DateTime<Local>) -> Transition {
        if self.status != ReminderStatus::Active {
            return Transition::NotActive;
        }
        self.paused_remaining = Some(self.remaining(now).max(Duration::zero()));
        self.status = ReminderStatus::Paused;
        Transition::Paused
    }

    /// Re-arm from the stored text regardless of the current state
    pub fn reset(&mut self, now: &DateTime<Local>) -> Transition {
        match self.arm(now) {
            Transition::Armed => Transition::Reset,
            other => other,
        }
    }

    /// Time until the target, negative once it has passed. Zero when unarmed.
    pub fn remaining(&self, now: &DateTime<Local>) -> Duration {
        self.target_time
            .map(|target| target.signed_duration_since(*now))
            .unwrap_or_else(Duration::zero)
    }

    /// Move an active reminder whose target has been reached to `expired`.
    ///
    /// Returns the notification to deliver; a reminder fires at most once per
    /// arming.
    pub fn expire_if_due(&mut self, now: &DateTime<Local>) -> Option<ReminderFired> {
        if self.status != ReminderStatus::Active || self.notified {
            return None;
        }
        let target = self.target_time?;
        if *now < target {
            return None;
        }

        self.notified = true;
        self.status = ReminderStatus::Expired;
        info!(reminder_id = %self.id, label = %self.label, "reminder expired");
        Some(ReminderFired {
            reminder_id: self.id,
            label: self.label.clone(),
            note: self.note.clone(),
            fired_at: *now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    #[test]
    fn test_new_countdown_is_armed() {
        let now = at(2024, 1, 1, 8, 0);
        let reminder = Reminder::new("tea", "green", "10m", &now);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert_eq!(reminder.target_time, Some(now + Duration::minutes(10)));
        assert!(reminder.is_countdown);
        assert!(!reminder.notified);
        assert_eq!(reminder.created_at, now);
    }

    #[test]
    fn test_new_alarm_is_armed() {
        let now = at(2024, 1, 1, 8, 0);
        let reminder = Reminder::new("standup", "", "9:30AM", &now);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert_eq!(reminder.target_time, Some(at(2024, 1, 1, 9, 30)));
        assert!(!reminder.is_countdown);
    }

    #[test]
    fn test_unparseable_spec_stays_inactive() {
        let now = at(2024, 1, 1, 8, 0);
        let reminder = Reminder::new("later", "", "someday", &now);
        assert_eq!(reminder.status, ReminderStatus::Inactive);
        assert!(reminder.target_time.is_none());
    }

    #[test]
    fn test_pause_then_start_preserves_remaining() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);

        assert_eq!(reminder.pause(&now), Transition::Paused);
        assert_eq!(reminder.status, ReminderStatus::Paused);
        assert_eq!(reminder.paused_remaining, Some(Duration::minutes(10)));

        let later = now + Duration::hours(3);
        assert_eq!(reminder.start(&later), Transition::Resumed);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert_eq!(reminder.target_time, Some(later + Duration::minutes(10)));
        assert!(reminder.paused_remaining.is_none());
    }

    #[test]
    fn test_pause_past_target_banks_zero() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        reminder.pause(&(now + Duration::minutes(15)));
        assert_eq!(reminder.paused_remaining, Some(Duration::zero()));
    }

    #[test]
    fn test_pause_requires_active() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        reminder.pause(&now);
        assert_eq!(reminder.pause(&now), Transition::NotActive);
        assert!(Transition::NotActive.is_noop());

        let mut inactive = Reminder::new("later", "", "someday", &now);
        assert_eq!(inactive.pause(&now), Transition::NotActive);
        assert_eq!(inactive.status, ReminderStatus::Inactive);
    }

    #[test]
    fn test_start_when_active_is_reported_noop() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        let before = reminder.clone();
        assert_eq!(reminder.start(&now), Transition::AlreadyActive);
        assert_eq!(reminder, before);
    }

    #[test]
    fn test_start_from_inactive_rearms() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "bogus", &now);
        reminder.spec = "5m".to_string();
        assert_eq!(reminder.start(&now), Transition::Started);
        assert_eq!(reminder.target_time, Some(now + Duration::minutes(5)));

        let mut broken = Reminder::new("tea", "", "bogus", &now);
        assert_eq!(broken.start(&now), Transition::Unparseable);
        assert_eq!(broken.status, ReminderStatus::Inactive);
    }

    #[test]
    fn test_expire_fires_once() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "green", "10m", &now);

        assert!(reminder.expire_if_due(&(now + Duration::minutes(9))).is_none());

        let due = now + Duration::minutes(10);
        let fired = reminder.expire_if_due(&due).unwrap();
        assert_eq!(fired.reminder_id, reminder.id);
        assert_eq!(fired.label, "tea");
        assert_eq!(fired.fired_at, due);
        assert_eq!(reminder.status, ReminderStatus::Expired);
        assert!(reminder.notified);

        assert!(reminder.expire_if_due(&due).is_none());
    }

    #[test]
    fn test_paused_reminder_does_not_expire() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        reminder.pause(&now);
        assert!(reminder.expire_if_due(&(now + Duration::hours(1))).is_none());
    }

    #[test]
    fn test_reset_rearms_expired_reminder() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        let due = now + Duration::minutes(10);
        reminder.expire_if_due(&due);
        assert_eq!(reminder.start(&due), Transition::AlreadyExpired);

        assert_eq!(reminder.reset(&due), Transition::Reset);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert!(!reminder.notified);
        assert_eq!(reminder.target_time, Some(due + Duration::minutes(10)));
    }

    #[test]
    fn test_reset_clears_paused_time() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        reminder.pause(&now);
        reminder.reset(&now);
        assert_eq!(reminder.status, ReminderStatus::Active);
        assert!(reminder.paused_remaining.is_none());
    }

    #[test]
    fn test_edit_spec_switches_to_alarm() {
        let now = at(2024, 1, 1, 8, 0);
        let mut reminder = Reminder::new("tea", "", "10m", &now);
        assert_eq!(reminder.edit_spec("17:00", &now), Transition::Armed);
        assert!(!reminder.is_countdown);
        assert_eq!(reminder.target_time, Some(at(2024, 1, 1, 17, 0)));

        assert_eq!(reminder.edit_spec("nope", &now), Transition::Unparseable);
        assert_eq!(reminder.status, ReminderStatus::Inactive);
        assert!(reminder.target_time.is_none());
    }

    #[test]
    fn test_transition_messages() {
        assert_eq!(Transition::Paused.message("tea", "10m"), "Paused: tea");
        assert_eq!(
            Transition::Unparseable.message("tea", "xyz"),
            "Could not parse 'xyz', please edit"
        );
        assert_eq!(
            Transition::AlreadyActive.message("tea", "10m"),
            "tea is already active"
        );
    }
}
