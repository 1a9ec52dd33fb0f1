use serde::{Deserialize, Serialize};

/// Priority of a daily task or rolling todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority tag like "HIGH", "med" or "l"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "HIGH" | "H" => Some(Self::High),
            "MEDIUM" | "MED" | "M" => Some(Self::Medium),
            "LOW" | "L" => Some(Self::Low),
            _ => None,
        }
    }

    /// Lenient parse for free text. Legacy labels like "very high" still
    /// resolve, anything unrecognised is Medium.
    pub fn normalize(text: &str) -> Self {
        if let Some(priority) = Self::from_tag(text) {
            return priority;
        }
        let lower = text.to_lowercase();
        if lower.contains("high") {
            Self::High
        } else if lower.contains("low") {
            Self::Low
        } else {
            Self::Medium
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Completion status of a daily task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Done,
    #[default]
    Incomplete,
}

impl TaskStatus {
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Done => "DONE",
            Self::Incomplete => "INCOMPLETE",
        }
    }
}

/// Lifecycle of a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    /// Armed and counting toward its target
    Active,
    /// Armed, clock frozen with the remaining time banked
    Paused,
    /// Target passed and the notification has fired
    Expired,
    /// Spec stored but not armed
    #[default]
    Inactive,
}

impl ReminderStatus {
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Expired => "expired",
            Self::Inactive => "inactive",
        }
    }

    /// Whether the reminder carries a target time in this state
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_tag() {
        assert_eq!(Priority::from_tag("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_tag("h"), Some(Priority::High));
        assert_eq!(Priority::from_tag(" med "), Some(Priority::Medium));
        assert_eq!(Priority::from_tag("L"), Some(Priority::Low));
        assert_eq!(Priority::from_tag("urgent"), None);
    }

    #[test]
    fn test_priority_normalize_legacy_values() {
        assert_eq!(Priority::normalize("Very High"), Priority::High);
        assert_eq!(Priority::normalize("lowest"), Priority::Low);
        assert_eq!(Priority::normalize(""), Priority::Medium);
        assert_eq!(Priority::normalize("whenever"), Priority::Medium);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"DONE\"");
        assert_eq!(
            serde_json::to_string(&ReminderStatus::Paused).unwrap(),
            "\"paused\""
        );
        let status: ReminderStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(status, ReminderStatus::Expired);
    }

    #[test]
    fn test_reminder_status_is_armed() {
        assert!(ReminderStatus::Active.is_armed());
        assert!(ReminderStatus::Paused.is_armed());
        assert!(ReminderStatus::Expired.is_armed());
        assert!(!ReminderStatus::Inactive.is_armed());
    }
}
