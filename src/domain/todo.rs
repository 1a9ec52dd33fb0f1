use super::enums::Priority;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ad-hoc todo that stays until it is removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingTodo {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub deadline: String,
}

impl RollingTodo {
    pub fn new(
        text: impl Into<String>,
        priority: Priority,
        category: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            priority,
            category: category.into(),
            deadline: deadline.into(),
        }
    }
}
