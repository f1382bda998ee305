use serde::{Deserialize, Serialize};

use super::schedule::ActivationSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub category_id: Option<i64>,
    pub content: String,
    pub time: ActivationSchedule,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReminder {
    pub category_id: Option<i64>,
    pub content: String,
    pub time: ActivationSchedule,
}
