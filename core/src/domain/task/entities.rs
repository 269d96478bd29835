use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveEnum, Value};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub use crate::entity::sea_orm_active_enums::{Priority, TaskStatus};

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::filter::value_objects::FilterValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub status: TaskStatus,
    pub priority: Priority,
    pub user: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub task_list_id: Option<Uuid>,
    pub title: String,
    pub description: String,
}

// Every external spelling of a status or a priority, whether it arrives in a
// request body or in a filter expression, goes through the two `FromStr`
// impls below.

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(TaskStatus::New),
            "active" => Ok(TaskStatus::Active),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            "error" => Ok(TaskStatus::Error),
            other => Err(CoreError::Validation(format!("unknown task status `{other}`"))),
        }
    }
}

impl TaskStatus {
    pub fn normalize(value: &FilterValue) -> Option<Self> {
        value.as_text().and_then(|s| s.parse().ok())
    }

    pub fn filter_value(value: &FilterValue) -> Option<Value> {
        Self::normalize(value).map(|status| Value::from(status.to_value()))
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Priority {
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Priority::Critical),
            2 => Some(Priority::High),
            3 => Some(Priority::Medium),
            4 => Some(Priority::Low),
            5 => Some(Priority::Optional),
            _ => None,
        }
    }

    pub fn level(&self) -> i32 {
        self.to_value()
    }

    pub fn normalize(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::Integer(level) => Self::from_level(*level),
            FilterValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn filter_value(value: &FilterValue) -> Option<Value> {
        Self::normalize(value).map(|priority| Value::from(priority.to_value()))
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<i64>() {
            return Self::from_level(level)
                .ok_or_else(|| CoreError::Validation(format!("unknown priority level `{level}`")));
        }

        match s.to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Priority::Critical),
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            "OPTIONAL" => Ok(Priority::Optional),
            other => Err(CoreError::Validation(format!("unknown priority `{other}`"))),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Level(i64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Level(level) => Self::from_level(level).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown priority level `{level}`"))
            }),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalization() {
        assert_eq!("ACTIVE".parse::<TaskStatus>().unwrap(), TaskStatus::Active);
        assert_eq!(
            TaskStatus::normalize(&FilterValue::Text("Blocked".to_string())),
            Some(TaskStatus::Blocked)
        );
        assert_eq!(TaskStatus::normalize(&FilterValue::Integer(1)), None);
        assert!("sleeping".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_normalization() {
        assert_eq!(Priority::normalize(&FilterValue::Integer(1)), Some(Priority::Critical));
        assert_eq!(
            Priority::normalize(&FilterValue::Text("high".to_string())),
            Some(Priority::High)
        );
        assert_eq!(
            Priority::normalize(&FilterValue::Text("3".to_string())),
            Some(Priority::Medium)
        );
        assert_eq!(Priority::normalize(&FilterValue::Integer(9)), None);
        assert_eq!(Priority::Optional.level(), 5);
    }

    #[test]
    fn test_filter_values_are_stored_primitives() {
        assert_eq!(
            TaskStatus::filter_value(&FilterValue::Text("Active".to_string())),
            Some(Value::from("active".to_string()))
        );
        assert_eq!(
            Priority::filter_value(&FilterValue::Text("CRITICAL".to_string())),
            Some(Value::from(1i32))
        );
    }

    #[test]
    fn test_wire_format() {
        let status: TaskStatus = serde_json::from_str(r#""Completed""#).unwrap();
        assert_eq!(status, TaskStatus::Completed);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""completed""#);

        let priority: Priority = serde_json::from_str("2").unwrap();
        assert_eq!(priority, Priority::High);
        let priority: Priority = serde_json::from_str(r#""critical""#).unwrap();
        assert_eq!(priority, Priority::Critical);
        assert_eq!(serde_json::to_string(&priority).unwrap(), r#""CRITICAL""#);

        assert!(serde_json::from_str::<Priority>("0").is_err());
    }
}
