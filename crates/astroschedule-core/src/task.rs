//! Task types and the factory that validates raw input into tasks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::interval::{TimeInterval, TIME_FORMAT};

/// Priority level of a task.
///
/// Ordering is defined by [`PriorityLevel::rank`], not by declaration order,
/// so reordering the variants cannot change override eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// All levels, lowest first.
    pub const ALL: [PriorityLevel; 3] = [PriorityLevel::Low, PriorityLevel::Medium, PriorityLevel::High];

    /// Numeric rank used for comparisons (higher = more important).
    pub fn rank(self) -> u8 {
        match self {
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Low => "LOW",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::High => "HIGH",
        }
    }
}

impl Ord for PriorityLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for PriorityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PriorityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(PriorityLevel::High),
            "MEDIUM" => Ok(PriorityLevel::Medium),
            "LOW" => Ok(PriorityLevel::Low),
            _ => Err(ValidationError::InvalidPriority {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled task for today.
///
/// `description` doubles as the lookup key for removal, editing and
/// completion; lookups compare it case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub interval: TimeInterval,
    pub priority: PriorityLevel,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a pending task from already-validated parts.
    pub fn new(description: impl Into<String>, interval: TimeInterval, priority: PriorityLevel) -> Self {
        Self {
            description: description.into(),
            interval,
            priority,
            completed: false,
        }
    }

    /// Case-insensitive description match.
    pub fn matches(&self, description: &str) -> bool {
        self.description.to_lowercase() == description.trim().to_lowercase()
    }

    pub fn overlaps(&self, other: &Task) -> bool {
        self.interval.overlaps(&other.interval)
    }

    /// Mark the task completed. Completion is one-way.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {} [{}]{}",
            self.interval.start().format(TIME_FORMAT),
            self.interval.end().format(TIME_FORMAT),
            self.description,
            self.priority,
            if self.completed { " (Completed)" } else { "" }
        )
    }
}

/// Builds tasks from raw text input.
pub struct TaskFactory;

impl TaskFactory {
    /// Validate raw fields and build a pending task.
    ///
    /// Fields are checked in order: description, start, end, priority,
    /// and finally that start is strictly before end.
    pub fn create_task(
        description: &str,
        start: &str,
        end: &str,
        priority: &str,
    ) -> Result<Task, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let start = crate::interval::parse_time_of_day(start)?;
        let end = crate::interval::parse_time_of_day(end)?;
        let priority: PriorityLevel = priority.parse()?;
        let interval = TimeInterval::new(start, end)?;

        Ok(Task::new(description, interval, priority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_follows_rank() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        let mut levels = vec![PriorityLevel::High, PriorityLevel::Low, PriorityLevel::Medium];
        levels.sort();
        assert_eq!(levels, PriorityLevel::ALL.to_vec());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("high".parse::<PriorityLevel>(), Ok(PriorityLevel::High));
        assert_eq!("Medium".parse::<PriorityLevel>(), Ok(PriorityLevel::Medium));
        assert_eq!(" LOW ".parse::<PriorityLevel>(), Ok(PriorityLevel::Low));
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert_eq!(
            "urgent".parse::<PriorityLevel>(),
            Err(ValidationError::InvalidPriority {
                value: "urgent".to_string()
            })
        );
    }

    #[test]
    fn factory_builds_pending_task() {
        let task = TaskFactory::create_task("Standup", "09:00", "10:00", "medium").unwrap();
        assert_eq!(task.description, "Standup");
        assert_eq!(task.priority, PriorityLevel::Medium);
        assert!(!task.completed);
        assert_eq!(task.interval.to_string(), "09:00 - 10:00");
    }

    #[test]
    fn factory_rejects_bad_start_time() {
        let err = TaskFactory::create_task("EVA prep", "25:00", "26:00", "HIGH").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTimeFormat {
                value: "25:00".to_string()
            }
        );
    }

    #[test]
    fn factory_rejects_equal_times() {
        let err = TaskFactory::create_task("X", "10:00", "10:00", "HIGH").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInterval { .. }));
    }

    #[test]
    fn factory_rejects_unknown_priority() {
        let err = TaskFactory::create_task("X", "10:00", "11:00", "critical").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPriority { .. }));
    }

    #[test]
    fn factory_rejects_blank_description() {
        let err = TaskFactory::create_task("   ", "10:00", "11:00", "LOW").unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
    }

    #[test]
    fn factory_rejects_single_digit_fields() {
        let err = TaskFactory::create_task("Standup", "10:00", "10:5", "low").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTimeFormat {
                value: "10:5".to_string()
            }
        );
        assert!(TaskFactory::create_task("Standup", "9:00", "10:00", "low").is_err());
    }

    #[test]
    fn time_format_is_checked_before_priority() {
        let err = TaskFactory::create_task("X", "10:xx", "11:00", "critical").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeFormat { .. }));
    }

    #[test]
    fn matches_ignores_case() {
        let task = TaskFactory::create_task("Exercise", "07:00", "08:00", "low").unwrap();
        assert!(task.matches("exercise"));
        assert!(task.matches("EXERCISE"));
        assert!(!task.matches("Exercises"));
    }

    #[test]
    fn display_format() {
        let mut task = TaskFactory::create_task("Lunch", "12:00", "13:00", "low").unwrap();
        assert_eq!(task.to_string(), "12:00 - 13:00: Lunch [LOW]");
        task.mark_completed();
        assert_eq!(task.to_string(), "12:00 - 13:00: Lunch [LOW] (Completed)");
    }

    #[test]
    fn task_serialization() {
        let task = TaskFactory::create_task("Sample collection", "14:00", "15:30", "high").unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["interval"]["start"], "14:00");
        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }
}
