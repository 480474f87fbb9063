//! The schedule store: today's tasks and the operations that mutate them.
//!
//! The store owns its tasks and its [`NotificationHub`]. It is constructed
//! explicitly and handed to whatever command layer needs it; all mutations
//! take `&mut self`, so evaluating a conflict and applying the result can
//! never interleave with another mutation.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ScheduleConfig;
use crate::conflict::{ConflictResolver, Decision, OverridePolicy};
use crate::error::ScheduleError;
use crate::notify::{NotificationHub, Observer};
use crate::task::{PriorityLevel, Task};

/// Asks the user whether a higher-priority task may replace the tasks it
/// overlaps.
pub trait OverrideConfirmation {
    fn confirm_override(&mut self, candidate: &Task, conflicts: &[Task]) -> bool;
}

impl<F> OverrideConfirmation for F
where
    F: FnMut(&Task, &[Task]) -> bool,
{
    fn confirm_override(&mut self, candidate: &Task, conflicts: &[Task]) -> bool {
        self(candidate, conflicts)
    }
}

/// Fixed answer to every override prompt.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl OverrideConfirmation for AutoConfirm {
    fn confirm_override(&mut self, _candidate: &Task, _conflicts: &[Task]) -> bool {
        self.0
    }
}

/// Why an addition was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// The candidate overlaps tasks it does not outrank.
    HigherOrEqualPriorityConflict { conflicts: Vec<String> },
    /// An override was possible but the user said no.
    UserDeclined,
    /// A task with the same description exists and uniqueness is enforced.
    DuplicateDescription { description: String },
}

/// Result of [`ScheduleStore::add_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddResult {
    Inserted,
    ReplacedAndInserted { removed: Vec<String> },
    Rejected(RejectReason),
}

impl AddResult {
    pub fn is_added(&self) -> bool {
        !matches!(self, AddResult::Rejected(_))
    }
}

/// Result of [`ScheduleStore::edit_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// The task that was replaced, or `None` if no task matched.
    pub previous: Option<Task>,
    /// How the new version was added.
    pub added: AddResult,
}

/// In-memory schedule for today.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    tasks: Vec<Task>,
    resolver: ConflictResolver,
    enforce_unique_descriptions: bool,
    notifications: NotificationHub,
}

impl ScheduleStore {
    /// Empty store using the strictly-higher override rule.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ScheduleConfig) -> Self {
        Self {
            resolver: ConflictResolver::new(config.override_policy),
            enforce_unique_descriptions: config.enforce_unique_descriptions,
            ..Self::default()
        }
    }

    pub fn override_policy(&self) -> OverridePolicy {
        self.resolver.policy()
    }

    /// Register an observer for rejection notifications.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.notifications.subscribe(observer);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// First task whose description matches, ignoring case.
    pub fn find(&self, description: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.matches(description))
    }

    /// Add a task, resolving conflicts against the current schedule.
    ///
    /// When the candidate outranks every task it overlaps, `confirm` decides
    /// whether those tasks are replaced. Rejections caused by priority
    /// conflicts are also published to the subscribed observers.
    pub fn add_task(&mut self, task: Task, confirm: &mut dyn OverrideConfirmation) -> AddResult {
        if self.enforce_unique_descriptions && self.find(&task.description).is_some() {
            info!(task = %task.description, "duplicate description rejected");
            return AddResult::Rejected(RejectReason::DuplicateDescription {
                description: task.description,
            });
        }

        match self.resolver.resolve(&task, &self.tasks) {
            Decision::Insert => {
                info!(task = %task.description, interval = %task.interval, "task added");
                self.tasks.push(task);
                AddResult::Inserted
            }
            Decision::ReplaceAndInsert { conflicts } => {
                let conflicting: Vec<Task> = conflicts.iter().map(|&i| self.tasks[i].clone()).collect();
                if !confirm.confirm_override(&task, &conflicting) {
                    info!(task = %task.description, "override declined");
                    return AddResult::Rejected(RejectReason::UserDeclined);
                }

                // Positions are ascending; remove from the back so earlier ones stay valid.
                for &idx in conflicts.iter().rev() {
                    self.tasks.remove(idx);
                }
                let removed: Vec<String> = conflicting.into_iter().map(|t| t.description).collect();
                info!(task = %task.description, ?removed, "tasks overridden");
                self.tasks.push(task);
                AddResult::ReplacedAndInserted { removed }
            }
            Decision::Rejected { conflicts } => {
                let names: Vec<String> = conflicts
                    .iter()
                    .map(|&i| self.tasks[i].description.clone())
                    .collect();
                warn!(task = %task.description, conflicts = ?names, "task conflicts with higher-priority tasks");
                let message = format!(
                    "Task '{}' was not added: it conflicts with existing task(s) of higher or equal priority: {}",
                    task.description,
                    names.join(", ")
                );
                self.notifications.publish(&message);
                AddResult::Rejected(RejectReason::HigherOrEqualPriorityConflict { conflicts: names })
            }
        }
    }

    /// Remove the first task matching `description` (case-insensitive).
    pub fn remove_task(&mut self, description: &str) -> Result<Task, ScheduleError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.matches(description))
            .ok_or_else(|| ScheduleError::TaskNotFound(description.to_string()))?;
        let task = self.tasks.remove(idx);
        info!(task = %task.description, "task removed");
        Ok(task)
    }

    /// Replace a task: remove `old_description`, then add `new_task`.
    ///
    /// The new task is added even when nothing matched `old_description`;
    /// [`EditResult::previous`] tells the caller whether a task was removed.
    /// The new version only competes with the remaining schedule. If it is
    /// rejected or the override is declined, the old task stays removed.
    pub fn edit_task(
        &mut self,
        old_description: &str,
        new_task: Task,
        confirm: &mut dyn OverrideConfirmation,
    ) -> EditResult {
        let previous = match self.remove_task(old_description) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(task = %old_description, "edit target missing: {e}");
                None
            }
        };
        EditResult {
            previous,
            added: self.add_task(new_task, confirm),
        }
    }

    /// Mark a task completed. Marking an already completed task succeeds.
    pub fn mark_completed(&mut self, description: &str) -> Result<(), ScheduleError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.matches(description))
            .ok_or_else(|| ScheduleError::TaskNotFound(description.to_string()))?;
        task.mark_completed();
        info!(task = %task.description, "task completed");
        Ok(())
    }

    /// All tasks ordered by start time, then description.
    pub fn list_all(&self) -> Vec<&Task> {
        sorted(self.tasks.iter())
    }

    /// Tasks of one priority, ordered like [`ScheduleStore::list_all`].
    pub fn list_by_priority(&self, priority: PriorityLevel) -> Vec<&Task> {
        sorted(self.tasks.iter().filter(|t| t.priority == priority))
    }
}

fn sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a Task> {
    let mut list: Vec<&Task> = tasks.collect();
    list.sort_by(|a, b| {
        a.interval
            .start()
            .cmp(&b.interval.start())
            .then_with(|| a.description.cmp(&b.description))
    });
    list
}
