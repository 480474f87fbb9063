//! Conflict detection and override eligibility.
//!
//! The resolver is pure: it inspects a candidate task against the current
//! schedule and returns a [`Decision`]. Applying the decision (and asking
//! the user before an override) is the caller's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::task::{PriorityLevel, Task};

/// Rule deciding when a candidate may displace the tasks it overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Candidate must outrank every conflicting task. Ties block the override.
    #[default]
    StrictlyHigher,
    /// Candidate may also displace tasks of equal priority.
    HigherOrEqual,
}

impl OverridePolicy {
    /// Whether `candidate` may displace a task of priority `existing`.
    pub fn allows(self, candidate: PriorityLevel, existing: PriorityLevel) -> bool {
        match self {
            OverridePolicy::StrictlyHigher => candidate > existing,
            OverridePolicy::HigherOrEqual => candidate >= existing,
        }
    }
}

/// Outcome of evaluating a candidate task.
///
/// `conflicts` are positions into the slice passed to
/// [`ConflictResolver::resolve`], in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No overlap; insert the candidate as-is.
    Insert,
    /// The candidate outranks everything it overlaps. Advisory only: the
    /// conflicting tasks are replaced once the user confirms.
    ReplaceAndInsert { conflicts: Vec<usize> },
    /// At least one overlapping task has higher or equal priority.
    Rejected { conflicts: Vec<usize> },
}

impl Decision {
    /// Positions of the overlapping tasks (empty for [`Decision::Insert`]).
    pub fn conflicts(&self) -> &[usize] {
        match self {
            Decision::Insert => &[],
            Decision::ReplaceAndInsert { conflicts } | Decision::Rejected { conflicts } => conflicts.as_slice(),
        }
    }
}

/// Computes overlap sets and override decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver {
    policy: OverridePolicy,
}

impl ConflictResolver {
    pub fn new(policy: OverridePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverridePolicy {
        self.policy
    }

    /// Positions of every task in `existing` overlapping `candidate`.
    pub fn find_conflicts(candidate: &Task, existing: &[Task]) -> Vec<usize> {
        existing
            .iter()
            .enumerate()
            .filter(|(_, task)| candidate.overlaps(task))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Evaluate `candidate` against the current schedule.
    pub fn resolve(&self, candidate: &Task, existing: &[Task]) -> Decision {
        let conflicts = Self::find_conflicts(candidate, existing);
        if conflicts.is_empty() {
            debug!(task = %candidate.description, "no conflicts");
            return Decision::Insert;
        }

        let can_override = conflicts
            .iter()
            .all(|&idx| self.policy.allows(candidate.priority, existing[idx].priority));

        debug!(
            task = %candidate.description,
            conflicts = conflicts.len(),
            can_override,
            "conflicts detected"
        );

        if can_override {
            Decision::ReplaceAndInsert { conflicts }
        } else {
            Decision::Rejected { conflicts }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskFactory;

    fn task(desc: &str, start: &str, end: &str, priority: &str) -> Task {
        TaskFactory::create_task(desc, start, end, priority).unwrap()
    }

    #[test]
    fn empty_schedule_inserts() {
        let resolver = ConflictResolver::default();
        let decision = resolver.resolve(&task("Standup", "09:00", "10:00", "medium"), &[]);
        assert_eq!(decision, Decision::Insert);
        assert!(decision.conflicts().is_empty());
    }

    #[test]
    fn adjacent_tasks_do_not_conflict() {
        let existing = vec![task("Breakfast", "08:00", "09:00", "high")];
        let decision = ConflictResolver::default().resolve(&task("Standup", "09:00", "09:30", "low"), &existing);
        assert_eq!(decision, Decision::Insert);
    }

    #[test]
    fn lower_priority_is_rejected() {
        let existing = vec![task("Standup", "09:00", "10:00", "medium")];
        let decision = ConflictResolver::default().resolve(&task("Call", "09:30", "10:30", "low"), &existing);
        assert_eq!(decision, Decision::Rejected { conflicts: vec![0] });
    }

    #[test]
    fn equal_priority_is_rejected_by_default() {
        let existing = vec![task("Standup", "09:00", "10:00", "medium")];
        let decision = ConflictResolver::default().resolve(&task("Call", "09:30", "10:30", "medium"), &existing);
        assert!(matches!(decision, Decision::Rejected { .. }));
    }

    #[test]
    fn equal_priority_overrides_with_lenient_policy() {
        let existing = vec![task("Standup", "09:00", "10:00", "medium")];
        let resolver = ConflictResolver::new(OverridePolicy::HigherOrEqual);
        let decision = resolver.resolve(&task("Call", "09:30", "10:30", "medium"), &existing);
        assert_eq!(decision, Decision::ReplaceAndInsert { conflicts: vec![0] });
    }

    #[test]
    fn higher_priority_may_replace() {
        let existing = vec![task("Standup", "09:00", "10:00", "low")];
        let decision = ConflictResolver::default().resolve(&task("Call", "09:30", "10:30", "high"), &existing);
        assert_eq!(decision, Decision::ReplaceAndInsert { conflicts: vec![0] });
    }

    #[test]
    fn one_blocking_task_rejects_the_whole_override() {
        let existing = vec![
            task("Exercise", "07:00", "08:00", "low"),
            task("Standup", "09:00", "10:00", "low"),
            task("Docking", "10:00", "11:00", "high"),
            task("Lunch", "12:00", "13:00", "low"),
        ];
        let decision = ConflictResolver::default().resolve(&task("Repair", "09:30", "10:30", "medium"), &existing);
        assert_eq!(decision, Decision::Rejected { conflicts: vec![1, 2] });
    }

    #[test]
    fn collects_every_overlapping_task() {
        let existing = vec![
            task("A", "09:00", "09:30", "low"),
            task("B", "11:00", "12:00", "low"),
            task("C", "09:45", "10:15", "medium"),
        ];
        let decision = ConflictResolver::default().resolve(&task("EVA", "09:00", "10:30", "high"), &existing);
        assert_eq!(decision, Decision::ReplaceAndInsert { conflicts: vec![0, 2] });
    }

    #[test]
    fn policy_allows() {
        assert!(!OverridePolicy::StrictlyHigher.allows(PriorityLevel::High, PriorityLevel::High));
        assert!(OverridePolicy::HigherOrEqual.allows(PriorityLevel::High, PriorityLevel::High));
        assert!(!OverridePolicy::HigherOrEqual.allows(PriorityLevel::Low, PriorityLevel::Medium));
    }
}
