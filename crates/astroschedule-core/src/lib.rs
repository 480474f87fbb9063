//! # Astroschedule Core Library
//!
//! Business logic for the astronaut daily schedule organizer. The CLI binary
//! is a thin interactive layer over this crate.
//!
//! ## Architecture
//!
//! - **Tasks**: validated by [`TaskFactory`] from raw text, each holding a
//!   [`TimeInterval`] and a [`PriorityLevel`]
//! - **Conflict resolution**: [`ConflictResolver`] decides, without side
//!   effects, whether a task can be inserted, may override the tasks it
//!   overlaps, or is rejected
//! - **Schedule store**: [`ScheduleStore`] applies those decisions and keeps
//!   today's tasks free of overlaps
//! - **Notifications**: [`NotificationHub`] fans rejection messages out to
//!   registered [`Observer`]s
//! - **Configuration**: TOML-based [`Config`]

pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod notify;
pub mod schedule;
pub mod task;

pub use config::{Config, LogConfig, ScheduleConfig};
pub use conflict::{ConflictResolver, Decision, OverridePolicy};
pub use error::{ConfigError, CoreError, ScheduleError, ValidationError};
pub use interval::TimeInterval;
pub use notify::{NotificationHub, NotifyError, Observer};
pub use schedule::{AddResult, AutoConfirm, EditResult, OverrideConfirmation, RejectReason, ScheduleStore};
pub use task::{PriorityLevel, Task, TaskFactory};
