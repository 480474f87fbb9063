//! Observers wired into the schedule store by the CLI.

use std::cell::RefCell;
use std::rc::Rc;

use astroschedule_core::{NotifyError, Observer};
use tracing::info;

/// Collects notifications so the session can print them after each command.
#[derive(Default)]
pub struct Inbox {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the pending messages.
    pub fn messages(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.messages)
    }
}

impl Observer for Inbox {
    fn update(&mut self, message: &str) -> Result<(), NotifyError> {
        self.messages
            .try_borrow_mut()
            .map_err(|e| NotifyError::new(e.to_string()))?
            .push(message.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "inbox"
    }
}

/// Records every notification in the log.
pub struct LogObserver;

impl Observer for LogObserver {
    fn update(&mut self, message: &str) -> Result<(), NotifyError> {
        info!(target: "astroschedule::notification", "{message}");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astroschedule_core::NotificationHub;

    #[test]
    fn inbox_collects_messages() {
        let inbox = Inbox::new();
        let messages = inbox.messages();
        let mut hub = NotificationHub::new();
        hub.subscribe(Box::new(LogObserver));
        hub.subscribe(Box::new(inbox));

        assert_eq!(hub.publish("Task 'Call' was not added"), 2);
        assert_eq!(*messages.borrow(), vec!["Task 'Call' was not added"]);
    }

    #[test]
    fn inbox_reports_failure_while_borrowed() {
        let mut inbox = Inbox::new();
        let messages = inbox.messages();
        let _guard = messages.borrow();
        assert!(inbox.update("late").is_err());
    }
}
