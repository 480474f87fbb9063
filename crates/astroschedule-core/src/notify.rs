//! Notification fan-out.
//!
//! Observers are called synchronously in subscription order. A failing
//! observer is logged and skipped; the remaining observers still receive
//! the message.

use thiserror::Error;
use tracing::warn;

/// Failure reported by an observer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct NotifyError(pub String);

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Something interested in schedule notifications.
pub trait Observer {
    fn update(&mut self, message: &str) -> Result<(), NotifyError>;

    /// Name used in log output.
    fn name(&self) -> &str {
        "observer"
    }
}

impl<F> Observer for F
where
    F: FnMut(&str) -> Result<(), NotifyError>,
{
    fn update(&mut self, message: &str) -> Result<(), NotifyError> {
        self(message)
    }
}

/// Registered observers, kept in subscription order.
#[derive(Default)]
pub struct NotificationHub {
    observers: Vec<Box<dyn Observer>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `message` to every observer. Returns how many accepted it.
    pub fn publish(&mut self, message: &str) -> usize {
        let mut delivered = 0;
        for observer in &mut self.observers {
            match observer.update(message) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(observer = observer.name(), error = %e, "observer failed"),
            }
        }
        delivered
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Box<dyn Observer> {
        let log = Rc::clone(log);
        Box::new(move |msg: &str| {
            log.borrow_mut().push(format!("{tag}:{msg}"));
            Ok::<(), NotifyError>(())
        })
    }

    struct Failing;

    impl Observer for Failing {
        fn update(&mut self, _message: &str) -> Result<(), NotifyError> {
            Err(NotifyError::new("display unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn publish_without_observers_delivers_nothing() {
        let mut hub = NotificationHub::new();
        assert!(hub.is_empty());
        assert_eq!(hub.publish("hello"), 0);
    }

    #[test]
    fn delivers_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = NotificationHub::new();
        hub.subscribe(recorder(&log, "first"));
        hub.subscribe(recorder(&log, "second"));

        assert_eq!(hub.publish("conflict"), 2);
        assert_eq!(*log.borrow(), vec!["first:conflict", "second:conflict"]);
    }

    #[test]
    fn failing_observer_does_not_block_others() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = NotificationHub::new();
        hub.subscribe(recorder(&log, "a"));
        hub.subscribe(Box::new(Failing));
        hub.subscribe(recorder(&log, "b"));

        assert_eq!(hub.len(), 3);
        assert_eq!(hub.publish("msg"), 2);
        assert_eq!(*log.borrow(), vec!["a:msg", "b:msg"]);
    }
}
