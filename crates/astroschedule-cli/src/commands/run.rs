//! Interactive schedule session on stdin/stdout.

use astroschedule_core::{Config, ScheduleStore};
use tracing::info;

use crate::notifications::LogObserver;
use crate::repl::{Session, SessionOptions};

pub fn run(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ScheduleStore::with_config(&config.schedule);
    store.subscribe(Box::new(LogObserver));
    info!(policy = ?store.override_policy(), "starting session");

    let options = SessionOptions {
        json,
        confirm_overrides: config.schedule.confirm_overrides,
    };
    let stdin = std::io::stdin();
    let mut session = Session::new(store, stdin.lock(), std::io::stdout(), options);
    session.run()?;
    Ok(())
}
