//! Interactive command loop.
//!
//! Reads commands line by line, prompts for each field the command needs,
//! and reports outcomes. Errors from a single command are printed and the
//! loop continues; only I/O failures end the session.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use astroschedule_core::{
    AddResult, CoreError, EditResult, PriorityLevel, RejectReason, ScheduleError, ScheduleStore, Task,
    TaskFactory,
};
use tracing::{debug, warn};

use crate::notifications::Inbox;

/// A command typed at the `>` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Add,
    Remove,
    View,
    Edit,
    Mark,
    ViewPriority,
    Help,
    Exit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match normalized.as_str() {
            "add" => Ok(ReplCommand::Add),
            "remove" => Ok(ReplCommand::Remove),
            "view" => Ok(ReplCommand::View),
            "edit" => Ok(ReplCommand::Edit),
            "mark" => Ok(ReplCommand::Mark),
            "view priority" => Ok(ReplCommand::ViewPriority),
            "help" => Ok(ReplCommand::Help),
            "exit" | "quit" => Ok(ReplCommand::Exit),
            _ => Err(normalized),
        }
    }
}

const HELP: &str = "\
Available commands:
add             - Add a new task
remove          - Remove an existing task
view            - View all tasks
edit            - Edit an existing task
mark            - Mark a task as completed
view priority   - View tasks by priority
help            - Display this help message
exit            - Exit the application";

/// Session options taken from the command line and config.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub json: bool,
    pub confirm_overrides: bool,
}

/// One interactive session over an input and output stream.
pub struct Session<R, W> {
    store: ScheduleStore,
    inbox: Rc<RefCell<Vec<String>>>,
    input: R,
    output: W,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Wrap `store`, subscribing an inbox so notifications show up in the
    /// session output.
    pub fn new(mut store: ScheduleStore, input: R, output: W, options: SessionOptions) -> Self {
        let inbox = Inbox::new();
        let messages = inbox.messages();
        store.subscribe(Box::new(inbox));
        Self {
            store,
            inbox: messages,
            input,
            output,
            options,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Astronaut Daily Schedule Organizer")?;
        writeln!(self.output, "Type 'help' to see the list of commands.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<ReplCommand>() {
                Ok(ReplCommand::Exit) => {
                    writeln!(self.output, "Exiting application.")?;
                    break;
                }
                Ok(command) => command,
                Err(_) => {
                    writeln!(self.output, "Unknown command. Type 'help' to see the list of commands.")?;
                    continue;
                }
            };

            debug!(?command, "executing");
            match self.execute(command) {
                Ok(()) => {}
                Err(CoreError::Io(e)) => return Err(e),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
            self.flush_notifications()?;
        }
        Ok(())
    }

    /// Execute a single command against the store.
    pub fn execute(&mut self, command: ReplCommand) -> Result<(), CoreError> {
        match command {
            ReplCommand::Add => {
                let task = self.prompt_task()?;
                let result = self.apply(task, None).added;
                self.report(&result)?;
            }
            ReplCommand::Remove => {
                let description = self.prompt("Enter task description to remove: ")?;
                self.store.remove_task(&description)?;
                writeln!(self.output, "Task removed successfully.")?;
            }
            ReplCommand::View => {
                let tasks = self.store.list_all();
                if tasks.is_empty() && !self.options.json {
                    writeln!(self.output, "No tasks scheduled for the day.")?;
                } else {
                    print_tasks(&mut self.output, &tasks, self.options.json)?;
                }
            }
            ReplCommand::Edit => {
                let old = self.prompt("Enter description of the task to edit: ")?;
                writeln!(self.output, "Enter new details for the task.")?;
                let task = self.prompt_task()?;
                let EditResult { previous, added } = self.apply(task, Some(old.as_str()));
                if previous.is_none() {
                    writeln!(self.output, "Error: {}", ScheduleError::TaskNotFound(old))?;
                }
                self.report(&added)?;
            }
            ReplCommand::Mark => {
                let description = self.prompt("Enter task description to mark as completed: ")?;
                self.store.mark_completed(&description)?;
                writeln!(self.output, "Task marked as completed.")?;
            }
            ReplCommand::ViewPriority => {
                let text = self.prompt("Enter priority level to view (High, Medium, Low): ")?;
                let priority: PriorityLevel = text.parse()?;
                let tasks = self.store.list_by_priority(priority);
                if tasks.is_empty() && !self.options.json {
                    writeln!(self.output, "No tasks with priority {priority}.")?;
                } else {
                    print_tasks(&mut self.output, &tasks, self.options.json)?;
                }
            }
            ReplCommand::Help => writeln!(self.output, "{HELP}")?,
            ReplCommand::Exit => {}
        }
        Ok(())
    }

    /// Add `task`, or replace `old` with it, prompting before overrides.
    /// A plain add reports no previous task.
    fn apply(&mut self, task: Task, old: Option<&str>) -> EditResult {
        let ask = self.options.confirm_overrides;
        let input = &mut self.input;
        let output = &mut self.output;
        let mut confirm = |_candidate: &Task, conflicts: &[Task]| {
            if !ask {
                return true;
            }
            match ask_override(&mut *input, &mut *output, conflicts) {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(error = %e, "override prompt failed, treating as declined");
                    false
                }
            }
        };

        match old {
            Some(old) => self.store.edit_task(old, task, &mut confirm),
            None => EditResult {
                previous: None,
                added: self.store.add_task(task, &mut confirm),
            },
        }
    }

    fn report(&mut self, result: &AddResult) -> io::Result<()> {
        if self.options.json {
            let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
            return writeln!(self.output, "{json}");
        }
        match result {
            AddResult::Inserted => writeln!(self.output, "Task added successfully. No conflicts."),
            AddResult::ReplacedAndInserted { .. } => {
                writeln!(self.output, "Existing tasks overridden. New task added.")
            }
            AddResult::Rejected(RejectReason::UserDeclined) => writeln!(self.output, "Task not added."),
            AddResult::Rejected(RejectReason::HigherOrEqualPriorityConflict { .. }) => writeln!(
                self.output,
                "Error: Task conflicts with higher-priority existing tasks."
            ),
            AddResult::Rejected(RejectReason::DuplicateDescription { description }) => writeln!(
                self.output,
                "Error: A task named '{description}' already exists."
            ),
        }
    }

    fn prompt_task(&mut self) -> Result<Task, CoreError> {
        let description = self.prompt("Enter description: ")?;
        let start = self.prompt("Enter start time (HH:MM): ")?;
        let end = self.prompt("Enter end time (HH:MM): ")?;
        let priority = self.prompt("Enter priority (High, Medium, Low): ")?;
        Ok(TaskFactory::create_task(&description, &start, &end, &priority)?)
    }

    fn prompt(&mut self, label: &str) -> Result<String, CoreError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut self.input)
    }

    fn flush_notifications(&mut self) -> io::Result<()> {
        let pending: Vec<String> = self.inbox.borrow_mut().drain(..).collect();
        for message in pending {
            writeln!(self.output, "Notification: {message}")?;
        }
        Ok(())
    }
}

fn read_trimmed_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_override(input: &mut impl BufRead, output: &mut impl Write, conflicts: &[Task]) -> io::Result<bool> {
    writeln!(output, "The new task conflicts with existing tasks:")?;
    for task in conflicts {
        writeln!(output, "- {task}")?;
    }
    write!(output, "Do you want to override these tasks? (yes/no): ")?;
    output.flush()?;
    let answer = read_trimmed_line(input)?.unwrap_or_default();
    Ok(matches!(answer.to_lowercase().as_str(), "yes" | "y"))
}

fn print_tasks(output: &mut impl Write, tasks: &[&Task], json: bool) -> io::Result<()> {
    if json {
        let json = serde_json::to_string_pretty(tasks).map_err(io::Error::other)?;
        return writeln!(output, "{json}");
    }
    for task in tasks {
        writeln!(output, "{task}")?;
    }
    Ok(())
}
