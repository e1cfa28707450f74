//! Maps decoded commands to household operations and renders the results.

use std::fmt;

use dues_tracker::{Due, HousemateService, TrackerError, TrackerService};
use serde_json::{json, Value};
use tracing::debug;

use crate::command::{decode, CommandError, Request};

/// Successful result of one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Remaining(i64),
    Dues(Vec<Due>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Remaining(amount) => write!(f, "{amount}"),
            Self::Dues(dues) => {
                let lines: Vec<String> = dues.iter().map(Due::to_string).collect();
                f.write_str(&lines.join("\n"))
            }
        }
    }
}

/// Why a command did not succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    Command(CommandError),
    Tracker(TrackerError),
}

impl Failure {
    /// The text written in place of a result.
    pub fn marker(&self) -> String {
        match self {
            Self::Command(err) => err.to_string(),
            Self::Tracker(err) => err.code().to_string(),
        }
    }

    /// Human-readable detail for logs and JSON output.
    pub fn message(&self) -> String {
        match self {
            Self::Command(err) => err.to_string(),
            Self::Tracker(err) => err.to_string(),
        }
    }
}

impl From<CommandError> for Failure {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

impl From<TrackerError> for Failure {
    fn from(err: TrackerError) -> Self {
        Self::Tracker(err)
    }
}

/// The answer to one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub command: String,
    pub result: Result<Outcome, Failure>,
}

impl Reply {
    pub fn to_text(&self) -> String {
        match &self.result {
            Ok(outcome) => outcome.to_string(),
            Err(failure) => failure.marker(),
        }
    }

    pub fn to_json(&self) -> Value {
        match &self.result {
            Ok(Outcome::Success) => json!({ "command": self.command, "result": "SUCCESS" }),
            Ok(Outcome::Remaining(amount)) => json!({ "command": self.command, "result": amount }),
            Ok(Outcome::Dues(dues)) => json!({ "command": self.command, "result": dues }),
            Err(failure) => json!({
                "command": self.command,
                "error": failure.marker(),
                "message": failure.message(),
            }),
        }
    }
}

/// Executes commands against a household's services.
pub struct Terminal<'a> {
    housemates: &'a dyn HousemateService,
    tracker: &'a dyn TrackerService,
}

impl<'a> Terminal<'a> {
    pub fn new(housemates: &'a dyn HousemateService, tracker: &'a dyn TrackerService) -> Self {
        Self {
            housemates,
            tracker,
        }
    }

    /// Run one decoded request.
    pub fn execute(&self, request: &Request) -> Result<Outcome, TrackerError> {
        debug!(command = %request.kind(), "executing");
        match request {
            Request::MoveIn(who) => self.housemates.move_in(who).map(|()| Outcome::Success),
            Request::MoveOut(who) => self.housemates.move_out(who).map(|()| Outcome::Success),
            Request::Spend(expense) => self.tracker.add_expense(expense).map(|()| Outcome::Success),
            Request::Dues(who) => self.tracker.show_dues(who).map(Outcome::Dues),
            Request::ClearDue { from, to, amount } => self
                .tracker
                .clear_dues(from, to, *amount)
                .map(Outcome::Remaining),
        }
    }

    /// Decode and run one input line. Blank lines yield `None`.
    pub fn execute_line(&self, line: &str) -> Option<Reply> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let args: Vec<&str> = tokens.collect();

        let result = decode(name, &args)
            .map_err(Failure::from)
            .and_then(|request| self.execute(&request).map_err(Failure::from));

        Some(Reply {
            command: name.to_string(),
            result,
        })
    }
}
