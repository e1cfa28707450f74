//! Decoding of line-oriented commands.
//!
//! Each line is a command name followed by whitespace-separated arguments:
//!
//! ```text
//! MOVE_IN <name>
//! MOVE_OUT <name>
//! SPEND <amount> <payer> [beneficiary...]
//! DUES <name>
//! CLEAR_DUE <from> <to> <amount>
//! ```

use std::fmt;
use std::str::FromStr;

use dues_ledger::HousemateId;
use dues_tracker::Expense;
use thiserror::Error;

/// Errors raised while decoding a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unknown command name, wrong argument count, or an unusable name.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The amount is not a number, or is negative or infinite.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    MoveIn,
    MoveOut,
    Spend,
    Dues,
    ClearDue,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::MoveIn => "MOVE_IN",
            Self::MoveOut => "MOVE_OUT",
            Self::Spend => "SPEND",
            Self::Dues => "DUES",
            Self::ClearDue => "CLEAR_DUE",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVE_IN" => Ok(Self::MoveIn),
            "MOVE_OUT" => Ok(Self::MoveOut),
            "SPEND" => Ok(Self::Spend),
            "DUES" => Ok(Self::Dues),
            "CLEAR_DUE" => Ok(Self::ClearDue),
            other => Err(CommandError::InvalidCommand(other.to_string())),
        }
    }
}

/// A fully decoded command.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    MoveIn(HousemateId),
    MoveOut(HousemateId),
    Spend(Expense),
    Dues(HousemateId),
    ClearDue {
        from: HousemateId,
        to: HousemateId,
        amount: i64,
    },
}

impl Request {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::MoveIn(_) => CommandKind::MoveIn,
            Self::MoveOut(_) => CommandKind::MoveOut,
            Self::Spend(_) => CommandKind::Spend,
            Self::Dues(_) => CommandKind::Dues,
            Self::ClearDue { .. } => CommandKind::ClearDue,
        }
    }
}

/// Decode a command from already-split tokens.
pub fn decode(name: &str, args: &[&str]) -> Result<Request, CommandError> {
    let kind: CommandKind = name.parse()?;
    let invalid = || CommandError::InvalidCommand(name.to_string());

    match (kind, args) {
        (CommandKind::MoveIn, [who]) => Ok(Request::MoveIn(housemate(name, who)?)),
        (CommandKind::MoveOut, [who]) => Ok(Request::MoveOut(housemate(name, who)?)),
        (CommandKind::Dues, [who]) => Ok(Request::Dues(housemate(name, who)?)),
        (CommandKind::Spend, [amount, payer, beneficiaries @ ..]) => {
            let amount = expense_amount(amount)?;
            let payer = housemate(name, payer)?;
            let beneficiaries = beneficiaries
                .iter()
                .map(|b| housemate(name, b))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Request::Spend(Expense::new(amount, payer, beneficiaries)))
        }
        (CommandKind::ClearDue, [from, to, amount]) => Ok(Request::ClearDue {
            from: housemate(name, from)?,
            to: housemate(name, to)?,
            amount: payment_amount(amount)?,
        }),
        _ => Err(invalid()),
    }
}

fn housemate(command: &str, token: &str) -> Result<HousemateId, CommandError> {
    HousemateId::new(token).map_err(|_| CommandError::InvalidCommand(command.to_string()))
}

fn expense_amount(token: &str) -> Result<f64, CommandError> {
    match token.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(CommandError::InvalidAmount(token.to_string())),
    }
}

fn payment_amount(token: &str) -> Result<i64, CommandError> {
    match token.parse::<i64>() {
        Ok(amount) if amount >= 0 => Ok(amount),
        _ => Err(CommandError::InvalidAmount(token.to_string())),
    }
}
