use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::statement::DATE_FORMAT;

/// Position of a line in a ledger source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMeta {
    pub file: String,
    pub line: usize,
}

impl LineMeta {
    pub fn new(file: &str, line: usize) -> Self {
        LineMeta {
            file: file.to_string(),
            line,
        }
    }

    pub fn error_at(&self, kind: ErrorKind) -> LedgerError {
        LedgerError {
            at: self.clone(),
            kind,
        }
    }
}

impl fmt::Display for LineMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The line does not have the shape of any directive.
    Syntax,
    /// A token of a well shaped line is malformed.
    Validation,
    /// The line is well formed but contradicts what was read before.
    Semantic,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ErrorKind {
    #[error("invalid syntax")]
    Syntax,
    #[error("invalid alias name")]
    InvalidAliasName,
    #[error("invalid account name reference by alias")]
    InvalidAliasTarget,
    #[error("invalid account name '{0}'")]
    InvalidAccountName(String),
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid value")]
    InvalidAmount,
    #[error("alias '{alias}' redefined, first seen at '{first}'")]
    AliasRedefined { alias: String, first: LineMeta },
    #[error(
        "date set to an earlier date '{}' than previous date '{}' set at '{previous_at}'",
        .date.format(DATE_FORMAT),
        .previous.format(DATE_FORMAT)
    )]
    DateRegression {
        date: NaiveDate,
        previous: NaiveDate,
        previous_at: LineMeta,
    },
    #[error("referenced alias '{0}' is undefined")]
    UndefinedAlias(String),
    #[error("transaction without previous date")]
    MissingDate,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::Syntax => ErrorCategory::Syntax,
            ErrorKind::InvalidAliasName
            | ErrorKind::InvalidAliasTarget
            | ErrorKind::InvalidAccountName(_)
            | ErrorKind::InvalidDate
            | ErrorKind::InvalidAmount => ErrorCategory::Validation,
            ErrorKind::AliasRedefined { .. }
            | ErrorKind::DateRegression { .. }
            | ErrorKind::UndefinedAlias(_)
            | ErrorKind::MissingDate => ErrorCategory::Semantic,
        }
    }
}

/// Contextual error for the ledger parser, the cause annotated with the
/// line it was found at.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("at '{at}', {kind}")]
pub struct LedgerError {
    pub at: LineMeta,
    pub kind: ErrorKind,
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}
