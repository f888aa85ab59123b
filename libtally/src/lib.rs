//! Tally - A plain text double-entry bookkeeping ledger and periodic report generator
//! ---
//!
//! A ledger is a sequence of line oriented directives: `alias` definitions,
//! dates, and two-legged transactions posted at the most recently set date.
//!
//! ```text
//! alias cash a:wallet.cash
//!
//! 2024-03-01
//! 10,50 cash i:salary
//! 4.20  e:food.snacks cash
//! ```
//!
//! Reports are prepared for the whole ledger, and for every year, quarter, and
//! month the ledger spans, with balances rolled up the account hierarchy.

extern crate pest;
#[macro_use]
extern crate pest_derive;

/// Account names such as `e:food.snacks`, their type and hierarchy.
pub mod account;

pub mod amount;
pub mod error;

/// Ledger state shared by every file read in one run.
pub mod ledger;

/// Our main parser entrypoints.
pub mod parser;

/// Periodic reports with rolled up balances.
///
/// Each cadence forms a chain of consecutive reports. Asset and debt
/// balances are carried from one report into the next, expense and income
/// accounts start every period from zero.
pub mod report;

pub mod render;
pub mod statement;
pub mod table;
pub mod transaction;

pub use error::{LedgerError, LineMeta};
pub use ledger::Ledger;
pub use parser::{parse, parse_file};
pub use report::prepare_reports;
