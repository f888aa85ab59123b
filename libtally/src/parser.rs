use crate::error::{LedgerError, LineMeta};
use crate::ledger::Ledger;
use crate::statement::Statement;
use anyhow::{Context, Result};
use log::debug;

use std::fs;
use std::path::Path;

#[derive(Parser)]
#[grammar = "ledger.pest"]
pub struct LedgerParser;

/// Read a ledger file into `ledger`. Aliases and the date cursor left by
/// previously read files stay in effect.
pub fn parse_file(path: &Path, ledger: &mut Ledger) -> Result<()> {
    let fcontent = fs::read_to_string(path)
        .with_context(|| format!("could not read '{}'", path.display()))?;
    parse(&path.display().to_string(), &fcontent, ledger)?;
    Ok(())
}

/// Parses ledger input as string slice, `source` names it in error locations.
/// Stops at the first erroneous line.
pub fn parse(source: &str, input: &str, ledger: &mut Ledger) -> Result<(), LedgerError> {
    let before = ledger.transactions().len();

    for (idx, line) in input.lines().enumerate() {
        let at = LineMeta::new(source, idx + 1);
        let statement = Statement::parse(line).map_err(|kind| at.error_at(kind))?;
        ledger.process_statement(statement, &at)?;
    }

    debug!(
        "{}: read {} transactions",
        source,
        ledger.transactions().len() - before
    );
    Ok(())
}
