use crate::amount::{amount_to_string, balance_to_string, delta_to_string};
use crate::report::{Period, PeriodReport, Report, Reports};
use crate::statement::DATE_FORMAT;
use crate::table::{Cell, Table};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::info;

use std::fs;
use std::path::{Path, PathBuf};

/// Spaces of indentation per account depth.
const INDENT: usize = 4;

fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

impl Report {
    pub fn title(&self) -> String {
        let from = self.from();
        match self.period() {
            Period::All => "All transactions".to_string(),
            Period::Yearly => format!("{}", from.year()),
            Period::Quarterly => format!("Q{} {}", quarter(from), from.year()),
            Period::Monthly => from.format("%B %Y").to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        let from = self.from();
        match self.period() {
            Period::All => "all.txt".to_string(),
            Period::Yearly => format!("{}.txt", from.year()),
            Period::Quarterly => format!("{}-Q{}.txt", from.year(), quarter(from)),
            Period::Monthly => format!("{}-{:02}.txt", from.year(), from.month()),
        }
    }
}

fn account_table(view: &PeriodReport<'_>) -> Table {
    let mut t = Table::new();
    t.set_titles(vec![
        Cell::new("account"),
        Cell::new("amount"),
        Cell::new("cumulative"),
        Cell::new("delta"),
    ]);

    for account in view.report().sorted_accounts() {
        let name = account.name();
        let cumulative = balance_to_string(account.cumulative_balance());
        let delta = delta_to_string(view.account_delta(name.as_str()));

        // Nothing in this period and nothing changed since the last one.
        if cumulative == "-" && delta == "+0.00" {
            continue;
        }
        t.add_row(vec![
            Cell::new(name.leaf()).pad_left(INDENT * name.depth()),
            Cell::right(balance_to_string(account.flat_balance())),
            Cell::right(cumulative),
            Cell::right(delta),
        ]);
    }
    t
}

fn transaction_table(report: &Report) -> Table {
    let mut t = Table::new();
    t.set_titles(vec![
        Cell::new("date"),
        Cell::new("account"),
        Cell::new("debit"),
        Cell::new("credit"),
    ]);

    let mut prev_date = None;
    for tr in report.transactions() {
        let date = if prev_date != Some(tr.date) {
            tr.date.format(DATE_FORMAT).to_string()
        } else {
            String::new()
        };
        prev_date = Some(tr.date);

        let amount = amount_to_string(tr.amount);
        t.add_row(vec![
            Cell::new(date),
            Cell::new(tr.debit().as_str()),
            Cell::right(amount.as_str()),
            Cell::new(""),
        ]);
        t.add_row(vec![
            Cell::new(""),
            Cell::new(tr.credit().as_str()),
            Cell::new(""),
            Cell::right(amount),
        ]);
    }
    t
}

/// The full text of a report file.
pub fn render(view: &PeriodReport<'_>) -> String {
    let report = view.report();
    let mut buf = format!("{}\n\n", report.title());
    buf.push_str(&account_table(view).render_text());
    buf.push_str("\nTransactions\n\n");
    buf.push_str(&transaction_table(report).render_text());
    buf
}

/// Write one report into `output_dir`, returning the file written.
pub fn generate(view: &PeriodReport<'_>, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(view.report().file_name());
    fs::write(&path, render(view))
        .with_context(|| format!("could not write report '{}'", path.display()))?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Write every report, stopping at the first failure.
pub fn generate_all(reports: &Reports, output_dir: &Path) -> Result<Vec<PathBuf>> {
    reports
        .iter()
        .map(|view| generate(&view, output_dir))
        .collect()
}
