use crate::account::AccountName;
use crate::ledger::Ledger;
use crate::transaction::Transaction;

use chrono::{Datelike, Months, NaiveDate};
use indexmap::IndexMap;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    All,
    Yearly,
    Quarterly,
    Monthly,
}

impl Period {
    /// Every cadence reports are prepared for, in output order.
    pub const CADENCES: [Period; 4] = [
        Period::All,
        Period::Yearly,
        Period::Quarterly,
        Period::Monthly,
    ];

    /// Length of one window in months. The all-time window never ends.
    pub fn months(self) -> Option<u32> {
        match self {
            Period::All => None,
            Period::Yearly => Some(12),
            Period::Quarterly => Some(3),
            Period::Monthly => Some(1),
        }
    }

    /// End of the window opened at `from`.
    fn end(self, from: NaiveDate) -> NaiveDate {
        match self.months() {
            Some(months) => from
                .checked_add_months(Months::new(months))
                .unwrap_or(NaiveDate::MAX),
            None => NaiveDate::MAX,
        }
    }

    /// The `[from, to)` window containing `first`.
    fn window(self, first: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = match self.months() {
            None => first,
            Some(months) => {
                let start_month = first.month0() / months * months + 1;
                first
                    .with_day(1)
                    .and_then(|d| d.with_month(start_month))
                    .unwrap_or(first)
            }
        };
        (from, self.end(from))
    }
}

/// Account data stored in reports, as `[debit, credit]` sums.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    name: AccountName,
    /// Amounts posted to exactly this account.
    flat: [f64; 2],
    /// Amounts posted to this account and all of its sub-accounts.
    cumulative: [f64; 2],
}

impl Account {
    fn new(name: AccountName) -> Self {
        Account {
            name,
            flat: [0f64; 2],
            cumulative: [0f64; 2],
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn flat(&self) -> [f64; 2] {
        self.flat
    }

    pub fn cumulative(&self) -> [f64; 2] {
        self.cumulative
    }

    pub fn flat_balance(&self) -> f64 {
        self.name.account_type().balance(&self.flat)
    }

    pub fn cumulative_balance(&self) -> f64 {
        self.name.account_type().balance(&self.cumulative)
    }
}

/// Balances and transactions of one `[from, to)` window.
#[derive(Clone, Debug)]
pub struct Report {
    period: Period,
    from: NaiveDate,
    to: NaiveDate,
    transactions: Vec<Transaction>,
    accounts: IndexMap<AccountName, Account>,
}

impl Report {
    /// First report of a cadence, opened by the first transaction date.
    pub fn initial(period: Period, first: NaiveDate) -> Report {
        let (from, to) = period.window(first);
        Report {
            period,
            from,
            to,
            transactions: Vec::new(),
            accounts: IndexMap::new(),
        }
    }

    /// The report following this one. Asset and debt balances are carried
    /// over, expense and income accounts start from zero.
    pub fn next_period(&self) -> Report {
        let accounts = self
            .accounts
            .iter()
            .filter(|(name, _)| name.account_type().is_balance_sheet())
            .map(|(name, account)| (name.clone(), account.clone()))
            .collect();

        Report {
            period: self.period,
            from: self.to,
            to: self.period.end(self.to),
            transactions: Vec::new(),
            accounts,
        }
    }

    /// Post both legs of `tr`, the debit leg to index 0 and the credit leg
    /// to index 1, and record it in the transaction log.
    pub fn add_transaction(&mut self, tr: &Transaction) {
        for (leg, name) in tr.accounts.iter().enumerate() {
            self.account_mut(name).flat[leg] += tr.amount;

            for ancestor in name.ancestors() {
                self.account_mut(&ancestor).cumulative[leg] += tr.amount;
            }
        }
        self.transactions.push(tr.clone());
    }

    fn account_mut(&mut self, name: &AccountName) -> &mut Account {
        self.accounts
            .entry(name.clone())
            .or_insert_with(|| Account::new(name.clone()))
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts ordered so that sub-accounts follow their parent.
    pub fn sorted_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// The consecutive reports of one cadence. A report's predecessor is the
/// one right before it in the chain.
#[derive(Clone, Debug)]
pub struct ReportChain {
    closed: Vec<Report>,
    current: Report,
}

// A chain always holds at least its current report.
#[allow(clippy::len_without_is_empty)]
impl ReportChain {
    pub fn new(period: Period, first: NaiveDate) -> Self {
        ReportChain {
            closed: Vec::new(),
            current: Report::initial(period, first),
        }
    }

    pub fn period(&self) -> Period {
        self.current.period
    }

    /// Open successive reports until arriving at the one containing `date`.
    pub fn until_period(&mut self, date: NaiveDate) -> &mut Report {
        while date >= self.current.to {
            let next = self.current.next_period();
            debug!(
                "{:?} report {} closed, next starts {}",
                self.current.period, self.current.from, next.from
            );
            self.closed.push(std::mem::replace(&mut self.current, next));
        }
        &mut self.current
    }

    pub fn current(&self) -> &Report {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.closed.len() + 1
    }

    pub fn get(&self, index: usize) -> Option<PeriodReport<'_>> {
        (index < self.len()).then_some(PeriodReport { chain: self, index })
    }

    // `index` is always within the chain.
    fn at(&self, index: usize) -> &Report {
        if index == self.closed.len() {
            &self.current
        } else {
            &self.closed[index]
        }
    }

    /// Reports oldest first.
    pub fn iter(&self) -> impl Iterator<Item = PeriodReport<'_>> {
        (0..self.len()).map(move |index| PeriodReport { chain: self, index })
    }
}

/// A report together with its place in the chain.
#[derive(Clone, Copy, Debug)]
pub struct PeriodReport<'a> {
    chain: &'a ReportChain,
    index: usize,
}

impl<'a> PeriodReport<'a> {
    pub fn report(&self) -> &'a Report {
        self.chain.at(self.index)
    }

    pub fn previous(&self) -> Option<&'a Report> {
        self.index.checked_sub(1).map(|index| self.chain.at(index))
    }

    /// Change of the cumulative balance of `name` since the previous report.
    /// An account missing on either side counts as zero.
    pub fn account_delta(&self, name: &str) -> f64 {
        let curr = self
            .report()
            .account(name)
            .map(Account::cumulative_balance)
            .unwrap_or(0f64);
        let prev = self
            .previous()
            .and_then(|report| report.account(name))
            .map(Account::cumulative_balance)
            .unwrap_or(0f64);
        curr - prev
    }
}

#[derive(Clone, Debug, Default)]
pub struct Reports {
    chains: Vec<ReportChain>,
}

impl Reports {
    pub fn chain(&self, period: Period) -> Option<&ReportChain> {
        self.chains.iter().find(|chain| chain.period() == period)
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Every report of every cadence, each chain oldest first.
    pub fn iter(&self) -> impl Iterator<Item = PeriodReport<'_>> {
        self.chains.iter().flat_map(|chain| chain.iter())
    }
}

/// Walk the ledger transactions once, posting each to the current report of
/// every cadence.
pub fn prepare_reports(ledger: &Ledger) -> Reports {
    let mut chains: Vec<ReportChain> = Vec::new();

    for tr in ledger.transactions() {
        if chains.is_empty() {
            chains = Period::CADENCES
                .iter()
                .map(|&period| ReportChain::new(period, tr.date))
                .collect();
        }
        for chain in chains.iter_mut() {
            chain.until_period(tr.date).add_transaction(tr);
        }
    }

    Reports { chains }
}
