use crate::{
    account::AccountName,
    error::{ErrorKind, LedgerError, LineMeta},
    parser,
    statement::Statement,
    transaction::{ParsedTransaction, ReferenceLookup, Transaction},
};
use anyhow::Result;
use chrono::naive::NaiveDate;
use indexmap::IndexMap;
use log::trace;

use std::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    pub name: String,
    pub account: AccountName,
    pub defined_at: LineMeta,
}

/// Validated data read from ledger files.
///
/// Aliases and the current date are shared by every file read into the
/// same ledger, in the order the files are read. Transactions only ever
/// reference account names, aliases are expanded as they are read.
#[derive(Debug, Default)]
pub struct Ledger {
    aliases: IndexMap<String, Alias>,
    transactions: Vec<Transaction>,
    current_date: Option<(NaiveDate, LineMeta)>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            aliases: IndexMap::new(),
            transactions: Vec::new(),
            current_date: None,
        }
    }

    /// Read a ledger file, continuing from whatever was read before.
    pub fn read_file(&mut self, path: &Path) -> Result<()> {
        parser::parse_file(path, self)
    }

    pub fn read_str(&mut self, source: &str, input: &str) -> Result<(), LedgerError> {
        parser::parse(source, input, self)
    }

    pub fn process_statement(
        &mut self,
        statement: Statement<'_>,
        at: &LineMeta,
    ) -> Result<(), LedgerError> {
        trace!("{}: {:?}", at, statement);
        match statement {
            Statement::Comment => Ok(()),
            Statement::Alias(name, account) => self.add_alias(name, account, at),
            Statement::Date(date) => self.set_date(date, at),
            Statement::Transaction(parsed_trx) => self.transaction(&parsed_trx, at),
        }
    }

    /// Move the date cursor. Dates never go backwards, a rejected date
    /// leaves the cursor where it was.
    pub fn set_date(&mut self, date: NaiveDate, at: &LineMeta) -> Result<(), LedgerError> {
        if let Some((previous, previous_at)) = &self.current_date {
            if date < *previous {
                return Err(at.error_at(ErrorKind::DateRegression {
                    date,
                    previous: *previous,
                    previous_at: previous_at.clone(),
                }));
            }
        }
        self.current_date = Some((date, at.clone()));
        Ok(())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.current_date.as_ref().map(|(date, _)| *date)
    }

    pub fn add_alias(
        &mut self,
        name: &str,
        account: AccountName,
        at: &LineMeta,
    ) -> Result<(), LedgerError> {
        if let Some(first) = self.aliases.get(name) {
            return Err(at.error_at(ErrorKind::AliasRedefined {
                alias: name.to_string(),
                first: first.defined_at.clone(),
            }));
        }
        self.aliases.insert(
            name.to_string(),
            Alias {
                name: name.to_string(),
                account,
                defined_at: at.clone(),
            },
        );
        Ok(())
    }

    pub fn alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    /// Aliases in the order they were defined.
    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    fn transaction(
        &mut self,
        parsed_trx: &ParsedTransaction<'_>,
        at: &LineMeta,
    ) -> Result<(), LedgerError> {
        let transaction =
            Transaction::create(&*self, parsed_trx).map_err(|kind| at.error_at(kind))?;
        self.transactions.push(transaction);
        Ok(())
    }

    /// Every transaction read so far, in file then line order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl ReferenceLookup for Ledger {
    fn alias_lookup(&self, alias: &str) -> Option<&AccountName> {
        self.aliases.get(alias).map(|a| &a.account)
    }

    fn current_date(&self) -> Option<NaiveDate> {
        self.date()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorCategory, ErrorKind, LineMeta};
    use crate::ledger::Ledger;
    use crate::statement::Statement;
    use chrono::NaiveDate;

    use anyhow::{anyhow, Result};

    fn ymd(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d).ok_or(anyhow!("invalid date"))
    }

    #[test]
    fn read_alias_date_and_transaction() -> Result<()> {
        let mut ledger = Ledger::new();
        ledger.read_str("book.txt", "alias cash a:cash\n2024-03-01\n10.50 cash i:salary\n")?;

        let transactions = ledger.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, ymd(2024, 3, 1)?);
        assert_eq!(transactions[0].amount, 10.5f64);
        assert_eq!(transactions[0].debit().as_str(), "a:cash");
        assert_eq!(transactions[0].credit().as_str(), "i:salary");

        let mut comma = Ledger::new();
        comma.read_str("book.txt", "alias cash a:cash\n2024-03-01\n10,50 cash i:salary\n")?;
        assert_eq!(comma.transactions()[0].amount, transactions[0].amount);
        Ok(())
    }

    #[test]
    fn monotonic_dates() -> Result<()> {
        let mut ledger = Ledger::new();
        let dates = [ymd(2024, 1, 1)?, ymd(2024, 1, 1)?, ymd(2024, 2, 3)?];
        for (idx, date) in dates.iter().enumerate() {
            ledger.set_date(*date, &LineMeta::new("a.txt", idx + 1))?;
        }
        assert_eq!(ledger.date(), Some(ymd(2024, 2, 3)?));

        let err = ledger
            .set_date(ymd(2024, 2, 2)?, &LineMeta::new("b.txt", 7))
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::DateRegression {
                date: ymd(2024, 2, 2)?,
                previous: ymd(2024, 2, 3)?,
                previous_at: LineMeta::new("a.txt", 3),
            }
        );
        assert_eq!(err.at, LineMeta::new("b.txt", 7));
        assert_eq!(ledger.date(), Some(ymd(2024, 2, 3)?));
        Ok(())
    }

    #[test]
    fn invalid_date_keeps_cursor() -> Result<()> {
        let mut ledger = Ledger::new();
        ledger.read_str("a.txt", "2024-01-05")?;
        let err = ledger.read_str("a.txt", "2024-13-01").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDate);
        assert_eq!(ledger.date(), Some(ymd(2024, 1, 5)?));
        Ok(())
    }

    #[test]
    fn alias_redefinition() -> Result<()> {
        let mut ledger = Ledger::new();
        ledger.read_str("a.txt", "# aliases\nalias cash a:cash")?;

        // Redefining with the very same target is still rejected.
        let err = ledger.read_str("b.txt", "alias cash a:cash").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "at 'b.txt:1', alias 'cash' redefined, first seen at 'a.txt:2'"
        );
        assert_eq!(err.category(), ErrorCategory::Semantic);

        assert_eq!(ledger.alias("cash").map(|a| a.account.as_str()), Some("a:cash"));
        assert_eq!(ledger.aliases().count(), 1);
        Ok(())
    }

    #[test]
    fn state_carries_across_sources() -> Result<()> {
        let mut ledger = Ledger::new();
        ledger.read_str("first.txt", "alias card d:visa\n2024-05-01\n")?;
        ledger.read_str("second.txt", "12 e:fuel card\n")?;

        assert_eq!(ledger.transactions()[0].date, ymd(2024, 5, 1)?);
        assert_eq!(ledger.transactions()[0].credit().as_str(), "d:visa");

        let err = ledger.read_str("third.txt", "\n2024-04-30\n").unwrap_err();
        assert_eq!(err.at, LineMeta::new("third.txt", 2));
        Ok(())
    }

    #[test]
    fn transaction_errors() -> Result<()> {
        let mut ledger = Ledger::new();
        let err = ledger.read_str("a.txt", "5 e:food a:cash").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingDate);

        ledger.read_str("a.txt", "2024-01-01")?;
        let err = ledger.read_str("a.txt", "5 e:food cash").unwrap_err();
        assert_eq!(format!("{}", err), "at 'a.txt:1', referenced alias 'cash' is undefined");

        let err = ledger.read_str("a.txt", "5 e:food a:ca$h").unwrap_err();
        assert_eq!(format!("{}", err), "at 'a.txt:1', invalid account name 'a:ca$h'");

        let err = ledger.read_str("a.txt", "5,0,0 e:food a:cash").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidAmount);

        assert!(ledger.transactions().is_empty());
        Ok(())
    }

    #[test]
    fn stops_at_first_error() -> Result<()> {
        let mut ledger = Ledger::new();
        let err = ledger
            .read_str("a.txt", "2024-01-01\n1 e:a a:b\nnot a directive at all\n2 e:a a:b\n")
            .unwrap_err();
        assert_eq!(err.at, LineMeta::new("a.txt", 3));
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(ledger.transactions().len(), 1);
        Ok(())
    }

    #[test]
    fn process_comment_statement() -> Result<()> {
        let mut ledger = Ledger::new();
        ledger.process_statement(Statement::Comment, &LineMeta::new("a.txt", 1))?;
        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.date(), None);
        Ok(())
    }
}
