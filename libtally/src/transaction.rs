use crate::account::AccountName;
use crate::amount::parse_amount;
use crate::error::ErrorKind;
use crate::statement::is_alias_name;

use chrono::NaiveDate;

/// Index of the debit leg.
pub const DR: usize = 0;
/// Index of the credit leg.
pub const CR: usize = 1;

#[derive(Debug, PartialEq)]
pub struct ParsedTransaction<'s> {
    pub(crate) amount: f64,
    pub(crate) accounts: [&'s str; 2],
}

impl<'s> ParsedTransaction<'s> {
    pub fn parse(
        amount: &'s str,
        debit: &'s str,
        credit: &'s str,
    ) -> Result<ParsedTransaction<'s>, ErrorKind> {
        Ok(ParsedTransaction {
            amount: parse_amount(amount)?,
            accounts: [debit, credit],
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Account references as written, either account names or aliases.
    pub fn references(&self) -> &[&'s str; 2] {
        &self.accounts
    }
}

/// What a transaction needs from the ledger state to be resolved.
pub trait ReferenceLookup {
    fn alias_lookup(&self, alias: &str) -> Option<&AccountName>;
    fn current_date(&self) -> Option<NaiveDate>;
}

/// A double entry transaction with both legs resolved to account names.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub accounts: [AccountName; 2],
}

impl Transaction {
    pub fn create<RL: ReferenceLookup>(
        ledger: &RL,
        parsed_trx: &ParsedTransaction,
    ) -> Result<Transaction, ErrorKind> {
        let date = ledger.current_date().ok_or(ErrorKind::MissingDate)?;

        let [debit, credit] = *parsed_trx.references();

        Ok(Transaction {
            date,
            amount: parsed_trx.amount(),
            accounts: [resolve(ledger, debit)?, resolve(ledger, credit)?],
        })
    }

    pub fn debit(&self) -> &AccountName {
        &self.accounts[DR]
    }

    pub fn credit(&self) -> &AccountName {
        &self.accounts[CR]
    }
}

/// Anything shaped like an alias name must be a defined alias, everything
/// else must be a valid account name.
fn resolve<RL: ReferenceLookup>(ledger: &RL, reference: &str) -> Result<AccountName, ErrorKind> {
    if is_alias_name(reference) {
        return ledger
            .alias_lookup(reference)
            .cloned()
            .ok_or_else(|| ErrorKind::UndefinedAlias(reference.to_string()));
    }
    AccountName::try_from(reference)
}

#[cfg(test)]
mod tests {
    use crate::account::AccountName;
    use crate::error::ErrorKind;
    use crate::transaction::{ParsedTransaction, ReferenceLookup, Transaction};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    use anyhow::{anyhow, Result};

    struct Lookup {
        aliases: HashMap<String, AccountName>,
        date: Option<NaiveDate>,
    }

    impl ReferenceLookup for Lookup {
        fn alias_lookup(&self, alias: &str) -> Option<&AccountName> {
            self.aliases.get(alias)
        }

        fn current_date(&self) -> Option<NaiveDate> {
            self.date
        }
    }

    fn lookup() -> Result<Lookup> {
        let mut aliases = HashMap::new();
        aliases.insert("cash".to_string(), "a:wallet.cash".parse()?);
        Ok(Lookup {
            aliases,
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
        })
    }

    #[test]
    fn parse_keeps_references_as_written() -> Result<()> {
        let parsed = ParsedTransaction::parse("10,50", "cash", "i:salary")?;
        assert_eq!(parsed.amount(), 10.5f64);
        assert_eq!(parsed.references(), &["cash", "i:salary"]);
        Ok(())
    }

    #[test]
    fn create_resolves_aliases() -> Result<()> {
        let lookup = lookup()?;
        let trx = Transaction::create(&lookup, &ParsedTransaction::parse("5", "e:food", "cash")?)?;

        assert_eq!(trx.date, lookup.date.ok_or(anyhow!("no date"))?);
        assert_eq!(trx.amount, 5f64);
        assert_eq!(trx.debit().as_str(), "e:food");
        assert_eq!(trx.credit().as_str(), "a:wallet.cash");
        Ok(())
    }

    #[test]
    fn create_with_bad_references() -> Result<()> {
        let lookup = lookup()?;
        assert_eq!(
            Transaction::create(&lookup, &ParsedTransaction::parse("5", "card", "cash")?)
                .unwrap_err(),
            ErrorKind::UndefinedAlias("card".to_string())
        );
        assert_eq!(
            Transaction::create(&lookup, &ParsedTransaction::parse("5", "e:food", "x:cash")?)
                .unwrap_err(),
            ErrorKind::InvalidAccountName("x:cash".to_string())
        );
        Ok(())
    }

    #[test]
    fn create_without_date() -> Result<()> {
        let mut lookup = lookup()?;
        lookup.date = None;
        assert_eq!(
            Transaction::create(&lookup, &ParsedTransaction::parse("5", "e:food", "cash")?)
                .unwrap_err(),
            ErrorKind::MissingDate
        );
        Ok(())
    }
}
