use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ErrorKind;
use crate::parser::{LedgerParser, Rule};
use pest::Parser;

/// Length of the account type character and the colon following it.
const TYPE_PREFIX_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountType {
    None,
    Asset,
    Debt,
    Expense,
    Income,
}

impl AccountType {
    /// Type of an account name judging only by its first character.
    /// Anything unrecognized, including the empty string, is `None`.
    pub fn of(name: &str) -> AccountType {
        match name.as_bytes().first() {
            Some(b'a') => AccountType::Asset,
            Some(b'd') => AccountType::Debt,
            Some(b'e') => AccountType::Expense,
            Some(b'i') => AccountType::Income,
            _ => AccountType::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccountType::None => "none",
            AccountType::Asset => "asset",
            AccountType::Debt => "debt",
            AccountType::Expense => "expense",
            AccountType::Income => "income",
        }
    }

    /// Balance sheet accounts carry their balance over into the next period,
    /// the others start every period from zero.
    pub fn is_balance_sheet(self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Debt)
    }

    /// Signed balance of a `[debit, credit]` pair.
    pub fn balance(self, drcr: &[f64; 2]) -> f64 {
        match self {
            AccountType::Asset | AccountType::Expense => drcr[0] - drcr[1],
            AccountType::Debt | AccountType::Income => drcr[1] - drcr[0],
            AccountType::None => 0f64,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated hierarchical account name, e.g. `e:food.snacks`.
///
/// The bare type prefix (`e:`) is the root of its hierarchy and a valid
/// account on its own. Ordering treats `.` as a stronger separator than any
/// other character so sub-accounts sort directly below their parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccountName(String);

impl AccountName {
    /// Check `name` against the account name grammar.
    pub fn valid(name: &str) -> bool {
        LedgerParser::parse(Rule::account_name, name).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn account_type(&self) -> AccountType {
        AccountType::of(&self.0)
    }

    fn path(&self) -> &str {
        &self.0[TYPE_PREFIX_LEN..]
    }

    /// `e:food.snacks` -> `e:food` -> `e:` -> None
    pub fn parent(&self) -> Option<AccountName> {
        if self.path().is_empty() {
            return None;
        }
        let end = self.0.rfind('.').unwrap_or(TYPE_PREFIX_LEN);
        Some(AccountName(self.0[..end].to_string()))
    }

    /// `e:food.snacks` -> `snacks`, `e:food` -> `food`, `e:` -> `expense`
    pub fn leaf(&self) -> &str {
        let path = self.path();
        if path.is_empty() {
            return self.account_type().name();
        }
        match path.rfind('.') {
            Some(idx) => &path[idx + 1..],
            None => path,
        }
    }

    /// `e:food.snacks` -> 2, `e:food` -> 1, `e:` -> 0
    pub fn depth(&self) -> usize {
        let path = self.path();
        if path.is_empty() {
            0
        } else {
            1 + path.matches('.').count()
        }
    }

    /// Walks from this account up to its type prefix, both included.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }

    fn sort_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().map(|c| if c == '.' { ' ' } else { c })
    }
}

pub struct Ancestors {
    next: Option<AccountName>,
}

impl Iterator for Ancestors {
    type Item = AccountName;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl TryFrom<&str> for AccountName {
    type Error = ErrorKind;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if !AccountName::valid(s) {
            return Err(ErrorKind::InvalidAccountName(s.to_string()));
        }
        Ok(AccountName(s.to_string()))
    }
}

impl FromStr for AccountName {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AccountName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Ord for AccountName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_chars().cmp(other.sort_chars())
    }
}

impl PartialOrd for AccountName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
