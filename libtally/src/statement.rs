use crate::account::AccountName;
use crate::error::ErrorKind;
use crate::parser::{LedgerParser, Rule};
use crate::transaction::ParsedTransaction;
use chrono::NaiveDate;
use pest::Parser;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of a date directive, `YYYY-MM-DD`.
pub const DATE_WIDTH: usize = 10;

/// One line of a ledger file, classified by the shape of its
/// whitespace separated tokens.
#[derive(Debug, PartialEq)]
pub enum Statement<'s> {
    Comment,
    Alias(&'s str, AccountName),
    Date(NaiveDate),
    Transaction(ParsedTransaction<'s>),
}

impl<'s> Statement<'s> {
    pub fn parse(line: &'s str) -> Result<Statement<'s>, ErrorKind> {
        let tokens: Vec<&'s str> = line.split_whitespace().collect();

        match tokens[..] {
            [] => Ok(Statement::Comment),
            [first, ..] if first.starts_with('#') => Ok(Statement::Comment),
            ["alias", name, account] => Self::alias(name, account),
            [date] if date.len() == DATE_WIDTH => parse_date(date).map(Statement::Date),
            [amount, debit, credit] => {
                ParsedTransaction::parse(amount, debit, credit).map(Statement::Transaction)
            }
            _ => Err(ErrorKind::Syntax),
        }
    }

    fn alias(name: &'s str, account: &'s str) -> Result<Statement<'s>, ErrorKind> {
        if !is_alias_name(name) {
            return Err(ErrorKind::InvalidAliasName);
        }
        let account =
            AccountName::try_from(account).map_err(|_| ErrorKind::InvalidAliasTarget)?;
        Ok(Statement::Alias(name, account))
    }
}

pub fn is_alias_name(token: &str) -> bool {
    LedgerParser::parse(Rule::alias_name, token).is_ok()
}

pub fn parse_date(token: &str) -> Result<NaiveDate, ErrorKind> {
    LedgerParser::parse(Rule::date, token).map_err(|_| ErrorKind::InvalidDate)?;
    NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|_| ErrorKind::InvalidDate)
}
