//! Monthly income and expense totals for the dashboard charts.
//!
//! Transactions are grouped by calendar month only, so the same month in
//! different years ends up in the same group unless a year filter is applied.

use std::collections::{BTreeMap, BTreeSet};

use time::Month;

use crate::{
    transaction::{Transaction, TransactionType},
    validation::ValidationError,
};

/// The summed amounts for each transaction type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypeTotals {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
}

impl TypeTotals {
    /// The total for `type_`.
    pub fn get(&self, type_: TransactionType) -> f64 {
        match type_ {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }

    fn add(&mut self, type_: TransactionType, amount: f64) {
        match type_ {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expense += amount,
        }
    }
}

/// Transaction amounts summed by calendar month and transaction type.
///
/// Every month that appears in the rollup has a total for both transaction
/// types, and [MonthlyRollup::amount] reads as zero for months that do not
/// appear, so there is never a missing value to chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyRollup {
    /// Keyed by month number (1 = January) so iteration is in calendar order.
    months: BTreeMap<u8, TypeTotals>,
    /// The totals for each type across all months.
    pub totals: TypeTotals,
}

impl MonthlyRollup {
    /// The summed amount for `type_` in `month`, zero if there were no such transactions.
    pub fn amount(&self, month: Month, type_: TransactionType) -> f64 {
        self.months
            .get(&(month as u8))
            .map(|totals| totals.get(type_))
            .unwrap_or(0.0)
    }

    /// The months with at least one transaction, in calendar order.
    pub fn months(&self) -> Vec<Month> {
        self.months
            .keys()
            .filter_map(|&month| Month::try_from(month).ok())
            .collect()
    }

    /// Three-letter labels for [MonthlyRollup::months], e.g. "Jan".
    pub fn month_labels(&self) -> Vec<String> {
        self.months()
            .into_iter()
            .map(|month| month_label(month).to_owned())
            .collect()
    }

    /// The totals of `type_` for each of [MonthlyRollup::months], in the same order.
    pub fn series(&self, type_: TransactionType) -> Vec<f64> {
        self.months
            .values()
            .map(|totals| totals.get(type_))
            .collect()
    }

    /// Whether no transactions were aggregated.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Sum the transaction amounts by month and type, and by type alone.
///
/// If `month_filter` is set, only transactions in that calendar month are
/// included. If `year_filter` is set, only transactions in that year are
/// included. An empty result is not an error.
pub fn aggregate(
    transactions: &[Transaction],
    month_filter: Option<Month>,
    year_filter: Option<i32>,
) -> MonthlyRollup {
    let mut rollup = MonthlyRollup::default();

    let filtered = transactions
        .iter()
        .filter(|transaction| month_filter.is_none_or(|month| transaction.date.month() == month))
        .filter(|transaction| year_filter.is_none_or(|year| transaction.date.year() == year));

    for transaction in filtered {
        rollup
            .months
            .entry(transaction.date.month() as u8)
            .or_default()
            .add(transaction.type_, transaction.amount);
        rollup.totals.add(transaction.type_, transaction.amount);
    }

    rollup
}

/// The distinct years that have transactions, in ascending order.
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parse the month filter from a query string value.
///
/// An absent or empty value, or "none", means no filter.
///
/// # Errors
/// Returns [ValidationError::InvalidMonth] if the value is not a number from 1 to 12.
pub fn parse_month_filter(raw: Option<&str>) -> Result<Option<Month>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !is_no_filter(raw)) else {
        return Ok(None);
    };

    raw.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidMonth(raw.to_owned()))
}

/// Parse the year filter from a query string value.
///
/// An absent or empty value, or "none", means no filter.
///
/// # Errors
/// Returns [ValidationError::InvalidYear] if the value is not a whole number.
pub fn parse_year_filter(raw: Option<&str>) -> Result<Option<i32>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !is_no_filter(raw)) else {
        return Ok(None);
    };

    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidYear(raw.to_owned()))
}

fn is_no_filter(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("none")
}

/// Formats a month as a three-letter abbreviation, e.g. "Jan".
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
