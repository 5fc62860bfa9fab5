//! Errors for user input that is rejected before it reaches the database.

/// The reasons user input can be rejected.
///
/// Input is validated before any store operation is attempted, so a
/// `ValidationError` always means the database was left untouched.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The category was empty or only whitespace.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The description was empty or only whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount was zero or negative.
    ///
    /// Whether money was earned or spent is recorded by the transaction type,
    /// so amounts are always positive.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// The amount was not a number, e.g. an empty form field.
    #[error("\"{0}\" is not a valid amount, expected a number such as 12.50")]
    InvalidAmount(String),

    /// The date was not a real calendar date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected a date such as 2025-03-01")]
    InvalidDate(String),

    /// The amount was NaN or infinite.
    #[error("amount must be a finite number")]
    NonFiniteAmount,

    /// The transaction type was not one of "income" or "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// The month filter was not a number between 1 and 12.
    #[error("\"{0}\" is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(String),

    /// The year filter was not a whole number.
    #[error("\"{0}\" is not a valid year")]
    InvalidYear(String),
}
