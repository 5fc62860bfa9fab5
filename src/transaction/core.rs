//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use time::Date;

use crate::{Error, database_id::TransactionId, validation::ValidationError};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was received or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    /// Money received, e.g. a salary payment.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// Both transaction types, income first.
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// The value used in the database and in HTML forms.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The human readable name.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    /// Parses "income" or "expense", ignoring case and surrounding whitespace.
    ///
    /// The Portuguese labels "entrada" and "saída" are also accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "entrada" => Ok(TransactionType::Income),
            "expense" | "saída" | "saida" => Ok(TransactionType::Expense),
            _ => Err(ValidationError::InvalidTransactionType(s.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are only created by [create_transaction], which assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A free-text label used to group transactions, e.g. "Groceries".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether money was received or spent.
    pub type_: TransactionType,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
}

/// The validated fields for creating or updating a transaction.
///
/// The only way to get a `TransactionInput` is [TransactionInput::new], so
/// the database functions never see input that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    date: Date,
    category: String,
    description: String,
    type_: TransactionType,
    amount: f64,
}

impl TransactionInput {
    /// Validate the fields of a transaction.
    ///
    /// Leading and trailing whitespace is removed from `category` and
    /// `description`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ValidationError::EmptyCategory] if `category` is blank,
    /// - [ValidationError::EmptyDescription] if `description` is blank,
    /// - [ValidationError::NonFiniteAmount] if `amount` is NaN or infinite,
    /// - or [ValidationError::NonPositiveAmount] if `amount` is not greater than zero.
    pub fn new(
        date: Date,
        category: &str,
        description: &str,
        type_: TransactionType,
        amount: f64,
    ) -> Result<Self, ValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }

        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        Ok(Self {
            date,
            category: category.to_owned(),
            description: description.to_owned(),
            type_,
            amount,
        })
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The trimmed category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The trimmed description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether money was received or spent.
    pub fn type_(&self) -> TransactionType {
        self.type_
    }

    /// The amount, always greater than zero.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The returned transaction has the newly assigned ID, which is greater than
/// any ID previously assigned in this database.
///
/// # Errors
/// This function will return a [Error::StorageUnavailable] if there is an SQL error.
pub fn create_transaction(
    input: TransactionInput,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transacoes (date, category, description, \"type\", amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, category, description, \"type\", amount",
        )?
        .query_row(
            (
                input.date,
                input.category,
                input.description,
                input.type_,
                input.amount,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve every transaction in the database.
///
/// The transactions are returned in the order SQLite stores them. Callers that
/// need a particular order must sort the result themselves.
///
/// # Errors
/// This function will return a [Error::StorageUnavailable] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare("SELECT id, date, category, description, \"type\", amount FROM transacoes")?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::StorageUnavailable] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, date, category, description, \"type\", amount FROM transacoes WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Replace every field except the ID of the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
///   in which case nothing is changed,
/// - or [Error::StorageUnavailable] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    input: TransactionInput,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let rows_affected = connection.execute(
        "UPDATE transacoes
        SET \
            date = ?1, \
            category = ?2, \
            description = ?3, \
            \"type\" = ?4, \
            amount = ?5 \
        WHERE id = ?6;",
        params![
            input.date,
            input.category,
            input.description,
            input.type_,
            input.amount,
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(Transaction {
        id,
        date: input.date,
        category: input.category,
        description: input.description,
        type_: input.type_,
        amount: input.amount,
    })
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::StorageUnavailable] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transacoes;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transacoes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                \"type\" TEXT NOT NULL CHECK (\"type\" IN ('income', 'expense')),
                amount REAL NOT NULL CHECK (amount > 0)
                )",
        (),
    )?;

    // Used by the dashboard when filtering by month and year.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transacoes_date ON transacoes(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let category = row.get(2)?;
    let description = row.get(3)?;
    let type_ = row.get(4)?;
    let amount = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        category,
        description,
        type_,
        amount,
    })
}

// ============================================================================
// TESTS
// ============================================================================
