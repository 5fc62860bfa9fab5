//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    transaction::core::{TransactionInput, TransactionType, create_transaction},
    validation::ValidationError,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating or editing a transaction.
///
/// Every field is kept as the raw text the browser sent, and missing fields
/// default to empty, so that all bad input is reported by [TransactionForm::validate].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// The date when the transaction occurred, formatted as YYYY-MM-DD.
    pub date: String,
    /// The user's label for grouping the transaction, e.g. "Groceries".
    pub category: String,
    /// Text detailing the transaction.
    pub description: String,
    /// Either "income" or "expense".
    pub type_: String,
    /// The value of the transaction in reais.
    pub amount: String,
}

impl TransactionForm {
    /// Check the form and turn it into input for the store.
    ///
    /// # Errors
    /// Returns an [Error::Validation] for an impossible or malformed date, an
    /// amount that is not a number, an unknown transaction type, or any of the
    /// errors from [TransactionInput::new].
    pub fn validate(&self) -> Result<TransactionInput, Error> {
        let date = Date::parse(self.date.trim(), format_description!("[year]-[month]-[day]"))
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;
        let type_: TransactionType = self.type_.parse()?;
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(self.amount.clone()))?;

        TransactionInput::new(date, &self.category, &self.description, type_, amount)
            .map_err(Error::from)
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(error) => {
            tracing::warn!("rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_transaction(input, &connection) {
        Ok(transaction) => {
            tracing::info!(
                "created transaction {} ({} {})",
                transaction.id,
                transaction.type_,
                transaction.amount
            );
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
