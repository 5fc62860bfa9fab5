//! Cashbook is a web app for recording personal income and expenses.
//!
//! Transactions are kept in a single SQLite table, and a charts page sums
//! them by month and transaction type.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    MonthlyRollup, TypeTotals, aggregate, available_years, month_label, monthly_chart,
    parse_month_filter, parse_year_filter,
};
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use transaction::{
    Transaction, TransactionInput, TransactionType, count_transactions, create_transaction,
    get_all_transactions, get_transaction, update_transaction,
};
pub use validation::ValidationError;

use crate::{
    alert::Alert, html::error_view, internal_server_error::ServerFault,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The database could not be opened, read or written.
    ///
    /// The string is the underlying SQLite error and should only be logged
    /// on the server.
    #[error("the database is unavailable: {0}")]
    StorageUnavailable(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// The user's input was rejected before it reached the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StorageUnavailable(error.to_string())
            }
        }
    }
}

impl Error {
    /// Whether the error means the requested transaction does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound | Error::UpdateMissingTransaction)
    }

    /// Whether the error came from the database rather than the user's input.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable(_) | Error::DatabaseLockError)
    }

    fn into_alert_response(self) -> Response {
        match self {
            Error::Validation(error) => Alert::error("Invalid transaction", &error.to_string())
                .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NotFound | Error::UpdateMissingTransaction => Alert::warning(
                "Could not update transaction",
                "The transaction could not be found. \
                Try going back to the transactions page to see if it still exists.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::StorageUnavailable(_) | Error::DatabaseLockError => Alert::error(
                "Something went wrong",
                "The transaction could not be saved, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingTransaction => get_404_not_found_response(),
            Error::Validation(error) => {
                let page = error_view(
                    "Bad Request",
                    "400",
                    "That request did not make sense.",
                    &error.to_string(),
                );

                (StatusCode::BAD_REQUEST, Html(page.into_string())).into_response()
            }
            Error::InvalidTimezoneError(timezone) => {
                ServerFault::UnknownTimezone(timezone).into_response()
            }
            error @ (Error::StorageUnavailable(_) | Error::DatabaseLockError) => {
                tracing::error!("An unexpected error occurred: {}", error);
                ServerFault::Unexpected.into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, ValidationError};

    #[test]
    fn no_rows_is_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
        assert!(error.is_not_found());
        assert!(!error.is_storage_unavailable());
    }

    #[test]
    fn other_sql_errors_are_storage_unavailable() {
        let error = Error::from(rusqlite::Error::InvalidColumnIndex(0));

        assert!(error.is_storage_unavailable());
        assert!(!error.is_not_found());
    }

    #[test]
    fn lock_error_is_storage_unavailable() {
        assert!(Error::DatabaseLockError.is_storage_unavailable());
    }

    #[test]
    fn alert_status_codes() {
        let cases = [
            (
                Error::Validation(ValidationError::EmptyCategory),
                StatusCode::BAD_REQUEST,
            ),
            (Error::UpdateMissingTransaction, StatusCode::NOT_FOUND),
            (
                Error::StorageUnavailable("disk I/O error".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, want_status) in cases {
            let response = error.into_alert_response();

            assert_eq!(response.status(), want_status);
        }
    }

    #[test]
    fn page_status_codes() {
        let cases = [
            (Error::NotFound, StatusCode::NOT_FOUND),
            (
                Error::Validation(ValidationError::InvalidYear("soon".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want_status) in cases {
            assert_eq!(error.into_response().status(), want_status);
        }
    }
}
