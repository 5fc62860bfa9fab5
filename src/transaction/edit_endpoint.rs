use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints,
    transaction::{create_endpoint::TransactionForm, update_transaction},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Overwrite every field of a transaction, redirects to transactions view on success.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(error) => {
            tracing::warn!("rejected update to transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_transaction(transaction_id, input, &connection) {
        Ok(_) => tracing::info!("updated transaction {transaction_id}"),
        Err(Error::UpdateMissingTransaction) => {
            tracing::warn!("Could not update transaction {transaction_id}: it does not exist");
            return Error::UpdateMissingTransaction.into_alert_response();
        }
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        endpoints, initialize_db,
        test_utils::assert_hx_redirect,
        transaction::{
            Transaction, TransactionInput, TransactionType, create_endpoint::TransactionForm,
            create_transaction,
            edit_endpoint::{EditTransactionState, edit_transaction_endpoint},
            get_all_transactions, get_transaction,
        },
    };

    fn must_create_test_state() -> EditTransactionState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize_db(&connection).expect("could not initialize test DB");
        create_transaction(
            TransactionInput::new(
                date!(2025 - 10 - 27),
                "Food",
                "test",
                TransactionType::Expense,
                1.23,
            )
            .expect("could not build test input"),
            &connection,
        )
        .expect("could not create test transaction");

        EditTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn salary_form(date: &str, amount: &str) -> TransactionForm {
        TransactionForm {
            date: date.to_owned(),
            category: "Salary".to_owned(),
            description: "foo".to_owned(),
            type_: "income".to_owned(),
            amount: amount.to_owned(),
        }
    }

    fn must_get_all(state: &EditTransactionState) -> Vec<Transaction> {
        get_all_transactions(&state.db_connection.lock().expect("could not get lock"))
            .expect("could not get transactions")
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = must_create_test_state();
        let want_transaction = Transaction {
            id: 1,
            date: date!(2025 - 10 - 28),
            category: "Salary".to_owned(),
            description: "foo".to_owned(),
            type_: TransactionType::Income,
            amount: 3.21,
        };
        let form = TransactionForm {
            date: "2025-10-28".to_owned(),
            category: want_transaction.category.clone(),
            description: want_transaction.description.clone(),
            type_: "income".to_owned(),
            amount: "3.21".to_owned(),
        };

        let response =
            edit_transaction_endpoint(State(state.clone()), Path(want_transaction.id), Form(form))
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let got_transaction = get_transaction(
            want_transaction.id,
            &state.db_connection.lock().expect("could not get lock"),
        )
        .expect("could not get test transaction");
        assert_eq!(want_transaction, got_transaction);
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let state = must_create_test_state();
        let before = must_get_all(&state);
        let form = salary_form("2025-10-28", "3.21");

        let response = edit_transaction_endpoint(State(state.clone()), Path(99), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(before, must_get_all(&state));
    }

    #[tokio::test]
    async fn invalid_update_leaves_transaction_unchanged() {
        let state = must_create_test_state();
        let before = must_get_all(&state);
        let cases = [
            salary_form("2025-10-28", "-3.21"),
            salary_form("2025-10-28", ""),
            salary_form("2025-02-29", "3.21"),
        ];

        for form in cases {
            let response =
                edit_transaction_endpoint(State(state.clone()), Path(1), Form(form)).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(before, must_get_all(&state));
        }
    }
}
