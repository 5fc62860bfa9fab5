use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner},
    internal_server_error::ServerFault,
    navigation::NavBar,
    not_found::get_404_not_found_response,
    transaction::{
        Transaction,
        form::{TransactionFormDefaults, transaction_form_fields},
        get_transaction,
    },
};

fn edit_transaction_view(transaction: &Transaction) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    let update_endpoint = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let fields = transaction_form_fields(&TransactionFormDefaults::from_transaction(transaction));

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Update Transaction"
                }
            }
        }
    };

    base("Edit Transaction", &[currency_input_styles()], &content)
}

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for reading the transaction.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a transaction, prefilled with its current values.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return ServerFault::Unexpected.into_response();
            }
        };

        match get_transaction(transaction_id, &connection) {
            Ok(transaction) => transaction,
            Err(Error::NotFound) => return get_404_not_found_response(),
            Err(error) => {
                tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
                return ServerFault::Unexpected.into_response();
            }
        }
    };

    edit_transaction_view(&transaction).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_form_input_with_value, assert_form_submit_button, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
        transaction::{
            TransactionInput, TransactionType, create_transaction,
            edit_page::{EditTransactionPageState, get_edit_transaction_page},
        },
    };

    fn get_test_state() -> EditTransactionPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        create_transaction(
            TransactionInput::new(
                date!(2025 - 03 - 14),
                "Food",
                "Lunch",
                TransactionType::Expense,
                40.0,
            )
            .unwrap(),
            &conn,
        )
        .unwrap();

        EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn renders_form_prefilled_with_transaction() {
        let state = get_test_state();

        let response = get_edit_transaction_page(State(state), Path(1)).await;

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, &format_endpoint(endpoints::TRANSACTION, 1), "hx-put");
        assert_form_input_with_value(&form, "date", "date", "2025-03-14");
        assert_form_input_with_value(&form, "category", "text", "Food");
        assert_form_input_with_value(&form, "description", "text", "Lunch");
        assert_form_input_with_value(&form, "amount", "number", "40.00");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = get_test_state();

        let response = get_edit_transaction_page(State(state), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
