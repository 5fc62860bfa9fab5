//! The page listing every transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, link,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType, get_all_transactions},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render a table of all transactions, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let mut transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok(transactions_view(&transactions).into_response())
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex justify-between flex-wrap items-end"
            {
                h1 class="text-xl font-bold" { "Transactions" }

                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Create Transaction"
                }
            }

            @if transactions.is_empty() {
                p class="mt-4"
                {
                    "Nothing here yet. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Add your first transaction"))
                    " to get started."
                }
            } @else {
                div class="relative overflow-x-auto shadow-md sm:rounded-lg mt-4"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row_view(transaction))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn amount_class(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Expense => "text-red-700 dark:text-red-300",
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE) { (transaction.type_.label()) }
            td class={ "px-6 py-4 text-right " (amount_class(transaction.type_)) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) { (link(&edit_url, "Edit")) }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        db::initialize,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{TransactionInput, TransactionType, create_transaction},
    };

    use super::{
        MAX_DESCRIPTION_GRAPHEMES, TransactionsViewState, format_description,
        get_transactions_page,
    };

    fn get_test_state() -> TransactionsViewState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionsViewState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn empty_page_shows_prompt() {
        let state = get_test_state();

        let response = get_transactions_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(document.select(&Selector::parse("table").unwrap()).count(), 0);
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Add your first transaction"));
    }

    #[tokio::test]
    async fn lists_transactions_newest_first_with_edit_links() {
        let state = get_test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            for (date, description, type_, amount) in [
                (date!(2025 - 01 - 10), "Rent", TransactionType::Expense, 900.0),
                (date!(2025 - 03 - 01), "Salary", TransactionType::Income, 1500.0),
                (date!(2025 - 02 - 14), "Dinner", TransactionType::Expense, 85.5),
            ] {
                let input = TransactionInput::new(date, "General", description, type_, amount)
                    .unwrap();
                create_transaction(input, &conn).unwrap();
            }
        }

        let response = get_transactions_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = document
            .select(&Selector::parse("tr[data-transaction-row]").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 3);

        let dates = rows
            .iter()
            .map(|row| {
                row.select(&Selector::parse("time").unwrap())
                    .next()
                    .unwrap()
                    .value()
                    .attr("datetime")
                    .unwrap()
                    .to_owned()
            })
            .collect::<Vec<_>>();
        assert_eq!(dates, ["2025-03-01", "2025-02-14", "2025-01-10"]);

        let edit_link = rows[0]
            .select(&Selector::parse("a").unwrap())
            .next()
            .and_then(|a| a.value().attr("href"));
        assert_eq!(edit_link, Some("/transactions/2/edit"));
        let first_row_text = rows[0].text().collect::<String>();
        assert!(first_row_text.contains("R$ 1,500.00"));
        assert!(first_row_text.contains("Income"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let description = "a".repeat(MAX_DESCRIPTION_GRAPHEMES + 5);

        let (shown, tooltip) = format_description(&description);

        assert_eq!(shown.chars().count(), MAX_DESCRIPTION_GRAPHEMES);
        assert!(shown.ends_with("..."));
        assert_eq!(tooltip, Some(description.as_str()));
    }

    #[test]
    fn short_descriptions_are_unchanged() {
        let (shown, tooltip) = format_description("Lunch");

        assert_eq!(shown, "Lunch");
        assert_eq!(tooltip, None);
    }
}
