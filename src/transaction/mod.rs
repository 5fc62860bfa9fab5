//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `TransactionInput`
//! - Database functions for storing, querying, and updating transactions
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod create_page;
mod edit_endpoint;
mod edit_page;
mod form;
mod transactions_page;

pub use core::{
    Transaction, TransactionInput, TransactionType, count_transactions, create_transaction,
    create_transaction_table, get_all_transactions, get_transaction, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
