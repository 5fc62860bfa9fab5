use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month};

use cashbook_rs::{TransactionInput, TransactionType, create_transaction, initialize_db};

/// A utility for creating a test database for the cashbook_rs server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Recurring transactions added to every month: (day, category, description, type, amount).
const MONTHLY: [(u8, &str, &str, TransactionType, f64); 5] = [
    (1, "Salary", "Monthly salary", TransactionType::Income, 5200.0),
    (5, "Housing", "Rent", TransactionType::Expense, 1800.0),
    (10, "Utilities", "Electricity bill", TransactionType::Expense, 185.4),
    (15, "Groceries", "Supermarket", TransactionType::Expense, 640.75),
    (20, "Transport", "Fuel", TransactionType::Expense, 310.0),
];

/// Create and populate a database for manual testing.
///
/// Transactions are spread over two years so that the same month appears
/// in both, which shows how the charts merge months across years.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let mut count = 0;
    for year in [2024, 2025] {
        for month_number in 1..=12u8 {
            let month = Month::try_from(month_number)?;

            for (day, category, description, type_, amount) in MONTHLY {
                // Vary amounts a little so months are distinguishable on the chart.
                let amount = if type_ == TransactionType::Expense {
                    amount + f64::from(month_number) * 12.5
                } else {
                    amount
                };
                let date = Date::from_calendar_date(year, month, day)?;
                let input = TransactionInput::new(date, category, description, type_, amount)?;
                create_transaction(input, &conn)?;
                count += 1;
            }
        }

        let date = Date::from_calendar_date(year, Month::December, 18)?;
        let bonus =
            TransactionInput::new(date, "Salary", "Year-end bonus", TransactionType::Income, 2600.0)?;
        create_transaction(bonus, &conn)?;
        count += 1;
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
