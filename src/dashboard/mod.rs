//! Dashboard module
//!
//! Provides the charts page with monthly income and expense totals,
//! filterable by month and year.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use aggregation::{
    MonthlyRollup, TypeTotals, aggregate, available_years, month_label, parse_month_filter,
    parse_year_filter,
};
pub use charts::monthly_chart;
pub use handlers::get_dashboard_page;
