//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            MonthlyRollup, aggregate, available_years, month_label, parse_month_filter,
            parse_year_filter,
        },
        cards::totals_cards_view,
        charts::{DashboardChart, charts_script, charts_view, monthly_chart},
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base, link},
    navigation::NavBar,
    transaction::get_all_transactions,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional month and year filters from the query string.
///
/// Kept as strings so that an empty value from the filter form means "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month number, 1 = January.
    pub month: Option<String>,
    /// The calendar year.
    pub year: Option<String>,
}

/// The filters currently applied, used to render the filter form.
struct SelectedFilters {
    month: Option<Month>,
    year: Option<i32>,
}

/// Display a page with monthly income and expense totals.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let month = parse_month_filter(query.month.as_deref())?;
    let year = parse_year_filter(query.year.as_deref())?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let years = available_years(&transactions);
    let rollup = aggregate(&transactions, month, year);
    tracing::debug!(
        "aggregated {} transactions into {} months (month={month:?}, year={year:?})",
        transactions.len(),
        rollup.months().len()
    );

    Ok(dashboard_view(nav_bar, &SelectedFilters { month, year }, &years, &rollup).into_response())
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                Get started by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn filter_form_view(selected: &SelectedFilters, years: &[i32]) -> Markup {
    let months = (1..=12u8).filter_map(|number| Month::try_from(number).ok());
    // The selected year stays visible even when no transaction falls in it.
    let mut years = years.to_vec();
    if let Some(year) = selected.year.filter(|year| !years.contains(year)) {
        years.push(year);
        years.sort_unstable();
    }

    html! {
        form
            id="dashboard-filters"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected.month.is_none()] { "All months" }

                    @for month in months {
                        option value=(month as u8) selected[selected.month == Some(month)]
                        {
                            (month_label(month))
                        }
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                select name="year" id="year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected.year.is_none()] { "All years" }

                    @for year in years {
                        option value=(year) selected[selected.year == Some(year)] { (year) }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
            }
        }
    }
}

/// Renders the main dashboard page with filters, totals and the monthly chart.
fn dashboard_view(
    nav_bar: NavBar,
    selected: &SelectedFilters,
    years: &[i32],
    rollup: &MonthlyRollup,
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = [DashboardChart {
        id: "monthly-chart",
        options: monthly_chart(rollup).to_string(),
    }];

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (filter_form_view(selected, years))

            (totals_cards_view(&rollup.totals))

            @if rollup.is_empty() {
                p id="no-matches" class="my-8"
                {
                    "No transactions match the selected month and year."
                }
            } @else {
                (charts_view(&charts))
            }
        }
    );

    let mut scripts = Vec::new();
    if !rollup.is_empty() {
        scripts.push(HeadElement::ScriptLink(
            "/static/echarts.6.0.0.min.js".to_owned(),
        ));
        scripts.push(charts_script(&charts));
    }

    base("Dashboard", &scripts, &content)
}
