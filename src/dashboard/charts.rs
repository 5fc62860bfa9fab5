//! Chart generation and rendering for the dashboard.
//!
//! The monthly chart is a grouped bar chart with one bar per transaction
//! type for each month. It is generated as JSON configuration for the
//! ECharts library and rendered with a HTML container and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        JsFunction, Label, LabelPosition, Tooltip, Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::MonthlyRollup, html::HeadElement, transaction::TransactionType};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

fn series_color(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Income => "green",
        TransactionType::Expense => "darkred",
    }
}

/// Grouped bar chart of income and expenses per month.
///
/// Months are the categories on the x axis in calendar order, with one
/// series per transaction type.
pub fn monthly_chart(rollup: &MonthlyRollup) -> Chart {
    let mut chart = Chart::new()
        .title(
            Title::new()
                .text("Income and Expenses")
                .subtext("Totals per month")
                .left(20)
                .top("1%"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(rollup.month_labels()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for type_ in TransactionType::ALL {
        chart = chart.series(
            bar::Bar::new()
                .name(type_.label())
                .item_style(ItemStyle::new().color(series_color(type_)))
                .label(Label::new().show(true).position(LabelPosition::Top))
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(rollup.series(type_)),
        );
    }

    chart
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use time::macros::date;

    use crate::{
        dashboard::aggregation::aggregate,
        transaction::{Transaction, TransactionType},
    };

    use super::monthly_chart;

    fn transaction(id: i64, type_: TransactionType, amount: f64, date: time::Date) -> Transaction {
        Transaction {
            id,
            date,
            category: "General".to_owned(),
            description: "test".to_owned(),
            type_,
            amount,
        }
    }

    #[test]
    fn monthly_chart_has_one_series_per_type() {
        let transactions = [
            transaction(1, TransactionType::Income, 100.0, date!(2025 - 03 - 01)),
            transaction(2, TransactionType::Expense, 40.0, date!(2025 - 03 - 10)),
            transaction(3, TransactionType::Expense, 25.0, date!(2025 - 01 - 05)),
        ];
        let rollup = aggregate(&transactions, None, None);

        let options: Value =
            serde_json::to_value(monthly_chart(&rollup)).expect("could not serialize chart");

        let labels = &options["xAxis"][0]["data"];
        let labels = if labels.is_null() {
            &options["xAxis"]["data"]
        } else {
            labels
        };
        assert_eq!(labels, &serde_json::json!(["Jan", "Mar"]));

        let series = options["series"].as_array().expect("series should be an array");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["name"], "Income");
        assert_eq!(series[0]["itemStyle"]["color"], "green");
        assert_eq!(series[0]["data"], serde_json::json!([0.0, 100.0]));
        assert_eq!(series[1]["name"], "Expense");
        assert_eq!(series[1]["itemStyle"]["color"], "darkred");
        assert_eq!(series[1]["data"], serde_json::json!([25.0, 40.0]));
    }
}
