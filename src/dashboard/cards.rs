//! Summary cards with the income and expense totals.

use maud::{Markup, html};

use crate::{dashboard::aggregation::TypeTotals, html::format_currency, transaction::TransactionType};

fn card_style(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Income => "bg-green-700",
        TransactionType::Expense => "bg-red-900",
    }
}

/// Renders one card per transaction type with its total.
pub(super) fn totals_cards_view(totals: &TypeTotals) -> Markup {
    html! {
        section id="totals" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                @for type_ in TransactionType::ALL {
                    div
                        id={ "total-" (type_.as_str()) }
                        class={ "rounded-lg p-4 shadow-md text-white " (card_style(type_)) }
                    {
                        h3 class="text-lg font-semibold" { (type_.label()) }
                        p class="text-2xl" { (format_currency(totals.get(type_))) }
                    }
                }
            }
        }
    }
}
