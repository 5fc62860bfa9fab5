//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

/// The pages listed in the navigation bar as (url, title), in display order.
const PAGES: [(&str, &str); 3] = [
    (endpoints::DASHBOARD_VIEW, "Charts"),
    (endpoints::TRANSACTIONS_VIEW, "Transactions"),
    (endpoints::NEW_TRANSACTION_VIEW, "New Transaction"),
];

const CURRENT_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm \
    md:bg-transparent md:text-blue-700 md:p-0 dark:text-white md:dark:text-blue-500";

const OTHER_LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm \
    hover:bg-gray-100 md:hover:bg-transparent md:hover:text-blue-700 md:p-0 \
    dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700";

/// The navigation bar with the link for `active_endpoint` highlighted.
pub struct NavBar<'a> {
    active_endpoint: &'a str,
}

impl<'a> NavBar<'a> {
    /// Links whose URL equals `active_endpoint` are marked as the current page.
    pub fn new(active_endpoint: &'a str) -> Self {
        Self { active_endpoint }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Cashbook"
                    }

                    ul class="font-medium flex flex-col md:flex-row gap-2 md:gap-8 mt-4 md:mt-0"
                    {
                        @for (url, title) in PAGES {
                            @let is_current = url == self.active_endpoint;
                            li
                            {
                                a
                                    href=(url)
                                    class=(if is_current { CURRENT_LINK_STYLE } else { OTHER_LINK_STYLE })
                                    aria-current=[is_current.then_some("page")]
                                {
                                    (title)
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::NavBar;

    fn current_links(active_endpoint: &str) -> Vec<String> {
        let html = Html::parse_fragment(&NavBar::new(active_endpoint).into_html().into_string());

        html.select(&Selector::parse("a[aria-current=page]").unwrap())
            .filter_map(|link| link.value().attr("href").map(str::to_owned))
            .collect()
    }

    #[test]
    fn marks_only_the_active_page() {
        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
        ] {
            assert_eq!(current_links(endpoint), [endpoint]);
        }
    }

    #[test]
    fn pages_outside_the_menu_mark_nothing() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::EDIT_TRANSACTION_VIEW,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::TRANSACTIONS_API,
        ] {
            assert!(current_links(endpoint).is_empty(), "{endpoint} marked a link");
        }
    }

    #[test]
    fn lists_every_page_in_order() {
        let html = Html::parse_fragment(&NavBar::new(endpoints::ROOT).into_html().into_string());

        let titles = html
            .select(&Selector::parse("li a").unwrap())
            .map(|link| link.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(titles, ["Charts", "Transactions", "New Transaction"]);
    }
}
