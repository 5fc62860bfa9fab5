//! The 500 page shown when a request fails for reasons the user cannot fix.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// What went wrong on the server, as shown on the error page.
#[derive(Debug, Default)]
pub enum ServerFault {
    /// Anything unexpected. The details only go to the logs.
    #[default]
    Unexpected,
    /// The server was started with a timezone name that does not exist.
    UnknownTimezone(String),
}

impl ServerFault {
    fn description(&self) -> &'static str {
        match self {
            ServerFault::Unexpected => "Sorry, something went wrong.",
            ServerFault::UnknownTimezone(_) => "Invalid Timezone Settings",
        }
    }

    fn fix(&self) -> String {
        match self {
            ServerFault::Unexpected => "Try again later or check the server logs".to_owned(),
            ServerFault::UnknownTimezone(timezone) => format!(
                "Could not get local timezone \"{timezone}\". Restart the server with \
                --local-timezone set to a canonical timezone name, e.g. \"America/Sao_Paulo\""
            ),
        }
    }
}

impl IntoResponse for ServerFault {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description(), &self.fix());

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    ServerFault::Unexpected.into_response()
}
