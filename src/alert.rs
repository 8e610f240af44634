//! Alert partials for displaying error messages to users via HTMX
//! out-of-band swaps.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Renders an error alert as a dismissible red banner.
pub fn error_alert_markup(message: &str, details: &str) -> Markup {
    html! {
        div
            class="flex items-center p-4 mb-4 text-red-800 rounded-lg bg-red-50
                dark:bg-gray-800 dark:text-red-400 shadow"
            role="alert"
        {
            div class="ms-3 text-sm font-medium"
            {
                span class="font-semibold" { (message) }
                @if !details.is_empty() {
                    " " (details)
                }
            }

            button
                type="button"
                class="ms-auto -mx-1.5 -my-1.5 bg-red-50 text-red-500 rounded-lg
                    p-1.5 hover:bg-red-200 inline-flex items-center justify-center
                    h-8 w-8 dark:bg-gray-800 dark:text-red-400 dark:hover:bg-gray-700"
                onclick="this.parentElement.remove()"
                aria-label="Cerrar"
            {
                "✕"
            }
        }
    }
}

/// Build an error response that HTMX swaps into the alert container.
pub fn error_alert(status_code: StatusCode, message: &str, details: &str) -> Response {
    (status_code, error_alert_markup(message, details)).into_response()
}
