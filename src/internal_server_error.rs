use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Sorry, something went wrong.",
        "Try again later or check the server logs",
    )
}

pub fn render_internal_server_error(
    status_code: StatusCode,
    description: &str,
    fix: &str,
) -> Response {
    let header = status_code.as_u16().to_string();

    (status_code, error_view("Error", &header, description, fix)).into_response()
}
