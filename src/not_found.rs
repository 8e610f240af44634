use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "No encontrado",
            "404",
            "Página no encontrada",
            "Revisa la dirección o vuelve al inicio.",
        ),
    )
        .into_response()
}
