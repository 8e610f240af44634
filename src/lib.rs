//! Familia is a web app for tracking a family's monthly budget.
//!
//! Users log in to see how much money came in and went out during a calendar
//! month, how spending compares to the per-category budget ceilings, and to
//! manage the underlying records through an admin interface. The server
//! renders HTML pages directly.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod budget;
mod db;
mod endpoints;
mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod password;
mod record;
mod routing;
mod summary;
mod timezone;
mod user;

pub use app_state::AppState;
pub use budget::{BudgetCatalog, CategoryBudget};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, count_users, create_user, get_user_by_email, get_user_by_id};

use crate::{
    alert::error_alert,
    internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid email/password combination.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Either the user ID or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// There was an error parsing the date in the cookie or creating the new
    /// expiry date time.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not format expiry cookie date-time string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested month/year is not a valid calendar period.
    ///
    /// Rejected at the boundary, before any query runs.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// The record store could not be queried for the aggregate sums.
    ///
    /// Callers must treat this as "all totals unknown" and render a degraded
    /// view instead of failing the whole request.
    #[error("aggregation unavailable: {0}")]
    AggregationUnavailable(String),

    /// The budget catalog file could not be loaded or was empty.
    #[error("invalid budget catalog: {0}")]
    InvalidBudgetCatalog(String),

    /// A date in the future was used to create a record.
    ///
    /// Records describe money that has already moved, therefore future dates
    /// are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A negative amount was used to create a record.
    ///
    /// Record amounts are always non-negative; whether money came in or went
    /// out is determined by the payment type.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(i64),

    /// An empty string was used as a record's category.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// The email used to create a user already exists in the database.
    #[error("the email \"{0}\" is already registered")]
    DuplicateEmail(String),

    /// The logged-in user tried to perform an operation reserved for
    /// administrators.
    #[error("this operation requires administrator rights")]
    Forbidden,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a record that does not exist
    #[error("tried to delete a record that is not in the database")]
    DeleteMissingRecord,

    /// Tried to update a record that does not exist
    #[error("tried to update a record that is not in the database")]
    UpdateMissingRecord,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail(String::new())
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidPeriod(reason) => render_internal_server_error(
                StatusCode::BAD_REQUEST,
                "Periodo inválido",
                &format!("El mes o el año no son válidos: {reason}"),
            ),
            Error::Forbidden => render_internal_server_error(
                StatusCode::FORBIDDEN,
                "Sin permisos",
                "No tienes permisos de administrador",
            ),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            Error::DatabaseLockError => render_internal_server_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidPeriod(reason) => error_alert(
                StatusCode::BAD_REQUEST,
                "Periodo inválido",
                &format!("El mes o el año no son válidos: {reason}"),
            ),
            Error::FutureDate(date) => error_alert(
                StatusCode::BAD_REQUEST,
                "Fecha inválida",
                &format!("{date} está en el futuro. Usa una fecha de hoy o anterior."),
            ),
            Error::NegativeAmount(amount) => error_alert(
                StatusCode::BAD_REQUEST,
                "Valor inválido",
                &format!("{amount} es negativo. El valor debe ser cero o positivo."),
            ),
            Error::EmptyCategory => error_alert(
                StatusCode::BAD_REQUEST,
                "Categoría inválida",
                "La categoría no puede estar vacía.",
            ),
            Error::Forbidden => error_alert(
                StatusCode::FORBIDDEN,
                "Sin permisos",
                "No tienes permisos de administrador.",
            ),
            Error::UpdateMissingRecord => error_alert(
                StatusCode::NOT_FOUND,
                "No se pudo actualizar el registro",
                "El registro no existe. Refresca la página para ver el estado actual.",
            ),
            Error::DeleteMissingRecord => error_alert(
                StatusCode::NOT_FOUND,
                "No se pudo borrar el registro",
                "El registro no existe. Puede que ya haya sido borrado.",
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_alert(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Algo salió mal",
                    "Ocurrió un error inesperado, revisa los logs del servidor.",
                )
            }
        }
    }
}
