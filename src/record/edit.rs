//! The page and endpoint for editing an existing record.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::html;
use time::OffsetDateTime;

use crate::{
    Error, endpoints,
    endpoints::format_endpoint,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::{
        core::{NewRecord, RecordId, get_record, update_record},
        create::{CreateRecordState, RecordForm},
        form::{RecordFormValues, record_form},
    },
    timezone::get_local_offset,
};

/// Renders the page for editing the record with ID `record_id`, prefilled with
/// its current values.
pub async fn get_edit_record_page(
    Path(record_id): Path<RecordId>,
    State(state): State<CreateRecordState>,
) -> Result<Response, Error> {
    let record = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_record(record_id, &connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve record {record_id}: {error}"))?
    };

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let nav_bar = NavBar::new(endpoints::RECORDS_VIEW).into_html();
    let form = record_form(
        "Editar registro",
        "Guardar",
        (
            "put",
            &format_endpoint(endpoints::EDIT_RECORD_VIEW, record.id),
        ),
        today,
        &state.budget_catalog,
        RecordFormValues {
            category: &record.category,
            payment_type: &record.payment_type,
            amount: Some(record.amount),
            date: record.date,
        },
    );

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md" { (form) }
        }
    };

    Ok(base("Editar registro", &content).into_response())
}

/// A route handler for overwriting the record with ID `record_id`, redirects
/// to the records view on success.
pub async fn update_record_endpoint(
    Path(record_id): Path<RecordId>,
    State(state): State<CreateRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let new_record = NewRecord {
        category: form.category,
        payment_type: form.payment_type,
        amount: form.amount,
        date: form.date,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_record(record_id, new_record, &connection) {
        tracing::error!("could not update record {record_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::RECORDS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
