//! The endpoint for deleting a record.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    record::{
        core::{RecordId, delete_record},
        list_page::RecordsPageState,
    },
};

/// A route handler for deleting the record with ID `record_id`.
///
/// Responds with an empty body on success so htmx can swap out the deleted
/// row.
pub async fn delete_record_endpoint(
    Path(record_id): Path<RecordId>,
    State(state): State<RecordsPageState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_record(record_id, &connection) {
        tracing::error!("could not delete record {record_id}: {error}");

        return error.into_alert_response();
    }

    StatusCode::OK.into_response()
}

#[cfg(test)]
mod delete_record_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        record::{
            core::{NewRecord, create_record, get_record},
            list_page::RecordsPageState,
        },
    };

    use super::delete_record_endpoint;

    fn get_test_state() -> RecordsPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        RecordsPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_delete_record() {
        let state = get_test_state();
        let record_id = {
            let connection = state.db_connection.lock().unwrap();
            create_record(
                NewRecord {
                    category: "Gasolina".to_string(),
                    payment_type: "TC Master".to_string(),
                    amount: 50_000,
                    date: date!(2024 - 05 - 03),
                },
                &connection,
            )
            .unwrap()
            .id
        };

        let response = delete_record_endpoint(Path(record_id), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_record(record_id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn delete_unknown_record_returns_not_found_alert() {
        let state = get_test_state();

        let response = delete_record_endpoint(Path(42), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
