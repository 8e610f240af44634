//! The page and endpoint for creating a new record.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    budget::BudgetCatalog,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::{
        core::{NewRecord, create_record},
        form::{RecordFormValues, record_form},
    },
    timezone::get_local_offset,
};

/// The state needed for the new record page and the create endpoint.
#[derive(Debug, Clone)]
pub struct CreateRecordState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
    /// The budget catalog providing the category options.
    pub budget_catalog: Arc<BudgetCatalog>,
}

impl FromRef<AppState> for CreateRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            budget_catalog: state.budget_catalog.clone(),
        }
    }
}

/// Renders the page for creating a record.
pub async fn get_new_record_page(
    State(state): State<CreateRecordState>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let nav_bar = NavBar::new(endpoints::RECORDS_VIEW).into_html();
    let form = record_form(
        "Nuevo registro",
        "Crear",
        ("post", endpoints::RECORDS_API),
        today,
        &state.budget_catalog,
        RecordFormValues {
            category: "",
            payment_type: "",
            amount: None,
            date: today,
        },
    );

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md" { (form) }
        }
    };

    Ok(base("Nuevo registro", &content).into_response())
}

/// The form data for creating or editing a record.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    /// What the money was for.
    pub category: String,
    /// How the money moved.
    pub payment_type: String,
    /// The amount of money, in whole pesos.
    pub amount: i64,
    /// When the money moved.
    pub date: Date,
}

/// A route handler for creating a new record, redirects to the records view on
/// success.
pub async fn create_record_endpoint(
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

    if let Err(error) = create_record(new_record, &connection) {
        tracing::error!("could not create record: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::RECORDS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod create_record_tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        budget::{BudgetCatalog, INCOME_CATEGORY},
        db::initialize,
        endpoints,
        record::core::get_record,
    };

    use super::{CreateRecordState, RecordForm, create_record_endpoint, get_new_record_page};

    fn get_test_state() -> CreateRecordState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateRecordState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
            budget_catalog: Arc::new(BudgetCatalog::default()),
        }
    }

    #[tokio::test]
    async fn can_create_record() {
        let state = get_test_state();

        let form = RecordForm {
            category: "Gasolina".to_string(),
            payment_type: "TC Master".to_string(),
            amount: 50_000,
            date: OffsetDateTime::now_utc().date(),
        };

        let response = create_record_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_records_view(response);

        // We know the first record will have ID 1.
        let connection = state.db_connection.lock().unwrap();
        let record = get_record(1, &connection).unwrap();
        assert_eq!(record.category, "Gasolina");
        assert_eq!(record.amount, 50_000);
    }

    #[tokio::test]
    async fn future_date_returns_alert() {
        let state = get_test_state();

        let form = RecordForm {
            category: "Gasolina".to_string(),
            payment_type: "TC Master".to_string(),
            amount: 50_000,
            date: OffsetDateTime::now_utc().date() + Duration::days(2),
        };

        let response = create_record_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn new_record_page_lists_catalog_categories_and_income() {
        let state = get_test_state();

        let response = get_new_record_page(State(state)).await.unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        let document = scraper::Html::parse_document(&text);

        let option_selector = scraper::Selector::parse("select#category option").unwrap();
        let options: Vec<String> = document
            .select(&option_selector)
            .map(|option| option.text().collect())
            .collect();

        // Every catalog category plus the income category for salaries.
        assert_eq!(options.len(), BudgetCatalog::default().len() + 1);
        assert!(options.iter().any(|name| name == "Gasolina"));
        assert_eq!(options.last().map(String::as_str), Some(INCOME_CATEGORY));
    }

    #[track_caller]
    fn assert_redirects_to_records_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location,
            endpoints::RECORDS_VIEW,
            "got redirect to {location:?}, want redirect to {}",
            endpoints::RECORDS_VIEW
        );
    }
}
