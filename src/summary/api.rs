//! A JSON endpoint exposing the monthly summary.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{
    Error,
    summary::{
        page::{PeriodQuery, SummaryState, build_summary, resolve_period},
        presenter::CategorySpentView,
        totals::PaymentTotals,
    },
};

/// The JSON shape of the monthly summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The one-based month number.
    pub month: u8,
    /// The four digit year.
    pub year: i32,
    /// The headline income, card and cash totals.
    pub totals: PaymentTotals,
    /// The budget overview rows, in catalog order.
    pub categories: Vec<CategorySpentView>,
    /// Set when the aggregation queries failed and the sums are all zero.
    pub degraded: bool,
}

/// A route handler returning the summary for the requested month as JSON,
/// defaulting to the current one.
pub async fn get_summary_api(
    State(state): State<SummaryState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<SummaryResponse>, Error> {
    let period = resolve_period(&query, &state.local_timezone)?;
    let summary = build_summary(period, &state)?;

    Ok(Json(SummaryResponse {
        month: summary.period.month(),
        year: summary.period.year(),
        totals: summary.totals,
        categories: summary.categories,
        degraded: summary.degraded,
    }))
}

#[cfg(test)]
mod summary_api_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        budget::BudgetCatalog,
        db::initialize,
        record::{NewRecord, create_record},
        summary::page::{PeriodQuery, SummaryState},
    };

    use super::get_summary_api;

    fn get_test_state() -> SummaryState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SummaryState {
            db_connection: Arc::new(Mutex::new(conn)),
            budget_catalog: Arc::new(BudgetCatalog::default()),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn summary_api_returns_totals_and_categories() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_record(
                NewRecord {
                    category: "Gasolina".to_string(),
                    payment_type: "TC Master".to_string(),
                    amount: 150_000,
                    date: date!(2024 - 05 - 15),
                },
                &connection,
            )
            .unwrap();
        }

        let response = get_summary_api(
            State(state.clone()),
            Query(PeriodQuery {
                month: Some(5),
                year: Some(2024),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.month, 5);
        assert_eq!(response.year, 2024);
        assert_eq!(response.totals.total_card_spend, 150_000);
        assert!(!response.degraded);

        let gasolina = response
            .categories
            .iter()
            .find(|category| category.name == "Gasolina")
            .expect("expected Gasolina in the overview");
        assert_eq!(gasolina.spent, 150_000);
        assert_eq!(gasolina.available, gasolina.max_amount - 150_000);
    }

    #[tokio::test]
    async fn summary_api_rejects_invalid_period() {
        let state = get_test_state();

        let result = get_summary_api(
            State(state),
            Query(PeriodQuery {
                month: Some(0),
                year: Some(2024),
            }),
        )
        .await;

        assert!(matches!(result, Err(crate::Error::InvalidPeriod(_))));
    }
}
