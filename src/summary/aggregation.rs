//! Aggregate queries over the record table.
//!
//! These functions compute the monthly sums the summary page is built from.
//! The sums are computed in SQL so the whole month never needs to be loaded
//! into memory.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::Error;

use super::Period;

/// Sum the amounts spent per category within `period`.
///
/// Categories with no records in the period are absent from the map. Income
/// records are included under their own category; the presenter drops
/// categories that are not in the budget catalog.
///
/// # Errors
/// Returns [Error::AggregationUnavailable] if the query fails for any reason.
/// Callers should render a degraded view rather than fail the whole request.
pub fn spend_by_category(
    period: Period,
    connection: &Connection,
) -> Result<HashMap<String, i64>, Error> {
    let (start, end) = period.window();

    let run_query = || -> Result<HashMap<String, i64>, rusqlite::Error> {
        connection
            .prepare(
                "SELECT category, SUM(amount)
                FROM record
                WHERE date >= :start AND date < :end
                GROUP BY category",
            )?
            .query_map(
                &[(":start", &start), (":end", &end)],
                |row| -> Result<(String, i64), rusqlite::Error> {
                    Ok((row.get(0)?, row.get(1)?))
                },
            )?
            .collect()
    };

    run_query().map_err(|error| {
        tracing::error!("Could not aggregate spending by category for {period}: {error}");
        Error::AggregationUnavailable(error.to_string())
    })
}

/// Sum the amounts per payment type within `period`.
///
/// The map includes income payment types (e.g. salaries) as well as spending
/// ones, so the caller can compute both sides of the month from one query.
///
/// # Errors
/// Returns [Error::AggregationUnavailable] if the query fails for any reason.
pub fn totals_by_payment_type(
    period: Period,
    connection: &Connection,
) -> Result<HashMap<String, i64>, Error> {
    let (start, end) = period.window();

    let run_query = || -> Result<HashMap<String, i64>, rusqlite::Error> {
        connection
            .prepare(
                "SELECT payment_type, SUM(amount)
                FROM record
                WHERE date >= :start AND date < :end
                GROUP BY payment_type",
            )?
            .query_map(
                &[(":start", &start), (":end", &end)],
                |row| -> Result<(String, i64), rusqlite::Error> {
                    Ok((row.get(0)?, row.get(1)?))
                },
            )?
            .collect()
    };

    run_query().map_err(|error| {
        tracing::error!("Could not aggregate totals by payment type for {period}: {error}");
        Error::AggregationUnavailable(error.to_string())
    })
}

#[cfg(test)]
mod aggregation_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        record::{NewRecord, create_record, create_record_table},
        summary::Period,
    };

    use super::{spend_by_category, totals_by_payment_type};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_record_table(&conn).expect("Could not create record table");

        conn
    }

    fn insert_record(
        conn: &Connection,
        category: &str,
        payment_type: &str,
        amount: i64,
        date: time::Date,
    ) {
        create_record(
            NewRecord {
                category: category.to_string(),
                payment_type: payment_type.to_string(),
                amount,
                date,
            },
            conn,
        )
        .expect("Could not insert test record");
    }

    #[test]
    fn spend_by_category_sums_within_month() {
        let conn = get_db_connection();
        insert_record(&conn, "Gasolina", "TC Master", 50_000, date!(2024 - 05 - 03));
        insert_record(&conn, "Gasolina", "Efectivo", 30_000, date!(2024 - 05 - 20));
        insert_record(&conn, "Peajes", "Efectivo", 12_000, date!(2024 - 05 - 10));

        let sums = spend_by_category(Period::new(5, 2024).unwrap(), &conn).unwrap();

        assert_eq!(sums.get("Gasolina"), Some(&80_000));
        assert_eq!(sums.get("Peajes"), Some(&12_000));
        assert_eq!(sums.len(), 2);
    }

    #[test]
    fn spend_by_category_excludes_other_months() {
        let conn = get_db_connection();
        insert_record(&conn, "Gasolina", "TC Master", 50_000, date!(2024 - 04 - 30));
        insert_record(&conn, "Gasolina", "TC Master", 70_000, date!(2024 - 05 - 01));
        insert_record(&conn, "Gasolina", "TC Master", 90_000, date!(2024 - 06 - 01));

        let sums = spend_by_category(Period::new(5, 2024).unwrap(), &conn).unwrap();

        assert_eq!(sums.get("Gasolina"), Some(&70_000));
    }

    #[test]
    fn empty_month_produces_empty_maps() {
        let conn = get_db_connection();

        let by_category = spend_by_category(Period::new(5, 2024).unwrap(), &conn).unwrap();
        let by_payment_type =
            totals_by_payment_type(Period::new(5, 2024).unwrap(), &conn).unwrap();

        assert!(by_category.is_empty());
        assert!(by_payment_type.is_empty());
    }

    #[test]
    fn totals_by_payment_type_sums_within_month() {
        let conn = get_db_connection();
        insert_record(&conn, "Salario", "Salario FL", 3_000_000, date!(2024 - 05 - 01));
        insert_record(&conn, "Gasolina", "TC Master", 50_000, date!(2024 - 05 - 03));
        insert_record(&conn, "Peajes", "Efectivo", 12_000, date!(2024 - 05 - 10));
        insert_record(&conn, "Gasolina", "TC Master", 20_000, date!(2024 - 05 - 21));

        let sums = totals_by_payment_type(Period::new(5, 2024).unwrap(), &conn).unwrap();

        assert_eq!(sums.get("Salario FL"), Some(&3_000_000));
        assert_eq!(sums.get("TC Master"), Some(&70_000));
        assert_eq!(sums.get("Efectivo"), Some(&12_000));
    }

    #[test]
    fn missing_table_reports_aggregation_unavailable() {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");

        let result = spend_by_category(Period::new(5, 2024).unwrap(), &conn);

        assert!(matches!(result, Err(Error::AggregationUnavailable(_))));
    }
}
