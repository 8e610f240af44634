//! Defines the core data model and database queries for records.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::Error;

/// The ID of a record in the database.
pub type RecordId = i64;

/// A single money movement: something bought, or money that came in.
///
/// Whether money came in or went out is determined by the payment type, so
/// amounts are always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The ID of the record.
    pub id: RecordId,
    /// What the money was for, e.g. "Gasolina".
    pub category: String,
    /// How the money moved, e.g. "TC Master" or "Salario FL".
    pub payment_type: String,
    /// The amount of money, in whole pesos.
    pub amount: i64,
    /// When the money moved.
    pub date: Date,
}

/// The data needed to create a [Record].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// What the money was for.
    pub category: String,
    /// How the money moved.
    pub payment_type: String,
    /// The amount of money, in whole pesos.
    pub amount: i64,
    /// When the money moved.
    pub date: Date,
}

impl NewRecord {
    /// Check that the record describes money that has already moved.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::EmptyCategory] if the category is empty or whitespace,
    /// - [Error::NegativeAmount] if the amount is below zero,
    /// - [Error::FutureDate] if the date is after today (UTC).
    fn validate(&self) -> Result<(), Error> {
        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if self.amount < 0 {
            return Err(Error::NegativeAmount(self.amount));
        }

        let today = OffsetDateTime::now_utc().date();
        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        Ok(())
    }
}

/// Create the record table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS record (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                payment_type TEXT NOT NULL,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('record', 0)",
        (),
    )?;

    // Index on date for the monthly aggregation window.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_record_date ON record(date);",
        (),
    )?;

    Ok(())
}

/// Create a new record in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyCategory], [Error::NegativeAmount] or [Error::FutureDate]
///   if `new_record` fails validation,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_record(new_record: NewRecord, connection: &Connection) -> Result<Record, Error> {
    new_record.validate()?;

    let record = connection
        .prepare(
            "INSERT INTO record (category, payment_type, amount, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, category, payment_type, amount, date",
        )?
        .query_row(
            (
                &new_record.category,
                &new_record.payment_type,
                new_record.amount,
                new_record.date,
            ),
            map_record_row,
        )?;

    Ok(record)
}

/// Retrieve a record from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_record(id: RecordId, connection: &Connection) -> Result<Record, Error> {
    let record = connection
        .prepare("SELECT id, category, payment_type, amount, date FROM record WHERE id = :id")?
        .query_one(&[(":id", &id)], map_record_row)?;

    Ok(record)
}

/// Retrieve all records in the database, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_records(connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare(
            "SELECT id, category, payment_type, amount, date
            FROM record
            ORDER BY date DESC, id DESC",
        )?
        .query_map((), map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the record with ID `id` with the contents of `new_record`.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyCategory], [Error::NegativeAmount] or [Error::FutureDate]
///   if `new_record` fails validation,
/// - [Error::UpdateMissingRecord] if `id` does not refer to a record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_record(
    id: RecordId,
    new_record: NewRecord,
    connection: &Connection,
) -> Result<Record, Error> {
    new_record.validate()?;

    let rows_changed = connection.execute(
        "UPDATE record SET category = ?1, payment_type = ?2, amount = ?3, date = ?4 WHERE id = ?5",
        (
            &new_record.category,
            &new_record.payment_type,
            new_record.amount,
            new_record.date,
            id,
        ),
    )?;

    if rows_changed == 0 {
        return Err(Error::UpdateMissingRecord);
    }

    Ok(Record {
        id,
        category: new_record.category,
        payment_type: new_record.payment_type,
        amount: new_record.amount,
        date: new_record.date,
    })
}

/// Delete the record with ID `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingRecord] if `id` does not refer to a record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_record(id: RecordId, connection: &Connection) -> Result<(), Error> {
    let rows_changed = connection.execute("DELETE FROM record WHERE id = ?1", (id,))?;

    if rows_changed == 0 {
        return Err(Error::DeleteMissingRecord);
    }

    Ok(())
}

fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    Ok(Record {
        id: row.get(0)?,
        category: row.get(1)?,
        payment_type: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
    })
}
