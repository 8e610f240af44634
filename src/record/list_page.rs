//! Defines the route handler for the page listing all records.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    endpoints::format_endpoint,
    format::format_amount,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    record::core::{Record, get_all_records},
};

fn records_table(records: &[Record]) -> Markup {
    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Fecha" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Categoría" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Medio de pago" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Valor" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "" }
                }
            }

            tbody
            {
                @for record in records {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (record.date) }
                        td class=(TABLE_CELL_STYLE) { (record.category) }
                        td class=(TABLE_CELL_STYLE) { (record.payment_type) }
                        td class=(TABLE_CELL_STYLE) { (format_amount(record.amount)) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            a
                                href=(format_endpoint(endpoints::EDIT_RECORD_VIEW, record.id))
                                class=(LINK_STYLE)
                            {
                                "Editar"
                            }

                            " "

                            button
                                hx-delete=(format_endpoint(endpoints::DELETE_RECORD, record.id))
                                hx-target="closest tr"
                                hx-swap="outerHTML"
                                hx-confirm="¿Borrar este registro?"
                                hx-target-error="#alert-container"
                                class=(BUTTON_DELETE_STYLE)
                            {
                                "Borrar"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn records_view(records: &[Record]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECORDS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-4"
            {
                div class="flex items-center justify-between"
                {
                    h1 class="text-2xl font-bold" { "Registros" }

                    a
                        href=(endpoints::NEW_RECORD_VIEW)
                        class="px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600
                            hover:dark:bg-blue-700 text-white rounded"
                    {
                        "Crear"
                    }
                }

                @if records.is_empty() {
                    p class="text-gray-500 dark:text-gray-400" { "No hay registros todavía." }
                } @else {
                    (records_table(records))
                }
            }
        }
    };

    base("Registros", &content)
}

/// The state needed for the records page.
#[derive(Debug, Clone)]
pub struct RecordsPageState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecordsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page listing all records, newest first.
pub async fn get_records_page(State(state): State<RecordsPageState>) -> Result<Response, Error> {
    let records = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_records(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve records: {error}"))?
    };

    Ok(records_view(&records).into_response())
}
