//! The route handler for the monthly summary page.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::BudgetCatalog,
    endpoints,
    format::{format_amount, format_amount_or_zero},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    summary::{
        aggregation::{spend_by_category, totals_by_payment_type},
        period::Period,
        presenter::{BudgetStanding, CategorySpentView, budget_overview},
        totals::PaymentTotals,
    },
    timezone::get_local_offset,
};

/// The Spanish month names, indexed by one-based month number minus one.
const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// The state needed for the summary page and API.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The budget catalog to compare spending against.
    pub budget_catalog: Arc<BudgetCatalog>,
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            budget_catalog: state.budget_catalog.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month and year selected by the period form on the summary page.
///
/// Both fields default to the current month in the server's local timezone.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u8>,
    pub year: Option<i32>,
}

/// The data backing one rendering of the summary, for a single period.
pub(super) struct MonthlySummary {
    pub period: Period,
    pub totals: PaymentTotals,
    pub categories: Vec<CategorySpentView>,
    /// Set when the aggregation queries failed and the summary shows zeroes
    /// instead of real sums.
    pub degraded: bool,
}

/// Resolve the period from the query, falling back to the current month in the
/// server's local timezone.
pub(super) fn resolve_period(query: &PeriodQuery, local_timezone: &str) -> Result<Period, Error> {
    match (query.month, query.year) {
        (Some(month), Some(year)) => Period::new(month, year),
        _ => {
            let offset = get_local_offset(local_timezone).ok_or_else(|| {
                tracing::error!("Invalid timezone {local_timezone}");
                Error::InvalidTimezoneError(local_timezone.to_owned())
            })?;

            Ok(Period::current(offset))
        }
    }
}

/// Aggregate the month's records into the summary data.
///
/// If the aggregation queries fail the summary is served degraded, with empty
/// sums, rather than failing the whole page. Any other error is passed on.
pub(super) fn build_summary(period: Period, state: &SummaryState) -> Result<MonthlySummary, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let sums = spend_by_category(period, &connection)
        .and_then(|by_category| {
            totals_by_payment_type(period, &connection)
                .map(|by_payment_type| (by_category, by_payment_type))
        })
        .map(|(by_category, by_payment_type)| (by_category, by_payment_type, false));

    let (by_category, by_payment_type, degraded) = match sums {
        Ok(sums) => sums,
        Err(Error::AggregationUnavailable(reason)) => {
            tracing::error!("serving degraded summary for {period}: {reason}");
            (HashMap::new(), HashMap::new(), true)
        }
        Err(error) => return Err(error),
    };

    Ok(MonthlySummary {
        period,
        totals: PaymentTotals::from_totals(&by_payment_type),
        categories: budget_overview(&state.budget_catalog, &by_category),
        degraded,
    })
}

fn period_selector(period: Period) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::SUMMARY_VIEW)
            class="flex items-end gap-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Mes" }

                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (index, name) in MONTH_NAMES.iter().enumerate() {
                        @let month_number = index as u8 + 1;

                        option
                            value=(month_number)
                            selected[month_number == period.month()]
                        {
                            (name)
                        }
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Año" }

                input
                    name="year"
                    id="year"
                    type="number"
                    min="1000"
                    max="9999"
                    value=(period.year())
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Ver" }
        }
    }
}

fn totals_cards(totals: &PaymentTotals, degraded: bool) -> Markup {
    // A degraded summary has no real sums, so the cards show "0" for an
    // absent amount rather than a computed zero.
    let amount_if_known = |amount| (!degraded).then_some(amount);

    let cards = [
        ("Ingresos", amount_if_known(totals.total_income)),
        ("Gastos TC", amount_if_known(totals.total_card_spend)),
        ("Gastos efectivo", amount_if_known(totals.total_cash_spend)),
    ];

    html! {
        div class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            @for (label, amount) in cards {
                div class=(CARD_STYLE)
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                    p class="text-2xl font-bold" { (format_amount_or_zero(amount)) }
                }
            }
        }
    }
}

fn available_style(available: i64) -> &'static str {
    match BudgetStanding::from_available(available) {
        BudgetStanding::OverBudget => "px-6 py-4 text-red-600 dark:text-red-500",
        BudgetStanding::UnderBudget => "px-6 py-4 text-green-600 dark:text-green-500",
        BudgetStanding::Neutral => TABLE_CELL_STYLE,
    }
}

fn overview_table(categories: &[CategorySpentView]) -> Markup {
    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Categoría" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Gastado" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Máximo" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Disponible" }
                }
            }

            tbody
            {
                @for category in categories {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (category.name) }
                        td class=(TABLE_CELL_STYLE) { (format_amount(category.spent)) }
                        td class=(TABLE_CELL_STYLE) { (format_amount(category.max_amount)) }
                        td class=(available_style(category.available))
                        {
                            (format_amount(category.available))
                        }
                    }
                }
            }
        }
    }
}

fn summary_view(summary: &MonthlySummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                div class="flex items-center justify-between"
                {
                    h1 class="text-2xl font-bold" { "Resumen " (summary.period) }

                    (period_selector(summary.period))
                }

                @if summary.degraded {
                    p id="degraded-notice" class="text-amber-600 dark:text-amber-500"
                    {
                        "No se pudieron calcular los totales del mes. \
                        Los valores mostrados están en cero."
                    }
                }

                (totals_cards(&summary.totals, summary.degraded))

                h2 class="text-xl font-bold" { "Presupuesto disponible" }

                (overview_table(&summary.categories))
            }
        }
    };

    base("Resumen", &content)
}

/// Renders the summary page: headline totals and the budget overview for the
/// requested month, defaulting to the current one.
pub async fn get_summary_page(
    State(state): State<SummaryState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let period = resolve_period(&query, &state.local_timezone)?;
    let summary = build_summary(period, &state)?;

    Ok(summary_view(&summary).into_response())
}
