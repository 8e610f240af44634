//! The shared form markup for creating and editing records.

use maud::{Markup, html};
use time::Date;

use crate::{
    budget::{BudgetCatalog, INCOME_CATEGORY},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    summary::PAYMENT_TYPES,
};

/// The values to prefill the record form with.
pub(super) struct RecordFormValues<'a> {
    pub category: &'a str,
    pub payment_type: &'a str,
    pub amount: Option<i64>,
    pub date: Date,
}

/// Render the record form.
///
/// The category options come from the budget catalog so records line up with
/// the summary page, plus [INCOME_CATEGORY] for salary records. `max_date`
/// caps the date picker at today.
pub(super) fn record_form(
    title: &str,
    submit_label: &str,
    hx_attr: (&str, &str),
    max_date: Date,
    catalog: &BudgetCatalog,
    values: RecordFormValues,
) -> Markup {
    let (hx_method, hx_url) = hx_attr;
    let post_url = (hx_method == "post").then_some(hx_url);
    let put_url = (hx_method == "put").then_some(hx_url);

    html! {
        form
            hx-post=[post_url]
            hx-put=[put_url]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { (title) }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Categoría" }

                select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for entry in catalog.iter() {
                        option value=(entry.name) selected[entry.name == values.category]
                        {
                            (entry.name)
                        }
                    }

                    option value=(INCOME_CATEGORY) selected[values.category == INCOME_CATEGORY]
                    {
                        (INCOME_CATEGORY)
                    }

                    // A stored category that has since left the catalog must
                    // stay selectable, otherwise editing the record would
                    // silently re-file it.
                    @if !values.category.is_empty()
                        && values.category != INCOME_CATEGORY
                        && catalog.max_amount_for(values.category).is_none()
                    {
                        option value=(values.category) selected { (values.category) }
                    }
                }
            }

            div
            {
                label for="payment_type" class=(FORM_LABEL_STYLE) { "Medio de pago" }

                select name="payment_type" id="payment_type" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for payment_type in PAYMENT_TYPES {
                        option
                            value=(payment_type)
                            selected[payment_type == values.payment_type]
                        {
                            (payment_type)
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Valor" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="1"
                    min="0"
                    placeholder="0"
                    value=[values.amount]
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Fecha" }

                input
                    name="date"
                    id="date"
                    type="date"
                    max=(max_date)
                    required
                    value=(values.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " " (submit_label)
            }
        }
    }
}
