//! TUI views

mod detail_view;
mod form_view;

pub use detail_view::DetailView;
pub use form_view::FormView;

use appraise_core::FormSchema;

/// One selectable line of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// Index into `FormSchema::numeric`
    Numeric(usize),
    /// Index into `FormSchema::categorical`
    Categorical(usize),
    /// The predict trigger
    Predict,
}

/// Rows in display order: numeric inputs, selectors, then the trigger.
pub fn form_rows(form: &FormSchema) -> Vec<FormRow> {
    (0..form.numeric.len())
        .map(FormRow::Numeric)
        .chain((0..form.categorical.len()).map(FormRow::Categorical))
        .chain(std::iter::once(FormRow::Predict))
        .collect()
}
