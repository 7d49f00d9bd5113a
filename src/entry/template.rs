use chrono::NaiveDate;

use super::draft::{ExpenseRowDraft, RowId};
use super::field::{FieldKind, SEPARATOR};
use super::DESCRIPTION_MAX_LEN;
use crate::currency::{AMOUNT_HINT, AMOUNT_MAX_LEN, AMOUNT_PATTERN};
use crate::models::{ReferenceLists, SELF_PAYER};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    TextArea,
    Select,
    Date,
    Text,
}

/// Everything a renderer needs to draw one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub kind: FieldKind,
    /// Submission name. Unnumbered (`"amount."`) until the indexer numbers it.
    pub name: String,
    pub input: InputKind,
    pub value: String,
    pub options: Vec<String>,
    pub required: bool,
    pub max_len: Option<usize>,
    pub pattern: Option<&'static str>,
    pub hint: Option<&'static str>,
}

/// View model of one row, keyed by the draft it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row_id: RowId,
    pub ordinal: String,
    pub selected: bool,
    pub fields: Vec<FieldView>,
}

impl RowView {
    pub fn field(&self, kind: FieldKind) -> &FieldView {
        &self.fields[kind.column()]
    }
}

/// Builds new rows from the reference lists loaded at start-up.
#[derive(Debug, Clone)]
pub struct RowTemplate {
    categories: Vec<String>,
    payers: Vec<String>,
    today: NaiveDate,
}

impl RowTemplate {
    pub fn new(lists: &ReferenceLists, today: NaiveDate) -> Self {
        Self {
            categories: lists.category_names(),
            payers: lists.payer_names(),
            today,
        }
    }

    pub fn options(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Category => &self.categories,
            FieldKind::Payer => &self.payers,
            _ => &[],
        }
    }

    /// A fresh row with empty fields. The category defaults to the first
    /// list entry.
    pub fn draft(&self, id: RowId, position: usize) -> ExpenseRowDraft {
        ExpenseRowDraft {
            id,
            position,
            description: String::new(),
            category: self.categories.first().cloned().unwrap_or_default(),
            date: self.today.format(DATE_FORMAT).to_string(),
            payer: SELF_PAYER.to_string(),
            amount: String::new(),
        }
    }

    pub fn view(&self, draft: &ExpenseRowDraft) -> RowView {
        let fields = FieldKind::ALL
            .into_iter()
            .map(|kind| {
                let (input, max_len, pattern, hint) = match kind {
                    FieldKind::Description => {
                        (InputKind::TextArea, Some(DESCRIPTION_MAX_LEN), None, None)
                    }
                    FieldKind::Category | FieldKind::Payer => (InputKind::Select, None, None, None),
                    FieldKind::Date => (InputKind::Date, Some(DATE_MAX_LEN), None, None),
                    FieldKind::Amount => (
                        InputKind::Text,
                        Some(AMOUNT_MAX_LEN),
                        Some(AMOUNT_PATTERN),
                        Some(AMOUNT_HINT),
                    ),
                };
                FieldView {
                    kind,
                    name: format!("{kind}{SEPARATOR}"),
                    input,
                    value: draft.value(kind).to_string(),
                    options: self.options(kind).to_vec(),
                    required: true,
                    max_len,
                    pattern,
                    hint,
                }
            })
            .collect();

        RowView {
            row_id: draft.id,
            ordinal: String::new(),
            selected: false,
            fields,
        }
    }
}
