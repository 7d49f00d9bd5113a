use super::field::{FieldKind, FieldName};

/// Stable key of a row, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// One row of the entry form as the user is filling it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRowDraft {
    pub id: RowId,
    /// Current 1-based rank; rewritten by the indexer on every structural change.
    pub position: usize,
    pub description: String,
    pub category: String,
    /// Raw `YYYY-MM-DD` input; validated on decode.
    pub date: String,
    pub payer: String,
    pub amount: String,
}

impl ExpenseRowDraft {
    pub fn value(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Description => &self.description,
            FieldKind::Category => &self.category,
            FieldKind::Date => &self.date,
            FieldKind::Payer => &self.payer,
            FieldKind::Amount => &self.amount,
        }
    }

    pub fn value_mut(&mut self, kind: FieldKind) -> &mut String {
        match kind {
            FieldKind::Description => &mut self.description,
            FieldKind::Category => &mut self.category,
            FieldKind::Date => &mut self.date,
            FieldKind::Payer => &mut self.payer,
            FieldKind::Amount => &mut self.amount,
        }
    }

    pub fn field_name(&self, kind: FieldKind) -> FieldName {
        FieldName::new(kind, self.position)
    }
}
