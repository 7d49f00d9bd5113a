use super::draft::ExpenseRowDraft;
use super::field::SEPARATOR;
use super::template::RowView;

/// Reassign positions 1..N in visible order.
pub fn renumber(rows: &mut [ExpenseRowDraft]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }
}

pub fn is_contiguous(rows: &[ExpenseRowDraft]) -> bool {
    rows.iter().enumerate().all(|(i, row)| row.position == i + 1)
}

pub fn ordinal_label(position: usize) -> String {
    position.to_string()
}

/// Keep everything up to and including the separator, replace the suffix
/// with `position`. A name with no separator gets one appended.
pub fn reindex_name(name: &str, position: usize) -> String {
    match name.find(SEPARATOR) {
        Some(n) => format!("{}{position}", &name[..=n]),
        None => format!("{name}{SEPARATOR}{position}"),
    }
}

/// Apply `position` to a row's ordinal label and every field name.
pub fn number_view(view: &mut RowView, position: usize) {
    view.ordinal = ordinal_label(position);
    for field in &mut view.fields {
        field.name = reindex_name(&field.name, position);
    }
}
