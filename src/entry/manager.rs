use tracing::{debug, info};

use super::draft::{ExpenseRowDraft, RowId};
use super::field::{FieldKind, FieldName};
use super::gate::Controls;
use super::indexer;
use super::selection::Selection;
use super::submission::Submission;
use super::template::{RowTemplate, RowView};
use crate::error::{Result, TendieError};

/// Owns the row sequence, the selection and input focus of one entry form.
#[derive(Debug, Clone)]
pub struct RowManager {
    template: RowTemplate,
    rows: Vec<ExpenseRowDraft>,
    selection: Selection,
    focus: Option<(RowId, FieldKind)>,
    controls: Controls,
    next_id: u64,
}

impl RowManager {
    /// A manager with no rows.
    pub fn new(template: RowTemplate) -> Self {
        Self {
            template,
            rows: Vec::new(),
            selection: Selection::Unselected,
            focus: None,
            controls: Controls::evaluate(0, false),
            next_id: 1,
        }
    }

    /// The form as first shown: one empty row.
    pub fn open(template: RowTemplate) -> Self {
        let mut manager = Self::new(template);
        manager.add_row();
        manager
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[ExpenseRowDraft] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, position: usize) -> Option<&ExpenseRowDraft> {
        position.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    #[cfg(test)]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selection.row().and_then(|id| self.position_of(id))
    }

    pub fn focus(&self) -> Option<FieldName> {
        let (id, kind) = self.focus?;
        self.position_of(id).map(|position| FieldName::new(kind, position))
    }

    /// Focused cell keyed by row identity, for matching against [`RowView::row_id`].
    pub fn focused_cell(&self) -> Option<(RowId, FieldKind)> {
        self.focus
    }

    /// Append one fresh row and focus its description. Callers check
    /// [`Controls::add_enabled`] first; the ceiling is not enforced here.
    pub fn add_row(&mut self) -> usize {
        let id = RowId(self.next_id);
        self.next_id += 1;
        let position = self.rows.len() + 1;
        self.rows.push(self.template.draft(id, position));
        self.renumber();
        self.focus = Some((id, FieldKind::Description));
        info!(position, rows = self.rows.len(), "row added");
        position
    }

    /// Reassign positions 1..N and re-evaluate the controls.
    pub fn renumber(&mut self) {
        indexer::renumber(&mut self.rows);
        debug_assert!(indexer::is_contiguous(&self.rows));
        self.refresh_controls();
    }

    /// Toggle the selection on the row at `position`.
    pub fn select(&mut self, position: usize) -> Result<Selection> {
        let id = self.row(position).ok_or(TendieError::NoSuchRow(position))?.id;
        self.selection = self.selection.click(id);
        self.refresh_controls();
        debug!(position, selected = self.selection.is_active(), "selection changed");
        Ok(self.selection)
    }

    /// Remove the selected row. Refused while the gate disables removal.
    pub fn remove_selected(&mut self) -> Result<ExpenseRowDraft> {
        if !self.controls.remove_enabled {
            return Err(TendieError::RemoveDisabled);
        }
        let index = self
            .selected_position()
            .map(|position| position - 1)
            .ok_or(TendieError::RemoveDisabled)?;
        let removed = self.rows.remove(index);
        self.selection = Selection::Unselected;
        if let Some((id, kind)) = self.focus {
            if id == removed.id {
                let next = index.min(self.rows.len().saturating_sub(1));
                self.focus = self.rows.get(next).map(|row| (row.id, kind));
            }
        }
        self.renumber();
        info!(position = removed.position, rows = self.rows.len(), "row removed");
        Ok(removed)
    }

    pub fn set_focus(&mut self, position: usize, kind: FieldKind) -> Result<()> {
        let id = self.row(position).ok_or(TendieError::NoSuchRow(position))?.id;
        self.focus = Some((id, kind));
        Ok(())
    }

    pub fn set_field(&mut self, position: usize, kind: FieldKind, value: &str) -> Result<()> {
        let row = position
            .checked_sub(1)
            .and_then(|i| self.rows.get_mut(i))
            .ok_or(TendieError::NoSuchRow(position))?;
        *row.value_mut(kind) = value.to_string();
        Ok(())
    }

    /// Numbered view models, one per row, in visible order.
    pub fn views(&self) -> Vec<RowView> {
        self.rows
            .iter()
            .map(|row| {
                let mut view = self.template.view(row);
                indexer::number_view(&mut view, row.position);
                view.selected = self.selection.is_selected(row.id);
                view
            })
            .collect()
    }

    pub fn submission(&self) -> Submission {
        Submission::from_rows(&self.rows)
    }

    fn position_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().find(|row| row.id == id).map(|row| row.position)
    }

    fn refresh_controls(&mut self) {
        self.controls = Controls::evaluate(self.rows.len(), self.selection.is_active());
    }
}
