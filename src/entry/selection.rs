use super::draft::RowId;

/// At most one row is highlighted for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(RowId),
}

impl Selection {
    /// Clicking the selected row clears it; clicking any other row moves the
    /// highlight there.
    pub fn click(self, row: RowId) -> Self {
        match self {
            Selection::Selected(current) if current == row => Selection::Unselected,
            _ => Selection::Selected(row),
        }
    }

    pub fn row(self) -> Option<RowId> {
        match self {
            Selection::Selected(row) => Some(row),
            Selection::Unselected => None,
        }
    }

    pub fn is_selected(self, row: RowId) -> bool {
        self.row() == Some(row)
    }

    pub fn is_active(self) -> bool {
        self.row().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_transitions() {
        let s = Selection::default();
        assert!(!s.is_active());
        let s = s.click(RowId(1));
        assert_eq!(s, Selection::Selected(RowId(1)));
        let s = s.click(RowId(2));
        assert!(s.is_selected(RowId(2)));
        assert!(!s.is_selected(RowId(1)));
        assert_eq!(s.click(RowId(2)), Selection::Unselected);
    }
}
