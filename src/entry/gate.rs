use super::{MAX_ROWS, MIN_ROWS};

/// Availability of the add-row and remove-row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub add_enabled: bool,
    pub remove_enabled: bool,
}

impl Controls {
    pub fn evaluate(row_count: usize, has_selection: bool) -> Self {
        Self {
            add_enabled: row_count < MAX_ROWS,
            remove_enabled: has_selection && row_count > MIN_ROWS,
        }
    }
}
