//! Multi-row expense entry: a pure row/selection state core that a UI
//! adapter projects to the screen and flattens into one batched submission.

pub mod draft;
pub mod field;
pub mod gate;
pub mod indexer;
pub mod manager;
pub mod selection;
pub mod submission;
pub mod template;

pub use field::{FieldKind, FieldName};
pub use manager::RowManager;
pub use submission::Submission;
pub use template::RowTemplate;

/// Fewest rows the form may hold.
pub const MIN_ROWS: usize = 1;
/// Most rows the form may hold.
pub const MAX_ROWS: usize = 10;

pub const DESCRIPTION_MAX_LEN: usize = 200;
