use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Payer every row can pick, listed ahead of the configured payers.
pub const SELF_PAYER: &str = "Self";

/// One entry of a server-provided category or payer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub name: String,
}

impl ReferenceItem {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Read-only lists supplied once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceLists {
    pub categories: Vec<ReferenceItem>,
    pub payers: Vec<ReferenceItem>,
}

impl ReferenceLists {
    pub fn new(categories: Vec<ReferenceItem>, payers: Vec<ReferenceItem>) -> Self {
        Self { categories, payers }
    }

    pub fn from_json(categories: &str, payers: &str) -> Result<Self> {
        Ok(Self::new(
            serde_json::from_str(categories)?,
            serde_json::from_str(payers)?,
        ))
    }

    pub fn load(categories: &Path, payers: &Path) -> Result<Self> {
        let categories = std::fs::read_to_string(categories)?;
        let payers = std::fs::read_to_string(payers)?;
        Self::from_json(&categories, &payers)
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// "Self" followed by every configured payer.
    pub fn payer_names(&self) -> Vec<String> {
        std::iter::once(SELF_PAYER.to_string())
            .chain(self.payers.iter().map(|p| p.name.clone()))
            .collect()
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn has_payer(&self, name: &str) -> bool {
        name == SELF_PAYER || self.payers.iter().any(|p| p.name == name)
    }
}

/// A decoded, validated expense from a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub payer: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let lists = ReferenceLists::from_json(
            r#"[{"name": "Food"}, {"name": "Rent"}]"#,
            r#"[{"name": "Alice"}]"#,
        )
        .unwrap();
        assert_eq!(lists.category_names(), vec!["Food", "Rent"]);
        assert_eq!(lists.payer_names(), vec!["Self", "Alice"]);
    }

    #[test]
    fn test_self_is_always_a_payer() {
        let lists = ReferenceLists::default();
        assert!(lists.has_payer("Self"));
        assert!(!lists.has_payer("Bob"));
        assert!(!lists.has_category("Food"));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let cats = dir.path().join("categories.json");
        let payers = dir.path().join("payers.json");
        std::fs::write(&cats, r#"[{"name": "Gas"}]"#).unwrap();
        std::fs::write(&payers, "[]").unwrap();
        let lists = ReferenceLists::load(&cats, &payers).unwrap();
        assert!(lists.has_category("Gas"));
        assert!(lists.payers.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ReferenceLists::from_json("not json", "[]").is_err());
    }
}
