use colored::Colorize;

use crate::error::Result;
use crate::models::ReferenceItem;
use crate::settings::{
    categories_path, load_settings, payers_path, save_settings, shellexpand_path, submissions_dir,
};

const STARTER_CATEGORIES: &[&str] = &[
    "Groceries",
    "Eating Out",
    "Housing",
    "Utilities",
    "Transportation",
    "Entertainment",
    "Other",
];

fn write_if_missing(path: &std::path::Path, items: &[ReferenceItem]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(true)
}

pub fn run(data_dir: Option<String>, name: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(name) = name {
        settings.user_name = name;
    }

    let dir = std::path::PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(submissions_dir(&dir))?;

    let categories: Vec<ReferenceItem> = STARTER_CATEGORIES.iter().map(|c| ReferenceItem::new(c)).collect();
    if write_if_missing(&categories_path(&dir), &categories)? {
        println!("Seeded {}", categories_path(&dir).display());
    }
    if write_if_missing(&payers_path(&dir), &[])? {
        println!("Seeded {}", payers_path(&dir).display());
    }

    save_settings(&settings)?;
    println!("{} {}", "Data directory:".green().bold(), dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_if_missing_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payers.json");
        std::fs::write(&path, r#"[{"name": "Alice"}]"#).unwrap();
        assert!(!write_if_missing(&path, &[]).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("Alice"));
    }

    #[test]
    fn test_write_if_missing_seeds_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        assert!(write_if_missing(&path, &[ReferenceItem::new("Food")]).unwrap());
        let items: Vec<ReferenceItem> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(items, vec![ReferenceItem::new("Food")]);
    }
}
