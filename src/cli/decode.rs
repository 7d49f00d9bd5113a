use std::io::Write;
use std::path::{Path, PathBuf};

use comfy_table::{Cell, CellAlignment, Table};
use tracing::warn;

use super::load_lists;
use crate::entry::Submission;
use crate::error::Result;
use crate::fmt::money;
use crate::models::{ExpenseRecord, ReferenceLists};
use crate::settings::{categories_path, get_data_dir, payers_path};

/// Lists are optional here: flags win, then the data dir copies when both exist.
fn resolve_lists(
    data_dir: &Path,
    categories: Option<&str>,
    payers: Option<&str>,
) -> Result<Option<ReferenceLists>> {
    if categories.is_some() || payers.is_some() {
        return load_lists(data_dir, categories, payers).map(Some);
    }
    if categories_path(data_dir).exists() && payers_path(data_dir).exists() {
        return load_lists(data_dir, None, None).map(Some);
    }
    Ok(None)
}

pub fn format_table(records: &[ExpenseRecord]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Description", "Category", "Date", "Payer", "Amount"]);
    for (i, r) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.description),
            Cell::new(&r.category),
            Cell::new(r.date),
            Cell::new(&r.payer),
            Cell::new(money(r.amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    let total: f64 = records.iter().map(|r| r.amount).sum();
    format!("Expenses\n{table}\nTotal: {}", money(total))
}

pub fn write_csv<W: Write>(records: &[ExpenseRecord], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["description", "category", "date", "payer", "amount"])?;
    for r in records {
        let date = r.date.to_string();
        let amount = format!("{:.2}", r.amount);
        wtr.write_record([
            r.description.as_str(),
            r.category.as_str(),
            date.as_str(),
            r.payer.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run(
    file: &str,
    categories: Option<String>,
    payers: Option<String>,
    csv: bool,
) -> Result<()> {
    let lists = resolve_lists(&get_data_dir(), categories.as_deref(), payers.as_deref())?;
    let submission = Submission::load(&PathBuf::from(file))?;
    let records = submission.decode(lists.as_ref()).inspect_err(|e| {
        warn!(file, error = %e, "submission failed validation");
    })?;

    if csv {
        write_csv(&records, std::io::stdout().lock())?;
    } else {
        println!("{}", format_table(&records));
    }
    Ok(())
}
