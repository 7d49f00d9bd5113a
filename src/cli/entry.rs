use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use tracing::info;

use super::entry_form::{EntryForm, EntryOutcome};
use super::load_lists;
use crate::entry::template::DATE_FORMAT;
use crate::entry::{FieldKind, RowManager, RowTemplate};
use crate::error::{Result, TendieError};
use crate::settings::{load_settings, submissions_dir};
use crate::tui;

pub(crate) fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, DATE_FORMAT)
            .map_err(|_| TendieError::Other(format!("Invalid date '{d}', expected YYYY-MM-DD"))),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn run(
    categories: Option<String>,
    payers: Option<String>,
    date: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let data_dir = PathBuf::from(&settings.data_dir);
    let lists = load_lists(&data_dir, categories.as_deref(), payers.as_deref())?;
    let today = parse_date(date.as_deref())?;

    let template = RowTemplate::new(&lists, today);
    let mut form = EntryForm::new(RowManager::open(template), lists, &settings.greeting());
    tui::run_view(&mut form)?;

    match form.into_outcome() {
        EntryOutcome::Submitted(submission) => {
            let path = match output {
                Some(p) => PathBuf::from(p),
                None => submissions_dir(&data_dir).join(format!(
                    "expenses-{}.json",
                    Local::now().format("%Y%m%d-%H%M%S")
                )),
            };
            submission.save(&path)?;
            let count = submission.fields().len() / FieldKind::ALL.len();
            info!(count, path = %path.display(), "submission saved");
            println!(
                "{} {count} expense(s) to {}",
                "Saved".green().bold(),
                path.display()
            );
        }
        EntryOutcome::Cancelled => println!("No expenses saved."),
    }
    Ok(())
}
