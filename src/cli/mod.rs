pub mod budget;
pub mod decode;
pub mod entry;
pub mod entry_form;
pub mod init;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::models::ReferenceLists;
use crate::settings::{categories_path, payers_path};

/// Reference lists from explicit paths, falling back to the data dir copies.
pub(crate) fn load_lists(
    data_dir: &Path,
    categories: Option<&str>,
    payers: Option<&str>,
) -> Result<ReferenceLists> {
    let categories = categories.map(PathBuf::from).unwrap_or_else(|| categories_path(data_dir));
    let payers = payers.map(PathBuf::from).unwrap_or_else(|| payers_path(data_dir));
    ReferenceLists::load(&categories, &payers)
}

#[derive(Parser)]
#[command(name = "tendies", about = "Batch expense entry and budget checks for Tendie Tracker.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Tendies: choose a data directory and seed the category/payer lists.
    Init {
        /// Path for Tendies data (default: ~/Documents/tendies)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Your name, shown in the entry screen header
        #[arg(long)]
        name: Option<String>,
    },
    /// Enter up to 10 expenses interactively and save them as one submission.
    Entry {
        /// Category list JSON (default: <data_dir>/categories.json)
        #[arg(long)]
        categories: Option<String>,
        /// Payer list JSON (default: <data_dir>/payers.json)
        #[arg(long)]
        payers: Option<String>,
        /// Default expense date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output file (default: <data_dir>/submissions/expenses-<timestamp>.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Validate a saved submission and print its expenses.
    Decode {
        /// Submission JSON file
        file: String,
        /// Category list JSON (default: <data_dir>/categories.json if present)
        #[arg(long)]
        categories: Option<String>,
        /// Payer list JSON (default: <data_dir>/payers.json if present)
        #[arg(long)]
        payers: Option<String>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Budget form checks.
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show estimates and check that category percentages add up to 100%.
    Check {
        /// Yearly budget amount
        #[arg(long)]
        amount: f64,
        /// Checked spend category: NAME=PERCENT (repeatable)
        #[arg(long = "share")]
        shares: Vec<String>,
        /// Unchecked spend category name (repeatable)
        #[arg(long)]
        unchecked: Vec<String>,
    },
    /// List the years a budget can be scoped to.
    Years {
        /// Year of the budget being updated
        #[arg(long)]
        existing: Option<i32>,
    },
}
