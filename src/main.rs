mod budget;
mod cli;
mod currency;
mod entry;
mod error;
mod fmt;
mod logging;
mod models;
mod settings;
mod tui;

use clap::Parser;

use cli::{BudgetCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(&settings::get_data_dir());

    let result = match cli.command {
        Commands::Init { data_dir, name } => cli::init::run(data_dir, name),
        Commands::Entry {
            categories,
            payers,
            date,
            output,
        } => cli::entry::run(categories, payers, date, output),
        Commands::Decode {
            file,
            categories,
            payers,
            csv,
        } => cli::decode::run(&file, categories, payers, csv),
        Commands::Budget { command } => match command {
            BudgetCommands::Check {
                amount,
                shares,
                unchecked,
            } => cli::budget::check(amount, shares, unchecked),
            BudgetCommands::Years { existing } => cli::budget::years(existing),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
