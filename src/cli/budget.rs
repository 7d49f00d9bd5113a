use chrono::{Datelike, Local};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::budget::{
    budget_years, category_estimate, save_enabled, validate_shares, CategoryShare, Estimates,
};
use crate::error::Result;
use crate::fmt::money;

pub fn format_check(amount: f64, shares: &[CategoryShare]) -> String {
    let estimates = Estimates::for_amount(amount);
    let mut out = format!(
        "Budget: {}\nWeekly amount: {}\nMonthly amount: {}\n",
        money(estimates.total),
        money(estimates.weekly),
        money(estimates.monthly)
    );

    let mut table = Table::new();
    table.set_header(vec!["Category", "Percent", "Total", "Weekly", "Monthly"]);
    for share in shares.iter().filter(|s| s.checked) {
        match category_estimate(amount, &share.percent) {
            Ok(e) => table.add_row(vec![
                Cell::new(&share.name),
                Cell::new(format!("{}%", share.percent)).set_alignment(CellAlignment::Right),
                Cell::new(money(e.total)).set_alignment(CellAlignment::Right),
                Cell::new(money(e.weekly)).set_alignment(CellAlignment::Right),
                Cell::new(money(e.monthly)).set_alignment(CellAlignment::Right),
            ]),
            Err(e) => table.add_row(vec![
                Cell::new(&share.name),
                Cell::new(&share.percent),
                Cell::new(format!("\u{26a0} {e} \u{26a0}")),
            ]),
        };
    }
    out.push_str(&table.to_string());
    out
}

pub fn check(amount: f64, shares: Vec<String>, unchecked: Vec<String>) -> Result<()> {
    let mut all = shares
        .iter()
        .map(|s| CategoryShare::parse(s))
        .collect::<Result<Vec<_>>>()?;
    all.extend(unchecked.iter().map(|name| CategoryShare::unchecked(name)));

    println!("{}", format_check(amount, &all));

    if !save_enabled(&all) {
        println!(
            "{}",
            "Check at least one category and give each a percentage between 1 and 100".yellow()
        );
    }
    validate_shares(&all)?;
    println!("{}", "Budget percentages add up to 100%".green().bold());
    Ok(())
}

pub fn years(existing: Option<i32>) -> Result<()> {
    let current = Local::now().year();
    for option in budget_years(current, existing) {
        let marker = if option.selected { "*" } else { " " };
        println!("{marker} {}", option.year);
    }
    Ok(())
}
