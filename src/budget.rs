use crate::error::{Result, TendieError};

/// Earliest year a budget can be scoped to.
pub const FIRST_BUDGET_YEAR: i32 = 2020;

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

pub const PERCENT_RANGE_MESSAGE: &str =
    "Enter a percentage between 1 to 100, or uncheck the category";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOption {
    pub year: i32,
    pub selected: bool,
}

/// Years offered for a budget, newest first. An existing budget keeps its
/// own year selected; a new one defaults to the current year.
pub fn budget_years(current_year: i32, existing: Option<i32>) -> Vec<YearOption> {
    let selected = existing.unwrap_or(current_year);
    (FIRST_BUDGET_YEAR..=current_year)
        .rev()
        .map(|year| YearOption {
            year,
            selected: year == selected,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimates {
    pub total: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl Estimates {
    pub fn for_amount(total: f64) -> Self {
        Self {
            total,
            weekly: total / WEEKS_PER_YEAR,
            monthly: total / MONTHS_PER_YEAR,
        }
    }

    pub fn scaled(&self, percent: f64) -> Self {
        let factor = percent / 100.0;
        Self {
            total: self.total * factor,
            weekly: self.weekly * factor,
            monthly: self.monthly * factor,
        }
    }
}

/// One spend category on the budget form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub name: String,
    pub checked: bool,
    /// Raw percentage input.
    pub percent: String,
}

impl CategoryShare {
    pub fn checked(name: &str, percent: &str) -> Self {
        Self {
            name: name.to_string(),
            checked: true,
            percent: percent.to_string(),
        }
    }

    pub fn unchecked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            checked: false,
            percent: String::new(),
        }
    }

    /// Parse `NAME=PCT`.
    pub fn parse(s: &str) -> Result<Self> {
        let (name, percent) = s
            .rsplit_once('=')
            .ok_or_else(|| TendieError::Budget(format!("Expected NAME=PERCENT, got '{s}'")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(TendieError::Budget(format!("Missing category name in '{s}'")));
        }
        let percent = percent.trim();
        if !percent.chars().all(percent_key_allowed) {
            return Err(TendieError::Budget(format!(
                "Percent for {name} may only contain digits, got '{percent}'"
            )));
        }
        Ok(Self::checked(name, percent))
    }
}

/// Only digits may be typed into a percentage box.
pub fn percent_key_allowed(c: char) -> bool {
    c.is_ascii_digit()
}

/// Leading-integer parse: optional sign, then digits up to the first
/// non-digit. Empty or unparsable input counts as 0.
pub fn parse_percent(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Dollar amounts for one category, valid only for 0 < percent <= 100.
pub fn category_estimate(total: f64, percent: &str) -> Result<Estimates> {
    match percent.trim().parse::<f64>() {
        Ok(p) if p > 0.0 && p <= 100.0 => Ok(Estimates::for_amount(total).scaled(p)),
        _ => Err(TendieError::Budget(PERCENT_RANGE_MESSAGE.to_string())),
    }
}

pub fn checked_sum(shares: &[CategoryShare]) -> i64 {
    shares
        .iter()
        .filter(|s| s.checked)
        .map(|s| parse_percent(&s.percent))
        .fold(0i64, |sum, p| sum.saturating_add(p))
}

/// Checked categories must add up to exactly 100%.
pub fn validate_shares(shares: &[CategoryShare]) -> Result<()> {
    let sum = checked_sum(shares);
    if sum != 100 {
        return Err(TendieError::Budget(format!(
            "Your spend categories budgets add up to {sum}% and it must be equal to 100%"
        )));
    }
    Ok(())
}

/// Saving needs at least one checked category, each with a usable percentage.
pub fn save_enabled(shares: &[CategoryShare]) -> bool {
    let mut checked = shares.iter().filter(|s| s.checked).peekable();
    checked.peek().is_some() && checked.all(|s| category_estimate(0.0, &s.percent).is_ok())
}
