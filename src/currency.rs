use std::sync::OnceLock;

use regex::Regex;

/// Pattern the amount input enforces, ASCII digits only. The browser version
/// also required a digit somewhere via lookahead, which `regex` has no syntax
/// for; see [`is_valid_amount`].
pub const AMOUNT_PATTERN: &str = r"^(([1-9][0-9]{0,2}([0-9]{3})*)|[0-9]+)?(\.[0-9]{1,2})?$";

pub const AMOUNT_MAX_LEN: usize = 10;

pub const AMOUNT_HINT: &str =
    "Format must be currency value without dollar sign or commas e.g. 1, 2.50, 1500.75";

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT_PATTERN).expect("amount pattern compiles"))
}

/// True when `s` would pass the amount field's constraints.
pub fn is_valid_amount(s: &str) -> bool {
    s.chars().count() <= AMOUNT_MAX_LEN
        && s.chars().any(|c| c.is_ascii_digit())
        && amount_regex().is_match(s)
}

/// Parse a valid amount string into dollars.
pub fn parse_amount(s: &str) -> Option<f64> {
    if !is_valid_amount(s) {
        return None;
    }
    s.parse::<f64>().ok()
}
