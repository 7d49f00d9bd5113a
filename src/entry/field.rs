use std::fmt;
use std::str::FromStr;

use crate::error::TendieError;

/// Separates a field's kind from its row position in submission names.
pub const SEPARATOR: char = '.';

/// The role of one input within a row, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    Description,
    Category,
    Date,
    Payer,
    Amount,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Description,
        FieldKind::Category,
        FieldKind::Date,
        FieldKind::Payer,
        FieldKind::Amount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Description => "description",
            FieldKind::Category => "category",
            FieldKind::Date => "date",
            FieldKind::Payer => "payer",
            FieldKind::Amount => "amount",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn column(self) -> usize {
        self as usize
    }

    /// Next column, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.column() + 1) % Self::ALL.len()]
    }

    /// Previous column, wrapping.
    pub fn prev(self) -> Self {
        Self::ALL[(self.column() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Category and payer pick from a list; the rest take typed text.
    pub fn is_selector(self) -> bool {
        matches!(self, FieldKind::Category | FieldKind::Payer)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Description => "Description",
            FieldKind::Category => "Category",
            FieldKind::Date => "Date",
            FieldKind::Payer => "Payer",
            FieldKind::Amount => "Amount",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission name of one field: `"<kind>.<position>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldName {
    pub kind: FieldKind,
    pub position: usize,
}

impl FieldName {
    pub fn new(kind: FieldKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.kind, self.position)
    }
}

impl FromStr for FieldName {
    type Err = TendieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TendieError::BadFieldName(s.to_string());
        let (kind, position) = s.split_once(SEPARATOR).ok_or_else(bad)?;
        let kind = FieldKind::parse(kind).ok_or_else(bad)?;
        let position: usize = position.parse().map_err(|_| bad())?;
        if position == 0 {
            return Err(bad());
        }
        Ok(Self { kind, position })
    }
}
