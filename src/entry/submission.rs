use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::draft::ExpenseRowDraft;
use super::field::{FieldKind, FieldName, SEPARATOR};
use super::template::DATE_FORMAT;
use super::DESCRIPTION_MAX_LEN;
use crate::currency::{parse_amount, AMOUNT_HINT, AMOUNT_MAX_LEN};
use crate::error::{Result, TendieError};
use crate::models::{ExpenseRecord, ReferenceLists};

/// Flat, ordered `(name, value)` fields of one batched form post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: Vec<(String, String)>,
}

impl Submission {
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Rows in position order, each row's fields in column order.
    pub fn from_rows(rows: &[ExpenseRowDraft]) -> Self {
        let fields = rows
            .iter()
            .flat_map(|row| {
                FieldKind::ALL
                    .into_iter()
                    .map(move |kind| (row.field_name(kind).to_string(), row.value(kind).to_string()))
            })
            .collect();
        Self::from_fields(fields)
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format!("{}\n", self.to_json()?))?;
        Ok(())
    }

    /// Decode into records ordered by position. Names without a separator
    /// are read as a single unnumbered record. Category and payer membership
    /// is only checked when `lists` is given.
    pub fn decode(&self, lists: Option<&ReferenceLists>) -> Result<Vec<ExpenseRecord>> {
        let Some((first, _)) = self.fields.first() else {
            return Err(TendieError::MissingField(
                FieldName::new(FieldKind::Description, 1).to_string(),
            ));
        };

        if !first.contains(SEPARATOR) {
            return self.decode_single(lists).map(|record| vec![record]);
        }

        let mut rows: BTreeMap<usize, BTreeMap<FieldKind, &str>> = BTreeMap::new();
        for (name, value) in &self.fields {
            let field: FieldName = name.parse()?;
            let row = rows.entry(field.position).or_default();
            if row.insert(field.kind, value.as_str()).is_some() {
                return Err(TendieError::BadFieldName(format!("duplicate {name}")));
            }
        }

        let expected = rows.len();
        let mut records = Vec::with_capacity(expected);
        for (i, (position, values)) in rows.iter().enumerate() {
            if *position != i + 1 {
                return Err(TendieError::NonContiguous {
                    expected,
                    found: *position,
                });
            }
            let lookup = |kind: FieldKind| {
                values
                    .get(&kind)
                    .copied()
                    .ok_or_else(|| TendieError::MissingField(FieldName::new(kind, *position).to_string()))
            };
            let label = |kind: FieldKind| FieldName::new(kind, *position).to_string();
            records.push(validate_record(lookup, label, lists)?);
        }
        Ok(records)
    }

    fn decode_single(&self, lists: Option<&ReferenceLists>) -> Result<ExpenseRecord> {
        let mut values: BTreeMap<FieldKind, &str> = BTreeMap::new();
        for (name, value) in &self.fields {
            let kind = FieldKind::parse(name).ok_or_else(|| TendieError::BadFieldName(name.clone()))?;
            values.insert(kind, value.as_str());
        }
        let lookup = |kind: FieldKind| {
            values
                .get(&kind)
                .copied()
                .ok_or_else(|| TendieError::MissingField(kind.to_string()))
        };
        validate_record(lookup, |kind: FieldKind| kind.to_string(), lists)
    }
}

fn invalid(name: String, reason: &str) -> TendieError {
    TendieError::InvalidField {
        name,
        reason: reason.to_string(),
    }
}

fn validate_record<'a>(
    lookup: impl Fn(FieldKind) -> Result<&'a str>,
    label: impl Fn(FieldKind) -> String,
    lists: Option<&ReferenceLists>,
) -> Result<ExpenseRecord> {
    let description = lookup(FieldKind::Description)?;
    if description.trim().is_empty() {
        return Err(invalid(label(FieldKind::Description), "required"));
    }
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(invalid(
            label(FieldKind::Description),
            &format!("at most {DESCRIPTION_MAX_LEN} characters"),
        ));
    }

    let category = lookup(FieldKind::Category)?;
    if category.is_empty() {
        return Err(invalid(label(FieldKind::Category), "required"));
    }
    if let Some(lists) = lists {
        if !lists.has_category(category) {
            return Err(TendieError::UnknownCategory(category.to_string()));
        }
    }

    let date = lookup(FieldKind::Date)?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| invalid(label(FieldKind::Date), "expected YYYY-MM-DD"))?;

    let payer = lookup(FieldKind::Payer)?;
    if payer.is_empty() {
        return Err(invalid(label(FieldKind::Payer), "required"));
    }
    if let Some(lists) = lists {
        if !lists.has_payer(payer) {
            return Err(TendieError::UnknownPayer(payer.to_string()));
        }
    }

    let amount = lookup(FieldKind::Amount)?;
    if amount.chars().count() > AMOUNT_MAX_LEN {
        return Err(invalid(
            label(FieldKind::Amount),
            &format!("at most {AMOUNT_MAX_LEN} characters"),
        ));
    }
    let amount = parse_amount(amount).ok_or_else(|| invalid(label(FieldKind::Amount), AMOUNT_HINT))?;

    Ok(ExpenseRecord {
        description: description.to_string(),
        category: category.to_string(),
        date,
        payer: payer.to_string(),
        amount,
    })
}
