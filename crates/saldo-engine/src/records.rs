use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::normalize::normalize;

/// Direction of an economic movement. Stored values are always positive
/// magnitudes; direction is carried by this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "entrada")]
    Entrada,
    #[serde(rename = "saida")]
    Saida,
}

impl EntryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrada => "entrada",
            Self::Saida => "saida",
        }
    }

    /// Accepts the tag in any casing or accented spelling ("Saída" == "saida").
    /// Anything else is a data-quality defect the caller keeps as `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize(Some(raw)).as_str() {
            "entrada" => Some(Self::Entrada),
            "saida" => Some(Self::Saida),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<String>,
    pub date: NaiveDate,
    pub value: f64,
    pub entry_type: Option<EntryType>,
    pub description: String,
    pub category_ref: Option<String>,
    pub contact_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExpense {
    pub month: String,
    pub name: String,
    pub category_ref: Option<String>,
    pub quantity: f64,
    pub unit_value: Option<f64>,
    pub total_value: Option<f64>,
}

impl PlannedExpense {
    /// Derived total: explicit `total_value` when positive, else
    /// `quantity * unit_value`, else the bare quantity. The bare-quantity
    /// fallback is an explicit policy, not an omission.
    pub fn derived_total(&self) -> f64 {
        if let Some(total) = self.total_value
            && total > 0.0
        {
            return total;
        }
        if let Some(unit) = self.unit_value {
            return self.quantity * unit;
        }
        self.quantity
    }
}

/// A record that could not be converted from its loose stored shape.
#[derive(Debug, Clone)]
pub struct RecordIssue {
    pub record: i64,
    pub field: String,
    pub detail: String,
}

pub fn transaction_from_value(index: usize, value: &Value) -> Result<Transaction, RecordIssue> {
    let record = (index as i64) + 1;
    let Some(object) = value.as_object() else {
        return Err(RecordIssue {
            record,
            field: "record".to_string(),
            detail: "each transaction must be a JSON object".to_string(),
        });
    };

    let date = required_date(object, record)?;
    let entry_type = string_field(object, &["type", "tipo"])
        .as_deref()
        .and_then(EntryType::parse);

    Ok(Transaction {
        id: string_field(object, &["id"]),
        date,
        value: number_field(object, &["value", "valor"]).unwrap_or(0.0),
        entry_type,
        description: string_field(object, &["description", "descricao"]).unwrap_or_default(),
        category_ref: string_field(object, &["categoryRef", "category_ref"]),
        contact_ref: string_field(object, &["contactRef", "contact_ref"]),
    })
}

pub fn planned_expense_from_value(
    index: usize,
    value: &Value,
) -> Result<PlannedExpense, RecordIssue> {
    let record = (index as i64) + 1;
    let Some(object) = value.as_object() else {
        return Err(RecordIssue {
            record,
            field: "record".to_string(),
            detail: "each planned expense must be a JSON object".to_string(),
        });
    };

    let Some(month) = string_field(object, &["month", "mes"]) else {
        return Err(RecordIssue {
            record,
            field: "month".to_string(),
            detail: "month label must be present and non-empty".to_string(),
        });
    };

    Ok(PlannedExpense {
        month,
        name: string_field(object, &["name", "nome"]).unwrap_or_default(),
        category_ref: string_field(object, &["categoryRef", "category_ref"]),
        quantity: number_field(object, &["quantity", "quantidade"]).unwrap_or(0.0),
        unit_value: number_field(object, &["unitValue", "unit_value"]),
        total_value: number_field(object, &["totalValue", "total_value"]),
    })
}

fn required_date(object: &Map<String, Value>, record: i64) -> Result<NaiveDate, RecordIssue> {
    let Some(raw) = string_field(object, &["date", "data"]) else {
        return Err(RecordIssue {
            record,
            field: "date".to_string(),
            detail: "date must be present as YYYY-MM-DD".to_string(),
        });
    };

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| RecordIssue {
        record,
        field: "date".to_string(),
        detail: format!("date must be YYYY-MM-DD; got \"{raw}\""),
    })
}

fn string_field(object: &Map<String, Value>, names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(raw) = object.get(*name) {
            if let Some(text) = raw.as_str() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            if let Some(number) = raw.as_f64() {
                return Some(number.to_string());
            }
        }
    }
    None
}

fn number_field(object: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    for name in names {
        if let Some(raw) = object.get(*name) {
            if let Some(number) = raw.as_f64() {
                return Some(number);
            }
            if let Some(text) = raw.as_str()
                && let Ok(parsed) = text.trim().parse::<f64>()
            {
                return Some(parsed);
            }
        }
    }
    None
}
