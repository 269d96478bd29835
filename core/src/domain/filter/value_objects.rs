use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::domain::common::entities::app_errors::CoreError;

/// Operator of a single filter entry, as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,      // =
    Ne,      // !=
    Gt,      // >
    Gte,     // >=
    Lt,      // <
    Lte,     // <=
    Like,    // like
    In,      // in
    Between, // between (also accepted as btw)
}

impl FilterOperator {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            FilterOperator::Eq
                | FilterOperator::Ne
                | FilterOperator::Gt
                | FilterOperator::Gte
                | FilterOperator::Lt
                | FilterOperator::Lte
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "like",
            FilterOperator::In => "in",
            FilterOperator::Between => "between",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(FilterOperator::Eq),
            "!=" => Ok(FilterOperator::Ne),
            ">" => Ok(FilterOperator::Gt),
            ">=" => Ok(FilterOperator::Gte),
            "<" => Ok(FilterOperator::Lt),
            "<=" => Ok(FilterOperator::Lte),
            "like" => Ok(FilterOperator::Like),
            "in" => Ok(FilterOperator::In),
            "between" | "btw" => Ok(FilterOperator::Between),
            other => Err(CoreError::InvalidFilter(format!(
                "unsupported operator `{other}`"
            ))),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal operand of a filter entry before it is bound to a column type.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual rendering used when a scalar lands on a text column.
    pub fn render(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            FilterValue::Integer(i) => Some(i.to_string()),
            FilterValue::Float(f) => Some(f.to_string()),
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Null | FilterValue::List(_) => None,
        }
    }

    /// Strings shaped like `YYYY-MM-DD` become dates, everything else is kept.
    fn coerce_date(self) -> Self {
        match self {
            FilterValue::Text(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Ok(date) => FilterValue::Date(date),
                Err(_) => FilterValue::Text(s),
            },
            other => other,
        }
    }
}

impl From<JsonValue> for FilterValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => FilterValue::Null,
            JsonValue::Bool(b) => FilterValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => FilterValue::Integer(i),
                None => FilterValue::Float(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => FilterValue::Text(s),
            JsonValue::Array(items) => {
                FilterValue::List(items.into_iter().map(FilterValue::from).collect())
            }
            JsonValue::Object(map) => FilterValue::Text(JsonValue::Object(map).to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(FilterValue),
    Range { low: FilterValue, high: FilterValue },
}

/// One parsed `[attribute_path, operator, value]` entry, not yet resolved
/// against an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerm {
    pub path: String,
    pub operator: FilterOperator,
    pub operand: Operand,
}

/// Parses a JSON filter expression such as
/// `[["status","=","active"], ["created_at",">","2024-01-01"]]`.
///
/// Entries with the wrong shape, and entries whose path `is_known` rejects,
/// are dropped before their operator is looked at. Bad JSON, an unknown
/// operator or an operand that does not fit its operator is an error.
pub fn parse_filter_expression(
    expression: &str,
    is_known: impl Fn(&str) -> bool,
) -> Result<Vec<FilterTerm>, CoreError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: JsonValue = serde_json::from_str(expression)
        .map_err(|e| CoreError::InvalidFilter(format!("malformed filter expression: {e}")))?;

    let entries = match parsed {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(entries) => entries,
        _ => {
            return Err(CoreError::InvalidFilter(
                "filter expression must be a JSON array".to_string(),
            ));
        }
    };

    let mut terms = Vec::with_capacity(entries.len());
    for entry in entries {
        let JsonValue::Array(mut parts) = entry else {
            warn!("Dropping filter entry that is not an array");
            continue;
        };
        if parts.len() != 3 {
            warn!(len = parts.len(), "Dropping filter entry without three elements");
            continue;
        }

        let value = parts.pop().unwrap_or(JsonValue::Null);
        let (Some(JsonValue::String(operator)), Some(JsonValue::String(path))) =
            (parts.pop(), parts.pop())
        else {
            warn!("Dropping filter entry with a non-string path or operator");
            continue;
        };
        if !is_known(&path) {
            debug!(path = %path, "Skipping unknown filter attribute");
            continue;
        }

        let operator = FilterOperator::from_str(&operator)?;
        let operand = build_operand(&path, operator, FilterValue::from(value))?;

        terms.push(FilterTerm {
            path,
            operator,
            operand,
        });
    }

    Ok(terms)
}

fn build_operand(
    path: &str,
    operator: FilterOperator,
    value: FilterValue,
) -> Result<Operand, CoreError> {
    match operator {
        FilterOperator::Between => match value {
            FilterValue::List(mut bounds) if bounds.len() == 2 => {
                let high = bounds.pop().unwrap_or(FilterValue::Null);
                let low = bounds.pop().unwrap_or(FilterValue::Null);
                Ok(Operand::Range { low, high })
            }
            _ => Err(CoreError::InvalidFilter(format!(
                "`between` on `{path}` expects a [low, high] pair"
            ))),
        },
        FilterOperator::In => match value {
            FilterValue::List(_) => Ok(Operand::Value(value)),
            _ => Err(CoreError::InvalidFilter(format!(
                "`in` on `{path}` expects an array"
            ))),
        },
        FilterOperator::Like => match value {
            FilterValue::Text(_) => Ok(Operand::Value(value)),
            _ => Err(CoreError::InvalidFilter(format!(
                "`like` on `{path}` expects a string pattern"
            ))),
        },
        _ => Ok(Operand::Value(value.coerce_date())),
    }
}
