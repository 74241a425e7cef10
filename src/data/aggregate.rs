use std::fmt;
use std::str::FromStr;

use super::condition::{parse_key_modifier, KeyModifier};
use super::error::{QueryError, Result};
use super::model::{parse_number, Table};

// ---------------------------------------------------------------------------
// Statistics shared by the aggregate and the grouped report
// ---------------------------------------------------------------------------

/// Round to two decimal places from the exact decimal expansion of `v`.
///
/// Scaling by 100 first can push a value just below a half up onto it.
pub fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

/// Arithmetic mean; an empty slice yields 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

// ---------------------------------------------------------------------------
// Single-column aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Avg,
    Min,
    Max,
}

impl AggregateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateKind::Avg => "avg",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(AggregateKind::Avg),
            "min" => Ok(AggregateKind::Min),
            "max" => Ok(AggregateKind::Max),
            other => Err(QueryError::invalid(format!(
                "Invalid aggregate '{other}'. Supported: avg, min, max."
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub kind: AggregateKind,
    pub value: f64,
}

/// Evaluate a `column=avg|min|max` condition over the current records.
///
/// Checks run in order: rows present, column exists, column numeric, kind
/// known. Empty fields are skipped. `avg` is rounded to two decimals, `min`
/// and `max` are returned as stored.
pub fn apply_aggregate(table: &Table, condition: &str) -> Result<AggregateResult> {
    if table.is_empty() {
        return Err(QueryError::invalid("No rows to aggregate."));
    }
    let KeyModifier { column, token } = parse_key_modifier(condition)?;
    let idx = table.schema().require(&column)?;

    if !table.is_numeric_column(idx) {
        return Err(QueryError::invalid(format!(
            "Column '{column}' must be numeric for aggregation."
        )));
    }
    let kind: AggregateKind = token.parse()?;

    let values: Vec<f64> = table
        .column(idx)
        .filter(|v| !v.is_empty())
        .filter_map(parse_number)
        .collect();

    let value = match kind {
        AggregateKind::Avg => round2(mean(&values)),
        AggregateKind::Min => min(&values).ok_or_else(|| no_values(&column))?,
        AggregateKind::Max => max(&values).ok_or_else(|| no_values(&column))?,
    };

    Ok(AggregateResult { kind, value })
}

fn no_values(column: &str) -> QueryError {
    QueryError::invalid(format!("Column '{column}' has no values to aggregate."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::apply_filter;
    use crate::data::model::fixtures::{products, table};

    #[test]
    fn average_is_rounded() {
        let res = apply_aggregate(&products(), "rating=avg").unwrap();
        assert_eq!(res.kind, AggregateKind::Avg);
        assert_eq!(res.value, 4.49);
    }

    #[test]
    fn min_and_max_are_exact() {
        let res = apply_aggregate(&products(), "rating=max").unwrap();
        assert_eq!(res.value, 4.9);
        let res = apply_aggregate(&products(), "rating=min").unwrap();
        assert_eq!(res.value, 4.1);
    }

    #[test]
    fn aggregate_after_filter() {
        let t = apply_filter(products(), "brand=xiaomi").unwrap();
        let res = apply_aggregate(&t, "price=min").unwrap();
        assert_eq!(res.kind, AggregateKind::Min);
        assert_eq!(res.value, 149.0);
    }

    #[test]
    fn empty_fields_are_skipped() {
        let t = table(&["n"], &[&["1"], &[""], &["2"]]);
        assert_eq!(apply_aggregate(&t, "n=avg").unwrap().value, 1.5);
    }

    #[test]
    fn all_empty_column() {
        let t = table(&["n"], &[&[""], &[""]]);
        assert_eq!(apply_aggregate(&t, "n=avg").unwrap().value, 0.0);
        assert!(apply_aggregate(&t, "n=max").is_err());
    }

    #[test]
    fn preconditions_fail_in_order() {
        let empty = apply_filter(products(), "rating>10").unwrap();
        let err = apply_aggregate(&empty, "nope=median").unwrap_err();
        assert!(err.to_string().contains("No rows"));

        let err = apply_aggregate(&products(), "nope=avg").unwrap_err();
        assert!(err.to_string().contains("Column 'nope' not found"));

        let err = apply_aggregate(&products(), "brand=median").unwrap_err();
        assert!(err.to_string().contains("numeric"));

        let err = apply_aggregate(&products(), "price=median").unwrap_err();
        assert!(err.to_string().contains("Invalid aggregate 'median'"));
    }

    #[test]
    fn average_rounds_from_exact_value() {
        let t = table(&["rating"], &[&["5.0"], &["5.0"], &["4.2"], &["4.5"]]);
        assert_eq!(apply_aggregate(&t, "rating=avg").unwrap().value, 4.67);

        let t = table(&["rating"], &[&["4.1"], &["4.15"]]);
        assert_eq!(apply_aggregate(&t, "rating=avg").unwrap().value, 4.12);
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(4.675), 4.67);
        assert_eq!(round2(4.5549), 4.55);
        assert_eq!(round2(4.366666), 4.37);
        assert_eq!(round2(149.0), 149.0);
    }
}
