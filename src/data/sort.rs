use std::cmp::Ordering;
use std::str::FromStr;

use log::debug;

use super::condition::{parse_key_modifier, KeyModifier};
use super::error::{QueryError, Result};
use super::model::{parse_number, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(QueryError::invalid("Sort direction must be 'asc' or 'desc'.")),
        }
    }
}

// ---------------------------------------------------------------------------
// Stable sort by one column
// ---------------------------------------------------------------------------

/// Sort by a `column=asc|desc` condition.
///
/// The column is compared numerically when every non-empty value in the
/// current records parses as a number, otherwise as text. The check runs
/// against the table as it is now, so a prior filter can change the outcome.
/// Ties keep their previous relative order in both directions. In a numeric
/// column, empty fields come before every number and `NaN` after every number.
pub fn apply_sort(table: Table, condition: &str) -> Result<Table> {
    let KeyModifier { column, token } = parse_key_modifier(condition)?;
    let idx = table.schema().require(&column)?;
    let direction: Direction = token.parse()?;

    let numeric = table.is_numeric_column(idx);
    debug!(
        "sort {column} {direction:?} as {}",
        if numeric { "numbers" } else { "text" }
    );

    let (schema, mut records) = table.into_parts();
    let order = |a: &str, b: &str| -> Ordering {
        if numeric {
            // Empty fields are the only non-numbers left; they sort first.
            // NaN sorts after +inf.
            match (parse_number(a), parse_number(b)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.total_cmp(&y),
            }
        } else {
            a.cmp(b)
        }
    };
    match direction {
        Direction::Asc => records.sort_by(|a, b| order(a.get(idx), b.get(idx))),
        Direction::Desc => records.sort_by(|a, b| order(b.get(idx), a.get(idx))),
    }

    Ok(Table::new(schema, records))
}
