use log::debug;

use super::condition::{parse_comparison, Comparison, Operator};
use super::error::{QueryError, Result};
use super::model::{parse_number, Record, Table};

// ---------------------------------------------------------------------------
// Row filter: keep the records satisfying a single comparison
// ---------------------------------------------------------------------------

/// Apply a `column<op>value` condition and return the surviving records.
///
/// * `>` / `<` compare both sides as numbers; a non-numeric field or operand
///   fails the whole operation.
/// * `=` compares the raw text exactly (case-sensitive, no coercion), so
///   `4.20` does not equal `4.2`.
pub fn apply_filter(table: Table, condition: &str) -> Result<Table> {
    let Comparison { column, op, value } = parse_comparison(condition)?;
    let idx = table.schema().require(&column)?;

    let before = table.len();
    let kept: Vec<Record> = match op {
        Operator::Eq => table
            .records()
            .iter()
            .filter(|r| r.get(idx) == value)
            .cloned()
            .collect(),
        Operator::Gt | Operator::Lt => {
            if table.is_empty() {
                Vec::new()
            } else {
                let operand = number(&column, &value)?;
                let mut kept = Vec::new();
                for record in table.records() {
                    let field = number(&column, record.get(idx))?;
                    let pass = match op {
                        Operator::Gt => field > operand,
                        _ => field < operand,
                    };
                    if pass {
                        kept.push(record.clone());
                    }
                }
                kept
            }
        }
    };

    let out = table.with_records(kept);
    debug!("filter {column}{op}{value}: kept {} of {before} rows", out.len());
    Ok(out)
}

fn number(column: &str, raw: &str) -> Result<f64> {
    parse_number(raw).ok_or_else(|| QueryError::NotNumeric {
        column: column.to_string(),
        value: raw.to_string(),
    })
}
