use std::fmt;

use super::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Condition grammars
// ---------------------------------------------------------------------------
//
// Two shapes share the `column<op>text` surface syntax:
//
//   * comparisons used by the filter:     price<300, brand=apple
//   * key=modifier pairs used by sort and aggregate: price=desc, rating=avg
//
// Each has its own parse function and result type.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gt,
    Lt,
    Eq,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Gt => '>',
            Operator::Lt => '<',
            Operator::Eq => '=',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `column <op> value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub column: String,
    pub op: Operator,
    pub value: String,
}

/// `column=token`, where the token is a direction or an aggregate kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModifier {
    pub column: String,
    pub token: String,
}

fn missing_operator() -> QueryError {
    QueryError::invalid("Condition must contain >, < or =.")
}

/// Parse a filter condition.
///
/// A single `=` makes an equality test. Otherwise the string is split at the
/// first `>`, or failing that at the first `<`.
pub fn parse_comparison(raw: &str) -> Result<Comparison> {
    if raw.matches('=').count() == 1 {
        let (column, value) = raw.split_once('=').ok_or_else(missing_operator)?;
        return Ok(Comparison {
            column: column.trim().to_string(),
            op: Operator::Eq,
            value: value.trim().to_string(),
        });
    }

    for op in [Operator::Gt, Operator::Lt] {
        if let Some((column, value)) = raw.split_once(op.symbol()) {
            return Ok(Comparison {
                column: column.trim().to_string(),
                op,
                value: value.trim().to_string(),
            });
        }
    }

    Err(missing_operator())
}

/// Parse a `column=token` pair. The token is returned verbatim (trimmed).
pub fn parse_key_modifier(raw: &str) -> Result<KeyModifier> {
    if raw.matches('=').count() != 1 {
        return Err(QueryError::invalid(format!(
            "Invalid condition '{raw}'. Expected column=value."
        )));
    }
    let (column, token) = raw.split_once('=').ok_or_else(missing_operator)?;
    Ok(KeyModifier {
        column: column.trim().to_string(),
        token: token.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(column: &str, op: Operator, value: &str) -> Comparison {
        Comparison {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    #[test]
    fn parses_each_operator_and_trims() {
        assert_eq!(parse_comparison("rating>4.7").unwrap(), cmp("rating", Operator::Gt, "4.7"));
        assert_eq!(parse_comparison(" price < 300 ").unwrap(), cmp("price", Operator::Lt, "300"));
        assert_eq!(parse_comparison("brand = apple").unwrap(), cmp("brand", Operator::Eq, "apple"));
    }

    #[test]
    fn single_equals_wins_over_angle_brackets() {
        // "!=" is not an operator: the column becomes "rating!"
        assert_eq!(parse_comparison("rating!=4.5").unwrap(), cmp("rating!", Operator::Eq, "4.5"));
        assert_eq!(parse_comparison("a>=1").unwrap(), cmp("a>", Operator::Eq, "1"));
    }

    #[test]
    fn greater_than_is_checked_before_less_than() {
        assert_eq!(parse_comparison("a<b>c").unwrap(), cmp("a<b", Operator::Gt, "c"));
    }

    #[test]
    fn rejects_condition_without_operator() {
        let err = parse_comparison("rating").unwrap_err();
        assert!(err.to_string().contains("must contain >, < or ="));
        assert!(parse_comparison("a==b").is_err());
    }

    #[test]
    fn key_modifier_keeps_token_verbatim() {
        let km = parse_key_modifier("price = desc").unwrap();
        assert_eq!(km.column, "price");
        assert_eq!(km.token, "desc");

        assert!(parse_key_modifier("price>desc").is_err());
        assert!(parse_key_modifier("a=b=c").is_err());
    }
}
