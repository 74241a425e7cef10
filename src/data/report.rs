use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::aggregate::{max, mean, min, round2};
use super::error::{QueryError, Result};
use super::model::{parse_number, Table};

pub const GROUP_COLUMN: &str = "brand";
pub const VALUE_COLUMN: &str = "rating";

// ---------------------------------------------------------------------------
// Report kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    AverageRating,
    MinRating,
    MaxRating,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::AverageRating => "average-rating",
            ReportKind::MinRating => "min-rating",
            ReportKind::MaxRating => "max-rating",
        }
    }

    /// Column label of the computed statistic.
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::AverageRating => "average",
            ReportKind::MinRating => "min",
            ReportKind::MaxRating => "max",
        }
    }

    fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            ReportKind::AverageRating => Some(round2(mean(values))),
            ReportKind::MinRating => min(values),
            ReportKind::MaxRating => max(values),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average-rating" => Ok(ReportKind::AverageRating),
            "min-rating" => Ok(ReportKind::MinRating),
            "max-rating" => Ok(ReportKind::MaxRating),
            other => Err(QueryError::invalid(format!(
                "Invalid report '{other}'. Supported: average-rating, min-rating, max-rating."
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped report: one statistic of `rating` per `brand`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub brand: String,
    pub value: f64,
}

/// Group ratings by brand and compute `kind` for every group.
///
/// Rows with an empty brand, an empty rating or a non-numeric rating are left
/// out silently. Rows come back ordered by brand; a brand without a single
/// usable rating does not appear at all.
pub fn grouped_report(table: &Table, kind: ReportKind) -> Vec<ReportRow> {
    let schema = table.schema();
    let (Some(brand_idx), Some(rating_idx)) =
        (schema.index_of(GROUP_COLUMN), schema.index_of(VALUE_COLUMN))
    else {
        debug!("report {kind}: no '{GROUP_COLUMN}'/'{VALUE_COLUMN}' columns");
        return Vec::new();
    };

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in table.records() {
        let brand = record.get(brand_idx);
        let rating = record.get(rating_idx);
        match parse_number(rating) {
            Some(r) if !brand.is_empty() && !rating.is_empty() => {
                groups.entry(brand).or_default().push(r)
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("report {kind}: {skipped} rows without a usable brand/rating");
    }

    groups
        .into_iter()
        .filter_map(|(brand, ratings)| {
            kind.apply(&ratings).map(|value| ReportRow {
                brand: brand.to_string(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{products, table};

    fn stat(rows: &[ReportRow], brand: &str) -> Option<f64> {
        rows.iter().find(|r| r.brand == brand).map(|r| r.value)
    }

    #[test]
    fn average_rating_per_brand() {
        let rows = grouped_report(&products(), ReportKind::AverageRating);
        let brands: Vec<&str> = rows.iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(brands, vec!["apple", "samsung", "xiaomi"]);
        assert_eq!(stat(&rows, "apple"), Some(4.55));
        assert_eq!(stat(&rows, "samsung"), Some(4.53));
        assert_eq!(stat(&rows, "xiaomi"), Some(4.37));
    }

    #[test]
    fn min_and_max_rating() {
        let rows = grouped_report(&products(), ReportKind::MinRating);
        assert_eq!(stat(&rows, "xiaomi"), Some(4.1));

        let rows = grouped_report(&products(), ReportKind::MaxRating);
        assert_eq!(stat(&rows, "apple"), Some(4.9));
    }

    #[test]
    fn average_rating_near_a_tie() {
        let t = table(
            &["brand", "rating"],
            &[
                &["acme", "5.0"],
                &["acme", "5.0"],
                &["acme", "4.2"],
                &["acme", "4.5"],
                &["zeta", "4.1"],
                &["zeta", "4.15"],
            ],
        );
        let rows = grouped_report(&t, ReportKind::AverageRating);
        assert_eq!(stat(&rows, "acme"), Some(4.67));
        assert_eq!(stat(&rows, "zeta"), Some(4.12));
    }

    #[test]
    fn brands_without_usable_ratings_are_omitted() {
        let t = table(
            &["brand", "rating"],
            &[&["acme", ""], &["acme", "n/a"], &["zeta", "3"], &["", "5"]],
        );
        let rows = grouped_report(&t, ReportKind::AverageRating);
        assert_eq!(rows, vec![ReportRow { brand: "zeta".into(), value: 3.0 }]);
    }

    #[test]
    fn missing_columns_give_an_empty_report() {
        let t = table(&["name"], &[&["x"]]);
        assert!(grouped_report(&t, ReportKind::MaxRating).is_empty());
    }

    #[test]
    fn report_kind_parsing() {
        assert_eq!("min-rating".parse::<ReportKind>().unwrap(), ReportKind::MinRating);
        assert_eq!(ReportKind::AverageRating.label(), "average");

        let err = "median-rating".parse::<ReportKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid report"));
        assert!(msg.contains("average-rating, min-rating, max-rating"));
    }
}
