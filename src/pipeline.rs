use std::path::PathBuf;

use log::info;

use crate::data::aggregate::{apply_aggregate, AggregateResult};
use crate::data::error::Result;
use crate::data::filter::apply_filter;
use crate::data::loader::load_files;
use crate::data::model::Table;
use crate::data::report::{grouped_report, ReportKind, ReportRow};
use crate::data::sort::apply_sort;

// ---------------------------------------------------------------------------
// Query plan: what to load, how to transform it, what to produce
// ---------------------------------------------------------------------------

/// The single output-producing step at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    /// Grouped statistic of `rating` per `brand`.
    Report(ReportKind),
    /// `column=avg|min|max`
    Aggregate(String),
    /// Emit the (filtered, sorted) rows as they are.
    Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub files: Vec<PathBuf>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub terminal: Terminal,
}

/// Result of running a [`QueryPlan`], ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Rows(Table),
    Aggregate(AggregateResult),
    Report {
        kind: ReportKind,
        rows: Vec<ReportRow>,
    },
}

impl QueryPlan {
    /// Load → filter → sort → terminal. Each step consumes the previous table.
    pub fn execute(&self) -> Result<QueryOutput> {
        let mut table = load_files(&self.files)?;
        info!(
            "{} rows, columns {:?}",
            table.len(),
            table.schema().columns()
        );

        if let Some(condition) = &self.filter {
            table = apply_filter(table, condition)?;
        }
        if let Some(condition) = &self.sort {
            table = apply_sort(table, condition)?;
        }

        let output = match &self.terminal {
            Terminal::Report(kind) => QueryOutput::Report {
                kind: *kind,
                rows: grouped_report(&table, *kind),
            },
            Terminal::Aggregate(condition) => {
                QueryOutput::Aggregate(apply_aggregate(&table, condition)?)
            }
            Terminal::Rows => QueryOutput::Rows(table),
        };
        Ok(output)
    }
}
