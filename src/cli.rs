use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::report::ReportKind;
use crate::pipeline::{QueryPlan, Terminal};
use crate::render::OutputFormat;

/// Filter, sort, aggregate and report over CSV files with a shared header.
#[derive(Parser, Debug)]
#[command(name = "csv-report", version, about)]
pub struct Args {
    /// One or more CSV file paths
    #[arg(long, num_args = 1.., required = true, value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Filter: column>value / column<value / column=value
    #[arg(long = "where", value_name = "COND")]
    pub filter: Option<String>,

    /// Sort: column=asc / column=desc
    #[arg(long = "order-by", value_name = "COND")]
    pub order_by: Option<String>,

    /// Simple aggregate: column=avg / column=min / column=max
    #[arg(long, value_name = "COND")]
    pub aggregate: Option<String>,

    /// Grouped statistic on rating per brand: average-rating, min-rating, max-rating
    #[arg(long, value_name = "KIND", conflicts_with = "aggregate")]
    pub report: Option<ReportKind>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub output: OutputFormatArg,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// Grid table
    Table,
    /// JSON array
    Json,
    /// CSV
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

impl Args {
    /// Build the plan; a report takes precedence over an aggregate.
    pub fn into_plan(self) -> QueryPlan {
        let terminal = match (self.report, self.aggregate) {
            (Some(kind), _) => Terminal::Report(kind),
            (None, Some(condition)) => Terminal::Aggregate(condition),
            (None, None) => Terminal::Rows,
        };
        QueryPlan {
            files: self.files,
            filter: self.filter,
            sort: self.order_by,
            terminal,
        }
    }
}
