//! Output formatting for query results.
//!
//! Supports grid table, JSON and CSV output.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Table as Grid};
use serde_json::{json, Map, Value as JsonValue};

use crate::data::model::Table;
use crate::pipeline::QueryOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Header row plus text rows, the common shape of every output kind.
struct Tabular {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn tabulate(output: &QueryOutput) -> Tabular {
    match output {
        QueryOutput::Rows(table) => Tabular {
            headers: table.schema().columns().to_vec(),
            rows: table.records().iter().map(|r| r.fields().to_vec()).collect(),
        },
        QueryOutput::Aggregate(res) => Tabular {
            headers: vec![res.kind.to_string()],
            rows: vec![vec![res.value.to_string()]],
        },
        QueryOutput::Report { kind, rows } => Tabular {
            headers: vec!["brand".to_string(), kind.label().to_string()],
            rows: rows
                .iter()
                .map(|r| vec![r.brand.clone(), r.value.to_string()])
                .collect(),
        },
    }
}

pub fn format_output(output: &QueryOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(&tabulate(output))),
        OutputFormat::Json => format_json(output),
        OutputFormat::Csv => format_csv(&tabulate(output)),
    }
}

fn format_table(data: &Tabular) -> String {
    let mut grid = Grid::new();
    grid.load_preset(presets::ASCII_FULL)
        .set_header(data.headers.iter().map(Cell::new));
    for row in &data.rows {
        grid.add_row(row.iter().map(Cell::new));
    }
    grid.to_string()
}

fn format_json(output: &QueryOutput) -> Result<String> {
    let value = match output {
        QueryOutput::Rows(table) => rows_to_json(table),
        QueryOutput::Aggregate(res) => json!({ res.kind.as_str(): res.value }),
        QueryOutput::Report { kind, rows } => JsonValue::Array(
            rows.iter()
                .map(|r| json!({ "brand": r.brand, kind.label(): r.value }))
                .collect(),
        ),
    };
    serde_json::to_string_pretty(&value).context("serializing JSON output")
}

fn rows_to_json(table: &Table) -> JsonValue {
    let columns = table.schema().columns();
    JsonValue::Array(
        table
            .records()
            .iter()
            .map(|record| {
                let obj: Map<String, JsonValue> = columns
                    .iter()
                    .zip(record.fields())
                    .map(|(col, val)| (col.clone(), JsonValue::String(val.clone())))
                    .collect();
                JsonValue::Object(obj)
            })
            .collect(),
    )
}

fn format_csv(data: &Tabular) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&data.headers)
        .context("writing CSV header")?;
    for row in &data.rows {
        writer.write_record(row).context("writing CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
