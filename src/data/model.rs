use std::collections::BTreeSet;

use super::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Numeric interpretation of a text field
// ---------------------------------------------------------------------------

/// Try to interpret a raw field as an `f64`.
///
/// Fields are always stored as text; numeric meaning is decided per operation.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Schema – the ordered column names shared by every source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Build a schema, rejecting an empty header and duplicated names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(QueryError::invalid("CSV header is empty"));
        }
        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(QueryError::invalid(format!("Duplicate column '{col}'")));
            }
        }
        Ok(Schema { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Like [`Schema::index_of`] but fails with the user-facing "not found" error.
    pub fn require(&self, column: &str) -> Result<usize> {
        self.index_of(column)
            .ok_or_else(|| QueryError::column_not_found(column))
    }
}

// ---------------------------------------------------------------------------
// Record – one data row, positionally aligned with the schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Record { fields }
    }

    /// Field at column index `idx`; a missing trailing field reads as empty.
    pub fn get(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

// ---------------------------------------------------------------------------
// Table – schema plus the current record sequence
// ---------------------------------------------------------------------------

/// The in-memory record set a query runs over.
///
/// Every transform consumes the table and returns a new one, so the
/// filter → sort → terminal order is visible in the data flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Table { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Same schema, different record sequence.
    pub(crate) fn with_records(self, records: Vec<Record>) -> Self {
        Table {
            schema: self.schema,
            records,
        }
    }

    pub(crate) fn into_parts(self) -> (Schema, Vec<Record>) {
        (self.schema, self.records)
    }

    /// Values of column `idx` in record order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(move |r| r.get(idx))
    }

    /// True when every non-empty value in column `idx` parses as a number.
    pub fn is_numeric_column(&self, idx: usize) -> bool {
        self.column(idx)
            .filter(|v| !v.is_empty())
            .all(|v| parse_number(v).is_some())
    }
}
