use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use super::error::{QueryError, Result};
use super::model::{Record, Schema, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and concatenate several CSV files into one [`Table`].
///
/// The first file's header becomes the schema; every later file must repeat
/// it exactly (same names, same order). Records keep file order, then row
/// order, with no de-duplication.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Table> {
    if paths.is_empty() {
        return Err(QueryError::invalid("No files provided"));
    }

    let mut schema: Option<Schema> = None;
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let (header, rows) = read_csv(path)?;

        if let Some(s) = &schema {
            if s.columns() != header.as_slice() {
                return Err(QueryError::SchemaMismatch {
                    path: path.to_path_buf(),
                });
            }
        } else {
            let s = Schema::new(header)
                .map_err(|e| QueryError::invalid(format!("{}: {e}", path.display())))?;
            schema = Some(s);
        }

        info!("loaded {} rows from {}", rows.len(), path.display());
        records.extend(rows);
    }

    let schema = schema.ok_or_else(|| QueryError::invalid("No files provided"))?;
    Ok(Table::new(schema, records))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read one file as (header, records).
///
/// Short rows are padded with empty fields; surplus fields are dropped.
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let file = File::open(path).map_err(|e| QueryError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if header.is_empty() {
        return Err(QueryError::invalid(format!("Empty CSV: {}", path.display())));
    }

    let width = header.len();
    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| csv_error(path, e))?;
        if row.len() > width {
            warn!(
                "{} row {}: {} fields, header has {width}; extra fields dropped",
                path.display(),
                row_no + 1,
                row.len()
            );
        }
        let mut fields: Vec<String> = row.iter().take(width).map(|f| f.to_string()).collect();
        fields.resize(width, String::new());
        records.push(Record::new(fields));
    }
    debug!("{}: header {:?}", path.display(), header);

    Ok((header, records))
}

fn csv_error(path: &Path, err: csv::Error) -> QueryError {
    if let csv::ErrorKind::Io(source) = err.kind() {
        return QueryError::from_io(path, io::Error::new(source.kind(), source.to_string()));
    }
    QueryError::Csv {
        path: path.to_path_buf(),
        source: err,
    }
}
