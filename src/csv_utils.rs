use std::fs::File;
use std::path::Path;

use crate::error::{KneedleError, Result};

/// Reads a column of f64 values from a CSV file by column name, skipping invalid/missing values.
pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let col_index = column_index(&headers, column)?;

    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(val) = parse_field(&record, col_index) {
            values.push(val);
        }
    }
    Ok(values)
}

/// Reads paired x/y columns from a CSV file by column name.
///
/// Rows where either field is missing or not a number are skipped, so the
/// two returned vectors always have the same length.
pub fn read_csv_series<P: AsRef<Path>>(
    path: P,
    x_column: &str,
    y_column: &str,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let x_index = column_index(&headers, x_column)?;
    let y_index = column_index(&headers, y_column)?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let fields = (parse_field(&record, x_index), parse_field(&record, y_index));
        if let (Some(xv), Some(yv)) = fields {
            x.push(xv);
            y.push(yv);
        }
    }
    Ok((x, y))
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| KneedleError::MissingColumn(column.to_string()))
}

fn parse_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.trim().parse::<f64>().ok()
}
