//! Finds the knee of two CSV columns and appends an `is_knee` column.
//!
//! Usage: `cargo run --example csv_knee -- data.csv x_column y_column`

use std::error::Error;

use kneedle::{read_csv_series, Concavity, Direction, Kneedle, KneedleConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "data.csv".to_string());
    let x_column = args.next().unwrap_or_else(|| "x".to_string());
    let y_column = args.next().unwrap_or_else(|| "y".to_string());
    let output_path = input_path.clone(); // Overwrite the same file

    let (x, y) = read_csv_series(&input_path, &x_column, &y_column)?;

    // Most cost curves (inertia, error) fall and flatten out
    let config = KneedleConfig::new(Direction::Decreasing, Concavity::Counterclockwise);
    let knee = Kneedle::new(config)?.knee(&x, &y)?;

    let mut rdr = csv::Reader::from_path(&input_path)?;
    let headers = rdr.headers()?.clone();
    let x_index = headers
        .iter()
        .position(|h| h.trim() == x_column)
        .ok_or("x column disappeared")?;
    let records: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>()?;

    let mut wtr = csv::Writer::from_path(&output_path)?;
    let mut new_headers = headers.clone();
    new_headers.push_field("is_knee");
    wtr.write_record(&new_headers)?;
    for mut record in records {
        let xv = record
            .get(x_index)
            .and_then(|v| v.trim().parse::<f64>().ok());
        let is_knee = match (knee, xv) {
            (Some(k), Some(xv)) => xv == k.x,
            _ => false,
        };
        record.push_field(if is_knee { "1" } else { "0" });
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    match knee {
        Some(k) => println!(
            "Knee at {} = {} ({} = {}), written to {}",
            x_column, k.x, y_column, k.y, output_path
        ),
        None => println!("No knee found; is_knee column written to {}", output_path),
    }
    Ok(())
}
