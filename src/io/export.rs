//! Export regional comparison rows to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Failed rows keep their place with empty figures and the error message.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ComparisonRow;
use crate::error::{AppError, Result};

/// Write comparison rows to a CSV file.
pub fn write_comparison_csv(path: &Path, price: f64, rows: &[ComparisonRow]) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_comparison(&mut file, price, rows)
}

/// Write comparison rows as CSV to any writer.
pub fn write_comparison<W: Write>(out: &mut W, price: f64, rows: &[ComparisonRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["region", "price", "min_income", "down_payment", "fraction", "count", "error"])
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    let price = format!("{price:.2}");
    for row in rows {
        let record = match &row.outcome {
            Ok(r) => [
                row.region.clone(),
                price.clone(),
                format!("{:.2}", r.minimum_income),
                format!("{:.2}", r.down_payment),
                format!("{:.10}", r.fraction),
                format!("{:.0}", r.count),
                String::new(),
            ],
            Err(err) => [
                row.region.clone(),
                price.clone(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                err.to_string(),
            ],
        };
        writer
            .write_record(&record)
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegionAffordability;

    fn rows() -> Vec<ComparisonRow> {
        vec![
            ComparisonRow {
                region: "Ontario".to_string(),
                outcome: Ok(RegionAffordability {
                    minimum_income: 184_759.888_875,
                    down_payment: 40_000.0,
                    fraction: 0.038,
                    count: 570_000.4,
                }),
            },
            ComparisonRow {
                region: "Nowhere, NU".to_string(),
                outcome: Err(AppError::config("rate must be a fraction")),
            },
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        write_comparison(&mut buf, 800_000.0, &rows()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "region,price,min_income,down_payment,fraction,count,error");
        assert_eq!(lines[1], "Ontario,800000.00,184759.89,40000.00,0.0380000000,570000,");
        assert_eq!(
            lines[2],
            "\"Nowhere, NU\",800000.00,,,,,Configuration error: rate must be a fraction"
        );
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.csv");
        write_comparison_csv(&path, 500_000.0, &rows()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn quotes_and_newlines_in_errors_survive_a_read_back() {
        let rows = vec![ComparisonRow {
            region: "Quebec".to_string(),
            outcome: Err(AppError::config("bad \"rate\"\nsee line 2")),
        }];
        let mut buf = Vec::new();
        write_comparison(&mut buf, 1.0, &rows).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "Quebec");
        assert_eq!(&records[0][6], "Configuration error: bad \"rate\"\nsee line 2");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("compare.csv");
        assert!(matches!(write_comparison_csv(&path, 1.0, &rows()), Err(AppError::Io(_))));
    }
}
