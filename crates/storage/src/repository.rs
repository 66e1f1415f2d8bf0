use crate::error::StorageError;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{RevenueRecord, RevenueSeries};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DATE_COLUMN: &str = "date";
const REVENUE_COLUMN: &str = "revenue";

/// Timestamp layouts accepted in the `date` column. Anything after the day
/// is discarded.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// The on-disk shape of a row. The date stays a string so a bad value can be
// reported with its line number.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    revenue: Option<f64>,
}

/// Reads and writes revenue series as `date,revenue` CSV files.
///
/// An empty `revenue` cell is a day with no observation; it round-trips
/// as `None`.
#[derive(Debug, Clone, Default)]
pub struct CsvRepository {}

impl CsvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every row of `path` in file order.
    pub fn load_series(&self, path: &Path) -> Result<RevenueSeries, StorageError> {
        let csv_err = |source: csv::Error| StorageError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::open(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers().map_err(csv_err)?.clone();
        for column in [DATE_COLUMN, REVENUE_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(StorageError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = result.map_err(csv_err)?;
            let line = raw.position().map(|p| p.line()).unwrap_or_default();
            let row: CsvRow = raw.deserialize(Some(&headers)).map_err(csv_err)?;
            let date = parse_date(&row.date).ok_or_else(|| StorageError::InvalidDate {
                path: path.to_path_buf(),
                line,
                value: row.date.clone(),
            })?;
            records.push(RevenueRecord {
                date,
                revenue: row.revenue,
            });
        }

        tracing::debug!("Loaded {} rows from {}", records.len(), path.display());
        Ok(RevenueSeries::new(records))
    }

    /// Writes `series` to `path` with a header row and no index column,
    /// replacing any previous content. Missing parent directories are created.
    pub fn save_series(&self, path: &Path, series: &RevenueSeries) -> Result<(), StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let csv_err = |source: csv::Error| StorageError::Csv {
            path: path.to_path_buf(),
            source,
        };
        // Header first, so an empty series still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        writer
            .write_record([DATE_COLUMN, REVENUE_COLUMN])
            .map_err(csv_err)?;
        for record in series {
            writer.serialize(record).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} rows to {}", series.len(), path.display());
        Ok(())
    }
}

/// Parses an ISO date, tolerating a trailing midnight timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2023-03-01"), Some(day(1)));
        assert_eq!(parse_date("2023-03-01 00:00:00"), Some(day(1)));
        assert_eq!(parse_date("2023-03-01T00:00:00"), Some(day(1)));
        assert_eq!(parse_date("03/01/2023"), None);
    }

    #[test]
    fn test_save_writes_header_and_empty_gaps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let series = RevenueSeries::new(vec![
            RevenueRecord::new(day(1), 1250.5),
            RevenueRecord::missing(day(2)),
        ]);

        CsvRepository::new().save_series(&path, &series).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["date,revenue", "2023-03-01,1250.5", "2023-03-02,"]);
    }

    #[test]
    fn test_load_keeps_file_order_and_gaps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "date,revenue\n2023-03-03,3.5\n2023-03-01,\n2023-03-02 00:00:00,2").unwrap();
        drop(file);

        let series = CsvRepository::new().load_series(&path).unwrap();
        assert_eq!(series.dates(), vec![day(3), day(1), day(2)]);
        assert_eq!(series.revenues(), vec![Some(3.5), None, Some(2.0)]);
    }

    #[test]
    fn test_empty_series_keeps_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let repo = CsvRepository::new();

        repo.save_series(&path, &RevenueSeries::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "date,revenue\n");
        assert!(repo.load_series(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = CsvRepository::new()
            .load_series(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_missing_column_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "day,revenue\n2023-03-01,1\n").unwrap();

        let err = CsvRepository::new().load_series(&path).unwrap_err();
        assert!(matches!(err, StorageError::MissingColumn { ref column, .. } if column == "date"));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "date,revenue\n2023-03-01,1\nnot-a-date,2\n").unwrap();

        let err = CsvRepository::new().load_series(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidDate { line: 3, .. }));
    }

    #[test]
    fn test_non_numeric_revenue_is_csv_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "date,revenue\n2023-03-01,lots\n").unwrap();

        let err = CsvRepository::new().load_series(&path).unwrap_err();
        assert!(matches!(err, StorageError::Csv { .. }));
    }
}
