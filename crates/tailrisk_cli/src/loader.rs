//! Daily close loading from CSV.
//!
//! Accepts the usual vendor export layout: a `Date` column in ISO 8601 and
//! either an `Adj Close` or a `Close` column. Header matching ignores case,
//! spaces and underscores. Rows with an empty or `null` close are skipped;
//! rows are sorted by date before the history is validated.

use std::path::Path;

use tailrisk_core::types::{Date, PriceHistory, PricePoint};
use tracing::{debug, info};

use crate::error::{CliError, Result};

const DATE_COLUMNS: [&str; 2] = ["date", "timestamp"];
const CLOSE_COLUMNS: [&str; 3] = ["adjclose", "adjustedclose", "close"];

fn normalise_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of the first header matching `candidates`, in candidate order.
fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    let normalised: Vec<String> = headers.iter().map(normalise_header).collect();
    candidates
        .iter()
        .find_map(|candidate| normalised.iter().position(|h| h == candidate))
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("null")
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("n/a")
}

/// Loads a daily close history from a CSV file.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `InvalidData` for a missing column, an unparsable row, or an empty file
/// - `History` if two rows share a date or a close is non-positive
pub fn load_price_history(path: &Path) -> Result<PriceHistory> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let date_idx = find_column(&headers, &DATE_COLUMNS).ok_or_else(|| {
        CliError::InvalidData(format!(
            "no date column in {:?}",
            headers.iter().collect::<Vec<_>>()
        ))
    })?;
    let close_idx = find_column(&headers, &CLOSE_COLUMNS).ok_or_else(|| {
        CliError::InvalidData(format!(
            "no 'Adj Close' or 'Close' column in {:?}",
            headers.iter().collect::<Vec<_>>()
        ))
    })?;
    debug!(
        date_column = &headers[date_idx],
        close_column = &headers[close_idx],
        "Resolved CSV columns"
    );

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = row + 2;

        let close = record.get(close_idx).unwrap_or("");
        if is_missing(close) {
            skipped += 1;
            continue;
        }
        let raw_date = record.get(date_idx).unwrap_or("");
        // Timestamps such as "2024-01-02 00:00:00-05:00" keep only the date.
        let date_part = raw_date.split([' ', 'T']).next().unwrap_or(raw_date);
        let date = Date::parse(date_part)
            .map_err(|e| CliError::InvalidData(format!("line {}: {}", line, e)))?;
        let close: f64 = close.parse().map_err(|_| {
            CliError::InvalidData(format!("line {}: close '{}' is not a number", line, close))
        })?;

        points.push(PricePoint::new(date, close));
    }

    if points.is_empty() {
        return Err(CliError::InvalidData(format!(
            "{} contains no usable price rows",
            path.display()
        )));
    }

    points.sort_by_key(|p| p.date);
    let history = PriceHistory::new(points)?;
    info!(
        path = %path.display(),
        observations = history.len(),
        skipped,
        "Loaded price history"
    );
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_prefers_adjusted_close() {
        let file = csv_file(
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.0,100\n\
             2024-01-03,10,11,9,11.5,11.0,100\n",
        );
        let history = load_price_history(file.path()).unwrap();
        assert_eq!(history.closes(), vec![10.0, 11.0]);
    }

    #[test]
    fn test_falls_back_to_close_and_ignores_header_case() {
        let file = csv_file("DATE,close\n2024-01-02,20\n2024-01-03,21\n2024-01-04,22\n");
        let history = load_price_history(file.path()).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.last_close(), Some(22.0));
    }

    #[test]
    fn test_sorts_rows_and_skips_missing_closes() {
        let file = csv_file(
            "date,adj_close\n\
             2024-01-04,12\n\
             2024-01-02,10\n\
             2024-01-03,null\n\
             2024-01-05,\n\
             2024-01-08 00:00:00-05:00,13\n",
        );
        let history = load_price_history(file.path()).unwrap();
        assert_eq!(history.closes(), vec![10.0, 12.0, 13.0]);
        assert_eq!(
            history.points()[2].date,
            Date::from_ymd(2024, 1, 8).unwrap()
        );
    }

    #[test]
    fn test_missing_close_column() {
        let file = csv_file("date,open\n2024-01-02,10\n");
        let err = load_price_history(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidData(_)));
    }

    #[test]
    fn test_bad_row_reports_line() {
        let file = csv_file("date,close\n2024-01-02,10\n2024-01-03,abc\n");
        let err = load_price_history(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        let file = csv_file("date,close\n2024-01-02,10\n2024-01-02,11\n");
        let err = load_price_history(file.path()).unwrap_err();
        assert!(matches!(err, CliError::History(_)));
    }

    #[test]
    fn test_missing_file_and_empty_file() {
        let err = load_price_history(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));

        let file = csv_file("date,close\n");
        let err = load_price_history(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidData(_)));
    }
}
