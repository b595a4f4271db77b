//! Reading a single column out of a CSV file.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads every value of `column` from a CSV file with a single header row.
///
/// The column is matched exactly first, then case-insensitively. Values are
/// returned as written, including empty cells; short rows yield an empty
/// value.
pub fn read_column_values(path: &Path, column: &str) -> Result<Vec<String>> {
    check_file_size(path)?;

    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    let index = find_column(&headers, column).ok_or_else(|| IngestError::ColumnNotFound {
        column: column.to_string(),
        path: path.to_path_buf(),
    })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        values.push(record.get(index).unwrap_or_default().to_string());
    }

    tracing::debug!(
        path = %path.display(),
        column,
        rows = values.len(),
        "read column values"
    );
    Ok(values)
}

fn find_column(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    let header = |name: &str| name.trim_start_matches('\u{feff}').to_string();
    headers
        .iter()
        .position(|name| header(name) == column)
        .or_else(|| {
            headers
                .iter()
                .position(|name| header(name).eq_ignore_ascii_case(column))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_named_column() {
        let file = csv_file("SUBJ,VISITDT\nS1,2020-01\nS2,\nS3,2020-03\n");
        let values = read_column_values(file.path(), "VISITDT").unwrap();
        assert_eq!(values, vec!["2020-01", "", "2020-03"]);
    }

    #[test]
    fn header_match_falls_back_to_case_insensitive() {
        let file = csv_file("\u{feff}subj, visitdt\nS1,2020-01\n");
        let values = read_column_values(file.path(), "VISITDT").unwrap();
        assert_eq!(values, vec!["2020-01"]);
    }

    #[test]
    fn short_rows_yield_empty_values() {
        let file = csv_file("SUBJ,VISITDT\nS1\nS2,2020-02\n");
        let values = read_column_values(file.path(), "VISITDT").unwrap();
        assert_eq!(values, vec!["", "2020-02"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = csv_file("SUBJ\nS1\n");
        let err = read_column_values(file.path(), "VISITDT").unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_column_values(Path::new("/nonexistent/visits.csv"), "VISITDT").unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn size_limit_is_enforced() {
        let file = csv_file("SUBJ,VISITDT\nS1,2020-01\n");
        let err = check_file_size_with_limit(file.path(), 4).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
    }
}
