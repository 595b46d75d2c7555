use csv::{ReaderBuilder, Trim};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::schedule::AssignmentMatrix;

/// Parses one cell, accepting "0"/"1" and numeric spellings like "1.0"
fn parse_cell(value: &str, row: usize, column: usize) -> Result<u8> {
    let number: f64 = value.parse().map_err(|_| {
        DashboardError::DataFormat(format!(
            "row {} column {}: '{}' is not a number",
            row, column, value
        ))
    })?;

    if number == 0.0 {
        Ok(0)
    } else if number == 1.0 {
        Ok(1)
    } else {
        Err(DashboardError::DataFormat(format!(
            "row {} column {}: {} is not 0 or 1",
            row, column, value
        )))
    }
}

fn read_error(e: csv::Error) -> DashboardError {
    if e.is_io_error() {
        DashboardError::FileLoad(e.to_string())
    } else {
        DashboardError::DataFormat(e.to_string())
    }
}

/// Reads an assignment matrix from any CSV source.
///
/// With `has_headers`, the first line names the columns and fixes the
/// expected width. A header whose first cell is empty marks a leading index
/// column (as written by dataframe exports), which is dropped from every row.
pub fn load_matrix_from_reader<R: Read>(source: R, has_headers: bool) -> Result<AssignmentMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut skip_index = false;
    let mut columns: Option<usize> = None;
    if has_headers {
        let headers = reader.headers().map_err(read_error)?;
        if !headers.is_empty() {
            skip_index = headers.get(0).map(|h| h.is_empty()).unwrap_or(false);
            columns = Some(headers.len() - usize::from(skip_index));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(read_error)?;
        let row_number = idx + 1;

        let row: Vec<u8> = record
            .iter()
            .skip(usize::from(skip_index))
            .enumerate()
            .map(|(col, value)| parse_cell(value, row_number, col + 1))
            .collect::<Result<_>>()?;

        let expected = *columns.get_or_insert(row.len());
        if row.len() != expected {
            return Err(DashboardError::DataFormat(format!(
                "row {} has {} columns, expected {}",
                row_number,
                row.len(),
                expected
            )));
        }
        rows.push(row);
    }

    AssignmentMatrix::new(columns.unwrap_or(0), rows)
}

/// Loads an assignment matrix from a CSV file
pub fn load_matrix<P: AsRef<Path>>(csv_path: P, has_headers: bool) -> Result<AssignmentMatrix> {
    let path = csv_path.as_ref();
    let file = File::open(path)
        .map_err(|e| DashboardError::FileLoad(format!("{}: {}", path.display(), e)))?;
    let matrix = load_matrix_from_reader(file, has_headers)?;

    info!(
        "Loaded {} rows x {} columns from {}",
        matrix.nurse_count(),
        matrix.column_count(),
        path.display()
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_with_header() {
        let temp_file = create_temp_csv("s1,s2,s3,s4\n1,0,0,1\n0,0,0,0\n");
        let matrix = load_matrix(temp_file.path(), true).unwrap();
        assert_eq!(matrix.nurse_count(), 2);
        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.rows(), &[vec![1u8, 0, 0, 1], vec![0, 0, 0, 0]]);
    }

    #[test]
    fn test_load_without_header() {
        let matrix = load_matrix_from_reader("1,0\n0,1\n".as_bytes(), false).unwrap();
        assert_eq!(matrix.rows(), &[vec![1u8, 0], vec![0, 1]]);
    }

    #[test]
    fn test_accepts_float_spelling_and_whitespace() {
        let matrix = load_matrix_from_reader("a,b,c\n1.0, 0.0 ,1\n".as_bytes(), true).unwrap();
        assert_eq!(matrix.rows(), &[vec![1u8, 0, 1]]);
    }

    #[test]
    fn test_drops_leading_index_column() {
        let matrix = load_matrix_from_reader(",0,1,2\n0,1,0,0\n1,0,1,1\n".as_bytes(), true).unwrap();
        assert_eq!(matrix.column_count(), 3);
        assert_eq!(matrix.rows(), &[vec![1u8, 0, 0], vec![0, 1, 1]]);
    }

    #[test]
    fn test_header_only_gives_empty_matrix_with_width() {
        let matrix = load_matrix_from_reader("a,b,c\n".as_bytes(), true).unwrap();
        assert_eq!(matrix.nurse_count(), 0);
        assert_eq!(matrix.column_count(), 3);
    }

    #[test]
    fn test_rejects_non_binary_value() {
        let result = load_matrix_from_reader("a,b\n1,0\n0,2\n".as_bytes(), true);
        match result {
            Err(DashboardError::DataFormat(msg)) => {
                assert!(msg.contains("row 2 column 2"), "unexpected message: {}", msg)
            }
            other => panic!("expected DataFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_numeric_and_empty_cells() {
        assert!(matches!(
            load_matrix_from_reader("a,b\n1,x\n".as_bytes(), true),
            Err(DashboardError::DataFormat(_))
        ));
        assert!(matches!(
            load_matrix_from_reader("a,b\n1,\n".as_bytes(), true),
            Err(DashboardError::DataFormat(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_column_count() {
        assert!(matches!(
            load_matrix_from_reader("a,b,c\n1,0\n".as_bytes(), true),
            Err(DashboardError::DataFormat(_))
        ));
        assert!(matches!(
            load_matrix_from_reader("1,0,1\n1,0\n".as_bytes(), false),
            Err(DashboardError::DataFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_file_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_matrix(dir.path().join("missing.csv"), true);
        assert!(matches!(result, Err(DashboardError::FileLoad(_))));
    }

    #[test]
    fn test_load_errors_carry_context_for_caller() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        match load_matrix(&missing, true) {
            Err(DashboardError::FileLoad(msg)) => assert!(msg.contains("missing.csv"), "{}", msg),
            other => panic!("expected FileLoad, got {:?}", other),
        }

        let temp_file = create_temp_csv("a,b\n1,7\n");
        match load_matrix(temp_file.path(), true) {
            Err(DashboardError::DataFormat(msg)) => assert!(msg.contains("row 1 column 2"), "{}", msg),
            other => panic!("expected DataFormat, got {:?}", other),
        }
    }
}
