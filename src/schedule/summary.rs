use serde::Serialize;

use super::types::AssignmentMatrix;
use crate::error::{DashboardError, Result};

/// The four numbers shown at the top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub nurse_count: usize,
    pub assigned_count: usize,
    pub possible_count: usize,
    /// Rounded to two decimal places
    pub coverage_percent: f64,
}

/// Computes the summary of a matrix.
///
/// Fails with a data error when the matrix has no cells.
pub fn summarize(matrix: &AssignmentMatrix) -> Result<SummaryStats> {
    let possible_count = matrix.cell_count();
    if possible_count == 0 {
        return Err(DashboardError::Data(format!(
            "matrix has no cells ({} nurses x {} slots), coverage is undefined",
            matrix.nurse_count(),
            matrix.column_count()
        )));
    }

    let assigned_count = matrix.assigned_count();
    let coverage = assigned_count as f64 / possible_count as f64 * 100.0;

    Ok(SummaryStats {
        nurse_count: matrix.nurse_count(),
        assigned_count,
        possible_count,
        coverage_percent: round_to(coverage, 2),
    })
}

/// Ties go to the even neighbour, so 12.125 becomes 12.12
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_example() {
        let matrix = AssignmentMatrix::from_rows(vec![vec![1, 0, 0, 1], vec![0, 0, 0, 0]]).unwrap();
        let stats = summarize(&matrix).unwrap();
        assert_eq!(stats.nurse_count, 2);
        assert_eq!(stats.assigned_count, 2);
        assert_eq!(stats.possible_count, 8);
        assert_eq!(stats.coverage_percent, 25.0);
    }

    #[test]
    fn test_all_zero() {
        let matrix = AssignmentMatrix::new(21, vec![vec![0; 21]; 3]).unwrap();
        let stats = summarize(&matrix).unwrap();
        assert_eq!(stats.assigned_count, 0);
        assert_eq!(stats.coverage_percent, 0.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 1 of 21 = 4.7619...
        let mut row = vec![0u8; 21];
        row[0] = 1;
        let matrix = AssignmentMatrix::from_rows(vec![row]).unwrap();
        assert_eq!(summarize(&matrix).unwrap().coverage_percent, 4.76);

        // 2 of 3 = 66.666...
        let matrix = AssignmentMatrix::from_rows(vec![vec![1, 1, 0]]).unwrap();
        assert_eq!(summarize(&matrix).unwrap().coverage_percent, 66.67);
    }

    fn matrix_with_ones(columns: usize, nurses: usize, ones: usize) -> AssignmentMatrix {
        let mut rows = vec![vec![0u8; columns]; nurses];
        for cell in 0..ones {
            rows[cell / columns][cell % columns] = 1;
        }
        AssignmentMatrix::new(columns, rows).unwrap()
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        // 97 of 800 = 12.125
        let matrix = matrix_with_ones(20, 40, 97);
        assert_eq!(summarize(&matrix).unwrap().coverage_percent, 12.12);

        // 21 of 16800 = 0.125
        let matrix = matrix_with_ones(21, 800, 21);
        assert_eq!(summarize(&matrix).unwrap().coverage_percent, 0.12);
    }

    #[test]
    fn test_empty_matrix_is_data_error() {
        let matrix = AssignmentMatrix::new(21, Vec::new()).unwrap();
        assert!(matches!(summarize(&matrix), Err(DashboardError::Data(_))));

        let matrix = AssignmentMatrix::new(0, vec![Vec::new(), Vec::new()]).unwrap();
        assert!(matches!(summarize(&matrix), Err(DashboardError::Data(_))));
    }

    proptest! {
        #[test]
        fn prop_coverage_is_idempotent(rows in prop::collection::vec(prop::collection::vec(0u8..=1, 6), 1..8)) {
            let matrix = AssignmentMatrix::new(6, rows).unwrap();
            let first = summarize(&matrix).unwrap();
            let second = summarize(&matrix).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_coverage_monotonic_when_setting_cells(
            rows in prop::collection::vec(prop::collection::vec(0u8..=1, 6), 1..8),
            picks in prop::collection::vec((0usize..8, 0usize..6), 1..10),
        ) {
            let nurses = rows.len();
            let mut current = rows;
            let mut previous = summarize(&AssignmentMatrix::new(6, current.clone()).unwrap())
                .unwrap()
                .coverage_percent;
            for (nurse, column) in picks {
                current[nurse % nurses][column] = 1;
                let next = summarize(&AssignmentMatrix::new(6, current.clone()).unwrap())
                    .unwrap()
                    .coverage_percent;
                prop_assert!(next >= previous);
                previous = next;
            }
        }
    }
}
