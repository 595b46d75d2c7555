use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// A (day, shift) pair identifying one schedulable period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: usize,
    pub shift: usize,
}

impl Slot {
    pub fn new(day: usize, shift: usize) -> Self {
        Self { day, shift }
    }
}

/// One 1-cell of the matrix: a nurse working a labelled slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub nurse: usize,
    pub slot: Slot,
    pub day: String,
    pub shift: String,
}

/// Rows are nurses, columns are day-major/shift-minor slots.
///
/// Every cell is 0 or 1 and every row has `columns` cells. Both are checked
/// on construction, so the rest of the crate can index freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentMatrix {
    columns: usize,
    rows: Vec<Vec<u8>>,
}

impl AssignmentMatrix {
    pub fn new(columns: usize, rows: Vec<Vec<u8>>) -> Result<Self> {
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(DashboardError::DataFormat(format!(
                    "row {} has {} columns, expected {}",
                    row_idx + 1,
                    row.len(),
                    columns
                )));
            }
            if let Some(col_idx) = row.iter().position(|&v| v > 1) {
                return Err(DashboardError::DataFormat(format!(
                    "row {} column {} holds {}, expected 0 or 1",
                    row_idx + 1,
                    col_idx + 1,
                    row[col_idx]
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Builds a matrix whose width is taken from the first row
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        Self::new(columns, rows)
    }

    pub fn nurse_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// N x M
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn is_assigned(&self, nurse: usize, column: usize) -> bool {
        self.rows
            .get(nurse)
            .and_then(|r| r.get(column))
            .map(|&v| v == 1)
            .unwrap_or(false)
    }

    pub fn assigned_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&v| v as usize).sum::<usize>())
            .sum()
    }

    /// Shifts worked by each nurse
    pub fn row_sums(&self) -> Vec<usize> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&v| v as usize).sum())
            .collect()
    }

    /// Nurses on each column
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0; self.columns];
        for row in &self.rows {
            for (col, &v) in row.iter().enumerate() {
                sums[col] += v as usize;
            }
        }
        sums
    }
}
