use log::debug;

use super::slot_utils::{column_to_slot, SlotLayout};
use super::types::{Assignment, AssignmentMatrix, Slot};
use crate::error::{DashboardError, Result};

/// Decodes the matrix into (nurse, slot) pairs, one per 1-cell.
///
/// Order is row-major then column-major: all of nurse 0's slots in column
/// order, then nurse 1's, and so on. A width that is not a whole number of
/// days fails before anything is decoded.
pub fn decode_slots(matrix: &AssignmentMatrix, shifts_per_day: usize) -> Result<Vec<(usize, Slot)>> {
    if shifts_per_day == 0 {
        return Err(DashboardError::ConfigurationMismatch(
            "shifts per day must be at least 1".to_string(),
        ));
    }
    let columns = matrix.column_count();
    if columns % shifts_per_day != 0 {
        return Err(DashboardError::ConfigurationMismatch(format!(
            "{} columns cannot be split into days of {} shifts",
            columns, shifts_per_day
        )));
    }

    let mut decoded = Vec::with_capacity(matrix.assigned_count());
    for (nurse, row) in matrix.rows().iter().enumerate() {
        for (column, &value) in row.iter().enumerate() {
            if value == 1 {
                decoded.push((nurse, column_to_slot(column, shifts_per_day)));
            }
        }
    }
    Ok(decoded)
}

/// Decodes the matrix into labelled assignments.
///
/// The matrix width must be exactly `days x shifts` of the layout.
pub fn decode(matrix: &AssignmentMatrix, layout: &SlotLayout) -> Result<Vec<Assignment>> {
    layout.check_columns(matrix.column_count())?;

    let assignments: Vec<Assignment> = decode_slots(matrix, layout.shifts_per_day())?
        .into_iter()
        .map(|(nurse, slot)| Assignment {
            nurse,
            slot,
            day: layout.days[slot.day].clone(),
            shift: layout.shifts[slot.shift].clone(),
        })
        .collect();

    debug!(
        "Decoded {} assignments from {} nurses x {} slots",
        assignments.len(),
        matrix.nurse_count(),
        matrix.column_count()
    );
    Ok(assignments)
}
