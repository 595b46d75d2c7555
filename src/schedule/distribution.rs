//! Chart data derived from the matrix: per-nurse load, per-slot staffing
//! (the heatmap grid), and the histogram of shifts per nurse.

use serde::Serialize;

use super::slot_utils::SlotLayout;
use super::types::{AssignmentMatrix, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Shifts worked, indexed by nurse
    pub shifts_per_nurse: Vec<usize>,
    /// Nurses on duty, `[day][shift]`
    pub staffing_grid: Vec<Vec<usize>>,
    /// `load_histogram[k]` = number of nurses working exactly k shifts
    pub load_histogram: Vec<usize>,
    pub day_totals: Vec<usize>,
    pub shift_totals: Vec<usize>,
    pub idle_nurses: Vec<usize>,
    pub uncovered_slots: Vec<Slot>,
}

/// Builds the chart data for a matrix already checked against `layout`
pub fn compute(matrix: &AssignmentMatrix, layout: &SlotLayout) -> Distribution {
    let shifts_per_nurse = matrix.row_sums();
    let column_sums = matrix.column_sums();

    let mut staffing_grid = vec![vec![0; layout.shifts_per_day()]; layout.day_count()];
    for (column, &count) in column_sums.iter().enumerate() {
        let slot = layout.column_to_slot(column);
        if let Some(cell) = staffing_grid
            .get_mut(slot.day)
            .and_then(|row| row.get_mut(slot.shift))
        {
            *cell = count;
        }
    }

    let mut load_histogram = vec![0; matrix.column_count() + 1];
    for &load in &shifts_per_nurse {
        load_histogram[load] += 1;
    }

    let day_totals = staffing_grid.iter().map(|row| row.iter().sum()).collect();
    let shift_totals = (0..layout.shifts_per_day())
        .map(|shift| staffing_grid.iter().map(|row| row[shift]).sum())
        .collect();

    let idle_nurses = shifts_per_nurse
        .iter()
        .enumerate()
        .filter(|&(_, &load)| load == 0)
        .map(|(nurse, _)| nurse)
        .collect();

    let uncovered_slots = layout
        .slots()
        .filter(|&slot| staffing_grid[slot.day][slot.shift] == 0)
        .collect();

    Distribution {
        shifts_per_nurse,
        staffing_grid,
        load_histogram,
        day_totals,
        shift_totals,
        idle_nurses,
        uncovered_slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SlotLayout {
        SlotLayout::new(
            vec!["Mon".to_string(), "Tue".to_string()],
            vec!["AM".to_string(), "PM".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_small_example() {
        let matrix = AssignmentMatrix::from_rows(vec![vec![1, 0, 0, 1], vec![0, 0, 0, 0]]).unwrap();
        let dist = compute(&matrix, &layout());

        assert_eq!(dist.shifts_per_nurse, vec![2, 0]);
        assert_eq!(dist.staffing_grid, vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(dist.load_histogram, vec![1, 0, 1, 0, 0]);
        assert_eq!(dist.day_totals, vec![1, 1]);
        assert_eq!(dist.shift_totals, vec![1, 1]);
        assert_eq!(dist.idle_nurses, vec![1]);
        assert_eq!(dist.uncovered_slots, vec![Slot::new(0, 1), Slot::new(1, 0)]);
    }

    #[test]
    fn test_histogram_sums_to_nurse_count() {
        let matrix = AssignmentMatrix::from_rows(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 0],
            vec![0, 1, 0, 0],
            vec![1, 0, 0, 1],
        ])
        .unwrap();
        let dist = compute(&matrix, &layout());
        assert_eq!(dist.load_histogram.iter().sum::<usize>(), 4);
        assert_eq!(dist.load_histogram, vec![0, 1, 2, 0, 1]);
        assert!(dist.idle_nurses.is_empty());
        assert!(dist.uncovered_slots.is_empty());
        assert_eq!(dist.staffing_grid, vec![vec![3, 2], vec![2, 2]]);
    }
}
