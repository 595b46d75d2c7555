use serde::{Deserialize, Serialize};

use super::types::Slot;
use crate::error::{DashboardError, Result};

pub const DEFAULT_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const DEFAULT_SHIFTS: [&str; 3] = ["Morning", "Afternoon", "Night"];

/// Maps a column index to its slot: day-major, shift-minor
pub fn column_to_slot(column: usize, shifts_per_day: usize) -> Slot {
    Slot::new(column / shifts_per_day, column % shifts_per_day)
}

/// Inverse of [`column_to_slot`]
pub fn slot_to_column(slot: Slot, shifts_per_day: usize) -> usize {
    slot.day * shifts_per_day + slot.shift
}

/// Ordered day and shift names that give the matrix columns their meaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub days: Vec<String>,
    pub shifts: Vec<String>,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            shifts: DEFAULT_SHIFTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SlotLayout {
    pub fn new(days: Vec<String>, shifts: Vec<String>) -> Result<Self> {
        let layout = Self { days, shifts };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(DashboardError::ConfigurationMismatch(
                "layout needs at least one day".to_string(),
            ));
        }
        if self.shifts.is_empty() {
            return Err(DashboardError::ConfigurationMismatch(
                "layout needs at least one shift per day".to_string(),
            ));
        }
        Ok(())
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn shifts_per_day(&self) -> usize {
        self.shifts.len()
    }

    /// D x S
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.shifts.len()
    }

    pub fn column_to_slot(&self, column: usize) -> Slot {
        column_to_slot(column, self.shifts_per_day())
    }

    pub fn slot_to_column(&self, slot: Slot) -> usize {
        slot_to_column(slot, self.shifts_per_day())
    }

    pub fn day_name(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(|d| d.as_str())
    }

    pub fn shift_name(&self, shift: usize) -> Option<&str> {
        self.shifts.get(shift).map(|s| s.as_str())
    }

    /// "Monday Morning"
    pub fn slot_label(&self, slot: Slot) -> String {
        format!(
            "{} {}",
            self.day_name(slot.day).unwrap_or("?"),
            self.shift_name(slot.shift).unwrap_or("?")
        )
    }

    /// Every slot in column order
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.slot_count()).map(move |c| self.column_to_slot(c))
    }

    /// Resolves a day by name (case-insensitive) or by 1-based number
    pub fn find_day(&self, key: &str) -> Option<usize> {
        find_label(&self.days, key)
    }

    /// Resolves a shift by name (case-insensitive) or by 1-based number
    pub fn find_shift(&self, key: &str) -> Option<usize> {
        find_label(&self.shifts, key)
    }

    pub fn find_slot(&self, day: &str, shift: &str) -> Option<Slot> {
        Some(Slot::new(self.find_day(day)?, self.find_shift(shift)?))
    }

    /// Checks a matrix width against this layout.
    ///
    /// A width that does not split into whole days is a configuration
    /// mismatch; a whole number of days that is not `D` is a format error in
    /// the input.
    pub fn check_columns(&self, columns: usize) -> Result<()> {
        self.validate()?;
        let shifts = self.shifts_per_day();
        if columns % shifts != 0 {
            return Err(DashboardError::ConfigurationMismatch(format!(
                "{} columns cannot be split into days of {} shifts",
                columns, shifts
            )));
        }
        if columns != self.slot_count() {
            return Err(DashboardError::DataFormat(format!(
                "expected {} columns ({} days x {} shifts), found {}",
                self.slot_count(),
                self.day_count(),
                shifts,
                columns
            )));
        }
        Ok(())
    }
}

fn find_label(labels: &[String], key: &str) -> Option<usize> {
    let key = key.trim().to_lowercase();
    labels
        .iter()
        .position(|l| l.to_lowercase() == key)
        .or_else(|| {
            key.parse::<usize>()
                .ok()
                .filter(|&n| n >= 1 && n <= labels.len())
                .map(|n| n - 1)
        })
}
