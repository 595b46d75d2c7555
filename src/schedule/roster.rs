use log::{info, warn};

use super::decoder::decode;
use super::distribution::{self, Distribution};
use super::filters::{by_nurse, by_slot};
use super::slot_utils::SlotLayout;
use super::summary::{summarize, SummaryStats};
use super::types::{Assignment, AssignmentMatrix, Slot};
use crate::error::{DashboardError, Result};

pub const DEFAULT_NURSE_PREFIX: &str = "Nurse";

/// A loaded matrix together with everything derived from it.
///
/// Built once per load and never mutated; the decoded assignments are a
/// display cache over the matrix.
#[derive(Debug, Clone)]
pub struct Roster {
    matrix: AssignmentMatrix,
    layout: SlotLayout,
    nurse_prefix: String,
    assignments: Vec<Assignment>,
    summary: SummaryStats,
}

impl Roster {
    pub fn new(matrix: AssignmentMatrix, layout: SlotLayout, nurse_prefix: &str) -> Result<Self> {
        if matrix.cell_count() == 0 {
            return Err(DashboardError::Data(format!(
                "no assignments to show ({} nurses x {} slots)",
                matrix.nurse_count(),
                matrix.column_count()
            )));
        }
        let assignments = decode(&matrix, &layout)?;
        let summary = summarize(&matrix)?;

        info!(
            "Roster ready: {} nurses, {} of {} slots assigned ({}%)",
            summary.nurse_count, summary.assigned_count, summary.possible_count, summary.coverage_percent
        );

        Ok(Self {
            matrix,
            layout,
            nurse_prefix: nurse_prefix.to_string(),
            assignments,
            summary,
        })
    }

    pub fn matrix(&self) -> &AssignmentMatrix {
        &self.matrix
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    pub fn distribution(&self) -> Distribution {
        distribution::compute(&self.matrix, &self.layout)
    }

    /// "Nurse 1" for index 0
    pub fn nurse_label(&self, nurse: usize) -> String {
        format!("{} {}", self.nurse_prefix, nurse + 1)
    }

    /// Every nurse label, in nurse order
    pub fn nurse_labels(&self) -> Vec<String> {
        (0..self.matrix.nurse_count())
            .map(|n| self.nurse_label(n))
            .collect()
    }

    /// Resolves "Nurse 3" (case-insensitive) or a bare 1-based number
    pub fn find_nurse(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        let number = label
            .get(..self.nurse_prefix.len())
            .filter(|p| p.eq_ignore_ascii_case(&self.nurse_prefix))
            .map(|_| label[self.nurse_prefix.len()..].trim())
            .unwrap_or(label);

        number
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1 && n <= self.matrix.nurse_count())
            .map(|n| n - 1)
    }

    /// The (day, shift) labels a nurse works; `None` for an unknown nurse
    pub fn nurse_schedule(&self, label: &str) -> Option<Vec<(&str, &str)>> {
        let nurse = self.find_nurse(label)?;
        let schedule = by_nurse(&self.assignments, nurse);
        if schedule.is_empty() {
            warn!("{} has no assigned shifts", self.nurse_label(nurse));
        }
        Some(schedule)
    }

    /// Labels of the nurses working a slot
    pub fn slot_staff(&self, slot: Slot) -> Vec<String> {
        let staff: Vec<String> = by_slot(&self.assignments, slot)
            .into_iter()
            .map(|n| self.nurse_label(n))
            .collect();
        if staff.is_empty() {
            warn!("Nobody covers {}", self.layout.slot_label(slot));
        }
        staff
    }

    /// Same as [`Roster::slot_staff`], resolving the day and shift by name
    pub fn slot_staff_by_name(&self, day: &str, shift: &str) -> Option<Vec<String>> {
        self.layout.find_slot(day, shift).map(|slot| self.slot_staff(slot))
    }
}
