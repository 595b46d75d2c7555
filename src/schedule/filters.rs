use super::types::{Assignment, Slot};

/// The (day, shift) labels one nurse works, in decoder order
pub fn by_nurse(assignments: &[Assignment], nurse: usize) -> Vec<(&str, &str)> {
    assignments
        .iter()
        .filter(|a| a.nurse == nurse)
        .map(|a| (a.day.as_str(), a.shift.as_str()))
        .collect()
}

/// Indices of the nurses working one slot, in nurse order
pub fn by_slot(assignments: &[Assignment], slot: Slot) -> Vec<usize> {
    assignments
        .iter()
        .filter(|a| a.slot == slot)
        .map(|a| a.nurse)
        .collect()
}
