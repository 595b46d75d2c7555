use chrono::Local;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

use crate::schedule::{interpret, CoverageThresholds, Roster, Slot};

/// Summary metrics and the interpretation line
pub fn format_summary(roster: &Roster, thresholds: &CoverageThresholds) -> String {
    let summary = roster.summary();
    let level = interpret(summary.coverage_percent, thresholds);

    let mut out = String::new();
    let _ = writeln!(out, "Nurses:            {}", summary.nurse_count);
    let _ = writeln!(out, "Shifts covered:    {}", summary.assigned_count);
    let _ = writeln!(out, "Possible shifts:   {}", summary.possible_count);
    let _ = writeln!(out, "System occupancy:  {}%", summary.coverage_percent);
    let _ = writeln!(
        out,
        "Interpretation (thresholds {}/{}): {}",
        thresholds.low,
        thresholds.high,
        level.message()
    );
    out
}

/// One nurse's shifts as "Day - Shift" lines, headed by the nurse's label
pub fn format_nurse_schedule(roster: &Roster, label: &str) -> String {
    let mut out = String::new();
    let nurse = match roster.find_nurse(label) {
        Some(n) => n,
        None => {
            let _ = writeln!(out, "Unknown nurse: {}", label);
            return out;
        }
    };

    let name = roster.nurse_label(nurse);
    let schedule = roster.nurse_schedule(&name).unwrap_or_default();
    if schedule.is_empty() {
        let _ = writeln!(out, "{} has no assigned shifts.", name);
    } else {
        let _ = writeln!(out, "{} ({} shifts):", name, schedule.len());
        for (day, shift) in schedule {
            let _ = writeln!(out, "  {} - {}", day, shift);
        }
    }
    out
}

/// Who works one slot
pub fn format_slot_staff(roster: &Roster, slot: Slot) -> String {
    let label = roster.layout().slot_label(slot);
    let staff = roster.slot_staff(slot);
    if staff.is_empty() {
        format!("{}: nobody covers this shift.\n", label)
    } else {
        format!("{}: {}\n", label, staff.join(", "))
    }
}

/// Day x shift table of nurse counts
pub fn format_staffing_grid(roster: &Roster) -> String {
    let layout = roster.layout();
    let distribution = roster.distribution();
    let day_width = layout.days.iter().map(|d| d.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = write!(out, "{:width$}", "", width = day_width);
    for shift in &layout.shifts {
        let _ = write!(out, " | {:>9}", shift);
    }
    let _ = writeln!(out, " | {:>5}", "Total");

    for (day_idx, day) in layout.days.iter().enumerate() {
        let _ = write!(out, "{:width$}", day, width = day_width);
        for count in &distribution.staffing_grid[day_idx] {
            let _ = write!(out, " | {:>9}", count);
        }
        let _ = writeln!(out, " | {:>5}", distribution.day_totals[day_idx]);
    }
    out
}

/// Number of nurses per shift count, skipping empty buckets
pub fn format_load_histogram(roster: &Roster) -> String {
    let distribution = roster.distribution();
    let mut out = String::new();
    for (shifts, &nurses) in distribution.load_histogram.iter().enumerate() {
        if nurses > 0 {
            let _ = writeln!(
                out,
                "  {:>2} shifts: {:>3} nurse(s) {}",
                shifts,
                nurses,
                "#".repeat(nurses)
            );
        }
    }
    if !distribution.idle_nurses.is_empty() {
        let idle: Vec<String> = distribution
            .idle_nurses
            .iter()
            .map(|&n| roster.nurse_label(n))
            .collect();
        let _ = writeln!(out, "  Without shifts: {}", idle.join(", "));
    }
    if !distribution.uncovered_slots.is_empty() {
        let uncovered: Vec<String> = distribution
            .uncovered_slots
            .iter()
            .map(|&s| roster.layout().slot_label(s))
            .collect();
        let _ = writeln!(out, "  Uncovered slots: {}", uncovered.join(", "));
    }
    out
}

/// The full text dashboard
pub fn format_report(roster: &Roster, thresholds: &CoverageThresholds) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Nurse Shift Assignment ===\n");
    let _ = writeln!(out, "--- Summary ---");
    out.push_str(&format_summary(roster, thresholds));
    let _ = writeln!(out, "\n--- Staffing per shift ---");
    out.push_str(&format_staffing_grid(roster));
    let _ = writeln!(out, "\n--- Shifts per nurse ---");
    out.push_str(&format_load_histogram(roster));
    out
}

pub fn print_report(roster: &Roster, thresholds: &CoverageThresholds) {
    println!("{}", format_report(roster, thresholds));
}

/// Writes the report to a file, stamped with the generation time
pub fn write_report_to_file(
    roster: &Roster,
    thresholds: &CoverageThresholds,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    writeln!(file, "Generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    write!(file, "{}", format_report(roster, thresholds))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{AssignmentMatrix, SlotLayout, DEFAULT_NURSE_PREFIX};

    fn example_roster() -> Roster {
        let matrix = AssignmentMatrix::from_rows(vec![vec![1, 0, 0, 1], vec![0, 0, 0, 0]]).unwrap();
        let layout = SlotLayout::new(
            vec!["Mon".to_string(), "Tue".to_string()],
            vec!["AM".to_string(), "PM".to_string()],
        )
        .unwrap();
        Roster::new(matrix, layout, DEFAULT_NURSE_PREFIX).unwrap()
    }

    #[test]
    fn test_summary_lines() {
        let text = format_summary(&example_roster(), &CoverageThresholds::DEFAULT);
        assert!(text.contains("Nurses:            2"));
        assert!(text.contains("Shifts covered:    2"));
        assert!(text.contains("System occupancy:  25%"));
        assert!(text.contains("It respects rest periods"));
    }

    #[test]
    fn test_nurse_schedule_variants() {
        let roster = example_roster();
        let text = format_nurse_schedule(&roster, "Nurse 1");
        assert!(text.contains("Nurse 1 (2 shifts):"));
        assert!(text.contains("  Mon - AM"));
        assert!(text.contains("  Tue - PM"));
        assert_eq!(
            format_nurse_schedule(&roster, "Nurse 2"),
            "Nurse 2 has no assigned shifts.\n"
        );
        assert_eq!(format_nurse_schedule(&roster, "Nurse 7"), "Unknown nurse: Nurse 7\n");
    }

    #[test]
    fn test_nurse_schedule_uses_canonical_label() {
        let roster = example_roster();
        assert!(format_nurse_schedule(&roster, " nurse 1").starts_with("Nurse 1 (2 shifts):\n"));
        assert_eq!(
            format_nurse_schedule(&roster, "2"),
            "Nurse 2 has no assigned shifts.\n"
        );
    }

    #[test]
    fn test_slot_staff() {
        let roster = example_roster();
        assert_eq!(format_slot_staff(&roster, Slot::new(1, 1)), "Tue PM: Nurse 1\n");
        assert_eq!(
            format_slot_staff(&roster, Slot::new(0, 1)),
            "Mon PM: nobody covers this shift.\n"
        );
    }

    #[test]
    fn test_grid_and_histogram() {
        let roster = example_roster();
        let grid = format_staffing_grid(&roster);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Mon"));
        assert!(lines[1].ends_with("|     1"));

        let histogram = format_load_histogram(&roster);
        assert!(histogram.contains(" 0 shifts:   1 nurse(s) #"));
        assert!(histogram.contains(" 2 shifts:   1 nurse(s) #"));
        assert!(histogram.contains("Without shifts: Nurse 2"));
        assert!(histogram.contains("Uncovered slots: Mon PM, Tue AM"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report_to_file(
            &example_roster(),
            &CoverageThresholds::DEFAULT,
            path.to_str().unwrap(),
        )
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Generated "));
        assert!(content.contains("=== Nurse Shift Assignment ==="));
    }
}
