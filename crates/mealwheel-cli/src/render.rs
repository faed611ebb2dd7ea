//! Text presentation of a generated week shared by every surface.

use mealwheel_core::WeekPlan;

/// Shown under every rendered week.
pub const BLW_TIP: &str = "Tip: for the infant, texture and grip come first. No salt, no sugar.";

/// Shown where the week would be before anything has been generated.
pub const PLACEHOLDER: &str = "Press generate to plan the week.";

/// Display names for the two dependent tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Household {
    pub toddler_name: String,
    pub infant_name: String,
}

impl Household {
    pub fn new(toddler_name: impl Into<String>, infant_name: impl Into<String>) -> Self {
        Self {
            toddler_name: toddler_name.into(),
            infant_name: infant_name.into(),
        }
    }

    /// Column headers in display order, starting with the day label.
    pub fn headers(&self) -> [String; 6] {
        [
            "Day".to_string(),
            "Breakfast (everyone)".to_string(),
            "Lunch (everyone)".to_string(),
            "Dinner (light)".to_string(),
            format!("Toddler ({})", self.toddler_name),
            format!("Infant ({}, BLW)", self.infant_name),
        ]
    }
}

impl Default for Household {
    fn default() -> Self {
        Self::new("toddler", "infant")
    }
}

/// The cells of one rendered row, day label first.
pub fn row_cells(day: &mealwheel_core::DayPlan) -> [&str; 6] {
    let [breakfast, lunch, dinner, toddler, infant] = day.slots();
    [day.day.label(), breakfast, lunch, dinner, toddler, infant]
}

/// Render the week as a fixed-column text table, widths fitted to content.
pub fn render_table(week: &WeekPlan, household: &Household) -> String {
    let headers = household.headers();
    let rows: Vec<[&str; 6]> = week.days().iter().map(row_cells).collect();

    let mut widths = headers.each_ref().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(String::as_str), &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row.iter().copied(), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
