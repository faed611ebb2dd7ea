//! `mealwheel check` command: load the workbook and show how it classifies.

use std::io::Write;

use anyhow::{Context, Result};

use mealwheel_core::{KeywordSet, classify, rules_for_layout};
use mealwheel_data::IngredientRepository;

use crate::config::MealwheelConfig;

/// Run the check command against stdout.
pub fn run_check(config: MealwheelConfig) -> Result<()> {
    let repository = IngredientRepository::new(config.source);
    write_report(&repository, &config.keywords, &mut std::io::stdout().lock())
}

/// Load (or reuse) the pantry and write every bucket with its size.
///
/// Unlike `generate`, a load failure is returned as an error.
pub fn write_report(
    repository: &IngredientRepository,
    keywords: &KeywordSet,
    out: &mut impl Write,
) -> Result<()> {
    let source = repository.config();
    let pantry = repository
        .load()
        .map_err(|e| anyhow::anyhow!(e.clone()))
        .context("workbook check failed")?;

    writeln!(out, "Workbook: {}", source.workbook_path.display())?;
    writeln!(out, "Layout: {}", pantry.layout)?;
    writeln!(out, "Sheets: {}", pantry.sheet_names().join(", "))?;
    writeln!(out)?;

    let buckets = classify(pantry, &rules_for_layout(pantry.layout, keywords));
    writeln!(out, "{:<24} {:>5}  ITEMS", "BUCKET", "SIZE")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for bucket in buckets.iter() {
        let items = if bucket.items.is_empty() {
            "(empty, placeholder will be used)".to_string()
        } else {
            bucket.items.join(", ")
        };
        writeln!(
            out,
            "{:<24} {:>5}  {}",
            bucket.name.to_string(),
            bucket.items.len(),
            items
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use mealwheel_data::schema::TODDLER_SHEET;
    use mealwheel_data::{SourceConfig, WorkbookLayout};
    use mealwheel_test_utils::{per_meal_fixture, single_sheet_fixture};

    use super::*;

    #[test]
    fn lists_buckets_with_sizes() {
        let (_dir, path) = single_sheet_fixture().write_temp();
        let repo =
            IngredientRepository::new(SourceConfig::new(path).with_layout(WorkbookLayout::SingleSheet));
        let mut out = Vec::new();

        write_report(&repo, &KeywordSet::default(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Layout: single-sheet"));
        let breakfast = out
            .lines()
            .find(|l| l.starts_with("breakfast_protein"))
            .expect("breakfast_protein row");
        assert!(breakfast.contains("EGG OMELETTE, HAM AND CHEESE"), "got: {breakfast}");
        assert!(
            !out.contains("dinner_side"),
            "dinner buckets are unused by this layout:\n{out}"
        );
    }

    #[test]
    fn empty_buckets_are_flagged() {
        let (_dir, path) = per_meal_fixture().without_sheet(TODDLER_SHEET).write_temp();
        let repo = IngredientRepository::new(SourceConfig::new(path));
        let mut out = Vec::new();

        write_report(&repo, &KeywordSet::default(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let snack = out
            .lines()
            .find(|l| l.starts_with("child_snack"))
            .expect("child_snack row");
        assert!(snack.contains("    0  (empty"), "got: {snack}");
    }

    #[test]
    fn load_failure_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let repo = IngredientRepository::new(SourceConfig::new(tmp.path().join("nope.xlsx")));
        let mut out = Vec::new();

        let err = write_report(&repo, &KeywordSet::default(), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("not found"), "got: {err:#}");
        assert!(out.is_empty());
    }
}
