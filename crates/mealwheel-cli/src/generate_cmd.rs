//! `mealwheel generate` command: print one freshly generated week.

use std::io::Write;

use anyhow::Result;

use mealwheel_core::MenuSession;

use crate::config::MealwheelConfig;
use crate::render::{BLW_TIP, Household, render_table};

/// Run the generate command against stdout/stderr.
///
/// A workbook that cannot be loaded is reported as a warning, not a failure.
pub fn run_generate(config: MealwheelConfig) -> Result<()> {
    let mut session = crate::open_session(&config);
    write_week(
        &mut session,
        &config.household,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

/// Generate a week and write it as a table followed by the infant tip.
pub fn write_week(
    session: &mut MenuSession,
    household: &Household,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let Some(week) = session.regenerate() else {
        if let Some(warning) = session.warning() {
            writeln!(err, "warning: {warning}")?;
        }
        return Ok(());
    };

    write!(out, "{}", render_table(week, household))?;
    writeln!(out)?;
    writeln!(out, "{BLW_TIP}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mealwheel_core::{KeywordSet, MenuGenerator};
    use mealwheel_data::{IngredientRepository, SourceConfig};
    use mealwheel_test_utils::per_meal_fixture;

    use super::*;

    fn session_for(source: SourceConfig) -> MenuSession {
        MenuSession::new(
            Arc::new(IngredientRepository::new(source)),
            KeywordSet::default(),
            MenuGenerator::seeded(17),
        )
    }

    #[test]
    fn writes_table_and_tip() {
        let (_dir, path) = per_meal_fixture().write_temp();
        let mut session = session_for(SourceConfig::new(path));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        write_week(&mut session, &Household::new("Matias", "Agustin"), &mut out, &mut err)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Toddler (Matias)"));
        assert!(out.contains("Infant (Agustin, BLW)"));
        assert!(out.lines().any(|l| l.starts_with("Wednesday")));
        assert!(out.trim_end().ends_with(BLW_TIP));
        assert!(err.is_empty());
    }

    #[test]
    fn missing_workbook_only_warns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = session_for(SourceConfig::new(tmp.path().join("family_menu.xlsx")));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        write_week(&mut session, &Household::default(), &mut out, &mut err).unwrap();

        assert!(out.is_empty(), "no table without a workbook");
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("warning: ingredient workbook not found"), "got: {err}");
        assert_eq!(err.lines().count(), 1);
    }
}
