//! Shared test utilities for mealwheel integration tests.
//!
//! Writes small ingredient workbooks into temporary directories. Each test
//! gets its own directory, removed when the returned [`TempDir`] drops.
//!
//! Columns are given column-major: a header plus its values top to bottom.
//! Shorter columns leave the remaining cells empty, which is how the real
//! workbooks look.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use mealwheel_data::schema::{
    BLW_SHEET, BREAKFAST_SHEET, CARBOHYDRATE, CHILD_SNACK, DINNER_SHEET, FAT, FOOD, FRUIT,
    FRUIT_SNACK, INGREDIENTS_SHEET, LIGHT_PROTEIN, LUNCH_SHEET, PROTEIN, SAFE_CUT, SIDE,
    TODDLER_SHEET, VEGETABLE,
};

/// One sheet of a fixture workbook.
#[derive(Debug, Clone)]
pub struct SheetFixture {
    pub name: String,
    pub columns: Vec<(String, Vec<String>)>,
}

/// An in-memory description of a workbook to write.
#[derive(Debug, Clone, Default)]
pub struct WorkbookFixture {
    pub sheets: Vec<SheetFixture>,
}

impl WorkbookFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty sheet. Following [`Self::column`] calls fill it.
    pub fn sheet(mut self, name: &str) -> Self {
        self.sheets.push(SheetFixture {
            name: name.to_string(),
            columns: Vec::new(),
        });
        self
    }

    /// Append a column (header plus values) to the most recent sheet.
    ///
    /// # Panics
    ///
    /// Panics if no sheet was started.
    pub fn column(mut self, header: &str, values: &[&str]) -> Self {
        let sheet = self
            .sheets
            .last_mut()
            .expect("call sheet() before column()");
        sheet.columns.push((
            header.to_string(),
            values.iter().map(|v| (*v).to_string()).collect(),
        ));
        self
    }

    /// Drop a sheet by name (to build "optional sheet absent" cases).
    pub fn without_sheet(mut self, name: &str) -> Self {
        self.sheets.retain(|s| s.name != name);
        self
    }

    /// Write the workbook to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the workbook cannot be written.
    pub fn write(&self, path: &Path) {
        let mut workbook = Workbook::new();
        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .unwrap_or_else(|e| panic!("invalid sheet name {:?}: {e}", sheet.name));

            for (col, (header, values)) in sheet.columns.iter().enumerate() {
                let col = u16::try_from(col).expect("too many fixture columns");
                worksheet
                    .write_string(0, col, header.as_str())
                    .expect("failed to write header cell");
                for (row, value) in values.iter().enumerate() {
                    if value.is_empty() {
                        continue;
                    }
                    let row = u32::try_from(row + 1).expect("too many fixture rows");
                    worksheet
                        .write_string(row, col, value.as_str())
                        .expect("failed to write data cell");
                }
            }
        }
        workbook
            .save(path)
            .unwrap_or_else(|e| panic!("failed to save fixture workbook {}: {e}", path.display()));
    }

    /// Write the workbook into a fresh temporary directory.
    ///
    /// Returns `(dir, path)`; keep `dir` alive for as long as the file is used.
    pub fn write_temp(&self) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("family_menu.xlsx");
        self.write(&path);
        (dir, path)
    }
}

/// A complete per-meal workbook with every sheet populated.
pub fn per_meal_fixture() -> WorkbookFixture {
    WorkbookFixture::new()
        .sheet(BREAKFAST_SHEET)
        .column(PROTEIN, &["Scrambled eggs", "Cheese", "Ham"])
        .column(CARBOHYDRATE, &["Toast", "Arepa", "Oatmeal"])
        .sheet(LUNCH_SHEET)
        .column(PROTEIN, &["Grilled chicken", "Beef stew", "Salmon"])
        .column(CARBOHYDRATE, &["Rice", "Pasta", "Potatoes"])
        .column(VEGETABLE, &["Broccoli", "Carrot", "Zucchini"])
        .sheet(DINNER_SHEET)
        .column(LIGHT_PROTEIN, &["Tuna", "Turkey", "Tofu"])
        .column(SIDE, &["Salad", "Soup"])
        .sheet(TODDLER_SHEET)
        .column(FRUIT_SNACK, &["Banana", "Apple", "Yogurt"])
        .sheet(BLW_SHEET)
        .column(FOOD, &["Avocado", "Broccoli", "Sweet potato"])
        .column(SAFE_CUT, &["Thick wedges", "Large florets"])
}

/// A complete single-sheet workbook.
pub fn single_sheet_fixture() -> WorkbookFixture {
    WorkbookFixture::new()
        .sheet(INGREDIENTS_SHEET)
        .column(
            PROTEIN,
            &["Egg omelette", "Grilled chicken", "Ham and cheese", "Beef stew"],
        )
        .column(CARBOHYDRATE, &["Toast", "Rice", "Oatmeal", "Pasta"])
        .column(VEGETABLE, &["Broccoli", "Carrot"])
        .column(FRUIT, &["Banana", "Mango", "Papaya"])
        .column(CHILD_SNACK, &["Yogurt", "Crackers"])
        .column(FAT, &["Olive oil", "Avocado"])
}
