use std::env;
use std::path::PathBuf;

use crate::schema::WorkbookLayout;

/// Where the ingredient workbook lives and how it is laid out.
///
/// Reads from the `MEALWHEEL_WORKBOOK` environment variable, falling back to
/// `family_menu.xlsx` in the working directory when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Path to the `.xlsx`/`.xls`/`.ods` workbook.
    pub workbook_path: PathBuf,
    pub layout: WorkbookLayout,
}

impl SourceConfig {
    /// The workbook path used when nothing else is configured.
    pub const DEFAULT_PATH: &str = "family_menu.xlsx";

    /// Environment variable holding the workbook path.
    pub const PATH_ENV: &str = "MEALWHEEL_WORKBOOK";

    /// Build a config from the environment.
    ///
    /// Priority: `MEALWHEEL_WORKBOOK` env var, then the compile-time default.
    /// The layout always starts as the default; use [`Self::with_layout`].
    pub fn from_env() -> Self {
        let workbook_path = env::var(Self::PATH_ENV)
            .unwrap_or_else(|_| Self::DEFAULT_PATH.to_owned());
        Self::new(workbook_path)
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            layout: WorkbookLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: WorkbookLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
