use std::sync::OnceLock;

use tracing::debug;

use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::models::Pantry;
use crate::schema::WorkbookSchema;
use crate::workbook::read_pantry;

/// Load-once access to the ingredient workbook.
///
/// Construct one repository at startup and pass it by reference. The first
/// call to [`IngredientRepository::load`] reads the file; every later call
/// returns the same outcome, including a failure, without touching the disk.
#[derive(Debug)]
pub struct IngredientRepository {
    config: SourceConfig,
    schema: WorkbookSchema,
    loaded: OnceLock<Result<Pantry, LoadError>>,
}

impl IngredientRepository {
    pub fn new(config: SourceConfig) -> Self {
        let schema = WorkbookSchema::for_layout(config.layout);
        Self {
            config,
            schema,
            loaded: OnceLock::new(),
        }
    }

    /// Build a repository around an already-loaded pantry (no file access).
    pub fn from_pantry(config: SourceConfig, pantry: Pantry) -> Self {
        let repo = Self::new(config);
        let _ = repo.loaded.set(Ok(pantry));
        repo
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn schema(&self) -> &WorkbookSchema {
        &self.schema
    }

    /// Load the workbook on first use and return the cached result.
    pub fn load(&self) -> Result<&Pantry, &LoadError> {
        self.loaded
            .get_or_init(|| {
                let result = read_pantry(&self.config.workbook_path, &self.schema);
                if let Err(e) = &result {
                    debug!(error = %e, "ingredient workbook unavailable");
                }
                result
            })
            .as_ref()
    }

    /// Whether [`Self::load`] has already been attempted.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WorkbookLayout;

    #[test]
    fn missing_file_is_reported_and_cached() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.xlsx");
        let repo = IngredientRepository::new(SourceConfig::new(&path));

        assert!(!repo.is_loaded());
        let err = repo.load().unwrap_err();
        assert!(
            matches!(err, LoadError::FileMissing { path: p } if *p == path),
            "expected FileMissing, got: {err}"
        );
        assert!(repo.is_loaded());

        // Second call returns the same cached error.
        let again = repo.load().unwrap_err();
        assert!(std::ptr::eq(err, again), "error should be cached");
    }

    #[test]
    fn from_pantry_skips_disk() {
        let pantry = Pantry::new(WorkbookLayout::SingleSheet, []);
        let config = SourceConfig::new("/definitely/not/here.xlsx")
            .with_layout(WorkbookLayout::SingleSheet);
        let repo = IngredientRepository::from_pantry(config, pantry.clone());

        assert!(repo.is_loaded());
        assert_eq!(repo.load().unwrap(), &pantry);
    }

    #[test]
    fn schema_follows_configured_layout() {
        let config = SourceConfig::new("menu.xlsx").with_layout(WorkbookLayout::SingleSheet);
        let repo = IngredientRepository::new(config);
        assert_eq!(repo.schema().layout, WorkbookLayout::SingleSheet);
    }
}
