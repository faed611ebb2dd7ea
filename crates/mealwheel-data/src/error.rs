use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A required sheet or column that the workbook does not provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingItem {
    Sheet(String),
    Column { sheet: String, column: String },
}

impl fmt::Display for MissingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sheet(sheet) => write!(f, "sheet {sheet:?}"),
            Self::Column { sheet, column } => write!(f, "column {column:?} in sheet {sheet:?}"),
        }
    }
}

/// Errors that can occur while loading the ingredient workbook.
///
/// `Clone` so that a cached failure can be handed to every caller.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("ingredient workbook not found at {}", .path.display())]
    FileMissing { path: PathBuf },

    #[error("failed to read ingredient workbook {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("ingredient workbook {} is missing {}", .path.display(), join_missing(.missing))]
    Schema {
        path: PathBuf,
        missing: Vec<MissingItem>,
    },
}

fn join_missing(missing: &[MissingItem]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_item() {
        let err = LoadError::Schema {
            path: PathBuf::from("menu.xlsx"),
            missing: vec![
                MissingItem::Sheet("LUNCH".into()),
                MissingItem::Column {
                    sheet: "DINNER".into(),
                    column: "SIDE".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "ingredient workbook menu.xlsx is missing sheet \"LUNCH\", column \"SIDE\" in sheet \"DINNER\""
        );
    }

    #[test]
    fn file_missing_mentions_path() {
        let err = LoadError::FileMissing {
            path: PathBuf::from("/tmp/nowhere.xlsx"),
        };
        assert!(err.to_string().contains("/tmp/nowhere.xlsx"));
    }
}
