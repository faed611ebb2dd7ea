use std::collections::HashMap;

use crate::schema::WorkbookLayout;

// ---------------------------------------------------------------------------
// IngredientTable
// ---------------------------------------------------------------------------

/// One loaded sheet: a header row plus data rows of optional cells.
///
/// Cell text is already trimmed and upper-cased; empty cells are `None`.
/// Each column is an independent list of candidates, except for tables that
/// are sampled as whole records (the BLW sheet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl IngredientTable {
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Index of a column by exact header name.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Non-empty values of a column in row order.
    ///
    /// Returns an empty list when the column does not exist.
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
            .collect()
    }

    /// A single cell, if present and non-empty.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pantry
// ---------------------------------------------------------------------------

/// Every table loaded from one workbook, keyed by sheet name.
///
/// Only sheets named by the layout's schema are kept. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pantry {
    pub layout: WorkbookLayout,
    tables: HashMap<String, IngredientTable>,
}

impl Pantry {
    pub fn new(layout: WorkbookLayout, tables: impl IntoIterator<Item = IngredientTable>) -> Self {
        let tables = tables
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        Self { layout, tables }
    }

    pub fn table(&self, sheet: &str) -> Option<&IngredientTable> {
        self.tables.get(sheet)
    }

    /// Non-empty values of `sheet.column`, or an empty list when either the
    /// sheet or the column is absent.
    pub fn column_values(&self, sheet: &str, column: &str) -> Vec<&str> {
        self.table(sheet)
            .map(|t| t.column_values(column))
            .unwrap_or_default()
    }

    /// Sheet names in sorted order.
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
