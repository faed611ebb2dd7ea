//! Reading an ingredient workbook from disk into a [`Pantry`].
//!
//! The first row of every sheet is its header row. Header names are only
//! trimmed; data cells are trimmed and upper-cased so that keyword matching
//! downstream is case-insensitive for every layout.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::{IngredientTable, Pantry};
use crate::schema::WorkbookSchema;

/// Read and validate the workbook at `path` against `schema`.
///
/// Sheets not named by the schema are ignored. Optional sheets that are
/// absent are simply not present in the returned [`Pantry`].
pub fn read_pantry(path: &Path, schema: &WorkbookSchema) -> Result<Pantry, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileMissing {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let available = workbook.sheet_names();
    debug!(path = %path.display(), sheets = ?available, "opened ingredient workbook");

    let mut tables = Vec::with_capacity(schema.sheets.len());
    for sheet in &schema.sheets {
        if !available.iter().any(|name| name == sheet.name) {
            continue;
        }
        let range = workbook
            .worksheet_range(sheet.name)
            .map_err(|e| LoadError::Unreadable {
                path: path.to_path_buf(),
                reason: format!("sheet {:?}: {e}", sheet.name),
            })?;
        tables.push(table_from_range(sheet.name, &range));
    }

    let found: HashMap<String, Vec<String>> = tables
        .iter()
        .map(|t| (t.name.clone(), t.headers.clone()))
        .collect();
    let missing = schema.validate(&found);
    if !missing.is_empty() {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }

    info!(
        path = %path.display(),
        layout = %schema.layout,
        sheets = tables.len(),
        "loaded ingredient workbook"
    );
    Ok(Pantry::new(schema.layout, tables))
}

/// Convert a sheet range into a table. An empty range yields an empty table.
fn table_from_range(name: &str, range: &Range<Data>) -> IngredientTable {
    let mut rows = range.rows();

    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell_text(cell).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .map(|row| {
            row.iter()
                .map(|cell| cell_text(cell).map(|text| text.to_uppercase()))
                .collect()
        })
        .collect();

    IngredientTable::new(name, headers, rows)
}

/// Render a cell as trimmed text. Empty and error cells become `None`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Whole numbers typed into a spreadsheet come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
