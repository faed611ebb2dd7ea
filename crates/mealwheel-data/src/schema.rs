//! Typed description of the sheets and columns a workbook must provide.
//!
//! Two layouts are supported:
//! - [`WorkbookLayout::PerMeal`]: one sheet per meal or dependent track.
//! - [`WorkbookLayout::SingleSheet`]: one `INGREDIENTS` sheet whose columns
//!   are split into meal buckets by keyword.
//!
//! Sheet and column names are exact, case-sensitive identifiers.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MissingItem;

// ---------------------------------------------------------------------------
// Sheet and column names
// ---------------------------------------------------------------------------

pub const BREAKFAST_SHEET: &str = "BREAKFAST";
pub const LUNCH_SHEET: &str = "LUNCH";
pub const DINNER_SHEET: &str = "DINNER";
pub const TODDLER_SHEET: &str = "TODDLER";
pub const BLW_SHEET: &str = "BLW";
pub const INGREDIENTS_SHEET: &str = "INGREDIENTS";

pub const PROTEIN: &str = "PROTEIN";
pub const CARBOHYDRATE: &str = "CARBOHYDRATE";
pub const VEGETABLE: &str = "VEGETABLE";
pub const LIGHT_PROTEIN: &str = "LIGHT_PROTEIN";
pub const SIDE: &str = "SIDE";
pub const FRUIT_SNACK: &str = "FRUIT_SNACK";
pub const FOOD: &str = "FOOD";
pub const SAFE_CUT: &str = "SAFE_CUT";
pub const FRUIT: &str = "FRUIT";
pub const CHILD_SNACK: &str = "CHILD_SNACK";
pub const FAT: &str = "FAT";
/// Accepted on the single-sheet layout but not read: that layout always
/// offers the infant the vegetable of the day.
pub const BLW_ITEM: &str = "BLW_ITEM";
/// Accepted alongside [`BLW_ITEM`]; not read either.
pub const BLW_SAFE_CUT: &str = "BLW_SAFE_CUT";

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// How the ingredient workbook is organised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkbookLayout {
    /// Separate sheets for breakfast, lunch, dinner, toddler and BLW.
    #[default]
    PerMeal,
    /// A single sheet classified into buckets by keyword.
    SingleSheet,
}

impl fmt::Display for WorkbookLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PerMeal => "per-meal",
            Self::SingleSheet => "single-sheet",
        };
        f.write_str(s)
    }
}

impl FromStr for WorkbookLayout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-meal" => Ok(Self::PerMeal),
            "single-sheet" => Ok(Self::SingleSheet),
            other => Err(LayoutParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`WorkbookLayout`] string.
#[derive(Debug, Clone)]
pub struct LayoutParseError(pub String);

impl fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid workbook layout: {:?} (expected per-meal or single-sheet)",
            self.0
        )
    }
}

impl std::error::Error for LayoutParseError {}

// ---------------------------------------------------------------------------
// Schema types
// ---------------------------------------------------------------------------

/// An expected column within a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub required: bool,
}

/// An expected sheet and its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSchema {
    pub name: &'static str,
    /// Optional sheets may be absent; their columns then yield empty buckets.
    pub required: bool,
    pub columns: Vec<ColumnSchema>,
}

/// The full set of sheets expected for a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookSchema {
    pub layout: WorkbookLayout,
    pub sheets: Vec<SheetSchema>,
}

const fn required(name: &'static str) -> ColumnSchema {
    ColumnSchema {
        name,
        required: true,
    }
}

const fn optional(name: &'static str) -> ColumnSchema {
    ColumnSchema {
        name,
        required: false,
    }
}

impl WorkbookSchema {
    /// Build the schema for a layout.
    pub fn for_layout(layout: WorkbookLayout) -> Self {
        let sheets = match layout {
            WorkbookLayout::PerMeal => vec![
                SheetSchema {
                    name: BREAKFAST_SHEET,
                    required: true,
                    columns: vec![required(PROTEIN), required(CARBOHYDRATE)],
                },
                SheetSchema {
                    name: LUNCH_SHEET,
                    required: true,
                    columns: vec![
                        required(PROTEIN),
                        required(CARBOHYDRATE),
                        required(VEGETABLE),
                    ],
                },
                SheetSchema {
                    name: DINNER_SHEET,
                    required: true,
                    columns: vec![required(LIGHT_PROTEIN), required(SIDE)],
                },
                SheetSchema {
                    name: TODDLER_SHEET,
                    required: false,
                    columns: vec![optional(FRUIT_SNACK)],
                },
                SheetSchema {
                    name: BLW_SHEET,
                    required: false,
                    columns: vec![required(FOOD), optional(SAFE_CUT)],
                },
            ],
            WorkbookLayout::SingleSheet => vec![SheetSchema {
                name: INGREDIENTS_SHEET,
                required: true,
                columns: vec![
                    required(PROTEIN),
                    required(CARBOHYDRATE),
                    required(VEGETABLE),
                    required(FRUIT),
                    optional(CHILD_SNACK),
                    optional(FAT),
                    optional(BLW_ITEM),
                    optional(BLW_SAFE_CUT),
                ],
            }],
        };
        Self { layout, sheets }
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&SheetSchema> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Check the sheets found in a workbook against this schema.
    ///
    /// `found` maps each sheet name present in the workbook to its header
    /// row. Every missing required sheet, and every missing required column
    /// of a sheet that is present, is reported; an empty result means the
    /// workbook is usable.
    ///
    /// A required column of an optional sheet is only enforced when the
    /// sheet exists.
    pub fn validate(&self, found: &HashMap<String, Vec<String>>) -> Vec<MissingItem> {
        let mut missing = Vec::new();

        for sheet in &self.sheets {
            let Some(headers) = found.get(sheet.name) else {
                if sheet.required {
                    missing.push(MissingItem::Sheet(sheet.name.to_owned()));
                }
                continue;
            };

            for column in sheet.columns.iter().filter(|c| c.required) {
                if !headers.iter().any(|h| h == column.name) {
                    missing.push(MissingItem::Column {
                        sheet: sheet.name.to_owned(),
                        column: column.name.to_owned(),
                    });
                }
            }
        }

        missing
    }
}
