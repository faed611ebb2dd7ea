//! Keyword classification of workbook columns into meal buckets.
//!
//! A pass-through rule turns one column into one bucket. A split rule
//! partitions one column into the items containing at least one keyword and
//! everything else. Matching is plain substring containment on upper-cased
//! text, so `CHEESEBURGER` counts as a `CHEESE` item; that looseness is
//! accepted.
//!
//! When either side of a split comes out empty, *both* buckets receive the
//! full, unfiltered column.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use mealwheel_data::schema::{
    BREAKFAST_SHEET, CARBOHYDRATE, CHILD_SNACK, DINNER_SHEET, FAT, FRUIT, FRUIT_SNACK,
    INGREDIENTS_SHEET, LIGHT_PROTEIN, LUNCH_SHEET, PROTEIN, SIDE, TODDLER_SHEET, VEGETABLE,
};
use mealwheel_data::{Pantry, WorkbookLayout};

// ---------------------------------------------------------------------------
// Bucket names
// ---------------------------------------------------------------------------

/// Every bucket a menu slot can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketName {
    BreakfastProtein,
    BreakfastCarbohydrate,
    MainProtein,
    MainCarbohydrate,
    Vegetable,
    Fruit,
    ChildSnack,
    Fat,
    DinnerProtein,
    DinnerSide,
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BreakfastProtein => "breakfast_protein",
            Self::BreakfastCarbohydrate => "breakfast_carbohydrate",
            Self::MainProtein => "main_protein",
            Self::MainCarbohydrate => "main_carbohydrate",
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::ChildSnack => "child_snack",
            Self::Fat => "fat",
            Self::DinnerProtein => "dinner_protein",
            Self::DinnerSide => "dinner_side",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// An ordered list of distinct candidates for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: BucketName,
    pub items: Vec<String>,
}

/// The result of classification, keyed by bucket name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Buckets(BTreeMap<BucketName, Bucket>);

impl Buckets {
    /// Items of a bucket; empty when the bucket was never produced.
    pub fn items(&self, name: BucketName) -> &[String] {
        self.0.get(&name).map(|b| b.items.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, name: BucketName) -> Option<&Bucket> {
        self.0.get(&name)
    }

    /// Buckets in [`BucketName`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.0.values()
    }

    fn insert(&mut self, name: BucketName, items: Vec<String>) {
        self.0.insert(name, Bucket { name, items });
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Keyword sets for the split rules of the single-sheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSet {
    pub breakfast_protein: Vec<String>,
    pub breakfast_carbohydrate: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self {
            breakfast_protein: to_strings(&[
                "EGG", "CHEESE", "HAM", "SAUSAGE", "TORTILLA", "OMELETTE",
            ]),
            breakfast_carbohydrate: to_strings(&[
                "BREAD", "TOAST", "OAT", "CEREAL", "PANCAKE", "AREPA", "GRANOLA", "WAFFLE",
                "MUFFIN",
            ]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

/// Upper-case and drop blank keywords so matching is case-insensitive.
fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_uppercase())
        .filter(|k| !k.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// How one bucket (or pair of buckets) is derived from the pantry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketRule {
    /// Copy a column unfiltered.
    Column {
        bucket: BucketName,
        sheet: &'static str,
        column: &'static str,
    },
    /// Partition a column by keyword membership.
    Split {
        sheet: &'static str,
        column: &'static str,
        keywords: Vec<String>,
        matched: BucketName,
        rest: BucketName,
    },
}

const fn column(bucket: BucketName, sheet: &'static str, column: &'static str) -> BucketRule {
    BucketRule::Column {
        bucket,
        sheet,
        column,
    }
}

/// The rule set for a workbook layout.
pub fn rules_for_layout(layout: WorkbookLayout, keywords: &KeywordSet) -> Vec<BucketRule> {
    use BucketName::*;

    match layout {
        WorkbookLayout::PerMeal => vec![
            column(BreakfastProtein, BREAKFAST_SHEET, PROTEIN),
            column(BreakfastCarbohydrate, BREAKFAST_SHEET, CARBOHYDRATE),
            column(MainProtein, LUNCH_SHEET, PROTEIN),
            column(MainCarbohydrate, LUNCH_SHEET, CARBOHYDRATE),
            column(Vegetable, LUNCH_SHEET, VEGETABLE),
            column(DinnerProtein, DINNER_SHEET, LIGHT_PROTEIN),
            column(DinnerSide, DINNER_SHEET, SIDE),
            column(ChildSnack, TODDLER_SHEET, FRUIT_SNACK),
        ],
        WorkbookLayout::SingleSheet => vec![
            BucketRule::Split {
                sheet: INGREDIENTS_SHEET,
                column: PROTEIN,
                keywords: normalize_keywords(&keywords.breakfast_protein),
                matched: BreakfastProtein,
                rest: MainProtein,
            },
            BucketRule::Split {
                sheet: INGREDIENTS_SHEET,
                column: CARBOHYDRATE,
                keywords: normalize_keywords(&keywords.breakfast_carbohydrate),
                matched: BreakfastCarbohydrate,
                rest: MainCarbohydrate,
            },
            column(Vegetable, INGREDIENTS_SHEET, VEGETABLE),
            column(Fruit, INGREDIENTS_SHEET, FRUIT),
            column(ChildSnack, INGREDIENTS_SHEET, CHILD_SNACK),
            column(Fat, INGREDIENTS_SHEET, FAT),
        ],
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Apply `rules` to `pantry`.
///
/// Deterministic: the same pantry and rules always yield the same buckets.
/// Absent sheets or columns produce empty buckets.
pub fn classify(pantry: &Pantry, rules: &[BucketRule]) -> Buckets {
    let mut buckets = Buckets::default();

    for rule in rules {
        match rule {
            BucketRule::Column {
                bucket,
                sheet,
                column,
            } => {
                let items = distinct(pantry.column_values(sheet, column));
                buckets.insert(*bucket, items);
            }
            BucketRule::Split {
                sheet,
                column,
                keywords,
                matched,
                rest,
            } => {
                let items = distinct(pantry.column_values(sheet, column));
                let (hits, misses) = split_by_keywords(&items, keywords);
                buckets.insert(*matched, hits);
                buckets.insert(*rest, misses);
            }
        }
    }

    for bucket in buckets.iter() {
        debug!(bucket = %bucket.name, size = bucket.items.len(), "classified bucket");
    }
    buckets
}

/// Partition `items` into (containing any keyword, the rest).
///
/// If either side is empty, both sides are the full input.
pub fn split_by_keywords(items: &[String], keywords: &[String]) -> (Vec<String>, Vec<String>) {
    let (hits, misses): (Vec<String>, Vec<String>) = items
        .iter()
        .cloned()
        .partition(|item| contains_any(item, keywords));

    if hits.is_empty() || misses.is_empty() {
        (items.to_vec(), items.to_vec())
    } else {
        (hits, misses)
    }
}

fn contains_any(item: &str, keywords: &[String]) -> bool {
    let item = item.to_uppercase();
    keywords.iter().any(|k| item.contains(k.as_str()))
}

/// Drop repeats, keeping the first occurrence of each value.
fn distinct(values: Vec<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_owned());
        }
    }
    out
}
