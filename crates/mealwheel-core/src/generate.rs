//! Weekly menu generation.
//!
//! For each weekday every slot draws independently and uniformly, with
//! replacement, from its bucket. Nothing is cached across days or slots
//! except the per-day fruit and vegetable of the single-sheet layout, which
//! are drawn once and reused by every slot of that day.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use mealwheel_data::schema::{BLW_SHEET, FOOD, SAFE_CUT};
use mealwheel_data::{IngredientTable, Pantry, WorkbookLayout};

use crate::classify::{BucketName, Buckets, KeywordSet, classify, rules_for_layout};
use crate::week::{CONSULT_PEDIATRICIAN, DayPlan, NO_OPTIONS, WeekPlan, Weekday, combine};

/// Prefix of the toddler track in the per-meal layout.
pub const SAME_AS_ADULTS: &str = "Same as adults";

/// Everything one generation needs: the layout, freshly classified buckets
/// and, for the per-meal layout, the infant-safe foods table.
#[derive(Debug, Clone)]
pub struct MenuSource<'a> {
    pub layout: WorkbookLayout,
    pub buckets: Buckets,
    pub infant: Option<&'a IngredientTable>,
}

impl<'a> MenuSource<'a> {
    /// Classify `pantry` with the rules for its layout.
    pub fn from_pantry(pantry: &'a Pantry, keywords: &KeywordSet) -> Self {
        let rules = rules_for_layout(pantry.layout, keywords);
        let buckets = classify(pantry, &rules);
        let infant = match pantry.layout {
            WorkbookLayout::PerMeal => pantry.table(BLW_SHEET),
            WorkbookLayout::SingleSheet => None,
        };
        Self {
            layout: pantry.layout,
            buckets,
            infant,
        }
    }
}

/// Draws menus from a [`MenuSource`] using an injected random source.
#[derive(Debug, Clone)]
pub struct MenuGenerator<R = StdRng> {
    rng: R,
}

impl MenuGenerator<StdRng> {
    /// Deterministic generator: the same seed yields the same weeks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// [`Self::seeded`] when a seed is given, otherwise [`Self::from_entropy`].
    pub fn with_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> MenuGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a full week, Monday through Sunday.
    pub fn generate(&mut self, source: &MenuSource<'_>) -> WeekPlan {
        let days = Weekday::ALL.map(|day| match source.layout {
            WorkbookLayout::PerMeal => self.per_meal_day(day, source),
            WorkbookLayout::SingleSheet => self.single_sheet_day(day, &source.buckets),
        });
        info!(layout = %source.layout, "generated weekly menu");
        WeekPlan::new(days)
    }

    /// One uniformly random item of a bucket, or [`NO_OPTIONS`].
    fn draw(&mut self, buckets: &Buckets, name: BucketName) -> String {
        match buckets.items(name).choose(&mut self.rng) {
            Some(item) => item.clone(),
            None => {
                debug!(bucket = %name, "empty bucket, using placeholder");
                NO_OPTIONS.to_owned()
            }
        }
    }

    fn per_meal_day(&mut self, day: Weekday, source: &MenuSource<'_>) -> DayPlan {
        use BucketName::*;
        let b = &source.buckets;

        let breakfast = combine(&[self.draw(b, BreakfastProtein), self.draw(b, BreakfastCarbohydrate)]);
        let lunch = combine(&[
            self.draw(b, MainProtein),
            self.draw(b, MainCarbohydrate),
            self.draw(b, Vegetable),
        ]);
        let dinner = combine(&[self.draw(b, DinnerProtein), self.draw(b, DinnerSide)]);
        let toddler = combine(&[SAME_AS_ADULTS.to_owned(), self.draw(b, ChildSnack)]);
        let infant = self.infant_row(source.infant);

        DayPlan {
            day,
            breakfast,
            lunch,
            dinner,
            toddler,
            infant,
        }
    }

    /// Sample one complete row of the infant table.
    ///
    /// Rows without a food name are skipped. With no usable row the fixed
    /// pediatrician placeholder is returned.
    fn infant_row(&mut self, table: Option<&IngredientTable>) -> String {
        let Some(table) = table else {
            return CONSULT_PEDIATRICIAN.to_owned();
        };
        let usable: Vec<usize> = (0..table.len())
            .filter(|&row| table.cell(row, FOOD).is_some())
            .collect();
        let Some(&row) = usable.choose(&mut self.rng) else {
            return CONSULT_PEDIATRICIAN.to_owned();
        };

        let food = table.cell(row, FOOD).unwrap_or_default();
        match table.cell(row, SAFE_CUT) {
            Some(cut) => format!("{food} (safe cut: {cut})"),
            None => food.to_owned(),
        }
    }

    fn single_sheet_day(&mut self, day: Weekday, b: &Buckets) -> DayPlan {
        use BucketName::*;

        let fruit_of_the_day = self.draw(b, Fruit);
        let vegetable_of_the_day = self.draw(b, Vegetable);

        let breakfast = combine(&[
            self.draw(b, BreakfastProtein),
            self.draw(b, BreakfastCarbohydrate),
            fruit_of_the_day.clone(),
        ]);
        let lunch = combine(&[
            self.draw(b, MainProtein),
            self.draw(b, MainCarbohydrate),
            vegetable_of_the_day.clone(),
        ]);

        let dinner_protein = self.draw(b, MainProtein);
        let dinner_side = if self.rng.random_bool(0.5) {
            vegetable_of_the_day.clone()
        } else {
            self.draw(b, MainCarbohydrate)
        };
        let dinner = combine(&[dinner_protein, dinner_side]);

        let toddler = if b.items(ChildSnack).is_empty() {
            fruit_of_the_day
        } else {
            self.draw(b, ChildSnack)
        };
        let infant =
            format!("Offer {vegetable_of_the_day} or a small piece of protein, unsalted");

        DayPlan {
            day,
            breakfast,
            lunch,
            dinner,
            toddler,
            infant,
        }
    }
}

#[cfg(test)]
mod tests {
    use mealwheel_data::schema::{
        BREAKFAST_SHEET, CARBOHYDRATE, DINNER_SHEET, FRUIT, INGREDIENTS_SHEET, LIGHT_PROTEIN,
        LUNCH_SHEET, PROTEIN, SIDE, VEGETABLE,
    };

    use super::*;

    fn table(name: &str, columns: &[(&str, Vec<&str>)]) -> IngredientTable {
        let headers = columns.iter().map(|(h, _)| (*h).to_owned()).collect();
        let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let rows = (0..height)
            .map(|r| {
                columns
                    .iter()
                    .map(|(_, values)| {
                        values
                            .get(r)
                            .filter(|v| !v.is_empty())
                            .map(|v| (*v).to_owned())
                    })
                    .collect()
            })
            .collect();
        IngredientTable::new(name, headers, rows)
    }

    fn per_meal_pantry(with_blw: bool) -> Pantry {
        let mut tables = vec![
            table(BREAKFAST_SHEET, &[(PROTEIN, vec!["EGGS"]), (CARBOHYDRATE, vec!["TOAST"])]),
            table(
                LUNCH_SHEET,
                &[
                    (PROTEIN, vec!["CHICKEN"]),
                    (CARBOHYDRATE, vec!["RICE"]),
                    (VEGETABLE, vec!["CARROT"]),
                ],
            ),
            table(DINNER_SHEET, &[(LIGHT_PROTEIN, vec!["TUNA"]), (SIDE, vec!["SALAD"])]),
        ];
        if with_blw {
            tables.push(table(
                BLW_SHEET,
                &[(FOOD, vec!["AVOCADO"]), (SAFE_CUT, vec!["THICK WEDGES"])],
            ));
        }
        Pantry::new(WorkbookLayout::PerMeal, tables)
    }

    #[test]
    fn per_meal_day_composes_every_slot() {
        let pantry = per_meal_pantry(true);
        let source = MenuSource::from_pantry(&pantry, &KeywordSet::default());
        let week = MenuGenerator::seeded(7).generate(&source);

        let monday = &week.days()[0];
        assert_eq!(monday.day, Weekday::Monday);
        assert_eq!(monday.breakfast, "EGGS + TOAST");
        assert_eq!(monday.lunch, "CHICKEN + RICE + CARROT");
        assert_eq!(monday.dinner, "TUNA + SALAD");
        // No TODDLER sheet: the snack bucket is empty.
        assert_eq!(monday.toddler, "Same as adults + No options available");
        assert_eq!(monday.infant, "AVOCADO (safe cut: THICK WEDGES)");
    }

    #[test]
    fn per_meal_without_blw_consults_pediatrician() {
        let pantry = per_meal_pantry(false);
        let source = MenuSource::from_pantry(&pantry, &KeywordSet::default());
        let week = MenuGenerator::seeded(7).generate(&source);
        assert!(week.days().iter().all(|d| d.infant == CONSULT_PEDIATRICIAN));
    }

    #[test]
    fn infant_row_without_cut_shows_food_only() {
        let blw = table(BLW_SHEET, &[(FOOD, vec!["MANGO"]), (SAFE_CUT, vec![""])]);
        let mut generator = MenuGenerator::seeded(1);
        assert_eq!(generator.infant_row(Some(&blw)), "MANGO");
    }

    #[test]
    fn infant_rows_without_food_are_skipped() {
        let blw = table(
            BLW_SHEET,
            &[(FOOD, vec!["", "PEAR"]), (SAFE_CUT, vec!["STRIPS", "HALVES"])],
        );
        let mut generator = MenuGenerator::seeded(3);
        for _ in 0..20 {
            assert_eq!(generator.infant_row(Some(&blw)), "PEAR (safe cut: HALVES)");
        }
    }

    #[test]
    fn single_sheet_reuses_fruit_and_vegetable_of_the_day() {
        let pantry = Pantry::new(
            WorkbookLayout::SingleSheet,
            [table(
                INGREDIENTS_SHEET,
                &[
                    (PROTEIN, vec!["EGG OMELETTE", "GRILLED CHICKEN"]),
                    (CARBOHYDRATE, vec!["TOAST", "RICE"]),
                    (VEGETABLE, vec!["CARROT", "SPINACH", "PUMPKIN"]),
                    (FRUIT, vec!["MANGO", "PAPAYA", "KIWI"]),
                ],
            )],
        );
        let source = MenuSource::from_pantry(&pantry, &KeywordSet::default());
        let week = MenuGenerator::seeded(42).generate(&source);

        for day in week.days() {
            let fruit = day.breakfast.rsplit(" + ").next().unwrap();
            let vegetable = day.lunch.rsplit(" + ").next().unwrap();

            assert!(day.breakfast.starts_with("EGG OMELETTE + TOAST + "));
            assert!(day.lunch.starts_with("GRILLED CHICKEN + RICE + "));
            // No CHILD_SNACK column: the toddler gets the fruit of the day.
            assert_eq!(day.toddler, fruit);
            assert_eq!(
                day.infant,
                format!("Offer {vegetable} or a small piece of protein, unsalted")
            );
            assert!(
                day.dinner == format!("GRILLED CHICKEN + {vegetable}")
                    || day.dinner == "GRILLED CHICKEN + RICE",
                "unexpected dinner: {}",
                day.dinner
            );
        }
    }

    #[test]
    fn same_seed_same_week() {
        let pantry = per_meal_pantry(true);
        let source = MenuSource::from_pantry(&pantry, &KeywordSet::default());
        let a = MenuGenerator::seeded(99).generate(&source);
        let b = MenuGenerator::seeded(99).generate(&source);
        assert_eq!(a, b);
    }

    #[test]
    fn with_seed_none_still_generates() {
        let pantry = per_meal_pantry(true);
        let source = MenuSource::from_pantry(&pantry, &KeywordSet::default());
        let week = MenuGenerator::with_seed(None).generate(&source);
        assert_eq!(week.days().len(), 7);
    }
}
