//! The generated week: one [`DayPlan`] per weekday, in calendar order.

use std::fmt;

use serde::Serialize;

/// Rendered in place of a draw from an empty bucket.
pub const NO_OPTIONS: &str = "No options available";

/// Infant track when no infant-safe foods table is available.
pub const CONSULT_PEDIATRICIAN: &str = "Consult a pediatrician";

/// Joins the sub-items of a composed slot.
pub const SEPARATOR: &str = " + ";

/// Fixed weekday labels, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every weekday in calendar order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the weekly menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    /// Toddler track: what the toddler eats on top of the adult meals.
    pub toddler: String,
    /// Infant track: baby-led weaning guidance for the day.
    pub infant: String,
}

impl DayPlan {
    /// The slot values in display order (without the day label).
    pub fn slots(&self) -> [&str; 5] {
        [
            &self.breakfast,
            &self.lunch,
            &self.dinner,
            &self.toddler,
            &self.infant,
        ]
    }
}

/// Exactly seven [`DayPlan`]s, Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekPlan {
    days: Vec<DayPlan>,
}

impl WeekPlan {
    /// Build a week from seven day plans.
    ///
    /// The days are stored in the order given; callers build them by
    /// iterating [`Weekday::ALL`].
    pub fn new(days: [DayPlan; 7]) -> Self {
        Self {
            days: days.into(),
        }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }
}

/// Join sub-items with [`SEPARATOR`].
pub fn combine<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: Weekday) -> DayPlan {
        DayPlan {
            day,
            breakfast: "EGGS + TOAST".into(),
            lunch: "CHICKEN + RICE + CARROT".into(),
            dinner: "TUNA + SALAD".into(),
            toddler: "Same as adults + BANANA".into(),
            infant: CONSULT_PEDIATRICIAN.into(),
        }
    }

    #[test]
    fn weekdays_are_in_calendar_order() {
        let labels: Vec<&str> = Weekday::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ]
        );
    }

    #[test]
    fn combine_uses_plus_separator() {
        assert_eq!(combine(&["EGGS", "TOAST", "MANGO"]), "EGGS + TOAST + MANGO");
        assert_eq!(combine(&["ONLY"]), "ONLY");
    }

    #[test]
    fn week_lookup_by_day() {
        let week = WeekPlan::new(Weekday::ALL.map(day));
        assert_eq!(week.days().len(), 7);
        assert_eq!(week.day(Weekday::Friday).unwrap().day, Weekday::Friday);
    }

    #[test]
    fn day_plan_serializes_with_label() {
        let json = serde_json::to_value(day(Weekday::Sunday)).unwrap();
        assert_eq!(json["day"], "Sunday");
        assert_eq!(json["breakfast"], "EGGS + TOAST");
    }
}
