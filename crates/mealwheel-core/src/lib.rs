//! Menu generation for mealwheel: bucket classification, weekly draws and
//! the interactive session that holds the current week.

pub mod classify;
pub mod generate;
pub mod session;
pub mod week;

pub use classify::{Bucket, BucketName, BucketRule, Buckets, KeywordSet, classify, rules_for_layout};
pub use generate::{MenuGenerator, MenuSource, SAME_AS_ADULTS};
pub use session::MenuSession;
pub use week::{CONSULT_PEDIATRICIAN, DayPlan, NO_OPTIONS, SEPARATOR, WeekPlan, Weekday};
