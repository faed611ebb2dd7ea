//! Ingredient workbook access: configuration, typed sheet schema, loading and
//! the load-once repository.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod workbook;

pub use config::SourceConfig;
pub use error::{LoadError, MissingItem};
pub use models::{IngredientTable, Pantry};
pub use repository::IngredientRepository;
pub use schema::{WorkbookLayout, WorkbookSchema};
