//! Interactive menu session: one loaded workbook, many regenerations.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use mealwheel_data::{IngredientRepository, LoadError};

use crate::classify::KeywordSet;
use crate::generate::{MenuGenerator, MenuSource};
use crate::week::WeekPlan;

/// Holds the most recently generated week for a single user.
///
/// The workbook is loaded once, when the session is created. If that load
/// fails the session is disabled: [`MenuSession::warning`] reports why and
/// [`MenuSession::regenerate`] does nothing. The failure is only logged at
/// debug level; surfacing it to the user is left to the caller.
#[derive(Debug)]
pub struct MenuSession<R = StdRng> {
    repository: Arc<IngredientRepository>,
    keywords: KeywordSet,
    generator: MenuGenerator<R>,
    current: Option<WeekPlan>,
}

impl<R: Rng> MenuSession<R> {
    pub fn new(
        repository: Arc<IngredientRepository>,
        keywords: KeywordSet,
        generator: MenuGenerator<R>,
    ) -> Self {
        match repository.load() {
            Ok(pantry) => info!(sheets = ?pantry.sheet_names(), "menu session ready"),
            Err(e) => debug!(error = %e, "menu session disabled"),
        }
        Self {
            repository,
            keywords,
            generator,
            current: None,
        }
    }

    /// The load failure that disabled this session, if any.
    pub fn warning(&self) -> Option<&LoadError> {
        self.repository.load().err()
    }

    pub fn is_enabled(&self) -> bool {
        self.warning().is_none()
    }

    /// Generate a fresh week and make it the current one.
    ///
    /// Returns `None` without touching the current week when the session is
    /// disabled.
    pub fn regenerate(&mut self) -> Option<&WeekPlan> {
        let pantry = self.repository.load().ok()?;
        let source = MenuSource::from_pantry(pantry, &self.keywords);
        self.current = Some(self.generator.generate(&source));
        self.current.as_ref()
    }

    /// The last generated week; `None` until the first regeneration.
    pub fn current(&self) -> Option<&WeekPlan> {
        self.current.as_ref()
    }
}
