//! TUI application state.

use mealwheel_core::{DayPlan, MenuSession};

use crate::render::Household;

/// Which view the TUI is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Week,
    Help,
}

/// Application state for the TUI.
pub struct App {
    pub session: MenuSession,
    pub household: Household,
    pub current_view: View,
    pub selected_day: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(session: MenuSession, household: Household) -> Self {
        Self {
            session,
            household,
            current_view: View::Week,
            selected_day: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// The persistent warning shown while generation is disabled.
    pub fn warning(&self) -> Option<String> {
        self.session.warning().map(|e| e.to_string())
    }

    pub fn days(&self) -> &[DayPlan] {
        self.session.current().map(|w| w.days()).unwrap_or_default()
    }

    pub fn selected(&self) -> Option<&DayPlan> {
        self.days().get(self.selected_day)
    }

    // -- Actions --

    /// Replace the week with a fresh one. Ignored while disabled.
    pub fn generate(&mut self) {
        if self.session.regenerate().is_some() {
            self.status_message = Some("New week generated".to_string());
        } else {
            self.status_message = Some("Generation disabled: workbook not loaded".to_string());
        }
        self.current_view = View::Week;
    }

    // -- Navigation --

    pub fn navigate_back(&mut self) {
        match self.current_view {
            View::Week => self.should_quit = true,
            View::Help => self.current_view = View::Week,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_day > 0 {
            self.selected_day -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.days().len();
        if len > 0 && self.selected_day < len - 1 {
            self.selected_day += 1;
        }
    }

    pub fn show_help(&mut self) {
        self.current_view = View::Help;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
