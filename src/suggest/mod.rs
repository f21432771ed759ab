use std::time::{Duration, Instant};

use log::debug;

use crate::risk::VehicleQuery;
use crate::vehicles::VehicleTable;

/// How long a suggestion list stays visible after its field loses focus, so
/// that a click on a suggestion still lands.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(200);

/// The three cascading vehicle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionField {
    Make,
    Model,
    Year,
}

impl SuggestionField {
    pub const ALL: [SuggestionField; 3] = [
        SuggestionField::Make,
        SuggestionField::Model,
        SuggestionField::Year,
    ];
}

impl std::fmt::Display for SuggestionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionField::Make => write!(f, "Make"),
            SuggestionField::Model => write!(f, "Model"),
            SuggestionField::Year => write!(f, "Year"),
        }
    }
}

/// Autocomplete candidates for one text field.
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    all: Vec<String>,
    candidates: Vec<String>,
    visible: bool,
    hide_at: Option<Instant>,
}

impl SuggestionList {
    pub fn new(all: Vec<String>) -> Self {
        Self {
            candidates: all.clone(),
            all,
            visible: false,
            hide_at: None,
        }
    }

    /// Replace the full candidate set and show all of it.
    pub fn set_all(&mut self, all: Vec<String>) {
        self.candidates = all.clone();
        self.all = all;
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn reset(&mut self) {
        self.candidates = self.all.clone();
    }

    /// React to a keystroke that changed the field from `previous` to
    /// `current`.
    ///
    /// Clearing the field or deleting a character restores the full
    /// candidate set. Anything else narrows the current candidates to those
    /// starting with `current`, ignoring case. Returns the remaining
    /// candidate when exactly one is left.
    pub fn on_input(&mut self, previous: &str, current: &str) -> Option<String> {
        if current.is_empty() || current.chars().count() < previous.chars().count() {
            self.reset();
            return None;
        }

        let prefix = current.to_lowercase();
        self.candidates
            .retain(|candidate| candidate.to_lowercase().starts_with(&prefix));

        match self.candidates.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn focus(&mut self) {
        self.visible = true;
        self.hide_at = None;
    }

    /// Schedule the list to hide once `delay` has passed.
    pub fn blur(&mut self, now: Instant, delay: Duration) {
        if self.visible {
            self.hide_at = Some(now + delay);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    /// Hide the list if its post-blur delay has elapsed. Returns whether the
    /// list is still waiting to hide.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(hide_at) if now >= hide_at => {
                self.hide();
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

/// Make, model and year fields whose suggestions depend on each other.
///
/// Models are filtered by the selected make and years by the selected make
/// and model. Choosing a value clears every field after it.
#[derive(Debug, Clone)]
pub struct CascadingSuggestions {
    make: String,
    model: String,
    year: String,
    make_list: SuggestionList,
    model_list: SuggestionList,
    year_list: SuggestionList,
    hide_delay: Duration,
}

impl Default for CascadingSuggestions {
    fn default() -> Self {
        Self::new(&VehicleTable::empty(), DEFAULT_HIDE_DELAY)
    }
}

impl CascadingSuggestions {
    pub fn new(table: &VehicleTable, hide_delay: Duration) -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: String::new(),
            make_list: SuggestionList::new(table.makes()),
            model_list: SuggestionList::default(),
            year_list: SuggestionList::default(),
            hide_delay,
        }
    }

    /// Refresh every candidate list from a newly loaded table, keeping what
    /// the user already typed.
    pub fn reload(&mut self, table: &VehicleTable) {
        self.make_list.set_all(table.makes());
        self.model_list.set_all(table.models(&self.make));
        self.year_list.set_all(table.years(&self.make, &self.model));
    }

    pub fn value(&self, field: SuggestionField) -> &str {
        match field {
            SuggestionField::Make => &self.make,
            SuggestionField::Model => &self.model,
            SuggestionField::Year => &self.year,
        }
    }

    pub fn list(&self, field: SuggestionField) -> &SuggestionList {
        match field {
            SuggestionField::Make => &self.make_list,
            SuggestionField::Model => &self.model_list,
            SuggestionField::Year => &self.year_list,
        }
    }

    fn value_mut(&mut self, field: SuggestionField) -> &mut String {
        match field {
            SuggestionField::Make => &mut self.make,
            SuggestionField::Model => &mut self.model,
            SuggestionField::Year => &mut self.year,
        }
    }

    fn list_mut(&mut self, field: SuggestionField) -> &mut SuggestionList {
        match field {
            SuggestionField::Make => &mut self.make_list,
            SuggestionField::Model => &mut self.model_list,
            SuggestionField::Year => &mut self.year_list,
        }
    }

    /// Apply a keystroke to a field. Returns the value that was auto-selected,
    /// if the keystroke narrowed the candidates down to one.
    pub fn set_text(
        &mut self,
        field: SuggestionField,
        text: String,
        table: &VehicleTable,
    ) -> Option<String> {
        let previous = std::mem::replace(self.value_mut(field), text);
        let current = self.value(field).to_string();
        let selected = self.list_mut(field).on_input(&previous, &current)?;
        debug!("Auto-selected {} {:?}", field, selected);
        self.select(field, selected.clone(), table);
        Some(selected)
    }

    /// Choose a value for a field, clearing and refreshing the fields that
    /// depend on it.
    pub fn select(&mut self, field: SuggestionField, value: String, table: &VehicleTable) {
        match field {
            SuggestionField::Make => {
                self.make = value;
                self.model.clear();
                self.year.clear();
                self.model_list.set_all(table.models(&self.make));
                self.year_list.set_all(Vec::new());
            }
            SuggestionField::Model => {
                self.model = value;
                self.year.clear();
                self.year_list.set_all(table.years(&self.make, &self.model));
            }
            SuggestionField::Year => {
                self.year = value;
            }
        }
        self.list_mut(field).hide();
    }

    pub fn focus(&mut self, field: SuggestionField) {
        self.list_mut(field).focus();
    }

    pub fn blur(&mut self, field: SuggestionField, now: Instant) {
        let delay = self.hide_delay;
        self.list_mut(field).blur(now, delay);
    }

    /// Advance pending hide timers. Returns whether any list is still waiting
    /// to hide.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut pending = false;
        for field in SuggestionField::ALL {
            pending |= self.list_mut(field).tick(now);
        }
        pending
    }

    /// Forget every typed value and show the full make list again.
    pub fn clear(&mut self, table: &VehicleTable) {
        self.make.clear();
        self.model.clear();
        self.year.clear();
        self.reload(table);
        for field in SuggestionField::ALL {
            self.list_mut(field).hide();
        }
    }

    pub fn query(&self) -> VehicleQuery {
        VehicleQuery::new(self.make.trim(), self.model.trim(), self.year.trim())
    }
}
