use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use log::info;

use crate::risk::{self, DamageType, ParkingType, RiskAnalysis, RiskInput, WashFrequency};
use crate::suggest::{CascadingSuggestions, DEFAULT_HIDE_DELAY};
use crate::vehicles::VehicleTable;

/// Artificial pause between submitting the form and showing the result.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// The pages of the questionnaire, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Vehicle,
    Parking,
    Washing,
    Damage,
    Analyzing,
    Results,
}

impl WizardStep {
    /// Position among the steps the user answers, for progress display.
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Vehicle => 0,
            WizardStep::Parking => 1,
            WizardStep::Washing => 2,
            WizardStep::Damage => 3,
            WizardStep::Analyzing | WizardStep::Results => 4,
        }
    }

    pub const QUESTION_COUNT: usize = 4;
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardStep::Vehicle => write!(f, "Your Vehicle"),
            WizardStep::Parking => write!(f, "Parking"),
            WizardStep::Washing => write!(f, "Washing"),
            WizardStep::Damage => write!(f, "Current Condition"),
            WizardStep::Analyzing => write!(f, "Analyzing"),
            WizardStep::Results => write!(f, "Your Paint Risk Report"),
        }
    }
}

/// Form state for one session of the questionnaire.
///
/// Holds everything the user has answered so far and the last analysis.
/// The analysis is only ever replaced as a whole.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    pub suggestions: CascadingSuggestions,
    pub parking: Option<ParkingType>,
    pub wash: Option<WashFrequency>,
    damage: BTreeSet<DamageType>,
    analysis_delay: Duration,
    analysis_due: Option<Instant>,
    result: Option<RiskAnalysis>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(&VehicleTable::empty(), DEFAULT_ANALYSIS_DELAY, DEFAULT_HIDE_DELAY)
    }
}

impl Wizard {
    pub fn new(table: &VehicleTable, analysis_delay: Duration, hide_delay: Duration) -> Self {
        Self {
            step: WizardStep::Vehicle,
            suggestions: CascadingSuggestions::new(table, hide_delay),
            parking: None,
            wash: None,
            damage: BTreeSet::new(),
            analysis_delay,
            analysis_due: None,
            result: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn damage(&self) -> &BTreeSet<DamageType> {
        &self.damage
    }

    pub fn has_damage(&self, damage: DamageType) -> bool {
        self.damage.contains(&damage)
    }

    pub fn toggle_damage(&mut self, damage: DamageType) {
        if !self.damage.remove(&damage) {
            self.damage.insert(damage);
        }
    }

    pub fn result(&self) -> Option<&RiskAnalysis> {
        self.result.as_ref()
    }

    /// Whether the current page has been answered well enough to move on.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Vehicle => self.suggestions.query().is_complete(),
            WizardStep::Parking => self.parking.is_some(),
            WizardStep::Washing => self.wash.is_some(),
            WizardStep::Damage => true,
            WizardStep::Analyzing | WizardStep::Results => false,
        }
    }

    /// Move to the next question. Does nothing on the last question; use
    /// `submit` there.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let next = match self.step {
            WizardStep::Vehicle => WizardStep::Parking,
            WizardStep::Parking => WizardStep::Washing,
            WizardStep::Washing => WizardStep::Damage,
            _ => return false,
        };
        self.step = next;
        true
    }

    pub fn back(&mut self) -> bool {
        let previous = match self.step {
            WizardStep::Parking => WizardStep::Vehicle,
            WizardStep::Washing => WizardStep::Parking,
            WizardStep::Damage => WizardStep::Washing,
            WizardStep::Results => WizardStep::Damage,
            WizardStep::Vehicle | WizardStep::Analyzing => return false,
        };
        self.step = previous;
        true
    }

    /// Snapshot of the answers, if every question has been answered.
    pub fn input(&self) -> Option<RiskInput> {
        let vehicle = self.suggestions.query();
        if !vehicle.is_complete() {
            return None;
        }
        Some(RiskInput {
            vehicle,
            parking: self.parking?,
            wash: self.wash?,
            damage: self.damage.clone(),
        })
    }

    /// Start the analysis. The result is produced by `poll` once the
    /// analysis delay has passed.
    pub fn submit(&mut self, now: Instant) -> bool {
        if self.step != WizardStep::Damage || self.input().is_none() {
            return false;
        }
        self.step = WizardStep::Analyzing;
        self.analysis_due = Some(now + self.analysis_delay);
        true
    }

    /// Time left before the pending analysis completes.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.analysis_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Complete a pending analysis if its delay has elapsed. Returns whether
    /// a new result was produced.
    pub fn poll(&mut self, now: Instant, table: &VehicleTable) -> bool {
        match self.analysis_due {
            Some(due) if now >= due => {}
            _ => return false,
        }
        self.analysis_due = None;

        let Some(input) = self.input() else {
            self.step = WizardStep::Damage;
            return false;
        };
        let analysis = risk::analyze(&input, table);
        info!(
            "Analyzed {}: score {} ({})",
            analysis.vehicle, analysis.score, analysis.urgency
        );
        self.result = Some(analysis);
        self.step = WizardStep::Results;
        true
    }

    /// Start over with an empty form.
    pub fn restart(&mut self, table: &VehicleTable) {
        self.suggestions.clear(table);
        self.parking = None;
        self.wash = None;
        self.damage.clear();
        self.analysis_due = None;
        self.result = None;
        self.step = WizardStep::Vehicle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::UrgencyLevel;
    use crate::suggest::SuggestionField;

    fn answered_wizard(table: &VehicleTable) -> Wizard {
        let mut wizard = Wizard::new(table, Duration::from_millis(500), DEFAULT_HIDE_DELAY);
        for (field, value) in [
            (SuggestionField::Make, "Acme"),
            (SuggestionField::Model, "Roadster"),
            (SuggestionField::Year, "1999"),
        ] {
            wizard.suggestions.select(field, value.to_string(), table);
        }
        assert!(wizard.next());
        wizard.parking = Some(ParkingType::Street);
        assert!(wizard.next());
        wizard.wash = Some(WashFrequency::Rarely);
        assert!(wizard.next());
        wizard.toggle_damage(DamageType::Scratches);
        wizard
    }

    #[test]
    fn test_cannot_advance_without_answers() {
        let table = VehicleTable::empty();
        let mut wizard = Wizard::new(&table, DEFAULT_ANALYSIS_DELAY, DEFAULT_HIDE_DELAY);
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::Vehicle);

        wizard
            .suggestions
            .select(SuggestionField::Make, "Acme".to_string(), &table);
        assert!(!wizard.next());

        wizard
            .suggestions
            .select(SuggestionField::Model, "Roadster".to_string(), &table);
        wizard
            .suggestions
            .select(SuggestionField::Year, "1999".to_string(), &table);
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Parking);
        assert!(!wizard.next());
    }

    #[test]
    fn test_back_keeps_answers() {
        let table = VehicleTable::empty();
        let mut wizard = answered_wizard(&table);
        assert!(wizard.back());
        assert_eq!(wizard.step(), WizardStep::Washing);
        assert_eq!(wizard.wash, Some(WashFrequency::Rarely));
        assert!(wizard.next());
        assert!(wizard.has_damage(DamageType::Scratches));
    }

    #[test]
    fn test_toggle_damage() {
        let mut wizard = Wizard::default();
        wizard.toggle_damage(DamageType::Oxidation);
        assert!(wizard.has_damage(DamageType::Oxidation));
        wizard.toggle_damage(DamageType::Oxidation);
        assert!(wizard.damage().is_empty());
    }

    #[test]
    fn test_result_appears_only_after_delay() {
        let table = VehicleTable::empty();
        let mut wizard = answered_wizard(&table);
        let start = Instant::now();

        assert!(wizard.submit(start));
        assert_eq!(wizard.step(), WizardStep::Analyzing);
        assert!(!wizard.poll(start + Duration::from_millis(100), &table));
        assert!(wizard.result().is_none());
        assert_eq!(
            wizard.remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(400))
        );

        assert!(wizard.poll(start + Duration::from_millis(500), &table));
        assert_eq!(wizard.step(), WizardStep::Results);
        let result = wizard.result().unwrap();
        assert_eq!(result.score, 70);
        assert_eq!(result.urgency, UrgencyLevel::High);
        assert_eq!(result.monthly_loss, 70.0);
        assert!(!wizard.poll(start + Duration::from_secs(5), &table));
    }

    #[test]
    fn test_resubmitting_replaces_result_wholesale() {
        let table = VehicleTable::empty();
        let mut wizard = answered_wizard(&table);
        let start = Instant::now();
        wizard.submit(start);
        wizard.poll(start + Duration::from_secs(1), &table);

        assert!(wizard.back());
        wizard.toggle_damage(DamageType::Scratches);
        assert!(wizard.submit(start));
        wizard.poll(start + Duration::from_secs(1), &table);

        let result = wizard.result().unwrap();
        assert_eq!(result.score, 65);
        assert!(
            result
                .factors
                .iter()
                .any(|f| f == risk::NO_DAMAGE_FACTOR)
        );
    }

    #[test]
    fn test_submit_only_from_last_question() {
        let table = VehicleTable::empty();
        let mut wizard = answered_wizard(&table);
        wizard.back();
        assert!(!wizard.submit(Instant::now()));
        assert_eq!(wizard.step(), WizardStep::Washing);
    }

    #[test]
    fn test_restart_clears_everything() {
        let table = VehicleTable::empty();
        let mut wizard = answered_wizard(&table);
        let start = Instant::now();
        wizard.submit(start);
        wizard.poll(start + Duration::from_secs(1), &table);

        wizard.restart(&table);
        assert_eq!(wizard.step(), WizardStep::Vehicle);
        assert!(wizard.result().is_none());
        assert!(wizard.input().is_none());
        assert_eq!(wizard.suggestions.value(SuggestionField::Make), "");
        assert!(wizard.damage().is_empty());
    }
}
