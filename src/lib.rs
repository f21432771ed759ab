// Library interface for paintrisk
// This allows integration tests and benches to access internal modules

pub mod config;
pub mod errors;
pub mod risk;
pub mod suggest;
pub mod vehicles;
pub mod wizard;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::PaintRiskError;
pub use risk::{
    DamageType, ParkingType, RiskAnalysis, RiskInput, UrgencyLevel, VehicleQuery, WashFrequency,
    analyze,
};
pub use suggest::{CascadingSuggestions, SuggestionField, SuggestionList};
pub use vehicles::{SizeCategory, VehicleRecord, VehicleTable};
pub use wizard::{Wizard, WizardStep};
