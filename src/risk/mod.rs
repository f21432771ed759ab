use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vehicles::{SizeCategory, VehicleTable};

pub mod recommendations;
pub use recommendations::recommendations_for;

/// Every analysis starts from this score before any factor is applied.
pub const BASE_SCORE: i32 = 30;
/// The score never exceeds this ceiling, no matter how many factors fire.
pub const MAX_SCORE: i32 = 98;
/// Points added for each kind of visible damage the owner reports.
pub const DAMAGE_INCREMENT: i32 = 5;

const URGENCY_CRITICAL_ABOVE: i32 = 75;
const URGENCY_HIGH_ABOVE: i32 = 50;

/// Where the vehicle spends most of its time parked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ParkingType {
    Garage,
    Covered,
    Uncovered,
    Street,
}

impl ParkingType {
    pub const ALL: [ParkingType; 4] = [
        ParkingType::Garage,
        ParkingType::Covered,
        ParkingType::Uncovered,
        ParkingType::Street,
    ];

    pub fn risk_increment(&self) -> i32 {
        match self {
            ParkingType::Garage => 0,
            ParkingType::Covered => 5,
            ParkingType::Uncovered => 15,
            ParkingType::Street => 20,
        }
    }

    fn factor(&self) -> &'static str {
        match self {
            ParkingType::Garage => "Garage parking keeps the paint out of sun and weather",
            ParkingType::Covered => "Covered parking still exposes the paint to airborne contaminants",
            ParkingType::Uncovered => {
                "Uncovered parking exposes the paint to UV, bird droppings and tree sap"
            }
            ParkingType::Street => {
                "Street parking adds door dings and road grime on top of full weather exposure"
            }
        }
    }
}

impl std::fmt::Display for ParkingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkingType::Garage => write!(f, "Garage"),
            ParkingType::Covered => write!(f, "Covered"),
            ParkingType::Uncovered => write!(f, "Uncovered"),
            ParkingType::Street => write!(f, "Street"),
        }
    }
}

/// How often the vehicle gets washed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum WashFrequency {
    Rarely,
    Monthly,
    Weekly,
}

impl WashFrequency {
    pub const ALL: [WashFrequency; 3] = [
        WashFrequency::Weekly,
        WashFrequency::Monthly,
        WashFrequency::Rarely,
    ];

    pub fn risk_increment(&self) -> i32 {
        match self {
            WashFrequency::Rarely => 15,
            WashFrequency::Monthly => 5,
            WashFrequency::Weekly => 0,
        }
    }

    fn factor(&self) -> Option<&'static str> {
        match self {
            WashFrequency::Rarely => {
                Some("Infrequent washing lets contaminants bond to and etch the clear coat")
            }
            WashFrequency::Monthly => {
                Some("Monthly washing leaves contaminants on the paint for weeks at a time")
            }
            WashFrequency::Weekly => None,
        }
    }
}

impl std::fmt::Display for WashFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WashFrequency::Rarely => write!(f, "Rarely"),
            WashFrequency::Monthly => write!(f, "Monthly"),
            WashFrequency::Weekly => write!(f, "Weekly"),
        }
    }
}

/// Kinds of visible paint damage the owner can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum DamageType {
    Swirls,
    Scratches,
    WaterSpots,
    Oxidation,
}

impl DamageType {
    pub const ALL: [DamageType; 4] = [
        DamageType::Swirls,
        DamageType::Scratches,
        DamageType::WaterSpots,
        DamageType::Oxidation,
    ];

    fn factor(&self) -> &'static str {
        match self {
            DamageType::Swirls => "Swirl marks are dulling the finish",
            DamageType::Scratches => "Scratches have cut into the clear coat",
            DamageType::WaterSpots => "Water spots are etching the surface",
            DamageType::Oxidation => "Oxidation is fading the paint",
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageType::Swirls => write!(f, "Swirl Marks"),
            DamageType::Scratches => write!(f, "Scratches"),
            DamageType::WaterSpots => write!(f, "Water Spots"),
            DamageType::Oxidation => write!(f, "Oxidation"),
        }
    }
}

pub const NO_DAMAGE_FACTOR: &str = "No visible paint damage reported";
pub const OXIDATION_URGENCY_NOTE: &str =
    "Oxidation detected - clear coat failure is progressing and needs prompt attention";
pub const VEHICLE_NOT_FOUND_FACTOR: &str =
    "Vehicle not found in our database - using an average risk profile";

/// Tiered label derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Moderate,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn from_score(score: i32) -> Self {
        if score > URGENCY_CRITICAL_ABOVE {
            UrgencyLevel::Critical
        } else if score > URGENCY_HIGH_ABOVE {
            UrgencyLevel::High
        } else {
            UrgencyLevel::Moderate
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyLevel::Moderate => write!(f, "Moderate"),
            UrgencyLevel::High => write!(f, "High"),
            UrgencyLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Make, model and year as the owner entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub make: String,
    pub model: String,
    pub year: String,
}

impl VehicleQuery {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year: year.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.make.trim().is_empty() && !self.model.trim().is_empty() && !self.year.trim().is_empty()
    }
}

impl std::fmt::Display for VehicleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

/// Everything the owner answered in the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInput {
    pub vehicle: VehicleQuery,
    pub parking: ParkingType,
    pub wash: WashFrequency,
    pub damage: BTreeSet<DamageType>,
}

/// The outcome of one analysis, recomputed wholesale on every submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAnalysis {
    pub vehicle: VehicleQuery,
    /// Whether the vehicle was found in the reference table
    pub matched: bool,
    /// Sum of all contributions before clamping
    pub raw_score: i32,
    /// Final score in `0..=MAX_SCORE`
    pub score: i32,
    pub urgency: UrgencyLevel,
    pub size: SizeCategory,
    pub size_multiplier: f64,
    pub monthly_loss: f64,
    pub yearly_loss: f64,
    pub five_year_loss: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub desired_look: Option<String>,
}

/// Score the risk of paint damage for the given answers.
///
/// Never fails: a vehicle missing from `table` gets no extra risk, a
/// `Sedan` size and an explanatory factor.
pub fn analyze(input: &RiskInput, table: &VehicleTable) -> RiskAnalysis {
    let mut raw_score = BASE_SCORE;
    let mut factors = Vec::new();

    let record = table.find(
        &input.vehicle.make,
        &input.vehicle.model,
        &input.vehicle.year,
    );
    match record {
        Some(record) => {
            raw_score += record.paint_risk;
            factors.push(match &record.note {
                Some(note) => note.clone(),
                None => format!(
                    "{} {} ({}) has a baseline paint risk of +{}",
                    record.make, record.model, record.year, record.paint_risk
                ),
            });
        }
        None => factors.push(VEHICLE_NOT_FOUND_FACTOR.to_string()),
    }

    if input.damage.is_empty() {
        factors.push(NO_DAMAGE_FACTOR.to_string());
    }
    for damage in &input.damage {
        raw_score += DAMAGE_INCREMENT;
        factors.push(damage.factor().to_string());
    }
    if input.damage.contains(&DamageType::Oxidation) {
        factors.push(OXIDATION_URGENCY_NOTE.to_string());
    }

    raw_score += input.parking.risk_increment();
    factors.push(input.parking.factor().to_string());

    raw_score += input.wash.risk_increment();
    if let Some(factor) = input.wash.factor() {
        factors.push(factor.to_string());
    }

    let score = raw_score.clamp(0, MAX_SCORE);

    let size = record.map(|r| r.size.clone()).unwrap_or_default();
    let size_multiplier = size.multiplier();
    let monthly_loss = monthly_loss(score, size_multiplier);
    let yearly_loss = monthly_loss * 12.;
    let five_year_loss = yearly_loss * 5.;

    let desired_look = record.and_then(|r| r.desired_look.clone());
    let mut recommendations = recommendations_for(&size);
    if let Some(look) = &desired_look {
        recommendations.push(format!(
            "Finish with a correction and coating package tuned for a {} look",
            look
        ));
    }

    RiskAnalysis {
        vehicle: input.vehicle.clone(),
        matched: record.is_some(),
        raw_score,
        score,
        urgency: UrgencyLevel::from_score(score),
        size,
        size_multiplier,
        monthly_loss,
        yearly_loss,
        five_year_loss,
        factors,
        recommendations,
        desired_look,
    }
}

/// Estimated value lost per month for a score, in dollars.
///
/// A score of 100 would cost $100 a month on a sedan, so the score maps to
/// dollars one to one before the size multiplier.
pub fn monthly_loss(score: i32, size_multiplier: f64) -> f64 {
    f64::from(score) * size_multiplier
}
