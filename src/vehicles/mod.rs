// Vehicle reference data
// Provides the immutable vehicle records the risk score is looked up from,
// and the table that holds them for the lifetime of a session

pub mod table;

pub use table::{VehicleTable, spawn_table_loader};

use serde::{Deserialize, Serialize};

/// Body size of a vehicle, used to scale the cost of paint correction.
///
/// Larger vehicles have more painted surface, so the same risk score costs
/// more to fix. Categories that the dataset spells differently are kept as
/// `Other` and priced like a sedan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizeCategory {
    Compact,
    #[default]
    Sedan,
    Suv,
    Truck,
    LargeSedan,
    Other(String),
}

impl SizeCategory {
    /// Cost multiplier applied to the monthly loss estimate.
    pub fn multiplier(&self) -> f64 {
        match self {
            SizeCategory::Compact => 0.8,
            SizeCategory::Sedan => 1.0,
            SizeCategory::Suv => 1.3,
            SizeCategory::Truck => 1.4,
            SizeCategory::LargeSedan => 1.2,
            SizeCategory::Other(_) => 1.0,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SizeCategory::Other(_))
    }
}

impl From<String> for SizeCategory {
    fn from(value: String) -> Self {
        match value.trim() {
            "Compact" => SizeCategory::Compact,
            "Sedan" => SizeCategory::Sedan,
            "SUV" => SizeCategory::Suv,
            "Truck" => SizeCategory::Truck,
            "Large Sedan" => SizeCategory::LargeSedan,
            other => SizeCategory::Other(other.to_string()),
        }
    }
}

impl From<SizeCategory> for String {
    fn from(value: SizeCategory) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeCategory::Compact => write!(f, "Compact"),
            SizeCategory::Sedan => write!(f, "Sedan"),
            SizeCategory::Suv => write!(f, "SUV"),
            SizeCategory::Truck => write!(f, "Truck"),
            SizeCategory::LargeSedan => write!(f, "Large Sedan"),
            SizeCategory::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A single row of the vehicle reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub year: String,
    /// Points added to the base risk score for this vehicle
    pub paint_risk: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub size: SizeCategory,
    /// Finish the owner of this vehicle usually asks for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_look: Option<String>,
}

impl VehicleRecord {
    pub(crate) fn matches(&self, make: &str, model: &str, year: &str) -> bool {
        self.make.eq_ignore_ascii_case(make.trim())
            && self.model.eq_ignore_ascii_case(model.trim())
            && self.year.trim() == year.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_category_labels_round_trip() {
        for label in ["Compact", "Sedan", "SUV", "Truck", "Large Sedan"] {
            let category = SizeCategory::from(label.to_string());
            assert!(category.is_recognized(), "{} should be recognized", label);
            assert_eq!(category.to_string(), label);
        }
    }

    #[test]
    fn test_unrecognized_size_uses_default_multiplier() {
        let category = SizeCategory::from("Minivan".to_string());
        assert_eq!(category, SizeCategory::Other("Minivan".to_string()));
        assert_eq!(category.multiplier(), 1.0);
        assert_eq!(category.to_string(), "Minivan");
    }

    #[test]
    fn test_record_deserializes_camel_case_fields() {
        let record: VehicleRecord = serde_json::from_str(
            r#"{"make":"BMW","model":"X5","year":"2021","paintRisk":14,"size":"SUV","desiredLook":"Satin Finish"}"#,
        )
        .unwrap();
        assert_eq!(record.paint_risk, 14);
        assert_eq!(record.size, SizeCategory::Suv);
        assert_eq!(record.note, None);
        assert_eq!(record.desired_look.as_deref(), Some("Satin Finish"));
    }

    #[test]
    fn test_record_matching_ignores_case_and_whitespace() {
        let record = VehicleRecord {
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: "2019".to_string(),
            paint_risk: 11,
            note: None,
            size: SizeCategory::Compact,
            desired_look: None,
        };
        assert!(record.matches(" honda", "CIVIC ", "2019"));
        assert!(!record.matches("Honda", "Civic", "2020"));
        assert!(!record.matches("Honda", "Accord", "2019"));
    }
}
