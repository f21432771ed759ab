use crate::vehicles::SizeCategory;

/// Canned care recommendations for a vehicle size.
///
/// Larger bodies get the more involved services first since there is more
/// surface to correct. Unrecognized categories get the sedan list.
pub fn recommendations_for(size: &SizeCategory) -> Vec<String> {
    let recommendations: &[&str] = match size {
        SizeCategory::Compact => &[
            "Single-stage paint correction to remove light swirls",
            "Ceramic coating on hood and roof where UV exposure is highest",
            "Quarterly hand wash and sealant top-up",
        ],
        SizeCategory::Sedan | SizeCategory::Other(_) => &[
            "Two-stage paint correction to restore gloss",
            "Full-body ceramic coating for long-term protection",
            "Paint protection film on the front bumper and mirrors",
            "Maintenance wash every two weeks with a pH-neutral shampoo",
        ],
        SizeCategory::Suv => &[
            "Two-stage paint correction across large flat panels",
            "Full-body ceramic coating including roof and tailgate",
            "Paint protection film on the front end and rear loading edge",
            "Iron decontamination every six months",
        ],
        SizeCategory::Truck => &[
            "Heavy-cut paint correction for road debris marring",
            "Ceramic coating rated for commercial use",
            "Paint protection film on the front end, rockers and bed rails",
            "Undercarriage and wheel-well rinse after every trip on treated roads",
        ],
        SizeCategory::LargeSedan => &[
            "Multi-stage paint correction for a show-quality finish",
            "Premium ceramic coating with a multi-year warranty",
            "Full-front paint protection film",
            "Professional maintenance detail every month",
        ],
    };
    recommendations.iter().map(|r| r.to_string()).collect()
}
