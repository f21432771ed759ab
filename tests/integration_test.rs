// Integration tests for the paint risk questionnaire
//
// These exercise the complete flow against the built-in vehicle dataset:
// 1. Load the dataset (built-in, from disk, or failing)
// 2. Walk the cascading make/model/year suggestions
// 3. Answer the remaining questions and submit
// 4. Verify the analysis matches the dataset entry and the scoring rules

use std::io::Write;
use std::time::{Duration, Instant};

use paintrisk::risk::{NO_DAMAGE_FACTOR, OXIDATION_URGENCY_NOTE, VEHICLE_NOT_FOUND_FACTOR};
use paintrisk::suggest::DEFAULT_HIDE_DELAY;
use paintrisk::vehicles::spawn_table_loader;
use paintrisk::{
    DamageType, ParkingType, RiskInput, SizeCategory, SuggestionField, UrgencyLevel,
    VehicleQuery, VehicleTable, WashFrequency, Wizard, WizardStep, analyze,
};

/// Helper to type a string into a field one character at a time, the way
/// the window feeds keystrokes
fn type_into(wizard: &mut Wizard, table: &VehicleTable, field: SuggestionField, text: &str) {
    let mut typed = String::new();
    for c in text.chars() {
        typed.push(c);
        if wizard
            .suggestions
            .set_text(field, typed.clone(), table)
            .is_some()
        {
            return;
        }
    }
}

#[test]
fn test_builtin_dataset_is_well_formed() {
    let table = VehicleTable::builtin();
    assert!(table.len() > 20);

    for record in table.records() {
        assert!(!record.make.is_empty());
        assert!(!record.model.is_empty());
        assert!(
            record.year.parse::<u16>().is_ok(),
            "{} {} has a bad year {:?}",
            record.make,
            record.model,
            record.year
        );
        assert!(
            record.size.is_recognized(),
            "{} {} has an unrecognized size {}",
            record.make,
            record.model,
            record.size
        );
    }
}

#[test]
fn test_full_questionnaire_against_builtin_dataset() {
    let table = VehicleTable::builtin();
    let record = table.find("Honda", "Civic", "2019").unwrap().clone();
    let mut wizard = Wizard::new(&table, Duration::from_millis(300), DEFAULT_HIDE_DELAY);

    type_into(&mut wizard, &table, SuggestionField::Make, "Hon");
    assert_eq!(wizard.suggestions.value(SuggestionField::Make), "Honda");
    assert!(
        wizard
            .suggestions
            .list(SuggestionField::Model)
            .candidates()
            .contains(&"Civic".to_string())
    );

    type_into(&mut wizard, &table, SuggestionField::Model, "Ci");
    assert_eq!(wizard.suggestions.value(SuggestionField::Model), "Civic");

    type_into(&mut wizard, &table, SuggestionField::Year, "2019");
    assert_eq!(wizard.suggestions.value(SuggestionField::Year), "2019");
    assert!(wizard.next());

    wizard.parking = Some(ParkingType::Uncovered);
    assert!(wizard.next());
    wizard.wash = Some(WashFrequency::Monthly);
    assert!(wizard.next());
    wizard.toggle_damage(DamageType::Swirls);
    wizard.toggle_damage(DamageType::WaterSpots);

    let start = Instant::now();
    assert!(wizard.submit(start));
    assert!(!wizard.poll(start, &table));
    assert!(wizard.poll(start + Duration::from_millis(300), &table));
    assert_eq!(wizard.step(), WizardStep::Results);

    let analysis = wizard.result().unwrap();
    let expected = 30 + record.paint_risk + 10 + 15 + 5;
    assert!(analysis.matched);
    assert_eq!(analysis.score, expected);
    assert_eq!(analysis.size, SizeCategory::Compact);
    assert_eq!(analysis.monthly_loss, expected as f64 * 0.8);
    assert_eq!(analysis.five_year_loss, analysis.monthly_loss * 12. * 5.);
    assert_eq!(analysis.urgency, UrgencyLevel::from_score(expected));
    assert_eq!(analysis.factors[0], record.note.unwrap());
}

#[test]
fn test_unknown_vehicle_example() {
    let table = VehicleTable::builtin();
    let input = RiskInput {
        vehicle: VehicleQuery::new("Yugo", "GV", "1987"),
        parking: ParkingType::Street,
        wash: WashFrequency::Rarely,
        damage: [DamageType::Scratches].into_iter().collect(),
    };

    let analysis = analyze(&input, &table);
    assert!(!analysis.matched);
    assert_eq!(analysis.raw_score, 70);
    assert_eq!(analysis.score, 70);
    assert_eq!(analysis.size_multiplier, 1.0);
    assert_eq!(analysis.urgency, UrgencyLevel::High);
    assert_eq!(analysis.monthly_loss, 70.0);
    assert!(analysis.factors.contains(&VEHICLE_NOT_FOUND_FACTOR.to_string()));
}

#[test]
fn test_failed_dataset_load_degrades_to_unmatched() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(file, "{{\"not\": \"an array\"}}").unwrap();
    file.flush().unwrap();

    let table = spawn_table_loader(Some(file.path().to_path_buf()))
        .recv()
        .unwrap();
    assert!(table.is_empty());

    let mut wizard = Wizard::new(&table, Duration::ZERO, DEFAULT_HIDE_DELAY);
    assert!(wizard.suggestions.list(SuggestionField::Make).candidates().is_empty());
    for (field, value) in [
        (SuggestionField::Make, "Honda"),
        (SuggestionField::Model, "Civic"),
        (SuggestionField::Year, "2019"),
    ] {
        wizard.suggestions.set_text(field, value.to_string(), &table);
    }
    wizard.next();
    wizard.parking = Some(ParkingType::Garage);
    wizard.next();
    wizard.wash = Some(WashFrequency::Weekly);
    wizard.next();
    wizard.toggle_damage(DamageType::Oxidation);

    let now = Instant::now();
    assert!(wizard.submit(now));
    assert!(wizard.poll(now, &table));

    let analysis = wizard.result().unwrap();
    assert!(!analysis.matched);
    assert_eq!(analysis.score, 35);
    assert_eq!(analysis.urgency, UrgencyLevel::Moderate);
    assert!(analysis.factors.contains(&OXIDATION_URGENCY_NOTE.to_string()));
    assert!(!analysis.factors.contains(&NO_DAMAGE_FACTOR.to_string()));
}

#[test]
fn test_json_lines_dataset_drives_suggestions() {
    let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
    for line in [
        r#"{"make":"BMW","model":"M3","year":"2021","paintRisk":12,"size":"Sedan"}"#,
        r#"{"make":"Buick","model":"Regal","year":"2018","paintRisk":8,"size":"Large Sedan","desiredLook":"Mirror Finish"}"#,
    ] {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();

    let table = VehicleTable::load(file.path()).unwrap();
    let mut wizard = Wizard::new(&table, Duration::ZERO, DEFAULT_HIDE_DELAY);

    wizard
        .suggestions
        .set_text(SuggestionField::Make, "B".to_string(), &table);
    assert_eq!(
        wizard.suggestions.list(SuggestionField::Make).candidates(),
        ["BMW", "Buick"]
    );
    let selected = wizard
        .suggestions
        .set_text(SuggestionField::Make, "Bu".to_string(), &table);
    assert_eq!(selected.as_deref(), Some("Buick"));
    assert_eq!(
        wizard.suggestions.list(SuggestionField::Model).candidates(),
        ["Regal"]
    );

    let analysis = analyze(
        &RiskInput {
            vehicle: VehicleQuery::new("Buick", "Regal", "2018"),
            parking: ParkingType::Covered,
            wash: WashFrequency::Weekly,
            damage: Default::default(),
        },
        &table,
    );
    assert_eq!(analysis.score, 43);
    assert_eq!(analysis.size_multiplier, 1.2);
    assert!(
        analysis
            .recommendations
            .iter()
            .any(|r| r.contains("Mirror Finish"))
    );
}
