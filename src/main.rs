mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use egui::Vec2;
use log::info;
use paintrisk::{
    AppConfig, DamageType, PaintRiskError, ParkingType, RiskAnalysis, RiskInput, SuggestionList,
    VehicleQuery, VehicleTable, WashFrequency, analyze,
};
use ui::PaintRiskApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the questionnaire window
    Wizard {
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
    /// Score a vehicle without opening a window
    Score {
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: String,
        #[arg(long, value_enum)]
        parking: ParkingType,
        #[arg(long, value_enum)]
        wash: WashFrequency,
        #[arg(long, value_enum, value_delimiter = ',')]
        damage: Vec<DamageType>,
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// List the suggestions a field would show for a prefix
    Suggest {
        #[arg(value_enum)]
        field: FieldArg,
        #[arg(default_value = "")]
        prefix: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    Make,
    Model,
    Year,
}

fn load_table(dataset: Option<PathBuf>, app_config: &AppConfig) -> VehicleTable {
    match dataset.or_else(|| app_config.dataset_path.clone()) {
        Some(path) => VehicleTable::load_or_empty(&path),
        None => VehicleTable::builtin(),
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, PaintRiskError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PaintRiskError::InvalidUserInput {
            field: field.to_string(),
            reason: format!("--{} is required for this field", field),
        })
}

fn wizard(dataset: Option<PathBuf>, mut app_config: AppConfig) -> Result<(), PaintRiskError> {
    if dataset.is_some() {
        app_config.dataset_path = dataset;
    }

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(520., 640.))
        .with_min_inner_size(Vec2::new(420., 480.));
    if let Some(position) = app_config.window_position.clone() {
        native_options.viewport = native_options.viewport.with_position(position);
    }

    eframe::run_native(
        "Paint Risk Check",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintRiskApp::new(app_config, cc)))),
    )
    .map_err(|e| PaintRiskError::WindowError {
        description: e.to_string(),
    })
}

fn print_analysis(analysis: &RiskAnalysis) {
    let matched = if analysis.matched {
        "in database"
    } else {
        "not in database"
    };
    println!("{} ({})", analysis.vehicle, matched);
    println!(
        "Risk score: {}/{} ({} urgency)",
        analysis.score,
        paintrisk::risk::MAX_SCORE,
        analysis.urgency
    );
    println!(
        "Size: {} (x{:.1})",
        analysis.size, analysis.size_multiplier
    );
    println!("Monthly loss: ${:.2}", analysis.monthly_loss);
    println!("Yearly loss: ${:.2}", analysis.yearly_loss);
    println!("5-year loss: ${:.2}", analysis.five_year_loss);
    println!();
    println!("Factors:");
    for factor in &analysis.factors {
        println!("  - {}", factor);
    }
    println!("Recommendations:");
    for recommendation in &analysis.recommendations {
        println!("  - {}", recommendation);
    }
}

fn score(
    vehicle: VehicleQuery,
    parking: ParkingType,
    wash: WashFrequency,
    damage: Vec<DamageType>,
    dataset: Option<PathBuf>,
    json: bool,
    app_config: &AppConfig,
) -> Result<(), PaintRiskError> {
    if !vehicle.is_complete() {
        return Err(PaintRiskError::InvalidUserInput {
            field: "vehicle".to_string(),
            reason: "make, model and year must not be empty".to_string(),
        });
    }

    let table = load_table(dataset, app_config);
    let input = RiskInput {
        vehicle,
        parking,
        wash,
        damage: damage.into_iter().collect(),
    };
    let analysis = analyze(&input, &table);
    info!("Scored {} at {}", analysis.vehicle, analysis.score);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis)
                .map_err(|e| PaintRiskError::OutputSerializeError { source: e })?
        );
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn suggest(
    field: FieldArg,
    prefix: &str,
    make: &Option<String>,
    model: &Option<String>,
    dataset: Option<PathBuf>,
    app_config: &AppConfig,
) -> Result<(), PaintRiskError> {
    let table = load_table(dataset, app_config);
    let all = match field {
        FieldArg::Make => table.makes(),
        FieldArg::Model => table.models(required(make, "make")?),
        FieldArg::Year => table.years(required(make, "make")?, required(model, "model")?),
    };

    let mut list = SuggestionList::new(all);
    let selected = list.on_input("", prefix);
    for candidate in list.candidates() {
        let marker = if selected.as_ref() == Some(candidate) {
            " (auto-selected)"
        } else {
            ""
        };
        println!("{}{}", candidate, marker);
    }
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let app_config = AppConfig::from_local_file().unwrap_or_default();
    let result = match cli.command {
        None => wizard(None, app_config),
        Some(Commands::Wizard { dataset }) => wizard(dataset, app_config),
        Some(Commands::Score {
            make,
            model,
            year,
            parking,
            wash,
            damage,
            dataset,
            json,
        }) => score(
            VehicleQuery::new(make, model, year),
            parking,
            wash,
            damage,
            dataset,
            json,
            &app_config,
        ),
        Some(Commands::Suggest {
            field,
            prefix,
            make,
            model,
            dataset,
        }) => suggest(field, &prefix, &make, &model, dataset, &app_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
