mod results_view;
mod wizard_view;

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use egui::{
    Align, Color32, CornerRadius, Frame, Layout, Margin, ProgressBar, RichText, Visuals,
    style::Widgets,
};
use log::{error, info};

use paintrisk::vehicles::spawn_table_loader;
use paintrisk::{AppConfig, UrgencyLevel, VehicleTable, Wizard, WizardStep};

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_NAVY: Color32 = Color32::from_rgb(18, 28, 46);
pub(crate) const PALETTE_STEEL: Color32 = Color32::from_rgb(52, 86, 128);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);

const DEFAULT_CORNER_RADIUS: u8 = 10;
const TIMER_REPAINT: Duration = Duration::from_millis(50);

pub(crate) fn urgency_color(urgency: UrgencyLevel) -> Color32 {
    match urgency {
        UrgencyLevel::Moderate => Color32::from_rgb(242, 201, 76),
        UrgencyLevel::High => PALETTE_ORANGE,
        UrgencyLevel::Critical => Color32::from_rgb(220, 38, 38),
    }
}

/// Desktop front-end for the paint risk questionnaire.
///
/// Owns the vehicle table and the wizard state for the session. The table
/// arrives from a loader thread after start-up; until then the suggestion
/// lists are empty and any vehicle is scored as unrecognized.
pub struct PaintRiskApp {
    app_config: AppConfig,
    table: VehicleTable,
    table_receiver: Option<Receiver<VehicleTable>>,
    wizard: Wizard,
}

impl PaintRiskApp {
    pub fn new(app_config: AppConfig, cc: &eframe::CreationContext<'_>) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_STEEL,
            faint_bg_color: PALETTE_BLACK,
            extreme_bg_color: PALETTE_NAVY,
            panel_fill: PALETTE_BLACK,
            window_fill: PALETTE_NAVY,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: false,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let table = VehicleTable::empty();
        let wizard = Wizard::new(
            &table,
            app_config.analysis_delay(),
            app_config.suggestion_hide_delay(),
        );
        let table_receiver = Some(spawn_table_loader(app_config.dataset_path.clone()));

        Self {
            app_config,
            table,
            table_receiver,
            wizard,
        }
    }

    fn receive_table(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.table_receiver else {
            return;
        };
        match receiver.try_recv() {
            Ok(table) => {
                info!("Vehicle dataset ready with {} vehicles", table.len());
                self.table = table;
                self.wizard.suggestions.reload(&self.table);
                self.table_receiver = None;
            }
            Err(TryRecvError::Empty) => ctx.request_repaint_after(TIMER_REPAINT),
            Err(TryRecvError::Disconnected) => {
                error!("Vehicle dataset loader stopped without delivering a table");
                self.table_receiver = None;
            }
        }
    }

    fn load_dataset(&mut self, path: PathBuf) {
        info!("Loading vehicle dataset from {:?}", path);
        self.table_receiver = Some(spawn_table_loader(Some(path.clone())));
        self.app_config.dataset_path = Some(path);
        if let Err(e) = self.app_config.save() {
            error!("Failed to save config after choosing a dataset: {}", e);
        }
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            ui.heading(RichText::new("Paint Risk Check").color(Color32::WHITE));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("📂 Load dataset…").clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("Vehicle dataset", &["json", "jsonl"])
                        .pick_file()
                {
                    self.load_dataset(path);
                }
                if self.table_receiver.is_some() {
                    ui.spinner();
                    ui.label(RichText::new("Loading vehicles").color(Color32::GRAY));
                } else {
                    ui.label(
                        RichText::new(format!("{} vehicles", self.table.len()))
                            .color(Color32::GRAY),
                    );
                }
            });
        });

        let step = self.wizard.step();
        if step.index() < WizardStep::QUESTION_COUNT {
            ui.add_space(6.);
            ui.add(
                ProgressBar::new(step.index() as f32 / WizardStep::QUESTION_COUNT as f32)
                    .fill(PALETTE_STEEL)
                    .text(format!(
                        "Step {} of {} - {}",
                        step.index() + 1,
                        WizardStep::QUESTION_COUNT,
                        step
                    )),
            );
        }
    }
}

impl eframe::App for PaintRiskApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_table(ctx);

        let now = Instant::now();
        if self.wizard.suggestions.tick(now) {
            ctx.request_repaint_after(TIMER_REPAINT);
        }
        self.wizard.poll(now, &self.table);
        if let Some(remaining) = self.wizard.remaining(now) {
            ctx.request_repaint_after(remaining.min(TIMER_REPAINT));
        }

        if let Some(outer_rect) = ctx.input(|is| is.viewport().outer_rect) {
            self.app_config.window_position = Some(outer_rect.min.into());
        }

        egui::TopBottomPanel::top("wizard_header")
            .frame(
                Frame::new()
                    .fill(PALETTE_NAVY)
                    .inner_margin(Margin::same(12))
                    .corner_radius(CornerRadius {
                        sw: DEFAULT_CORNER_RADIUS,
                        se: DEFAULT_CORNER_RADIUS,
                        ..Default::default()
                    }),
            )
            .show(ctx, |ui| self.header(ui));

        egui::CentralPanel::default()
            .frame(Frame::new().fill(PALETTE_BLACK).inner_margin(Margin::same(16)))
            .show(ctx, |ui| match self.wizard.step() {
                WizardStep::Vehicle => self.vehicle_step(ui),
                WizardStep::Parking => self.parking_step(ui),
                WizardStep::Washing => self.washing_step(ui),
                WizardStep::Damage => self.damage_step(ui),
                WizardStep::Analyzing => self.analyzing_step(ui, now),
                WizardStep::Results => self.results_step(ui),
            });
    }
}
