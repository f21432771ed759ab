use egui::{Button, Color32, Grid, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot};

use paintrisk::RiskAnalysis;
use paintrisk::risk::MAX_SCORE;

use super::{PALETTE_ORANGE, PALETTE_STEEL, PaintRiskApp, urgency_color};

const CHART_HEIGHT: f32 = 160.;

fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

impl PaintRiskApp {
    pub(super) fn results_step(&mut self, ui: &mut Ui) {
        let Some(analysis) = self.wizard.result().cloned() else {
            // Results without an analysis only happen if the form was reset
            // underneath us, start again from the first question
            self.wizard.restart(&self.table);
            return;
        };

        ScrollArea::vertical()
            .id_salt("results_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                show_score(ui, &analysis);
                ui.add_space(12.);
                show_losses(ui, &analysis);
                ui.add_space(12.);
                ui.separator();
                show_list(ui, "What drives your score", &analysis.factors);
                ui.add_space(8.);
                show_list(ui, "What we recommend", &analysis.recommendations);
                ui.add_space(16.);

                ui.horizontal(|ui| {
                    if ui.button("Edit answers").clicked() {
                        self.wizard.back();
                    }
                    let restart =
                        Button::new(RichText::new("Start over").color(Color32::WHITE))
                            .fill(PALETTE_ORANGE);
                    if ui.add(restart).clicked() {
                        self.wizard.restart(&self.table);
                    }
                });
            });
    }
}

fn show_score(ui: &mut Ui, analysis: &RiskAnalysis) {
    ui.label(
        RichText::new(analysis.vehicle.to_string())
            .size(14.)
            .color(Color32::GRAY),
    );
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{}", analysis.score))
                .size(48.)
                .strong()
                .color(urgency_color(analysis.urgency)),
        );
        ui.vertical(|ui| {
            ui.label(RichText::new(format!("/ {}", MAX_SCORE)).color(Color32::GRAY));
            ui.label(
                RichText::new(format!("{} urgency", analysis.urgency))
                    .strong()
                    .color(urgency_color(analysis.urgency)),
            );
        });
    });
    if !analysis.matched {
        ui.label(
            RichText::new("We don't have data for this exact vehicle yet")
                .italics()
                .size(12.)
                .color(Color32::GRAY),
        );
    }
}

fn show_losses(ui: &mut Ui, analysis: &RiskAnalysis) {
    ui.label(RichText::new("Projected value loss").strong().size(14.));
    ui.add_space(6.);
    Grid::new("loss_grid").num_columns(2).spacing([24., 4.]).show(ui, |ui| {
        ui.label("Size category");
        ui.label(format!(
            "{} (x{:.1})",
            analysis.size, analysis.size_multiplier
        ));
        ui.end_row();
        ui.label("Per month");
        ui.label(RichText::new(dollars(analysis.monthly_loss)).color(Color32::WHITE));
        ui.end_row();
        ui.label("Per year");
        ui.label(RichText::new(dollars(analysis.yearly_loss)).color(Color32::WHITE));
        ui.end_row();
        ui.label("Over 5 years");
        ui.label(
            RichText::new(dollars(analysis.five_year_loss))
                .strong()
                .color(PALETTE_ORANGE),
        );
        ui.end_row();
    });

    ui.add_space(8.);
    let bars = vec![
        Bar::new(0., analysis.monthly_loss).name("Month"),
        Bar::new(1., analysis.yearly_loss).name("Year"),
        Bar::new(2., analysis.five_year_loss).name("5 years"),
    ];
    Plot::new("loss_projection")
        .height(CHART_HEIGHT)
        .show_background(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_y(0.)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new("Projected loss", bars)
                    .color(PALETTE_STEEL)
                    .width(0.6),
            );
        });
}

fn show_list(ui: &mut Ui, title: &str, items: &[String]) {
    ui.label(RichText::new(title).strong().size(14.));
    ui.add_space(6.);
    for item in items {
        ui.horizontal(|ui| {
            ui.label("•");
            ui.label(RichText::new(item).color(Color32::WHITE));
        });
    }
}
