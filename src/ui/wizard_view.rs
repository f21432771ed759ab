use std::time::Instant;

use egui::{Button, Color32, Frame, ProgressBar, RichText, ScrollArea, TextEdit, Ui};

use paintrisk::{DamageType, ParkingType, SuggestionField, WashFrequency};

use super::{PALETTE_ORANGE, PALETTE_STEEL, PaintRiskApp};

const FIELD_WIDTH: f32 = 280.;
const SUGGESTION_LIST_HEIGHT: f32 = 160.;

fn question(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.add_space(10.);
    ui.heading(RichText::new(title).color(Color32::WHITE));
    ui.label(RichText::new(subtitle).size(12.).color(Color32::GRAY));
    ui.add_space(14.);
}

fn parking_description(parking: ParkingType) -> &'static str {
    match parking {
        ParkingType::Garage => "Enclosed garage at home or work",
        ParkingType::Covered => "Carport or parking structure",
        ParkingType::Uncovered => "Driveway or open lot",
        ParkingType::Street => "On the street most nights",
    }
}

fn wash_description(wash: WashFrequency) -> &'static str {
    match wash {
        WashFrequency::Weekly => "Every week or more often",
        WashFrequency::Monthly => "About once a month",
        WashFrequency::Rarely => "A few times a year or less",
    }
}

impl PaintRiskApp {
    pub(super) fn vehicle_step(&mut self, ui: &mut Ui) {
        question(
            ui,
            "What do you drive?",
            "Start typing and pick your vehicle from the suggestions",
        );
        for field in SuggestionField::ALL {
            self.suggestion_field(ui, field);
            ui.add_space(8.);
        }
        self.navigation(ui);
    }

    /// Text input with its cascading suggestion popup underneath.
    fn suggestion_field(&mut self, ui: &mut Ui, field: SuggestionField) {
        let enabled = match field {
            SuggestionField::Make => true,
            SuggestionField::Model => !self.wizard.suggestions.value(SuggestionField::Make).is_empty(),
            SuggestionField::Year => !self.wizard.suggestions.value(SuggestionField::Model).is_empty(),
        };

        ui.label(RichText::new(field.to_string()).color(Color32::WHITE));
        let mut text = self.wizard.suggestions.value(field).to_string();
        let response = ui.add_enabled(
            enabled,
            TextEdit::singleline(&mut text)
                .hint_text(format!("Start typing a {}", field.to_string().to_lowercase()))
                .desired_width(FIELD_WIDTH),
        );

        if response.gained_focus() {
            self.wizard.suggestions.focus(field);
        }
        if response.changed() {
            self.wizard.suggestions.set_text(field, text, &self.table);
        }
        if response.lost_focus() {
            self.wizard.suggestions.blur(field, Instant::now());
        }

        let list = self.wizard.suggestions.list(field);
        if !list.is_visible() || list.candidates().is_empty() {
            return;
        }

        let mut clicked: Option<String> = None;
        Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(FIELD_WIDTH);
            ScrollArea::vertical()
                .id_salt(format!("{}_suggestions", field))
                .max_height(SUGGESTION_LIST_HEIGHT)
                .show(ui, |ui| {
                    for candidate in list.candidates() {
                        if ui.selectable_label(false, candidate).clicked() {
                            clicked = Some(candidate.clone());
                        }
                    }
                });
        });

        if let Some(value) = clicked {
            self.wizard.suggestions.select(field, value, &self.table);
        }
    }

    pub(super) fn parking_step(&mut self, ui: &mut Ui) {
        question(
            ui,
            "Where is it parked?",
            "Think about where the car spends most nights",
        );
        for parking in ParkingType::ALL {
            ui.radio_value(
                &mut self.wizard.parking,
                Some(parking),
                RichText::new(parking.to_string()).color(Color32::WHITE),
            );
            ui.label(
                RichText::new(parking_description(parking))
                    .size(12.)
                    .color(Color32::GRAY),
            );
            ui.add_space(6.);
        }
        self.navigation(ui);
    }

    pub(super) fn washing_step(&mut self, ui: &mut Ui) {
        question(ui, "How often is it washed?", "Include automatic and hand washes");
        for wash in WashFrequency::ALL {
            ui.radio_value(
                &mut self.wizard.wash,
                Some(wash),
                RichText::new(wash.to_string()).color(Color32::WHITE),
            );
            ui.label(
                RichText::new(wash_description(wash))
                    .size(12.)
                    .color(Color32::GRAY),
            );
            ui.add_space(6.);
        }
        self.navigation(ui);
    }

    pub(super) fn damage_step(&mut self, ui: &mut Ui) {
        question(
            ui,
            "What do you see on the paint today?",
            "Select everything that applies, or nothing if the paint looks perfect",
        );
        for damage in DamageType::ALL {
            let mut checked = self.wizard.has_damage(damage);
            if ui
                .checkbox(
                    &mut checked,
                    RichText::new(damage.to_string()).color(Color32::WHITE),
                )
                .changed()
            {
                self.wizard.toggle_damage(damage);
            }
            ui.add_space(4.);
        }
        self.navigation(ui);
    }

    pub(super) fn analyzing_step(&mut self, ui: &mut Ui, now: Instant) {
        let delay = self.app_config.analysis_delay().as_secs_f32();
        let remaining = self
            .wizard
            .remaining(now)
            .map(|r| r.as_secs_f32())
            .unwrap_or(0.);
        let progress = if delay > 0. {
            1. - remaining / delay
        } else {
            1.
        };

        ui.vertical_centered(|ui| {
            ui.add_space(60.);
            ui.spinner();
            ui.add_space(12.);
            ui.label(
                RichText::new("Analyzing your paint…")
                    .size(16.)
                    .color(Color32::WHITE),
            );
            ui.add_space(12.);
            ui.add(
                ProgressBar::new(progress.clamp(0., 1.))
                    .fill(PALETTE_STEEL)
                    .desired_width(FIELD_WIDTH),
            );
        });
    }

    /// Back / Next buttons shared by every question page.
    fn navigation(&mut self, ui: &mut Ui) {
        ui.add_space(18.);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.wizard.step().index() > 0, Button::new("Back"))
                .clicked()
            {
                self.wizard.back();
            }

            let is_last = self.wizard.step() == paintrisk::WizardStep::Damage;
            let label = if is_last { "Analyze" } else { "Next" };
            let button = Button::new(RichText::new(label).color(Color32::WHITE)).fill(PALETTE_ORANGE);
            if ui.add_enabled(self.wizard.can_advance(), button).clicked() {
                if is_last {
                    self.wizard.submit(Instant::now());
                } else {
                    self.wizard.next();
                }
            }
        });
    }
}
