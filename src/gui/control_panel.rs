//! Control Panel Widget
//! Left side panel with the view selectors and branch-specific controls.

use crate::data::{DataProcessor, HourRange, OffenseFilter, MAX_HOUR};
use crate::stats::{DistrictSelection, ALL_DISTRICTS};
use crate::view::{LocationView, Section, TimeView, ViewOutput, ViewRequest, ViewSelection};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Current widget values.
#[derive(Clone, Debug)]
pub struct UserSettings {
    pub section: Section,
    pub location_view: LocationView,
    pub time_view: TimeView,
    /// `None` means every offense type. `Some("")` is the blank category.
    pub offense: Option<String>,
    pub hour_lo: u8,
    pub hour_hi: u8,
    /// District selector entries, in the order they were picked.
    pub districts: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            section: Section::None,
            location_view: LocationView::None,
            time_view: TimeView::None,
            offense: None,
            hour_lo: 0,
            hour_hi: MAX_HOUR,
            districts: vec![ALL_DISTRICTS.to_string()],
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Build the pipeline request from the widget values.
    pub fn request(&self) -> ViewRequest {
        let settings = &self.settings;

        let offense = match &settings.offense {
            None => OffenseFilter::Any,
            Some(label) => OffenseFilter::Only(label.clone()),
        };

        let hours = HourRange::new(settings.hour_lo, settings.hour_hi).unwrap_or_else(|e| {
            log::warn!("{e}; using the full day");
            HourRange::default()
        });

        ViewRequest {
            selection: ViewSelection::new(
                settings.section,
                settings.location_view,
                settings.time_view,
            ),
            offense,
            hours,
            districts: DistrictSelection::from_choices(&settings.districts),
        }
    }

    /// Keep `lo <= hi` by moving whichever end the user did not drag.
    pub fn clamp_hours(lo: u8, hi: u8, lo_moved: bool) -> (u8, u8) {
        let lo = lo.min(MAX_HOUR);
        let hi = hi.min(MAX_HOUR);
        if lo <= hi {
            (lo, hi)
        } else if lo_moved {
            (lo, lo)
        } else {
            (hi, hi)
        }
    }

    /// Draw the control panel. `output` supplies the option lists that depend
    /// on the dataset.
    pub fn show(&mut self, ui: &mut egui::Ui, output: &ViewOutput) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚓 Crime Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Top-level Section =====
        ui.label(
            RichText::new("What information would you like to access?")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        ComboBox::from_id_salt("section")
            .width(220.0)
            .selected_text(Self::option_text(self.settings.section.label()))
            .show_ui(ui, |ui| {
                for section in Section::ALL {
                    ui.selectable_value(
                        &mut self.settings.section,
                        section,
                        Self::option_text(section.label()),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Branch Controls =====
        match self.settings.section {
            Section::None => {}
            Section::Locations => {
                Self::sub_view_heading(ui);
                for view in LocationView::ALL {
                    ui.radio_value(
                        &mut self.settings.location_view,
                        view,
                        Self::option_text(view.label()),
                    );
                }

                if let ViewOutput::Map(map) = output {
                    ui.add_space(15.0);
                    self.show_offense_selector(ui, &map.offense_options);
                }
            }
            Section::TimesOfDay => {
                Self::sub_view_heading(ui);
                for view in TimeView::ALL {
                    ui.radio_value(
                        &mut self.settings.time_view,
                        view,
                        Self::option_text(view.label()),
                    );
                }

                if self.settings.time_view == TimeView::TypesPerTimeOfDay {
                    ui.add_space(15.0);
                    self.show_hour_range(ui);
                }
            }
            Section::CommonTypes => {
                if let ViewOutput::Pie(pie) = output {
                    self.show_district_selector(ui, &pie.district_options);
                }
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }

    fn sub_view_heading(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Which data would you like to access?")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
    }

    fn option_text(label: &str) -> &str {
        if label.is_empty() {
            "(none)"
        } else {
            label
        }
    }

    fn show_offense_selector(&mut self, ui: &mut egui::Ui, options: &[String]) {
        ui.label(
            RichText::new("Which type of crime would you like to search for?")
                .size(13.0)
                .strong(),
        );
        ui.add_space(5.0);

        let selected = match &self.settings.offense {
            None => "All types",
            Some(label) => DataProcessor::offense_text(label),
        };

        ComboBox::from_id_salt("offense_type")
            .width(250.0)
            .selected_text(selected.to_string())
            .show_ui(ui, |ui| {
                ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    ui.selectable_value(&mut self.settings.offense, None, "All types");
                    for option in options {
                        ui.selectable_value(
                            &mut self.settings.offense,
                            Some(option.clone()),
                            DataProcessor::offense_text(option),
                        );
                    }
                });
            });
    }

    fn show_hour_range(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("What range of times would you like to access data for?")
                .size(13.0)
                .strong(),
        );
        ui.add_space(5.0);

        let mut lo = self.settings.hour_lo;
        let mut hi = self.settings.hour_hi;
        let lo_moved = ui
            .add(egui::Slider::new(&mut lo, 0..=MAX_HOUR).text("From"))
            .changed();
        ui.add(egui::Slider::new(&mut hi, 0..=MAX_HOUR).text("To"));

        let (lo, hi) = Self::clamp_hours(lo, hi, lo_moved);
        self.settings.hour_lo = lo;
        self.settings.hour_hi = hi;
    }

    fn show_district_selector(&mut self, ui: &mut egui::Ui, options: &[String]) {
        ui.label(
            RichText::new("Which districts would you like to access?")
                .size(13.0)
                .strong(),
        );
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    for option in options {
                        let mut checked = self.settings.districts.contains(option);
                        if ui.checkbox(&mut checked, option).changed() {
                            if checked {
                                self.settings.districts.push(option.clone());
                            } else {
                                self.settings.districts.retain(|d| d != option);
                            }
                        }
                    }
                });
            });

        ui.add_space(5.0);
        if ui.small_button("Clear All").clicked() {
            self.settings.districts.clear();
        }
    }
}
