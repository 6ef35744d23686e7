//! Chart Viewer Widget
//! Central panel that draws whichever view is active.

use crate::charts::ChartPlotter;
use crate::view::ViewOutput;
use egui::RichText;

/// Displays the most recently computed view.
#[derive(Default)]
pub struct ChartViewer {
    pub output: ViewOutput,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_output(&mut self, output: ViewOutput) {
        self.output = output;
    }

    /// Draw the active view; the blank selection draws nothing.
    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("2021 Boston Crime").size(26.0).strong());
        ui.add_space(10.0);

        match &self.output {
            ViewOutput::Nothing => {}
            ViewOutput::Map(map) => {
                Self::title(ui, "Locations of Crime in Boston");
                ChartPlotter::draw_map(ui, map);
            }
            ViewOutput::DistrictBars(counts) => {
                Self::title(ui, "Number of Crimes Reported per District");
                ChartPlotter::draw_district_bars(ui, counts);
            }
            ViewOutput::Histogram(histogram) => {
                Self::title(ui, "Histogram of Crimes over Time");
                ChartPlotter::draw_histogram(ui, histogram);
            }
            ViewOutput::Pivot(pivot) => {
                Self::title(ui, "Number of Crimes per Hour per Day of Week");
                ChartPlotter::draw_pivot_table(ui, pivot);
            }
            ViewOutput::OffenseList(list) => {
                Self::title(ui, "List of Crimes That Occurred Over Selected Time Frame");
                ChartPlotter::draw_offense_list(ui, list);
            }
            ViewOutput::Pie(pie) => {
                Self::title(ui, "Pie Chart of Crime per District");
                ChartPlotter::draw_pie(ui, &pie.slices);
            }
        }
    }

    fn title(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(20.0).strong());
        ui.add_space(8.0);
    }
}
