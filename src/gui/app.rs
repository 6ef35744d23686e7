//! Crime Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::data::Dataset;
use crate::gui::{ChartViewer, ControlPanel};
use crate::view::{compute_view, ViewRequest};
use egui::SidePanel;

/// Main application window.
pub struct CrimeExplorerApp {
    dataset: Dataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    /// Request behind the view currently shown.
    last_request: Option<ViewRequest>,
}

impl CrimeExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Dataset) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.set_status(&format!(
            "Loaded {} incidents, {} districts",
            dataset.incidents().len(),
            dataset.districts().len()
        ));

        Self {
            dataset,
            control_panel,
            chart_viewer: ChartViewer::new(),
            last_request: None,
        }
    }

    /// Recompute the active view from scratch if any widget changed.
    /// Returns whether a new view was produced.
    fn refresh_view(&mut self) -> bool {
        let request = self.control_panel.request();
        if self.last_request.as_ref() == Some(&request) {
            return false;
        }

        log::debug!("Recomputing view for {:?}", request);
        let output = compute_view(&self.dataset, &request);
        self.chart_viewer.set_output(output);
        self.last_request = Some(request);
        true
    }
}

impl eframe::App for CrimeExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.control_panel.show(ui, &self.chart_viewer.output);
                });
            });

        // Option lists in the panel come from the view, so draw again once
        // it changes.
        if self.refresh_view() {
            ctx.request_repaint();
        }

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
