//! Chart Plotter Module
//! Draws each view's reduced data using egui_plot and the egui painter.

use crate::data::{series_color, DataProcessor};
use crate::stats::{DayHourPivot, DistrictCount, HourHistogram, BUCKET_EDGES};
use crate::view::{MapView, OffenseListView};
use egui::{Align2, Color32, FontId, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Text};
use std::f32::consts::TAU;

pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(128, 0, 128); // Purple

/// Initial map focus (Boston).
pub const MAP_CENTER_LAT: f64 = 42.338357;
pub const MAP_CENTER_LON: f64 = -71.070911;
const MAP_SPAN: f64 = 0.08;
const MAP_POINT_RADIUS: f32 = 2.0;

const CHART_HEIGHT: f32 = 420.0;
const PIE_RADIUS: f32 = 170.0;
/// Wedges wider than this are split so every polygon stays convex.
const MAX_WEDGE_STEP: f32 = 0.05;

/// Creates the dashboard's charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Scatter map of incident locations, one colored layer per offense label.
    pub fn draw_map(ui: &mut egui::Ui, map: &MapView) {
        // Longitude degrees shrink with latitude.
        let aspect = 1.0 / MAP_CENTER_LAT.to_radians().cos();

        Plot::new("crime_map")
            .height(CHART_HEIGHT + 80.0)
            .data_aspect(aspect as f32)
            .include_x(MAP_CENTER_LON - MAP_SPAN)
            .include_x(MAP_CENTER_LON + MAP_SPAN)
            .include_y(MAP_CENTER_LAT - MAP_SPAN)
            .include_y(MAP_CENTER_LAT + MAP_SPAN)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .legend(Legend::default())
            .label_formatter(|name, _value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("Crime Type:\n{}", name)
                }
            })
            .show(ui, |plot_ui| {
                for layer in map.layers.iter().filter(|l| !l.points.is_empty()) {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(layer.points.iter().copied()))
                            .radius(MAP_POINT_RADIUS)
                            .color(layer.color)
                            .name(DataProcessor::offense_text(&layer.label)),
                    );
                }
            });
    }

    /// Bar chart of incidents per district, each bar labelled with its count.
    pub fn draw_district_bars(ui: &mut egui::Ui, counts: &[DistrictCount]) {
        let x_labels: Vec<String> = counts.iter().map(|c| c.name.clone()).collect();

        Plot::new("district_bars")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Districts")
            .y_axis_label("Number of Crimes Reported")
            .x_grid_spacer(|input| {
                let (lo, hi) = input.bounds;
                (lo.ceil().max(0.0) as usize..=hi.floor().max(0.0) as usize)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx as usize) < x_labels.len() {
                    x_labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        Bar::new(i as f64, c.count as f64)
                            .name(&c.name)
                            .width(0.5)
                            .fill(series_color(i))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name("Crimes Reported"));

                for (i, c) in counts.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, c.count as f64),
                            RichText::new(c.count.to_string()).size(11.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }

    /// Histogram of incidents over the 3-hour buckets.
    pub fn draw_histogram(ui: &mut egui::Ui, histogram: &HourHistogram) {
        ui.label(
            RichText::new(format!("{} incidents with a recorded hour", histogram.total()))
                .size(12.0)
                .color(Color32::GRAY),
        );

        Plot::new("hour_histogram")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .include_x(0.0)
            .include_x(24.0)
            .include_y(0.0)
            .x_axis_label("Time of Day (24 Hour)")
            .y_axis_label("Number of Crimes Reported")
            .x_grid_spacer(|_input| {
                BUCKET_EDGES
                    .iter()
                    .map(|&edge| GridMark {
                        value: f64::from(edge),
                        step_size: 3.0,
                    })
                    .collect()
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = histogram
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(bucket, &count)| {
                        let (lo, hi) = HourHistogram::bucket_bounds(bucket);
                        let width = f64::from(hi - lo);
                        Bar::new(f64::from(lo) + width / 2.0, count as f64)
                            .width(width)
                            .name(format!("{lo:02}:00-{hi:02}:00"))
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(HISTOGRAM_COLOR)
                        .name("Crimes Reported"),
                );
            });
    }

    /// Day-of-week by hour count table.
    pub fn draw_pivot_table(ui: &mut egui::Ui, pivot: &DayHourPivot) {
        ui.label(
            RichText::new(format!("{} incidents", pivot.total()))
                .size(12.0)
                .color(Color32::GRAY),
        );

        egui::ScrollArea::both().show(ui, |ui| {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    egui::Grid::new("day_hour_pivot")
                        .striped(true)
                        .min_col_width(28.0)
                        .spacing([6.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("DAY_OF_WEEK").strong().size(11.0));
                            for hour in 0..24 {
                                ui.label(RichText::new(hour.to_string()).strong().size(11.0));
                            }
                            ui.end_row();

                            for (day, counts) in pivot.rows() {
                                ui.label(RichText::new(day).strong().size(11.0));
                                for count in counts {
                                    ui.label(RichText::new(count.to_string()).size(11.0));
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    }

    /// Numbered list of offense labels seen in the chosen hours.
    pub fn draw_offense_list(ui: &mut egui::Ui, list: &OffenseListView) {
        ui.label(
            RichText::new(format!(
                "{} offense types between {:02}:00 and {:02}:59",
                list.offenses.len(),
                list.hours.lo(),
                list.hours.hi()
            ))
            .size(12.0)
            .color(Color32::GRAY),
        );
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("offense_list")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for (i, offense) in list.offenses.iter().enumerate() {
                            ui.label(RichText::new(i.to_string()).color(Color32::GRAY));
                            ui.label(DataProcessor::offense_text(offense));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Pie chart of district counts with a legend.
    pub fn draw_pie(ui: &mut egui::Ui, slices: &[DistrictCount]) {
        let values: Vec<u64> = slices.iter().map(|s| s.count).collect();
        let total: u64 = values.iter().sum();
        if total == 0 {
            return;
        }

        ui.label(
            RichText::new("Percentage of Crime by District")
                .size(16.0)
                .strong(),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let size = egui::vec2(PIE_RADIUS * 2.0 + 20.0, PIE_RADIUS * 2.0 + 20.0);
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let center = response.rect.center();

            for (i, (start, end)) in Self::pie_wedges(&values).into_iter().enumerate() {
                let color = series_color(i);
                for (a, b) in Self::wedge_steps(start, end) {
                    let points = vec![
                        center,
                        center + PIE_RADIUS * egui::vec2(a.cos(), a.sin()),
                        center + PIE_RADIUS * egui::vec2(b.cos(), b.sin()),
                    ];
                    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
                }

                let share = values[i] as f32 / total as f32;
                if share >= 0.03 {
                    let mid = (start + end) / 2.0;
                    painter.text(
                        center + PIE_RADIUS * 0.7 * egui::vec2(mid.cos(), mid.sin()),
                        Align2::CENTER_CENTER,
                        format!("{:.1}%", share * 100.0),
                        FontId::proportional(11.0),
                        Color32::WHITE,
                    );
                }
            }

            ui.add_space(20.0);

            ui.vertical(|ui| {
                for (i, slice) in slices.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter()
                            .rect_filled(rect, 3.0, series_color(i));
                        ui.label(
                            RichText::new(format!("{} ({})", slice.name, slice.count)).size(12.0),
                        );
                    });
                }
            });
        });
    }

    /// Start and end angle (radians, clockwise from 12 o'clock) of each slice.
    pub fn pie_wedges(values: &[u64]) -> Vec<(f32, f32)> {
        let total: u64 = values.iter().sum();
        if total == 0 {
            return Vec::new();
        }

        let start = -TAU / 4.0;
        let mut acc = 0u64;
        values
            .iter()
            .map(|&v| {
                let a = start + TAU * acc as f32 / total as f32;
                acc += v;
                let b = start + TAU * acc as f32 / total as f32;
                (a, b)
            })
            .collect()
    }

    fn wedge_steps(start: f32, end: f32) -> Vec<(f32, f32)> {
        let n = ((end - start) / MAX_WEDGE_STEP).ceil().max(1.0) as usize;
        let step = (end - start) / n as f32;
        (0..n)
            .map(|i| (start + step * i as f32, start + step * (i + 1) as f32))
            .collect()
    }
}
