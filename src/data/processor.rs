//! Data Processor Module
//! Row-level transforms: offense label normalization, hour filtering and
//! partitioning of incident locations into map layers.

use super::palette::series_color;
use super::records::{Dataset, IncidentRecord};
use egui::Color32;
use std::collections::HashMap;
use thiserror::Error;

pub const MAX_HOUR: u8 = 23;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid hour range {lo}..={hi}: expected 0 <= lo <= hi <= 23")]
    InvalidHourRange { lo: u8, hi: u8 },
}

/// Inclusive range of hours of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    lo: u8,
    hi: u8,
}

impl Default for HourRange {
    fn default() -> Self {
        Self { lo: 0, hi: MAX_HOUR }
    }
}

impl HourRange {
    pub fn new(lo: u8, hi: u8) -> Result<Self, FilterError> {
        if lo > hi || hi > MAX_HOUR {
            return Err(FilterError::InvalidHourRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    pub fn contains(&self, hour: u8) -> bool {
        (self.lo..=self.hi).contains(&hour)
    }
}

/// Which offense layers the map shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OffenseFilter {
    #[default]
    Any,
    Only(String),
}

/// Located incidents sharing one normalized offense label.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub label: String,
    pub color: Color32,
    /// `[lon, lat]` pairs.
    pub points: Vec<[f64; 2]>,
}

/// Handles row-level filtering and partitioning.
pub struct DataProcessor;

impl DataProcessor {
    /// Canonicalize an offense description: lower-case, title-case, trim.
    ///
    /// Title-casing upper-cases the first letter of every run of letters,
    /// so "B&E" stays "B&E" and "larceny-theft" becomes "Larceny-Theft".
    pub fn normalize_offense(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut prev_is_letter = false;

        for c in raw.to_lowercase().chars() {
            if c.is_alphabetic() {
                if prev_is_letter {
                    out.push(c);
                } else {
                    out.extend(c.to_uppercase());
                }
                prev_is_letter = true;
            } else {
                out.push(c);
                prev_is_letter = false;
            }
        }

        out.trim().to_string()
    }

    /// Visible text for a normalized label; the blank category gets a marker.
    pub fn offense_text(label: &str) -> &str {
        if label.is_empty() {
            "(blank)"
        } else {
            label
        }
    }

    /// Distinct normalized labels in first-seen order. Missing descriptions
    /// normalize to the empty label.
    pub fn distinct_offenses<'a, I>(descriptions: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut labels: Vec<String> = Vec::new();

        for description in descriptions {
            let label = Self::normalize_offense(description.unwrap_or_default());
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        labels
    }

    /// Records whose hour falls in `range`. Records without an hour never match.
    pub fn filter_by_hours(dataset: &Dataset, range: HourRange) -> Vec<&IncidentRecord> {
        dataset
            .incidents()
            .iter()
            .filter(|r| r.hour.is_some_and(|h| range.contains(h)))
            .collect()
    }

    /// Distinct offense labels among records in `range`.
    pub fn offenses_in_hours(dataset: &Dataset, range: HourRange) -> Vec<String> {
        let records = Self::filter_by_hours(dataset, range);
        Self::distinct_offenses(records.iter().map(|r| r.offense_description.as_deref()))
    }

    /// One layer per distinct offense label, in first-seen order across all
    /// incidents. Only incidents with both coordinates are plotted, so a
    /// label may end up with an empty layer.
    pub fn map_layers(dataset: &Dataset) -> Vec<MapLayer> {
        let labels = Self::distinct_offenses(
            dataset
                .incidents()
                .iter()
                .map(|r| r.offense_description.as_deref()),
        );

        let mut layers: Vec<MapLayer> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| MapLayer {
                label,
                color: series_color(i),
                points: Vec::new(),
            })
            .collect();

        let index: HashMap<String, usize> = layers
            .iter()
            .enumerate()
            .map(|(i, layer)| (layer.label.clone(), i))
            .collect();

        for record in dataset.incidents() {
            let Some((lat, lon)) = record.location() else {
                continue;
            };
            let label =
                Self::normalize_offense(record.offense_description.as_deref().unwrap_or_default());
            if let Some(&i) = index.get(&label) {
                layers[i].points.push([lon, lat]);
            }
        }

        layers
    }

    /// Layers to draw for the given offense selection.
    pub fn visible_layers(layers: Vec<MapLayer>, filter: &OffenseFilter) -> Vec<MapLayer> {
        match filter {
            OffenseFilter::Any => layers,
            OffenseFilter::Only(label) => layers
                .into_iter()
                .filter(|layer| &layer.label == label)
                .collect(),
        }
    }
}
