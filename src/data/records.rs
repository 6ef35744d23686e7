//! Dataset Records Module
//! Typed rows for the incident and district tables.

use std::collections::HashMap;

/// One reported crime incident.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentRecord {
    pub offense_description: Option<String>,
    pub district: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Hour of day, always within 0..=23 when present.
    pub hour: Option<u8>,
    pub day_of_week: Option<String>,
}

impl IncidentRecord {
    /// Location as `(lat, lon)` when both coordinates are known.
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if !lat.is_nan() && !lon.is_nan() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A police district: join key plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictInfo {
    pub code: String,
    pub name: String,
}

/// Both input tables, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    incidents: Vec<IncidentRecord>,
    districts: Vec<DistrictInfo>,
    names_by_code: HashMap<String, String>,
}

impl Dataset {
    pub fn new(incidents: Vec<IncidentRecord>, districts: Vec<DistrictInfo>) -> Self {
        let names_by_code = districts
            .iter()
            .map(|d| (d.code.clone(), d.name.clone()))
            .collect();

        Self {
            incidents,
            districts,
            names_by_code,
        }
    }

    pub fn incidents(&self) -> &[IncidentRecord] {
        &self.incidents
    }

    pub fn districts(&self) -> &[DistrictInfo] {
        &self.districts
    }

    /// Look up a district's display name by code.
    pub fn district_name(&self, code: &str) -> Option<&str> {
        self.names_by_code.get(code).map(String::as_str)
    }
}
