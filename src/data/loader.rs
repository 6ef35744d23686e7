//! CSV Data Loader Module
//! Reads the incident and district tables using Polars.

use super::records::{Dataset, DistrictInfo, IncidentRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const OFFENSE_COL: &str = "OFFENSE_DESCRIPTION";
pub const DISTRICT_COL: &str = "DISTRICT";
pub const LAT_COL: &str = "Lat";
pub const LON_COL: &str = "Long";
pub const HOUR_COL: &str = "HOUR";
pub const DAY_OF_WEEK_COL: &str = "DAY_OF_WEEK";

pub const DISTRICT_CODE_COL: &str = "District";
pub const DISTRICT_NAME_COL: &str = "District Name";

const INCIDENTS_TABLE: &str = "incidents";
const DISTRICTS_TABLE: &str = "districts";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {}: {source}", path.display())]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Column '{column}' in {table} table could not be read: {source}")]
    BadColumn {
        table: &'static str,
        column: &'static str,
        #[source]
        source: PolarsError,
    },
}

/// Loads both tables into a [`Dataset`].
pub struct DataLoader;

impl DataLoader {
    /// Load the incident and district CSV files. Any failure is fatal.
    pub fn load_dataset(
        incidents_path: &Path,
        districts_path: &Path,
    ) -> Result<Dataset, LoaderError> {
        let incidents = Self::read_csv(incidents_path)?;
        let districts = Self::read_csv(districts_path)?;

        log::debug!(
            "Read {} incident rows from {}, {} district rows from {}",
            incidents.height(),
            incidents_path.display(),
            districts.height(),
            districts_path.display()
        );

        Self::dataset_from_frames(&incidents, &districts)
    }

    /// Read a CSV file into a DataFrame.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::CsvError {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Extract typed records from already-loaded frames.
    pub fn dataset_from_frames(
        incidents: &DataFrame,
        districts: &DataFrame,
    ) -> Result<Dataset, LoaderError> {
        let incidents = Self::incidents_from_frame(incidents)?;
        let districts = Self::districts_from_frame(districts)?;
        Ok(Dataset::new(incidents, districts))
    }

    fn incidents_from_frame(df: &DataFrame) -> Result<Vec<IncidentRecord>, LoaderError> {
        let offenses = Self::string_column(df, INCIDENTS_TABLE, OFFENSE_COL)?;
        let districts = Self::string_column(df, INCIDENTS_TABLE, DISTRICT_COL)?;
        let lats = Self::f64_column(df, INCIDENTS_TABLE, LAT_COL)?;
        let lons = Self::f64_column(df, INCIDENTS_TABLE, LON_COL)?;
        let hours = Self::hour_column(df, INCIDENTS_TABLE, HOUR_COL)?;
        let days = Self::string_column(df, INCIDENTS_TABLE, DAY_OF_WEEK_COL)?;

        let records = offenses
            .into_iter()
            .zip(districts)
            .zip(lats.into_iter().zip(lons))
            .zip(hours.into_iter().zip(days))
            .map(
                |(((offense_description, district), (lat, lon)), (hour, day_of_week))| {
                    IncidentRecord {
                        offense_description,
                        district,
                        lat,
                        lon,
                        hour,
                        day_of_week,
                    }
                },
            )
            .collect();

        Ok(records)
    }

    fn districts_from_frame(df: &DataFrame) -> Result<Vec<DistrictInfo>, LoaderError> {
        let codes = Self::string_column(df, DISTRICTS_TABLE, DISTRICT_CODE_COL)?;
        let names = Self::string_column(df, DISTRICTS_TABLE, DISTRICT_NAME_COL)?;

        let total = codes.len();
        let districts: Vec<DistrictInfo> = codes
            .into_iter()
            .zip(names)
            .filter_map(|(code, name)| Some(DistrictInfo { code: code?, name: name? }))
            .collect();

        if districts.len() < total {
            log::warn!(
                "Dropped {} incomplete district rows",
                total - districts.len()
            );
        }

        Ok(districts)
    }

    fn column<'a>(
        df: &'a DataFrame,
        table: &'static str,
        column: &'static str,
    ) -> Result<&'a Column, LoaderError> {
        df.column(column)
            .map_err(|_| LoaderError::MissingColumn { table, column })
    }

    fn string_column(
        df: &DataFrame,
        table: &'static str,
        column: &'static str,
    ) -> Result<Vec<Option<String>>, LoaderError> {
        let bad_column = |source| LoaderError::BadColumn {
            table,
            column,
            source,
        };

        let values = Self::column(df, table, column)?
            .cast(&DataType::String)
            .map_err(bad_column)?;
        let ca = values.str().map_err(bad_column)?;

        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    fn f64_column(
        df: &DataFrame,
        table: &'static str,
        column: &'static str,
    ) -> Result<Vec<Option<f64>>, LoaderError> {
        let bad_column = |source| LoaderError::BadColumn {
            table,
            column,
            source,
        };

        let values = Self::column(df, table, column)?
            .cast(&DataType::Float64)
            .map_err(bad_column)?;
        let ca = values.f64().map_err(bad_column)?;

        Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
    }

    /// Hours outside 0..=23 are read as null.
    fn hour_column(
        df: &DataFrame,
        table: &'static str,
        column: &'static str,
    ) -> Result<Vec<Option<u8>>, LoaderError> {
        let bad_column = |source| LoaderError::BadColumn {
            table,
            column,
            source,
        };

        let values = Self::column(df, table, column)?
            .cast(&DataType::Int64)
            .map_err(bad_column)?;
        let ca = values.i64().map_err(bad_column)?;

        Ok(ca
            .into_iter()
            .map(|v| v.and_then(|h| u8::try_from(h).ok()).filter(|h| *h < 24))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident_frame() -> DataFrame {
        df!(
            OFFENSE_COL => [Some("LARCENY THEFT FROM BUILDING"), Some("assault - simple"), None],
            DISTRICT_COL => [Some("A1"), Some("External"), None],
            LAT_COL => [Some(42.35), None, Some(42.29)],
            LON_COL => [Some(-71.06), None, Some(-71.08)],
            HOUR_COL => [Some(5i64), Some(23), Some(31)],
            DAY_OF_WEEK_COL => ["Monday", "Sunday", "Friday"],
        )
        .unwrap()
    }

    fn district_frame() -> DataFrame {
        df!(
            DISTRICT_CODE_COL => [Some("A1"), Some("B2"), None],
            DISTRICT_NAME_COL => [Some("Downtown"), Some("Roxbury"), Some("Nowhere")],
        )
        .unwrap()
    }

    #[test]
    fn extracts_typed_incident_records() {
        let dataset = DataLoader::dataset_from_frames(&incident_frame(), &district_frame()).unwrap();
        let incidents = dataset.incidents();

        assert_eq!(incidents.len(), 3);
        assert_eq!(
            incidents[0].offense_description.as_deref(),
            Some("LARCENY THEFT FROM BUILDING")
        );
        assert_eq!(incidents[0].district.as_deref(), Some("A1"));
        assert_eq!(incidents[0].location(), Some((42.35, -71.06)));
        assert_eq!(incidents[0].hour, Some(5));
        assert_eq!(incidents[1].location(), None);
        assert_eq!(incidents[2].offense_description, None);
        assert_eq!(incidents[2].district, None);
    }

    #[test]
    fn out_of_range_hours_become_null() {
        let dataset = DataLoader::dataset_from_frames(&incident_frame(), &district_frame()).unwrap();
        assert_eq!(dataset.incidents()[1].hour, Some(23));
        assert_eq!(dataset.incidents()[2].hour, None);
    }

    #[test]
    fn drops_incomplete_district_rows() {
        let dataset = DataLoader::dataset_from_frames(&incident_frame(), &district_frame()).unwrap();
        let codes: Vec<&str> = dataset.districts().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "B2"]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let incidents = incident_frame().drop(HOUR_COL).unwrap();
        let err = DataLoader::dataset_from_frames(&incidents, &district_frame()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingColumn {
                column: HOUR_COL,
                ..
            }
        ));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let result = DataLoader::load_dataset(
            Path::new("/nonexistent/incidents.csv"),
            Path::new("/nonexistent/districts.csv"),
        );
        assert!(matches!(result, Err(LoaderError::CsvError { .. })));
    }
}
