//! Command line configuration.

use clap::Parser;
use std::path::PathBuf;

/// Explore Boston crime incidents by location, time of day and district.
#[derive(Parser, Debug)]
#[command(name = "crime_explorer")]
#[command(about = "Explore Boston crime incidents by location, time of day and district")]
pub struct Args {
    /// Incident records CSV.
    #[arg(long, default_value = "BostonCrime2021_7000_sample.csv")]
    pub incidents: PathBuf,

    /// Police district lookup CSV.
    #[arg(long, default_value = "BostonPoliceDistricts.csv")]
    pub districts: PathBuf,
}
