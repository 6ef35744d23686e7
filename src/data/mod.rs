//! Data module - CSV loading, typed records and row-level processing

mod loader;
mod palette;
mod processor;
mod records;

pub use loader::DataLoader;
pub use palette::series_color;
pub use processor::{DataProcessor, HourRange, MapLayer, OffenseFilter, MAX_HOUR};
pub use records::{Dataset, DistrictInfo, IncidentRecord};
