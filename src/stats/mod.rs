//! Stats module - Grouped incident counts

mod aggregator;

pub use aggregator::{
    Aggregator, DayHourPivot, DistrictCount, DistrictSelection, HourHistogram, ALL_DISTRICTS,
    BUCKET_EDGES,
};
