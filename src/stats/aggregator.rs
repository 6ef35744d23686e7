//! Aggregation Module
//! Group-by counts over the incident table: per district, per 3-hour
//! bucket and per (day of week, hour).

use crate::data::Dataset;
use std::collections::{BTreeMap, HashMap};

/// District code used for incidents outside any real district.
pub const EXTERNAL_DISTRICT: &str = "External";

/// Selector entry standing for every district.
pub const ALL_DISTRICTS: &str = "All";

/// Histogram bucket edges; the last bucket is closed.
pub const BUCKET_EDGES: [u8; 9] = [0, 3, 6, 9, 12, 15, 18, 21, 24];

pub const BUCKET_COUNT: usize = BUCKET_EDGES.len() - 1;

pub const HOURS_PER_DAY: usize = 24;

/// Incident count for one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictCount {
    pub name: String,
    pub count: u64,
}

/// Districts chosen in the pie chart selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DistrictSelection {
    #[default]
    All,
    Named(Vec<String>),
}

impl DistrictSelection {
    /// Build from raw selector entries; any "All" entry wins.
    pub fn from_choices(choices: &[String]) -> Self {
        if choices.iter().any(|c| c == ALL_DISTRICTS) {
            Self::All
        } else {
            Self::Named(choices.to_vec())
        }
    }
}

/// Incident counts per 3-hour bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    pub counts: [u64; BUCKET_COUNT],
}

impl HourHistogram {
    /// Bucket index for an hour, or `None` outside `[0, 24]`.
    pub fn bucket_for_hour(hour: u8) -> Option<usize> {
        let last = BUCKET_EDGES[BUCKET_COUNT];
        if hour > last {
            return None;
        }
        if hour == last {
            return Some(BUCKET_COUNT - 1);
        }
        BUCKET_EDGES
            .windows(2)
            .position(|edge| edge[0] <= hour && hour < edge[1])
    }

    /// `(lower, upper)` edges of a bucket.
    pub fn bucket_bounds(bucket: usize) -> (u8, u8) {
        (BUCKET_EDGES[bucket], BUCKET_EDGES[bucket + 1])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Incident counts keyed by day of week (rows) and hour (columns).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayHourPivot {
    rows: BTreeMap<String, [u64; HOURS_PER_DAY]>,
}

impl DayHourPivot {
    /// Rows in day order, each with all 24 hour cells.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64; HOURS_PER_DAY])> {
        self.rows.iter().map(|(day, counts)| (day.as_str(), counts))
    }

    /// Count for a cell; `None` only when the day is not a row.
    #[cfg(test)]
    pub fn get(&self, day: &str, hour: u8) -> Option<u64> {
        self.rows
            .get(day)
            .and_then(|counts| counts.get(usize::from(hour)).copied())
    }

    pub fn total(&self) -> u64 {
        self.rows.values().flatten().sum()
    }
}

/// Computes the grouped counts behind each chart.
pub struct Aggregator;

impl Aggregator {
    /// Incident counts per district name, sorted by name.
    ///
    /// Only districts with at least one incident are listed. Incidents whose
    /// code has no district entry, and the external sentinel, are left out.
    pub fn district_counts(dataset: &Dataset) -> Vec<DistrictCount> {
        let mut by_code: HashMap<&str, u64> = HashMap::new();
        for district in dataset.incidents().iter().filter_map(|r| r.district.as_deref()) {
            *by_code.entry(district).or_default() += 1;
        }

        let mut counts: Vec<DistrictCount> = by_code
            .into_iter()
            .filter(|(code, _)| *code != EXTERNAL_DISTRICT)
            .filter_map(|(code, count)| {
                dataset.district_name(code).map(|name| DistrictCount {
                    name: name.to_string(),
                    count,
                })
            })
            .collect();

        counts.sort_by(|a, b| a.name.cmp(&b.name));
        counts
    }

    /// Options for the district multi-select: "All" then each name.
    pub fn district_options(counts: &[DistrictCount]) -> Vec<String> {
        std::iter::once(ALL_DISTRICTS.to_string())
            .chain(counts.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Restrict the district aggregate to a selection, keeping selection
    /// order. Unknown names are skipped.
    pub fn select_districts(
        counts: &[DistrictCount],
        selection: &DistrictSelection,
    ) -> Vec<DistrictCount> {
        match selection {
            DistrictSelection::All => counts.to_vec(),
            DistrictSelection::Named(names) => names
                .iter()
                .filter_map(|name| counts.iter().find(|c| &c.name == name).cloned())
                .collect(),
        }
    }

    /// Count incidents per 3-hour bucket. Records without an hour are ignored.
    pub fn hour_histogram(dataset: &Dataset) -> HourHistogram {
        let mut histogram = HourHistogram::default();
        for hour in dataset.incidents().iter().filter_map(|r| r.hour) {
            if let Some(bucket) = HourHistogram::bucket_for_hour(hour) {
                histogram.counts[bucket] += 1;
            }
        }
        histogram
    }

    /// Count incidents per (day of week, hour), filling empty cells with 0.
    pub fn day_hour_pivot(dataset: &Dataset) -> DayHourPivot {
        let mut pivot = DayHourPivot::default();
        for record in dataset.incidents() {
            let (Some(day), Some(hour)) = (record.day_of_week.as_deref(), record.hour) else {
                continue;
            };
            let row = pivot
                .rows
                .entry(day.to_string())
                .or_insert([0; HOURS_PER_DAY]);
            if let Some(cell) = row.get_mut(usize::from(hour)) {
                *cell += 1;
            }
        }
        pivot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DistrictInfo, IncidentRecord};

    fn incident(district: Option<&str>, day: Option<&str>, hour: Option<u8>) -> IncidentRecord {
        IncidentRecord {
            offense_description: Some("Theft".to_string()),
            district: district.map(str::to_string),
            lat: None,
            lon: None,
            hour,
            day_of_week: day.map(str::to_string),
        }
    }

    fn district(code: &str, name: &str) -> DistrictInfo {
        DistrictInfo {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn boston() -> Dataset {
        Dataset::new(
            vec![
                incident(Some("B2"), Some("Monday"), Some(0)),
                incident(Some("A1"), Some("Monday"), Some(2)),
                incident(Some("B2"), Some("Tuesday"), Some(3)),
                incident(Some("External"), Some("Sunday"), Some(23)),
                incident(Some("Z9"), Some("Sunday"), Some(12)),
                incident(None, Some("Friday"), Some(21)),
                incident(Some("C11"), None, None),
                incident(Some("B2"), Some("Monday"), Some(0)),
            ],
            vec![
                district("B2", "Roxbury"),
                district("A1", "Downtown"),
                district("C11", "Dorchester"),
                district("External", "External"),
                district("E18", "Hyde Park"),
            ],
        )
    }

    fn counts(pairs: &[(&str, u64)]) -> Vec<DistrictCount> {
        pairs
            .iter()
            .map(|&(name, count)| DistrictCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    #[test]
    fn district_counts_sorted_by_name() {
        assert_eq!(
            Aggregator::district_counts(&boston()),
            counts(&[("Dorchester", 1), ("Downtown", 1), ("Roxbury", 3)])
        );
    }

    #[test]
    fn district_counts_exclude_unmatched_and_external() {
        let dataset = boston();
        let total: u64 = Aggregator::district_counts(&dataset)
            .iter()
            .map(|c| c.count)
            .sum();

        let excluded = dataset
            .incidents()
            .iter()
            .filter(|r| match r.district.as_deref() {
                Some(code) => code == EXTERNAL_DISTRICT || dataset.district_name(code).is_none(),
                None => true,
            })
            .count();

        assert_eq!(excluded, 3);
        assert_eq!(total, (dataset.incidents().len() - excluded) as u64);
    }

    #[test]
    fn repeated_district_code_counts_once_under_its_last_name() {
        let dataset = Dataset::new(
            vec![
                incident(Some("B2"), None, None),
                incident(Some("B2"), None, None),
            ],
            vec![district("B2", "Roxbury"), district("B2", "Roxbury Crossing")],
        );
        assert_eq!(
            Aggregator::district_counts(&dataset),
            counts(&[("Roxbury Crossing", 2)])
        );
    }

    #[test]
    fn district_options_start_with_all() {
        let options = Aggregator::district_options(&Aggregator::district_counts(&boston()));
        assert_eq!(options, vec!["All", "Dorchester", "Downtown", "Roxbury"]);
    }

    #[test]
    fn all_selection_reproduces_full_aggregate() {
        let full = Aggregator::district_counts(&boston());
        assert_eq!(
            Aggregator::select_districts(&full, &DistrictSelection::All),
            full
        );

        let choices = vec!["Roxbury".to_string(), ALL_DISTRICTS.to_string()];
        let selection = DistrictSelection::from_choices(&choices);
        assert_eq!(selection, DistrictSelection::All);
        assert_eq!(Aggregator::select_districts(&full, &selection), full);
    }

    #[test]
    fn named_selection_keeps_selection_order() {
        let full = Aggregator::district_counts(&boston());
        let choices = vec![
            "Roxbury".to_string(),
            "Mattapan".to_string(),
            "Downtown".to_string(),
        ];

        let selected =
            Aggregator::select_districts(&full, &DistrictSelection::from_choices(&choices));
        assert_eq!(selected, counts(&[("Roxbury", 3), ("Downtown", 1)]));
    }

    #[test]
    fn empty_selection_is_empty() {
        let full = Aggregator::district_counts(&boston());
        let selected =
            Aggregator::select_districts(&full, &DistrictSelection::from_choices(&[]));
        assert!(selected.is_empty());
    }

    #[test]
    fn every_hour_falls_in_exactly_one_bucket() {
        for hour in 0..24u8 {
            let bucket = HourHistogram::bucket_for_hour(hour).unwrap();
            let (lo, hi) = HourHistogram::bucket_bounds(bucket);
            assert!(lo <= hour && hour < hi, "hour {hour} in bucket {bucket}");
        }
        assert_eq!(HourHistogram::bucket_for_hour(2), Some(0));
        assert_eq!(HourHistogram::bucket_for_hour(3), Some(1));
        assert_eq!(HourHistogram::bucket_for_hour(24), Some(BUCKET_COUNT - 1));
        assert_eq!(HourHistogram::bucket_for_hour(25), None);
    }

    #[test]
    fn histogram_counts_sum_to_records_with_hours() {
        let histogram = Aggregator::hour_histogram(&boston());
        assert_eq!(histogram.counts, [3, 1, 0, 0, 1, 0, 0, 2]);
        assert_eq!(histogram.total(), 7);
    }

    #[test]
    fn pivot_counts_each_cell_once_and_fills_zeros() {
        let pivot = Aggregator::day_hour_pivot(&boston());

        let days: Vec<&str> = pivot.rows().map(|(day, _)| day).collect();
        assert_eq!(days, vec!["Friday", "Monday", "Sunday", "Tuesday"]);

        assert_eq!(pivot.get("Monday", 0), Some(2));
        assert_eq!(pivot.get("Monday", 2), Some(1));
        assert_eq!(pivot.get("Monday", 1), Some(0));
        assert_eq!(pivot.get("Sunday", 23), Some(1));
        assert_eq!(pivot.get("Saturday", 0), None);

        assert!(pivot.rows().all(|(_, counts)| counts.len() == HOURS_PER_DAY));
        assert_eq!(pivot.total(), 7);
    }
}
