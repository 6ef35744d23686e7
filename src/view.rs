//! View Selection Module
//! Maps the user's two-level choice to exactly one rendering branch and
//! computes that branch's reduced data from the dataset.

use crate::data::{DataProcessor, Dataset, HourRange, MapLayer, OffenseFilter};
use crate::stats::{Aggregator, DayHourPivot, DistrictCount, DistrictSelection, HourHistogram};

/// Top-level choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Locations,
    TimesOfDay,
    CommonTypes,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::None,
        Section::Locations,
        Section::TimesOfDay,
        Section::CommonTypes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::None => "",
            Section::Locations => "Locations",
            Section::TimesOfDay => "Times of Day",
            Section::CommonTypes => "Common Types",
        }
    }
}

/// Second-level choice under "Locations".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationView {
    #[default]
    None,
    Map,
    AmountPerDistrict,
}

impl LocationView {
    pub const ALL: [LocationView; 3] = [
        LocationView::None,
        LocationView::Map,
        LocationView::AmountPerDistrict,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LocationView::None => "",
            LocationView::Map => "Map",
            LocationView::AmountPerDistrict => "Amount per District",
        }
    }
}

/// Second-level choice under "Times of Day".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeView {
    #[default]
    None,
    Histogram,
    PivotTable,
    TypesPerTimeOfDay,
}

impl TimeView {
    pub const ALL: [TimeView; 4] = [
        TimeView::None,
        TimeView::Histogram,
        TimeView::PivotTable,
        TimeView::TypesPerTimeOfDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeView::None => "",
            TimeView::Histogram => "Histogram",
            TimeView::PivotTable => "Pivot Table",
            TimeView::TypesPerTimeOfDay => "Crime Types per Time of Day",
        }
    }
}

/// The active view: a top-level tag with its scoped sub-tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewSelection {
    #[default]
    None,
    Locations(LocationView),
    TimesOfDay(TimeView),
    CommonTypes,
}

impl ViewSelection {
    pub fn new(section: Section, location: LocationView, time: TimeView) -> Self {
        match section {
            Section::None => ViewSelection::None,
            Section::Locations => ViewSelection::Locations(location),
            Section::TimesOfDay => ViewSelection::TimesOfDay(time),
            Section::CommonTypes => ViewSelection::CommonTypes,
        }
    }
}

/// Everything one recompute needs from the widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    pub selection: ViewSelection,
    pub offense: OffenseFilter,
    pub hours: HourRange,
    pub districts: DistrictSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Every offense label, for the type selector.
    pub offense_options: Vec<String>,
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffenseListView {
    pub hours: HourRange,
    pub offenses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieView {
    /// "All" followed by every district name, for the district selector.
    pub district_options: Vec<String>,
    pub slices: Vec<DistrictCount>,
}

/// Reduced data for the active branch, ready to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewOutput {
    #[default]
    Nothing,
    Map(MapView),
    DistrictBars(Vec<DistrictCount>),
    Histogram(HourHistogram),
    Pivot(DayHourPivot),
    OffenseList(OffenseListView),
    Pie(PieView),
}

/// Run the filter/aggregate stage for the requested view.
pub fn compute_view(dataset: &Dataset, request: &ViewRequest) -> ViewOutput {
    match request.selection {
        ViewSelection::None
        | ViewSelection::Locations(LocationView::None)
        | ViewSelection::TimesOfDay(TimeView::None) => ViewOutput::Nothing,
        ViewSelection::Locations(LocationView::Map) => {
            let layers = DataProcessor::map_layers(dataset);
            let offense_options = layers.iter().map(|l| l.label.clone()).collect();
            ViewOutput::Map(MapView {
                offense_options,
                layers: DataProcessor::visible_layers(layers, &request.offense),
            })
        }
        ViewSelection::Locations(LocationView::AmountPerDistrict) => {
            ViewOutput::DistrictBars(Aggregator::district_counts(dataset))
        }
        ViewSelection::TimesOfDay(TimeView::Histogram) => {
            ViewOutput::Histogram(Aggregator::hour_histogram(dataset))
        }
        ViewSelection::TimesOfDay(TimeView::PivotTable) => {
            ViewOutput::Pivot(Aggregator::day_hour_pivot(dataset))
        }
        ViewSelection::TimesOfDay(TimeView::TypesPerTimeOfDay) => {
            ViewOutput::OffenseList(OffenseListView {
                hours: request.hours,
                offenses: DataProcessor::offenses_in_hours(dataset, request.hours),
            })
        }
        ViewSelection::CommonTypes => {
            let counts = Aggregator::district_counts(dataset);
            ViewOutput::Pie(PieView {
                district_options: Aggregator::district_options(&counts),
                slices: Aggregator::select_districts(&counts, &request.districts),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DistrictInfo, IncidentRecord};

    fn dataset() -> Dataset {
        let incident = |offense: &str, district: &str, hour: u8, located: bool| IncidentRecord {
            offense_description: Some(offense.to_string()),
            district: Some(district.to_string()),
            lat: located.then_some(42.33),
            lon: located.then_some(-71.07),
            hour: Some(hour),
            day_of_week: Some("Monday".to_string()),
        };

        Dataset::new(
            vec![
                incident("THEFT", "A1", 1, true),
                incident("Assault", "B2", 14, true),
                incident("theft", "External", 22, false),
                incident("Vandalism", "B2", 15, true),
            ],
            vec![
                DistrictInfo {
                    code: "A1".to_string(),
                    name: "Downtown".to_string(),
                },
                DistrictInfo {
                    code: "B2".to_string(),
                    name: "Roxbury".to_string(),
                },
            ],
        )
    }

    fn request(selection: ViewSelection) -> ViewRequest {
        ViewRequest {
            selection,
            ..Default::default()
        }
    }

    #[test]
    fn blank_choices_render_nothing() {
        let dataset = dataset();
        for selection in [
            ViewSelection::None,
            ViewSelection::Locations(LocationView::None),
            ViewSelection::TimesOfDay(TimeView::None),
        ] {
            assert_eq!(compute_view(&dataset, &request(selection)), ViewOutput::Nothing);
        }
    }

    #[test]
    fn selection_follows_section() {
        assert_eq!(
            ViewSelection::new(Section::None, LocationView::Map, TimeView::Histogram),
            ViewSelection::None
        );
        assert_eq!(
            ViewSelection::new(Section::Locations, LocationView::Map, TimeView::Histogram),
            ViewSelection::Locations(LocationView::Map)
        );
        assert_eq!(
            ViewSelection::new(Section::TimesOfDay, LocationView::Map, TimeView::Histogram),
            ViewSelection::TimesOfDay(TimeView::Histogram)
        );
        assert_eq!(
            ViewSelection::new(Section::CommonTypes, LocationView::Map, TimeView::Histogram),
            ViewSelection::CommonTypes
        );
    }

    #[test]
    fn map_lists_all_offenses_and_filters_layers() {
        let dataset = dataset();
        let mut req = request(ViewSelection::Locations(LocationView::Map));

        let ViewOutput::Map(all) = compute_view(&dataset, &req) else {
            panic!("expected map output");
        };
        assert_eq!(all.offense_options, vec!["Theft", "Assault", "Vandalism"]);
        assert_eq!(all.layers.len(), 3);

        req.offense = OffenseFilter::Only("Assault".to_string());
        let ViewOutput::Map(one) = compute_view(&dataset, &req) else {
            panic!("expected map output");
        };
        assert_eq!(one.offense_options, all.offense_options);
        assert_eq!(one.layers.len(), 1);
        assert_eq!(one.layers[0].label, "Assault");
    }

    #[test]
    fn bar_and_pie_share_the_district_aggregate() {
        let dataset = dataset();

        let ViewOutput::DistrictBars(bars) = compute_view(
            &dataset,
            &request(ViewSelection::Locations(LocationView::AmountPerDistrict)),
        ) else {
            panic!("expected bar output");
        };
        let ViewOutput::Pie(pie) = compute_view(&dataset, &request(ViewSelection::CommonTypes))
        else {
            panic!("expected pie output");
        };

        assert_eq!(bars, pie.slices);
        assert_eq!(pie.district_options, vec!["All", "Downtown", "Roxbury"]);
    }

    #[test]
    fn offense_list_uses_requested_hours() {
        let dataset = dataset();
        let req = ViewRequest {
            selection: ViewSelection::TimesOfDay(TimeView::TypesPerTimeOfDay),
            hours: HourRange::new(14, 22).unwrap(),
            ..Default::default()
        };

        let ViewOutput::OffenseList(list) = compute_view(&dataset, &req) else {
            panic!("expected offense list output");
        };
        assert_eq!(list.offenses, vec!["Assault", "Theft", "Vandalism"]);
    }

    #[test]
    fn histogram_and_pivot_branches() {
        let dataset = dataset();
        assert!(matches!(
            compute_view(&dataset, &request(ViewSelection::TimesOfDay(TimeView::Histogram))),
            ViewOutput::Histogram(h) if h.total() == 4
        ));
        assert!(matches!(
            compute_view(&dataset, &request(ViewSelection::TimesOfDay(TimeView::PivotTable))),
            ViewOutput::Pivot(p) if p.get("Monday", 14) == Some(1)
        ));
    }
}
