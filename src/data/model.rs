use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Season – categorical label mapped from the numeric season code
// ---------------------------------------------------------------------------

/// Season label derived from the dataset's 1–4 season code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in code order (1–4). Used for widget layout.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map a raw season code to its label.
    ///
    /// Codes outside 1–4 yield `None` (a missing label). Rows carrying such
    /// codes are kept in the table, they just never match a season filter.
    pub fn from_code(code: u8) -> Option<Season> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DayPeriod – four-bucket classification of the hour of day
// ---------------------------------------------------------------------------

/// Six-hour bucket of the day an hour falls into.
///
/// The buckets partition 0–23: every hour lands in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Fixed order the day-period chart displays its categories in,
    /// independent of how often each occurs in the data.
    pub const CHART_ORDER: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    /// Bucket an hour of day (0–23).
    pub fn from_hour(hour: u32) -> DayPeriod {
        match hour {
            0..=5 => DayPeriod::Night,
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Night => "Night",
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Weather codes
// ---------------------------------------------------------------------------

/// Human-readable description of a weather code, shown on bar hover.
pub fn weather_label(code: u8) -> &'static str {
    match code {
        1 => "Clear / few clouds",
        2 => "Mist / cloudy",
        3 => "Light rain / snow",
        4 => "Heavy rain / snow",
        _ => "Unknown",
    }
}

// ---------------------------------------------------------------------------
// RentalRecord – one prepared row of the dataset
// ---------------------------------------------------------------------------

/// A single hourly rental observation with its derived calendar features.
#[derive(Debug, Clone)]
pub struct RentalRecord {
    pub timestamp: NaiveDateTime,
    /// Season label, `None` when the raw code was outside 1–4.
    pub season: Option<Season>,
    pub weather: u8,
    /// 1 on working days, 0 on weekends and holidays.
    pub workingday: u8,
    pub temp: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub count: u64,

    // -- derived from `timestamp` by the loader --
    pub year: i32,
    pub hour: u32,
    /// Full weekday name ("Monday" … "Sunday").
    pub day_of_week: String,
    pub day_period: DayPeriod,
}

// ---------------------------------------------------------------------------
// RentalTable – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The full prepared table, immutable once built.
///
/// Alongside the rows it indexes the distinct season labels that actually
/// occur, which seed the default season selection.
#[derive(Debug, Clone)]
pub struct RentalTable {
    /// All prepared rows, in file order.
    pub records: Vec<RentalRecord>,
    /// Distinct season labels present in the data (missing labels excluded).
    pub seasons: BTreeSet<Season>,
}

impl RentalTable {
    /// Build the table and its season index from prepared rows.
    pub fn from_records(records: Vec<RentalRecord>) -> Self {
        let seasons = records.iter().filter_map(|rec| rec.season).collect();
        RentalTable { records, seasons }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_codes_map_to_labels() {
        assert_eq!(Season::from_code(1), Some(Season::Spring));
        assert_eq!(Season::from_code(2), Some(Season::Summer));
        assert_eq!(Season::from_code(3), Some(Season::Fall));
        assert_eq!(Season::from_code(4), Some(Season::Winter));
    }

    #[test]
    fn out_of_range_season_codes_are_missing_labels() {
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
        assert_eq!(Season::from_code(255), None);
    }

    #[test]
    fn season_labels_render() {
        let labels: Vec<String> = Season::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, ["Spring", "Summer", "Fall", "Winter"]);
    }

    #[test]
    fn day_period_boundaries() {
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(18), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(23), DayPeriod::Evening);
    }

    #[test]
    fn day_period_covers_every_hour_once() {
        for hour in 0..24 {
            let period = DayPeriod::from_hour(hour);
            let expected = match hour {
                0..=5 => DayPeriod::Night,
                6..=11 => DayPeriod::Morning,
                12..=17 => DayPeriod::Afternoon,
                18..=23 => DayPeriod::Evening,
                _ => unreachable!(),
            };
            assert_eq!(period, expected, "hour {hour}");
        }
    }

    #[test]
    fn chart_order_is_fixed() {
        let labels: Vec<&str> = DayPeriod::CHART_ORDER.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Morning", "Afternoon", "Evening", "Night"]);
    }

    #[test]
    fn weather_labels_cover_known_codes() {
        assert_eq!(weather_label(1), "Clear / few clouds");
        assert_eq!(weather_label(4), "Heavy rain / snow");
        assert_eq!(weather_label(9), "Unknown");
    }

    #[test]
    fn table_indexes_the_seasons_present() {
        let records = vec![
            record(2011, 1, 7),
            record(2011, 3, 20),
            record(2012, 9, 1), // out-of-range season code
        ];
        let table = RentalTable::from_records(records);

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.seasons.iter().copied().collect::<Vec<_>>(),
            [Season::Spring, Season::Fall]
        );
    }

    fn record(year: i32, season_code: u8, hour: u32) -> RentalRecord {
        let timestamp = chrono::NaiveDate::from_ymd_opt(year, 6, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        RentalRecord {
            timestamp,
            season: Season::from_code(season_code),
            weather: 1,
            workingday: 1,
            temp: 20.0,
            humidity: 50.0,
            windspeed: 10.0,
            count: 100,
            year,
            hour,
            day_of_week: timestamp.format("%A").to_string(),
            day_period: DayPeriod::from_hour(hour),
        }
    }
}
