use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use super::error::DatasetError;
use super::model::{DayPeriod, RentalRecord, RentalTable, Season};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the rental CSV at `path` and derive the calendar features.
///
/// Required columns: `datetime`, `season`, `weather`, `workingday`, `temp`,
/// `humidity`, `windspeed`, `count`. Any further columns in the file are
/// ignored. A missing file fails fast with [`DatasetError::MissingInput`];
/// nothing is partially constructed.
pub fn load_and_prepare(path: &Path) -> Result<RentalTable, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    prepare_from_reader(file, path)
}

/// Process-wide handle to the prepared table.
///
/// The table is a pure function of the input file, so it is parsed at most
/// once per process: the first successful call fills a write-once cell and
/// every later call returns the same `Arc`. A failed load leaves the cell
/// empty.
pub fn shared_table(path: &Path) -> Result<Arc<RentalTable>, DatasetError> {
    static PREPARED: OnceCell<Arc<RentalTable>> = OnceCell::new();

    PREPARED
        .get_or_try_init(|| load_and_prepare(path).map(Arc::new))
        .map(Arc::clone)
}

// ---------------------------------------------------------------------------
// CSV decoding
// ---------------------------------------------------------------------------

/// Datetime layouts accepted for the `datetime` column. The Kaggle export
/// uses the first; the second tolerates an ISO 'T' separator.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One raw CSV row, decoded by header name.
#[derive(Debug, Deserialize)]
struct RawRecord {
    datetime: String,
    season: u8,
    weather: u8,
    workingday: u8,
    temp: f64,
    humidity: f64,
    windspeed: f64,
    count: u64,
}

fn prepare_from_reader<R: Read>(reader: R, path: &Path) -> Result<RentalTable, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // Data rows count from 1, excluding the header.
        records.push(prepare_row(raw, row + 1)?);
    }

    Ok(RentalTable::from_records(records))
}

/// Turn a raw row into a prepared record with all derived columns set.
///
/// The raw attribute values are carried through unmodified; only the season
/// code is replaced by its label (`None` for out-of-range codes).
fn prepare_row(raw: RawRecord, row: usize) -> Result<RentalRecord, DatasetError> {
    let timestamp = parse_datetime(&raw.datetime).ok_or_else(|| DatasetError::Timestamp {
        row,
        value: raw.datetime.clone(),
    })?;

    let hour = timestamp.hour();
    Ok(RentalRecord {
        timestamp,
        season: Season::from_code(raw.season),
        weather: raw.weather,
        workingday: raw.workingday,
        temp: raw.temp,
        humidity: raw.humidity,
        windspeed: raw.windspeed,
        count: raw.count,
        year: timestamp.year(),
        hour,
        day_of_week: timestamp.format("%A").to_string(),
        day_period: DayPeriod::from_hour(hour),
    })
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Kaggle column layout, including the columns the loader ignores.
    const SAMPLE: &str = "\
datetime,season,holiday,workingday,weather,temp,atemp,humidity,windspeed,casual,registered,count
2011-01-01 00:00:00,1,0,0,1,9.84,14.395,81,0.0,3,13,16
2011-01-01 07:00:00,1,0,1,2,8.2,12.88,86,19.0012,1,31,32
2012-10-08 20:00:00,3,0,0,1,26.24,31.06,65,11.0014,49,247,296
";

    fn sample_table() -> RentalTable {
        prepare_from_reader(SAMPLE.as_bytes(), Path::new("sample.csv")).unwrap()
    }

    #[test]
    fn derives_calendar_columns() {
        let table = sample_table();
        assert_eq!(table.len(), 3);

        let first = &table.records[0];
        assert_eq!(first.year, 2011);
        assert_eq!(first.hour, 0);
        assert_eq!(first.day_of_week, "Saturday");
        assert_eq!(first.day_period, DayPeriod::Night);
        assert_eq!(first.season, Some(Season::Spring));

        let last = &table.records[2];
        assert_eq!(last.year, 2012);
        assert_eq!(last.hour, 20);
        assert_eq!(last.day_of_week, "Monday");
        assert_eq!(last.day_period, DayPeriod::Evening);
        assert_eq!(last.season, Some(Season::Fall));
    }

    #[test]
    fn raw_values_pass_through_unmodified() {
        let table = sample_table();
        let rec = &table.records[1];
        assert_eq!(rec.weather, 2);
        assert_eq!(rec.workingday, 1);
        assert_eq!(rec.temp, 8.2);
        assert_eq!(rec.humidity, 86.0);
        assert_eq!(rec.windspeed, 19.0012);
        assert_eq!(rec.count, 32);
    }

    #[test]
    fn out_of_range_season_code_keeps_the_row() {
        let csv = "\
datetime,season,weather,workingday,temp,humidity,windspeed,count
2011-06-01 12:00:00,7,1,1,25.0,40,5.0,120
";
        let table = prepare_from_reader(csv.as_bytes(), Path::new("sample.csv")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].season, None);
        assert!(table.seasons.is_empty());
    }

    #[test]
    fn accepts_iso_t_separator() {
        assert!(parse_datetime("2011-01-01T06:30:00").is_some());
        assert!(parse_datetime("2011-01-01 06:30:00").is_some());
        assert!(parse_datetime("01/01/2011 06:30").is_none());
    }

    #[test]
    fn missing_file_fails_fast_naming_the_file() {
        let err = load_and_prepare(Path::new("definitely_not_here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingInput { .. }));
        assert!(err.to_string().contains("definitely_not_here.csv"));
    }

    #[test]
    fn malformed_timestamp_reports_the_row() {
        let csv = "\
datetime,season,weather,workingday,temp,humidity,windspeed,count
2011-01-01 00:00:00,1,1,0,9.8,81,0.0,16
not-a-date,1,1,0,9.8,81,0.0,16
";
        let err = prepare_from_reader(csv.as_bytes(), Path::new("sample.csv")).unwrap_err();
        match err {
            DatasetError::Timestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shared_table_parses_once() {
        let path = std::env::temp_dir().join(format!("bike_dash_cache_{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let first = shared_table(&path).unwrap();
        let second = shared_table(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // First successful load wins for the life of the process.
        let third = shared_table(Path::new("some_other.csv")).unwrap();
        assert!(Arc::ptr_eq(&first, &third));

        let _ = std::fs::remove_file(&path);
    }
}
