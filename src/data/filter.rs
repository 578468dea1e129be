use std::collections::BTreeSet;
use std::fmt;

use super::model::{RentalRecord, RentalTable, Season};

// ---------------------------------------------------------------------------
// Filter criteria: the three sidebar axes
// ---------------------------------------------------------------------------

/// Day-type filter mode (radio selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    All,
    WorkingDay,
    WeekendOrHoliday,
}

impl DayType {
    /// The choices offered by the sidebar, in display order.
    pub const CHOICES: [DayType; 3] = [DayType::All, DayType::WorkingDay, DayType::WeekendOrHoliday];

    pub fn label(self) -> &'static str {
        match self {
            DayType::All => "All",
            DayType::WorkingDay => "Working Day",
            DayType::WeekendOrHoliday => "Weekend or Holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The user's current selections: years, seasons, day type.
///
/// Widgets only offer values from these enumerated sets, so malformed
/// criteria cannot arise. An empty year or season selection is legal and
/// simply selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub years: BTreeSet<i32>,
    pub seasons: BTreeSet<Season>,
    pub day_type: DayType,
}

impl FilterCriteria {
    /// The two years the published dataset covers. The sidebar offers
    /// exactly these, whatever years the loaded file happens to contain.
    pub const YEAR_CHOICES: [i32; 2] = [2011, 2012];

    /// Default selection: both dataset years, every season present in the
    /// data, day type "All".
    pub fn all_of(table: &RentalTable) -> Self {
        FilterCriteria {
            years: Self::YEAR_CHOICES.into_iter().collect(),
            seasons: table.seasons.clone(),
            day_type: DayType::All,
        }
    }

    /// Conjunctive row predicate.
    ///
    /// A row passes when its year is selected AND its season label is
    /// selected AND it matches the day-type mode. A missing season label is
    /// a member of no selection, so such rows never pass. Pure: no state
    /// beyond `self` and the record.
    pub fn matches(&self, record: &RentalRecord) -> bool {
        if !self.years.contains(&record.year) {
            return false;
        }

        let season_selected = match record.season {
            Some(season) => self.seasons.contains(&season),
            None => false,
        };
        if !season_selected {
            return false;
        }

        match self.day_type {
            DayType::All => true,
            DayType::WorkingDay => record.workingday == 1,
            DayType::WeekendOrHoliday => record.workingday == 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Return indices of rows passing the criteria, in table order.
///
/// The result is a view over the immutable table, never a mutated copy.
/// Identical inputs always yield the identical index list.
pub fn visible_indices(table: &RentalTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowed view of the rows currently visible: the prepared table plus the
/// index list produced by [`visible_indices`].
#[derive(Clone, Copy)]
pub struct FilteredView<'a> {
    table: &'a RentalTable,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(table: &'a RentalTable, indices: &'a [usize]) -> Self {
        FilteredView { table, indices }
    }

    /// Visible rows in table order.
    pub fn iter(self) -> impl Iterator<Item = &'a RentalRecord> {
        self.indices.iter().map(move |&i| &self.table.records[i])
    }

    pub fn len(self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DayPeriod;

    fn record(year: i32, season_code: u8, hour: u32, workingday: u8, count: u64) -> RentalRecord {
        let timestamp = chrono::NaiveDate::from_ymd_opt(year, 1, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        RentalRecord {
            timestamp,
            season: Season::from_code(season_code),
            weather: 1,
            workingday,
            temp: 15.0,
            humidity: 55.0,
            windspeed: 8.0,
            count,
            year,
            hour,
            day_of_week: timestamp.format("%A").to_string(),
            day_period: DayPeriod::from_hour(hour),
        }
    }

    /// Row A and row B of the two-row walkthrough.
    fn two_row_table() -> RentalTable {
        RentalTable::from_records(vec![
            record(2011, 1, 7, 1, 10),  // A: Spring, Morning, working day
            record(2012, 3, 20, 0, 50), // B: Fall, Evening, weekend
        ])
    }

    #[test]
    fn defaults_select_both_years_and_present_seasons() {
        let table = two_row_table();
        let criteria = FilterCriteria::all_of(&table);

        assert_eq!(criteria.years.iter().copied().collect::<Vec<_>>(), [2011, 2012]);
        assert_eq!(
            criteria.seasons.iter().copied().collect::<Vec<_>>(),
            [Season::Spring, Season::Fall]
        );
        assert_eq!(criteria.day_type, DayType::All);
        assert_eq!(visible_indices(&table, &criteria), [0, 1]);
    }

    #[test]
    fn default_years_are_the_fixed_pair() {
        // One year of data; the year selection still covers both
        // dataset years, not just the one present.
        let table = RentalTable::from_records(vec![record(2011, 1, 7, 1, 10)]);
        let criteria = FilterCriteria::all_of(&table);

        assert_eq!(
            criteria.years.iter().copied().collect::<Vec<_>>(),
            FilterCriteria::YEAR_CHOICES
        );
        assert_eq!(visible_indices(&table, &criteria), [0]);
    }

    #[test]
    fn empty_year_selection_is_a_valid_empty_view() {
        let table = two_row_table();
        let mut criteria = FilterCriteria::all_of(&table);
        criteria.years.clear();
        assert!(visible_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn empty_season_selection_is_a_valid_empty_view() {
        let table = two_row_table();
        let mut criteria = FilterCriteria::all_of(&table);
        criteria.seasons.clear();
        assert!(visible_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn working_day_mode_keeps_only_working_days() {
        let table = two_row_table();
        let mut criteria = FilterCriteria::all_of(&table);
        criteria.day_type = DayType::WorkingDay;

        let indices = visible_indices(&table, &criteria);
        assert!(!indices.is_empty());
        assert!(indices.iter().all(|&i| table.records[i].workingday == 1));
    }

    #[test]
    fn weekend_mode_keeps_only_non_working_days() {
        let table = two_row_table();
        let mut criteria = FilterCriteria::all_of(&table);
        criteria.day_type = DayType::WeekendOrHoliday;

        let indices = visible_indices(&table, &criteria);
        assert!(!indices.is_empty());
        assert!(indices.iter().all(|&i| table.records[i].workingday == 0));
    }

    #[test]
    fn all_mode_equals_year_season_filtering_alone() {
        let table = two_row_table();
        let criteria = FilterCriteria {
            years: [2011].into_iter().collect(),
            seasons: [Season::Spring].into_iter().collect(),
            day_type: DayType::All,
        };

        let by_year_season: Vec<usize> = table
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                criteria.years.contains(&r.year)
                    && r.season.is_some_and(|s| criteria.seasons.contains(&s))
            })
            .map(|(i, _)| i)
            .collect();

        assert_eq!(visible_indices(&table, &criteria), by_year_season);
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = two_row_table();
        let mut criteria = FilterCriteria::all_of(&table);
        criteria.day_type = DayType::WorkingDay;

        let once = visible_indices(&table, &criteria);
        // Re-applying the predicate to the already filtered rows removes nothing.
        let twice: Vec<usize> = once
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&table.records[i]))
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_season_labels_never_match() {
        let table = RentalTable::from_records(vec![
            record(2011, 1, 9, 1, 5),
            record(2011, 9, 9, 1, 5), // code 9: no label
        ]);
        let mut criteria = FilterCriteria::all_of(&table);
        // Even with every season ticked the unlabelled row stays hidden.
        criteria.seasons = Season::ALL.into_iter().collect();

        assert_eq!(visible_indices(&table, &criteria), [0]);
    }

    #[test]
    fn two_row_walkthrough() {
        let table = two_row_table();
        let criteria = FilterCriteria {
            years: [2011].into_iter().collect(),
            seasons: [Season::Spring].into_iter().collect(),
            day_type: DayType::All,
        };

        let indices = visible_indices(&table, &criteria);
        assert_eq!(indices, [0]);

        let view = FilteredView::new(&table, &indices);
        let visible: Vec<u64> = view.iter().map(|r| r.count).collect();
        assert_eq!(visible, [10]);

        assert_eq!(table.records[0].day_period, DayPeriod::Morning);
        assert_eq!(table.records[1].day_period, DayPeriod::Evening);
    }

    #[test]
    fn day_type_labels() {
        let labels: Vec<&str> = DayType::CHOICES.iter().map(|d| d.label()).collect();
        assert_eq!(labels, ["All", "Working Day", "Weekend or Holiday"]);
    }
}
