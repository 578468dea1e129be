use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::filter::{DayType, FilterCriteria, visible_indices};
use crate::data::model::{RentalTable, Season};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The prepared table is shared read-only; every widget change recomputes
/// the cached `visible` index list before the next frame draws the charts.
pub struct AppState {
    /// Prepared dataset (None when startup failed).
    pub table: Option<Arc<RentalTable>>,

    /// Current sidebar selections.
    pub criteria: FilterCriteria,

    /// Indices of rows passing the current criteria (cached).
    pub visible: Vec<usize>,

    /// Fatal startup message; shown instead of the dashboard when set.
    pub fatal_error: Option<String>,
}

impl AppState {
    /// State for a successfully prepared dataset, with the default
    /// selections applied. The initial view goes through the same predicate
    /// as every later one, so rows outside the defaults (an unlabelled
    /// season, say) are hidden from the first frame on.
    pub fn with_table(table: Arc<RentalTable>) -> Self {
        let criteria = FilterCriteria::all_of(&table);
        let visible = visible_indices(&table, &criteria);
        AppState {
            table: Some(table),
            criteria,
            visible,
            fatal_error: None,
        }
    }

    /// State for a failed startup. The session only displays `message`.
    pub fn failed(message: String) -> Self {
        AppState {
            table: None,
            criteria: FilterCriteria {
                years: BTreeSet::new(),
                seasons: BTreeSet::new(),
                day_type: DayType::All,
            },
            visible: Vec::new(),
            fatal_error: Some(message),
        }
    }

    /// Recompute `visible` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible = visible_indices(table, &self.criteria);
            log::debug!(
                "filter change: {} of {} rows visible",
                self.visible.len(),
                table.len()
            );
        }
    }

    /// Tick or untick a year checkbox.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.criteria.years.remove(&year) {
            self.criteria.years.insert(year);
        }
        self.refilter();
    }

    /// Tick or untick a season checkbox.
    pub fn toggle_season(&mut self, season: Season) {
        if !self.criteria.seasons.remove(&season) {
            self.criteria.seasons.insert(season);
        }
        self.refilter();
    }

    /// Switch the day-type radio selection.
    pub fn set_day_type(&mut self, day_type: DayType) {
        if self.criteria.day_type != day_type {
            self.criteria.day_type = day_type;
            self.refilter();
        }
    }

    /// Tick every season checkbox.
    pub fn select_all_seasons(&mut self) {
        self.criteria.seasons = Season::ALL.into_iter().collect();
        self.refilter();
    }

    /// Untick every season checkbox (a legal, empty selection).
    pub fn select_no_seasons(&mut self) {
        self.criteria.seasons.clear();
        self.refilter();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
