use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::filter::{DayType, FilterCriteria};
use crate::data::model::Season;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar filter widgets.
///
/// Every widget change goes through an [`AppState`] mutator so the visible
/// index list is recomputed before the charts are drawn.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year selection ----
            ui.strong("Years");
            for year in FilterCriteria::YEAR_CHOICES {
                let mut checked = state.criteria.years.contains(&year);
                if ui.checkbox(&mut checked, year.to_string()).changed() {
                    state.toggle_year(year);
                }
            }
            ui.separator();

            // ---- Season selection (collapsible, with All/None shortcuts) ----
            let header = format!(
                "Seasons  ({}/{})",
                state.criteria.seasons.len(),
                Season::ALL.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("season_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_seasons();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_seasons();
                        }
                    });

                    for season in Season::ALL {
                        let mut checked = state.criteria.seasons.contains(&season);
                        if ui.checkbox(&mut checked, season.label()).changed() {
                            state.toggle_season(season);
                        }
                    }
                });
            ui.separator();

            // ---- Day type (radio) ----
            ui.strong("Day Type");
            for day_type in DayType::CHOICES {
                let selected = state.criteria.day_type == day_type;
                if ui.radio(selected, day_type.label()).clicked() {
                    state.set_day_type(day_type);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar: dataset size and how many rows pass the
/// current filters.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Bike Dash").strong());
        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} records loaded, {} match the filters",
                table.len(),
                state.visible.len()
            ));
        }
    });
}
