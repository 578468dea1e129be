use eframe::egui;

use crate::data::filter::FilteredView;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeDashApp {
    pub state: AppState,
}

impl BikeDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BikeDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A missing dataset is fatal: show the message and nothing else.
        if let Some(message) = &self.state.fatal_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
                });
            });
            return;
        }

        // ---- Top panel: title bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Washington D.C. Bike Rental Dashboard");
            ui.separator();
            if let Some(table) = &self.state.table {
                charts::dashboard(ui, FilteredView::new(table, &self.state.visible));
            }
        });
    }
}
