use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_extras::{Size, StripBuilder};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color;
use crate::data::filter::FilteredView;
use crate::data::model::{DayPeriod, weather_label};
use crate::data::stats::{self, CORR_COLUMNS};

// ---------------------------------------------------------------------------
// Dashboard grid
// ---------------------------------------------------------------------------

/// Render the four dashboard charts in a two-by-two grid.
///
/// The renderers are independent and order-insensitive; each consumes the
/// same filtered view.
pub fn dashboard(ui: &mut Ui, view: FilteredView<'_>) {
    StripBuilder::new(ui)
        .size(Size::remainder())
        .size(Size::remainder())
        .vertical(|mut strip| {
            strip.strip(|builder| {
                builder
                    .size(Size::remainder())
                    .size(Size::remainder())
                    .horizontal(|mut strip| {
                        strip.cell(|ui| hourly_trend(ui, view));
                        strip.cell(|ui| period_breakdown(ui, view));
                    });
            });
            strip.strip(|builder| {
                builder
                    .size(Size::remainder())
                    .size(Size::remainder())
                    .horizontal(|mut strip| {
                        strip.cell(|ui| weather_impact(ui, view));
                        strip.cell(|ui| correlation_heatmap(ui, view));
                    });
            });
        });
}

/// Shown instead of a chart when the filtered view has no rows.
fn empty_placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new("No rows match the current filters").weak());
    });
}

// ---------------------------------------------------------------------------
// Hourly trend
// ---------------------------------------------------------------------------

/// Mean rentals per hour of day, as an ascending line.
pub fn hourly_trend(ui: &mut Ui, view: FilteredView<'_>) {
    ui.strong("Hourly Rental Trends");

    let means = stats::mean_count_by_hour(view);
    if means.is_empty() {
        empty_placeholder(ui);
        return;
    }

    let points: PlotPoints = means
        .iter()
        .map(|&(hour, mean)| [f64::from(hour), mean])
        .collect();
    let line = Line::new(points).color(Color32::LIGHT_BLUE).width(2.0);

    Plot::new("hourly_trend")
        .x_axis_label("hour")
        .y_axis_label("mean count")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

// ---------------------------------------------------------------------------
// Weather impact
// ---------------------------------------------------------------------------

/// Mean rentals per weather code, as bars. Hovering a bar shows the
/// weather description.
pub fn weather_impact(ui: &mut Ui, view: FilteredView<'_>) {
    ui.strong("Weather Impact");

    let means = stats::mean_count_by_weather(view);
    if means.is_empty() {
        empty_placeholder(ui);
        return;
    }

    let palette = color::generate_palette(means.len());
    let bars: Vec<Bar> = means
        .iter()
        .zip(&palette)
        .map(|(&(code, mean), &fill)| {
            Bar::new(f64::from(code), mean)
                .width(0.7)
                .fill(fill)
                .name(weather_label(code))
        })
        .collect();

    Plot::new("weather_impact")
        .x_axis_label("weather")
        .y_axis_label("mean count")
        .x_axis_formatter(|mark: GridMark, _range| whole_number_tick(mark))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Label only whole-number grid marks (bar positions are integral codes).
fn whole_number_tick(mark: GridMark) -> String {
    if (mark.value - mark.value.round()).abs() < 1e-6 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Day-period breakdown
// ---------------------------------------------------------------------------

/// Mean rentals per day period, in the fixed order
/// {Morning, Afternoon, Evening, Night}.
pub fn period_breakdown(ui: &mut Ui, view: FilteredView<'_>) {
    ui.strong("Rentals by Day Period");

    let means = stats::mean_count_by_period(view);
    if means.is_empty() {
        empty_placeholder(ui);
        return;
    }

    let palette = color::generate_palette(DayPeriod::CHART_ORDER.len());
    // The bar's x position is its slot in CHART_ORDER, which pins the
    // display order regardless of how the data is distributed.
    let bars: Vec<Bar> = means
        .iter()
        .filter_map(|&(period, mean)| {
            let slot = DayPeriod::CHART_ORDER.iter().position(|&p| p == period)?;
            Some(
                Bar::new(slot as f64, mean)
                    .width(0.7)
                    .fill(palette[slot])
                    .name(period.label()),
            )
        })
        .collect();

    Plot::new("period_breakdown")
        .x_axis_label("day period")
        .y_axis_label("mean count")
        .x_axis_formatter(|mark: GridMark, _range| period_tick(mark))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn period_tick(mark: GridMark) -> String {
    let slot = mark.value.round();
    if slot < 0.0 || (mark.value - slot).abs() > 1e-6 {
        return String::new();
    }
    DayPeriod::CHART_ORDER
        .get(slot as usize)
        .map(|p| p.label().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Feature correlation heatmap
// ---------------------------------------------------------------------------

/// Pairwise correlation of {temp, humidity, windspeed, count} as a
/// coloured cell grid with annotated values.
pub fn correlation_heatmap(ui: &mut Ui, view: FilteredView<'_>) {
    ui.strong("Feature Correlation");

    if view.is_empty() {
        empty_placeholder(ui);
        return;
    }

    let matrix = stats::correlation_matrix(view);
    let n = CORR_COLUMNS.len();

    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .x_axis_formatter(|mark: GridMark, _range| column_tick(mark))
        .y_axis_formatter(|mark: GridMark, _range| row_tick(mark))
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for row in 0..n {
                for col in 0..n {
                    let value = matrix.get(row, col);
                    let x = col as f64;
                    // Row 0 is drawn at the top.
                    let y = (n - 1 - row) as f64;

                    let cell = Polygon::new(PlotPoints::from(vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ]))
                    .fill_color(color::correlation_color(value))
                    .stroke(Stroke::new(1.0, Color32::from_gray(30)));
                    plot_ui.polygon(cell);

                    // Undefined cells stay unannotated.
                    if !value.is_nan() {
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(format!("{value:.2}"))
                                .color(color::correlation_text_color(value))
                                .size(12.0),
                        ));
                    }
                }
            }
        });
}

fn corr_slot(value: f64) -> Option<usize> {
    let slot = value.round();
    if slot < 0.0 || (value - slot).abs() > 1e-6 {
        return None;
    }
    let index = slot as usize;
    (index < CORR_COLUMNS.len()).then_some(index)
}

fn column_tick(mark: GridMark) -> String {
    corr_slot(mark.value)
        .map(|i| CORR_COLUMNS[i].to_string())
        .unwrap_or_default()
}

fn row_tick(mark: GridMark) -> String {
    // The matrix is drawn top-down, so the y axis runs in reverse.
    corr_slot(mark.value)
        .map(|i| CORR_COLUMNS[CORR_COLUMNS.len() - 1 - i].to_string())
        .unwrap_or_default()
}
