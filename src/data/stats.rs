use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::DayPeriod;

// ---------------------------------------------------------------------------
// Grouped means for the three aggregate charts
// ---------------------------------------------------------------------------

/// Mean rental count per hour of day, ascending by hour.
///
/// Hours absent from the view are omitted rather than padded with zeros.
pub fn mean_count_by_hour(view: FilteredView<'_>) -> Vec<(u32, f64)> {
    grouped_mean(view.iter().map(|r| (r.hour, r.count)))
}

/// Mean rental count per weather code, ascending by code.
pub fn mean_count_by_weather(view: FilteredView<'_>) -> Vec<(u8, f64)> {
    grouped_mean(view.iter().map(|r| (r.weather, r.count)))
}

/// Mean rental count per day period, in the fixed chart order
/// {Morning, Afternoon, Evening, Night}. Absent periods are omitted.
pub fn mean_count_by_period(view: FilteredView<'_>) -> Vec<(DayPeriod, f64)> {
    let means: BTreeMap<DayPeriod, f64> =
        grouped_mean(view.iter().map(|r| (r.day_period, r.count)))
            .into_iter()
            .collect();

    DayPeriod::CHART_ORDER
        .iter()
        .filter_map(|period| means.get(period).map(|&mean| (*period, mean)))
        .collect()
}

/// Accumulate (key, count) pairs into per-key means, sorted by key.
fn grouped_mean<K: Ord + Copy>(pairs: impl Iterator<Item = (K, u64)>) -> Vec<(K, f64)> {
    let mut sums: BTreeMap<K, (u64, usize)> = BTreeMap::new();
    for (key, count) in pairs {
        let entry = sums.entry(key).or_insert((0, 0));
        entry.0 += count;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum as f64 / n as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Pearson correlation matrix
// ---------------------------------------------------------------------------

/// Numeric columns the correlation matrix covers, in display order.
pub const CORR_COLUMNS: [&str; 4] = ["temp", "humidity", "windspeed", "count"];

/// Variance below this is treated as constant (correlation undefined).
const VARIANCE_FLOOR: f64 = 1e-10;

/// Pairwise Pearson correlation over {temp, humidity, windspeed, count}.
///
/// Symmetric with an exact 1.0 diagonal for columns with variance. Cells
/// involving a constant column, or computed over fewer than two rows, are
/// NaN — the heatmap renders them neutral instead of failing.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    values: [[f64; 4]; 4],
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Compute the correlation matrix over the filtered view.
pub fn correlation_matrix(view: FilteredView<'_>) -> CorrelationMatrix {
    let mut cols: [Vec<f64>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for rec in view.iter() {
        cols[0].push(rec.temp);
        cols[1].push(rec.humidity);
        cols[2].push(rec.windspeed);
        cols[3].push(rec.count as f64);
    }

    let mut values = [[f64::NAN; 4]; 4];
    for i in 0..4 {
        for j in i..4 {
            let r = if i == j {
                if variance_sum(&cols[i]) > VARIANCE_FLOOR {
                    1.0
                } else {
                    f64::NAN
                }
            } else {
                pearson(&cols[i], &cols[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { values }
}

/// Sum of squared deviations from the mean (unnormalised variance).
fn variance_sum(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return 0.0;
    }
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    x.iter().map(|&v| (v - mean) * (v - mean)).sum()
}

/// Pearson correlation of two equally long columns; NaN when undefined.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= VARIANCE_FLOOR || var_y <= VARIANCE_FLOOR {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
