use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Expected rentals for an hour of day, before season, weather, growth
/// and noise are applied. Working days get commute peaks; weekends and
/// holidays a broad midday bump.
fn demand_shape(hour: u32, working_day: bool) -> f64 {
    let h = f64::from(hour);
    if working_day {
        gaussian(h, 8.0, 1.5, 320.0)
            + gaussian(h, 17.5, 2.0, 380.0)
            + gaussian(h, 13.0, 4.0, 90.0)
            + 15.0
    } else {
        gaussian(h, 14.0, 3.5, 280.0) + 20.0
    }
}

fn season_code(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

fn season_factor(code: u32) -> f64 {
    match code {
        1 => 0.70,
        2 => 1.05,
        3 => 1.15,
        _ => 0.90,
    }
}

fn weather_factor(code: u32) -> f64 {
    match code {
        1 => 1.0,
        2 => 0.80,
        3 => 0.40,
        _ => 0.12,
    }
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Weather codes are mostly clear, rarely stormy.
    fn weather_code(&mut self) -> u32 {
        let u = self.next_f64();
        if u < 0.66 {
            1
        } else if u < 0.92 {
            2
        } else if u < 0.99 {
            3
        } else {
            4
        }
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "train.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer
        .write_record([
            "datetime",
            "season",
            "holiday",
            "workingday",
            "weather",
            "temp",
            "atemp",
            "humidity",
            "windspeed",
            "casual",
            "registered",
            "count",
        ])
        .context("writing header")?;

    // The published rental dataset covers the first 19 days of each
    // month of 2011 and 2012, one row per hour.
    let mut rows: u64 = 0;
    for year in [2011, 2012] {
        for month in 1..=12u32 {
            for day in 1..=19u32 {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .with_context(|| format!("invalid calendar date {year}-{month:02}-{day:02}"))?;
                let holiday = u32::from((month, day) == (1, 1) || (month, day) == (7, 4));
                let weekend = date.weekday().number_from_monday() >= 6;
                let workingday = u32::from(!weekend && holiday == 0);

                // Annual temperature cycle peaking in July.
                let t = f64::from(date.ordinal()) / 365.0;
                let seasonal_temp =
                    14.0 + 12.0 * (std::f64::consts::TAU * (t - 0.28)).sin();

                for hour in 0..24u32 {
                    let h = f64::from(hour);
                    let weather = rng.weather_code();

                    // Diurnal cycle peaking mid-afternoon.
                    let temp = (seasonal_temp
                        + 4.5 * (std::f64::consts::TAU * (h - 9.0) / 24.0).sin()
                        + rng.gauss(0.0, 1.5))
                    .clamp(0.0, 41.0);
                    let atemp = (temp + 3.5 + rng.gauss(0.0, 1.0)).clamp(0.0, 50.0);
                    let humidity = (62.0
                        + 18.0 * (std::f64::consts::TAU * (h + 4.0) / 24.0).sin()
                        + rng.gauss(0.0, 8.0))
                    .clamp(0.0, 100.0);
                    let windspeed = rng.gauss(13.0, 7.0).abs().clamp(0.0, 57.0);

                    let year_growth = if year == 2011 { 1.0 } else { 1.55 };
                    let expected = demand_shape(hour, workingday == 1)
                        * season_factor(season_code(month))
                        * weather_factor(weather)
                        * year_growth;
                    let noisy = expected * (1.0 + rng.gauss(0.0, 0.18));
                    let count = noisy.max(0.0).round() as u64;

                    // Commuters dominate on working days.
                    let registered_share = if workingday == 1 { 0.80 } else { 0.55 };
                    let registered = ((count as f64 * registered_share).round() as u64).min(count);
                    let casual = count - registered;

                    let datetime = date
                        .and_hms_opt(hour, 0, 0)
                        .with_context(|| format!("invalid time {hour}:00"))?
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string();

                    writer
                        .write_record([
                            datetime,
                            season_code(month).to_string(),
                            holiday.to_string(),
                            workingday.to_string(),
                            weather.to_string(),
                            format!("{temp:.2}"),
                            format!("{atemp:.2}"),
                            format!("{humidity:.0}"),
                            format!("{windspeed:.4}"),
                            casual.to_string(),
                            registered.to_string(),
                            count.to_string(),
                        ])
                        .context("writing row")?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush().context("flushing output file")?;
    println!("Wrote {rows} hourly rows to {output_path}");
    Ok(())
}
