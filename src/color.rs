use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Undefined (NaN) correlation cells render in this neutral grey.
const UNDEFINED_CELL: Color32 = Color32::from_gray(70);

/// Cell colour for a correlation value: blue through white to red over
/// [-1, 1], neutral grey when the value is undefined.
pub fn correlation_color(value: f64) -> Color32 {
    if value.is_nan() {
        return UNDEFINED_CELL;
    }

    let cold: LinSrgb = Srgb::new(0.23f32, 0.30, 0.75).into_linear();
    let warm: LinSrgb = Srgb::new(0.71f32, 0.02, 0.15).into_linear();
    let neutral: LinSrgb = Srgb::new(0.93f32, 0.93, 0.93).into_linear();

    // Position on the scale: 0 = strongly negative, 1 = strongly positive.
    let t = (value.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    let mixed = if t < 0.5 {
        cold.mix(neutral, t * 2.0)
    } else {
        neutral.mix(warm, (t - 0.5) * 2.0)
    };

    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Annotation colour that stays readable on top of [`correlation_color`]:
/// light text on the saturated ends, dark text around the neutral middle.
pub fn correlation_text_color(value: f64) -> Color32 {
    if value.is_nan() || value.abs() > 0.6 {
        Color32::from_gray(235)
    } else {
        Color32::from_gray(25)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_colors_span_the_diverging_scale() {
        let cold = correlation_color(-1.0);
        let warm = correlation_color(1.0);
        let neutral = correlation_color(0.0);

        // Strong negatives lean blue, strong positives lean red, and the
        // middle of the scale stays light.
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert!(neutral.r() > 200 && neutral.g() > 200 && neutral.b() > 200);
    }

    #[test]
    fn undefined_values_render_neutral_grey() {
        assert_eq!(correlation_color(f64::NAN), Color32::from_gray(70));
        assert_eq!(correlation_text_color(f64::NAN), Color32::from_gray(235));
    }
}
