use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n).map(|i| series_color(i, n)).collect()
}

/// Colour of series `i` out of `n`.
pub fn series_color(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n.max(1) as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    to_color32(rgb)
}

// ---------------------------------------------------------------------------
// Heatmap scale
// ---------------------------------------------------------------------------

/// Cell colour for `value` on a `0..=max` scale, dark blue to warm orange.
pub fn heat_color(value: usize, max: usize) -> Color32 {
    let t = if max == 0 {
        0.0
    } else {
        value as f32 / max as f32
    };
    let low = LinSrgb::new(0.02_f32, 0.03, 0.15);
    let high = LinSrgb::new(0.95_f32, 0.35, 0.05);
    let rgb: Srgb = low.mix(high, t).into_color();
    to_color32(rgb)
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn heat_scale_ends() {
        assert_eq!(heat_color(0, 0), heat_color(0, 10));
        assert_ne!(heat_color(0, 10), heat_color(10, 10));
    }
}
