use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// House colours of the dashboard, used before any generated hue.
pub const BASE_COLORS: [Color32; 4] = [
    Color32::from_rgb(0xb7, 0x64, 0x35),
    Color32::from_rgb(0x79, 0x91, 0x91),
    Color32::from_rgb(0xf3, 0xbe, 0x72),
    Color32::from_rgb(0xaf, 0x50, 0x2b),
];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.45, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// The base colours followed by generated hues, `n` in total.
pub fn chart_palette(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = BASE_COLORS.iter().copied().take(n).collect();
    colors.extend(generate_palette(n.saturating_sub(BASE_COLORS.len())));
    colors
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Stable label → colour assignment for one chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours to `labels` in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(chart_palette(labels.len()))
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_starts_with_base_colors() {
        let colors = chart_palette(6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[..4], BASE_COLORS);
        assert!(chart_palette(0).is_empty());
        assert_eq!(chart_palette(2), BASE_COLORS[..2]);
    }

    #[test]
    fn color_map_is_positional() {
        let map = ColorMap::new(["Often", "Never"]);
        assert_eq!(map.color_for("Often"), BASE_COLORS[0]);
        assert_eq!(map.color_for("Never"), BASE_COLORS[1]);
        assert_eq!(map.color_for("Sometimes"), Color32::GRAY);
    }
}
