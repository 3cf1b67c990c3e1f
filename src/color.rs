use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// The hue wheel starts at `offset` degrees.
pub fn generate_palette(n: usize, offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (offset + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Gender → Color32
// ---------------------------------------------------------------------------

/// Colour per gender, shared by the charts and the side-panel legend so a
/// series looks the same everywhere.
#[derive(Debug, Clone)]
pub struct GenderColors {
    mapping: BTreeMap<Gender, Color32>,
    default_color: Color32,
}

impl Default for GenderColors {
    fn default() -> Self {
        // 330° puts F on pink and M on teal.
        let palette = generate_palette(Gender::ALL.len(), 330.0);
        let mapping = Gender::ALL.into_iter().zip(palette).collect();
        GenderColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl GenderColors {
    pub fn color_for(&self, gender: Gender) -> Color32 {
        self.mapping
            .get(&gender)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (gender label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(g, c)| (g.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(5, 0.0).len(), 5);
    }

    #[test]
    fn genders_get_distinct_colors() {
        let colors = GenderColors::default();
        assert_ne!(
            colors.color_for(Gender::Female),
            colors.color_for(Gender::Male)
        );
        let legend = colors.legend_entries();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].0, "F");
        assert_eq!(legend[1].0, "M");
    }
}
