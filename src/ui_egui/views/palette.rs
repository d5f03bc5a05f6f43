use crate::models::mood::{Intensity, Mood};
use crate::ui_egui::theme::HeatmapTheme;
use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Base hue (degrees), saturation and lightness (percent) of each mood.
pub fn base_hsl(mood: Mood) -> (f32, f32, f32) {
    match mood {
        Mood::Joy => (38.0, 95.0, 65.0),
        Mood::Calm => (135.0, 28.0, 64.0),
        Mood::Sadness => (205.0, 45.0, 72.0),
        Mood::Anger => (355.0, 70.0, 68.0),
        Mood::Fatigue => (260.0, 32.0, 70.0),
    }
}

/// Converts HSL with saturation and lightness in percent to an sRGB colour.
pub fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);
    let h = hue.rem_euclid(360.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = chroma * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Color32::from_rgb(channel(r1), channel(g1), channel(b1))
}

/// Fill colour of a recorded day. Low intensity is lighter and a little
/// washed out, high intensity darker.
pub fn mood_color(mood: Mood, intensity: Intensity) -> Color32 {
    let (h, s, l) = base_hsl(mood);
    let (saturation, lightness) = match intensity.get() {
        1 => (s - 6.0, l + 8.0),
        2 => (s - 2.0, l),
        _ => (s, l - 8.0),
    };
    hsl_to_color(h, saturation, lightness)
}

/// Halo drawn behind high-intensity days.
pub fn glow_color(mood: Mood) -> Color32 {
    let (h, s, l) = base_hsl(mood);
    with_alpha(hsl_to_color(h, s, (l - 12.0).max(0.0)), 140)
}

#[derive(Clone, Copy)]
pub struct HeatmapPalette {
    pub empty_day: Color32,
    pub cell_border: Color32,
    pub hover_border: Color32,
    pub marker: Color32,
    pub label: Color32,
}

impl HeatmapPalette {
    pub fn from_theme(theme: &HeatmapTheme) -> Self {
        Self {
            empty_day: theme.empty_day,
            cell_border: with_alpha(theme.cell_border, if theme.is_dark { 90 } else { 60 }),
            hover_border: with_alpha(theme.accent, if theme.is_dark { 200 } else { 160 }),
            marker: theme.text_secondary,
            label: theme.text_secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hsl_to_color(0.0, 100.0, 50.0), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_color(120.0, 100.0, 50.0), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl_to_color(240.0, 100.0, 50.0), Color32::from_rgb(0, 0, 255));
        assert_eq!(hsl_to_color(0.0, 0.0, 100.0), Color32::WHITE);
    }

    #[test]
    fn test_intensity_orders_lightness() {
        for mood in Mood::ALL {
            let sum = |c: Color32| u32::from(c.r()) + u32::from(c.g()) + u32::from(c.b());
            let low = sum(mood_color(mood, Intensity::LOW));
            let medium = sum(mood_color(mood, Intensity::MEDIUM));
            let high = sum(mood_color(mood, Intensity::HIGH));
            assert!(low > medium, "{mood} low should be lighter");
            assert!(medium > high, "{mood} high should be darker");
        }
    }

    #[test]
    fn test_moods_are_distinct() {
        let colors: Vec<Color32> = Mood::ALL
            .iter()
            .map(|m| mood_color(*m, Intensity::MEDIUM))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_glow_is_translucent() {
        assert!(glow_color(Mood::Anger).a() < 255);
    }
}
