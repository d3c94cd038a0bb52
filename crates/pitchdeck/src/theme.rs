use eframe::egui::Color32;

/// Colours and type scale for slides and the control overlay. Sizes are in
/// reference pixels at 1920x1080 and multiplied by the viewport scale.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
    pub display_size: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub card_title_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color32::BLACK,
            foreground: Color32::WHITE,
            accent: Color32::from_rgb(0xD2, 0xFF, 0x55),
            card_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 14),
            card_border: Color32::from_rgba_unmultiplied(255, 255, 255, 31),
            display_size: 96.0,
            title_size: 64.0,
            subtitle_size: 44.0,
            card_title_size: 34.0,
            body_size: 20.0,
            caption_size: 18.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        color.gamma_multiply(opacity.clamp(0.0, 1.0))
    }

    /// Foreground at a given emphasis (0..1), further faded by the slide opacity.
    pub fn text(&self, emphasis: f32, opacity: f32) -> Color32 {
        Self::with_opacity(self.foreground, emphasis * opacity)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_opacity_scales_existing_alpha() {
        let half = Color32::from_rgba_unmultiplied(255, 255, 255, 128);
        assert_eq!(Theme::with_opacity(half, 0.5).a(), 64);
        assert_eq!(Theme::with_opacity(Color32::WHITE, 1.5).a(), 255);
        assert_eq!(Theme::with_opacity(Color32::WHITE, 0.0).a(), 0);
    }
}
