//! Lucky 9 color theme and sizes

use iced::Color;

use l9_core::ReelCount;

/// Color palette for Lucky 9
pub struct Palette;

impl Palette {
    // Backgrounds
    pub const BG_DEEPEST: Color = Color::from_rgb(0.047, 0.027, 0.071); // #0c0712
    pub const BG_DEEP: Color = Color::from_rgb(0.094, 0.047, 0.141);    // #180c24
    pub const BG_FRAME: Color = Color::from_rgb(0.200, 0.043, 0.078);   // #330b14
    pub const REEL_BG: Color = Color::from_rgb(0.976, 0.957, 0.910);    // #f9f4e8

    // Accents
    pub const GOLD: Color = Color::from_rgb(1.000, 0.788, 0.251);       // #ffc940
    pub const GOLD_DIM: Color = Color::from_rgb(0.545, 0.416, 0.125);   // #8b6a20
    pub const RED: Color = Color::from_rgb(0.863, 0.110, 0.200);        // #dc1c33
    pub const RED_HOT: Color = Color::from_rgb(1.000, 0.251, 0.314);    // #ff4050
    pub const GLOW: Color = Color::from_rgba(1.000, 0.788, 0.251, 0.6);

    // Reel digits
    pub const DIGIT: Color = Color::from_rgb(0.125, 0.039, 0.071);      // #200a12
    pub const DIGIT_SPINNING: Color = Color::from_rgb(0.420, 0.333, 0.380);

    // Text
    pub const TEXT_PRIMARY: Color = Color::WHITE;
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.780, 0.690, 0.800); // #c7b0cc
    pub const TEXT_DISABLED: Color = Color::from_rgb(0.420, 0.376, 0.455);  // #6b6074

    // Lights
    pub const LIGHT_OFF: Color = Color::from_rgb(0.290, 0.180, 0.078);  // #4a2e14
    pub const LIGHT_ON: Color = Color::from_rgb(1.000, 0.941, 0.627);   // #fff0a0
}

/// Spin button color per mode
pub fn mode_color(mode: ReelCount) -> Color {
    match mode {
        ReelCount::One => Palette::RED,
        ReelCount::Two => Color::from_rgb(0.741, 0.200, 0.635), // #bd33a2
        ReelCount::Three => Color::from_rgb(0.420, 0.227, 0.851), // #6b3ad9
    }
}

/// Light color for a brightness level (0.0 to 1.0)
pub fn light_color(level: f32) -> Color {
    interpolate_color(Palette::LIGHT_OFF, Palette::LIGHT_ON, level.clamp(0.0, 1.0))
}

/// Brighten a color toward white
pub fn lighten(color: Color, amount: f32) -> Color {
    interpolate_color(color, Color::WHITE, amount.clamp(0.0, 1.0))
}

fn interpolate_color(c1: Color, c2: Color, t: f32) -> Color {
    Color::from_rgb(
        c1.r + (c2.r - c1.r) * t,
        c1.g + (c2.g - c1.g) * t,
        c1.b + (c2.b - c1.b) * t,
    )
}

/// Standard sizes
pub struct Sizes;

impl Sizes {
    pub const TITLE: f32 = 40.0;
    pub const SUBTITLE: f32 = 14.0;
    pub const BUTTON_TEXT: f32 = 14.0;
    pub const RESULT_TEXT: f32 = 22.0;

    pub const REEL_WIDTH: f32 = 96.0;
    pub const REEL_HEIGHT: f32 = 128.0;
    pub const REEL_DIGIT: f32 = 72.0;

    pub const LIGHT_SIZE: f32 = 12.0;

    pub const SPACING_SMALL: f32 = 4.0;
    pub const SPACING_NORMAL: f32 = 12.0;
    pub const SPACING_LARGE: f32 = 24.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn test_light_color_endpoints() {
        assert!(close(light_color(0.0), Palette::LIGHT_OFF));
        assert!(close(light_color(1.0), Palette::LIGHT_ON));
        assert!(close(light_color(4.0), Palette::LIGHT_ON));
    }

    #[test]
    fn test_lighten_moves_toward_white() {
        let lifted = lighten(Palette::RED, 0.5);
        assert!(lifted.g > Palette::RED.g);
        assert!(close(lighten(Palette::RED, 1.0), Color::WHITE));
    }
}
