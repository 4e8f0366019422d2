use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Heat gradient: relative intensity → colour
// ---------------------------------------------------------------------------

/// Map a normalized intensity in `0..=1` to a cold→hot sweep (blue through
/// red). Used to shade histogram bars by their relative count.
pub fn heat_color(intensity: f64) -> Color32 {
    let t = intensity.clamp(0.0, 1.0) as f32;
    let hsl = Hsl::new(220.0 * (1.0 - t), 0.8, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
