use crate::config::RgbColor;

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> RgbColor {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    RgbColor::new(((r + m) * 255.0).round() as u8, ((g + m) * 255.0).round() as u8, ((b + m) * 255.0).round() as u8)
}

/// The stroke color for the node at `index` out of `total` in a rainbow spread over the chain.
pub(crate) fn rainbow_color(index: usize, total: usize) -> RgbColor {
    let hue = (index as f32 / total.max(1) as f32) * 360.0;
    hsl_to_rgb(hue, 100.0, 50.0)
}
