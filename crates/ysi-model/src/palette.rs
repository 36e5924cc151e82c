use ysi_domain::Rgb;

const SATURATION: f64 = 0.65;
const LIGHTNESS: f64 = 0.6;

/// `n` colores con tonos equiespaciados.
pub fn fragment_palette(n: usize) -> Vec<Rgb> {
    (0..n).map(|i| hsl_to_rgb(i as f64 / n as f64, SATURATION, LIGHTNESS)).collect()
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb(hue_channel(p, q, h + 1.0 / 3.0), hue_channel(p, q, h), hue_channel(p, q, h - 1.0 / 3.0))
}

fn hue_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
