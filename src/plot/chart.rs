use image::{Rgba, RgbaImage};

use crate::metrics::pr_curve::PrecisionRecallCurve;

pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 480;

const PAD_L: f64 = 60.0;
const PAD_R: f64 = 16.0;
const PAD_T: f64 = 16.0;
const PAD_B: f64 = 30.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID: Rgba<u8>       = Rgba([240, 242, 245, 255]);
const AXIS: Rgba<u8>       = Rgba([153, 153, 153, 255]);
const CURVE: Rgba<u8>      = Rgba([30, 64, 175, 255]);

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Rasterises the interpolated precision/recall curve.
///
/// Recall runs along x and precision along y, both fixed to [0, 1], so charts
/// from different epochs line up. A curve with fewer than two points yields
/// the bare grid.
pub fn render_pr_curve(curve: &PrecisionRecallCurve) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    // ── Grid at quarter steps ─────────────────────────────────────────────
    for g in 0..=4 {
        let frac = g as f64 / 4.0;
        let (x, _) = to_px(frac, 0.0);
        let (_, y) = to_px(0.0, frac);
        let (x0, y0) = to_px(0.0, 0.0);
        let (x1, y1) = to_px(1.0, 1.0);
        draw_line(&mut img, (x, y0), (x, y1), GRID);
        draw_line(&mut img, (x0, y), (x1, y), GRID);
    }

    // ── Axes ──────────────────────────────────────────────────────────────
    let origin = to_px(0.0, 0.0);
    draw_line(&mut img, origin, to_px(1.0, 0.0), AXIS);
    draw_line(&mut img, origin, to_px(0.0, 1.0), AXIS);

    // ── Curve ─────────────────────────────────────────────────────────────
    let points: Vec<(i64, i64)> = curve.interpolated_points().into_iter()
        .filter(|(r, p)| r.is_finite() && p.is_finite())
        .map(|(r, p)| to_px(r, p))
        .collect();

    for pair in points.windows(2) {
        draw_thick_line(&mut img, pair[0], pair[1], CURVE);
    }

    img
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Maps (recall, precision) in [0, 1]² to pixel coordinates; out-of-range
/// values are clamped to the plot area.
fn to_px(recall: f64, precision: f64) -> (i64, i64) {
    let w = CHART_WIDTH as f64;
    let h = CHART_HEIGHT as f64;
    let x = PAD_L + recall.clamp(0.0, 1.0) * (w - PAD_L - PAD_R);
    let y = PAD_T + (1.0 - precision.clamp(0.0, 1.0)) * (h - PAD_T - PAD_B);
    (x.round() as i64, y.round() as i64)
}

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two pixel positions, endpoints included.
fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_thick_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    for (ox, oy) in [(0, 0), (1, 0), (0, 1)] {
        draw_line(img, (from.0 + ox, from.1 + oy), (to.0 + ox, to.1 + oy), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_pixels(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| **p == CURVE).count()
    }

    #[test]
    fn chart_has_fixed_size() {
        let img = render_pr_curve(&PrecisionRecallCurve::default());
        assert_eq!(img.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn single_point_draws_no_curve() {
        let curve = PrecisionRecallCurve::new(vec![0.5], vec![0.5]).unwrap();
        assert_eq!(curve_pixels(&render_pr_curve(&curve)), 0);
    }

    #[test]
    fn curve_passes_through_its_endpoints() {
        let curve = PrecisionRecallCurve::new(vec![0.0, 1.0], vec![1.0, 0.0]).unwrap();
        let img = render_pr_curve(&curve);
        assert!(curve_pixels(&img) > 0);

        let (x0, y0) = to_px(0.0, 1.0);
        let (x1, y1) = to_px(1.0, 0.0);
        assert_eq!(*img.get_pixel(x0 as u32, y0 as u32), CURVE);
        assert_eq!(*img.get_pixel(x1 as u32, y1 as u32), CURVE);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(to_px(-1.0, 2.0), to_px(0.0, 1.0));
        assert_eq!(to_px(3.0, -0.5), to_px(1.0, 0.0));
    }
}
