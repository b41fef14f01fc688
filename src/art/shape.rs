//! Shape primitives: uniform sampling and clipped rasterization.
//!
//! Shapes are sampled over an inclusive position range, so geometry may
//! overhang the canvas; painting clips to the canvas bounds. There is no
//! blending. A painted pixel takes the shape's color outright, and later
//! shapes overwrite earlier ones.

use std::ops::RangeInclusive;

use image::{Rgb, RgbImage};
use rand::Rng;

/// Circle radii on the post canvas.
const CIRCLE_RADIUS: RangeInclusive<i32> = 50..=300;
/// Rectangle side extents, added to the sampled top-left corner.
const RECT_EXTENT: RangeInclusive<i32> = 100..=400;
/// Line stroke widths.
const LINE_WIDTH: RangeInclusive<i32> = 5..=20;

/// One paintable primitive, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Filled disc centered at (`cx`, `cy`).
    Circle { cx: i32, cy: i32, radius: i32 },
    /// Filled axis-aligned rectangle with corners (`x0`, `y0`) and (`x1`, `y1`).
    Rect { x0: i32, y0: i32, x1: i32, y1: i32 },
    /// Stroked segment from (`x0`, `y0`) to (`x1`, `y1`), `width` pixels thick.
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        width: i32,
    },
}

impl Shape {
    /// Sample a shape kind uniformly, then its geometry, for a
    /// `width`×`height` canvas.
    ///
    /// Positions use the inclusive `0..=dim` range on each axis.
    pub fn sample(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        let w = width as i32;
        let h = height as i32;
        match rng.gen_range(0..3) {
            0 => Self::Circle {
                cx: rng.gen_range(0..=w),
                cy: rng.gen_range(0..=h),
                radius: rng.gen_range(CIRCLE_RADIUS),
            },
            1 => {
                let x0 = rng.gen_range(0..=w);
                let y0 = rng.gen_range(0..=h);
                Self::Rect {
                    x0,
                    y0,
                    x1: x0 + rng.gen_range(RECT_EXTENT),
                    y1: y0 + rng.gen_range(RECT_EXTENT),
                }
            }
            _ => Self::Line {
                x0: rng.gen_range(0..=w),
                y0: rng.gen_range(0..=h),
                x1: rng.gen_range(0..=w),
                y1: rng.gen_range(0..=h),
                width: rng.gen_range(LINE_WIDTH),
            },
        }
    }

    /// Paint the shape onto `canvas` in solid `color`, clipped to bounds.
    pub fn paint(&self, canvas: &mut RgbImage, color: Rgb<u8>) {
        match *self {
            Self::Circle { cx, cy, radius } => paint_circle(canvas, cx, cy, radius, color),
            Self::Rect { x0, y0, x1, y1 } => paint_rect(canvas, x0, y0, x1, y1, color),
            Self::Line {
                x0,
                y0,
                x1,
                y1,
                width,
            } => paint_line(canvas, x0, y0, x1, y1, width, color),
        }
    }
}

/// Intersect the inclusive span `[lo, hi]` with `[0, len-1]`.
fn clip_span(lo: i32, hi: i32, len: u32) -> Option<(u32, u32)> {
    if len == 0 || hi < 0 || lo >= len as i32 {
        return None;
    }
    Some((lo.max(0) as u32, hi.min(len as i32 - 1) as u32))
}

fn paint_circle(canvas: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    let Some((y_lo, y_hi)) = clip_span(cy - radius, cy + radius, canvas.height()) else {
        return;
    };
    let Some((x_lo, x_hi)) = clip_span(cx - radius, cx + radius, canvas.width()) else {
        return;
    };
    let rr = i64::from(radius) * i64::from(radius);
    for y in y_lo..=y_hi {
        let dy = i64::from(y as i32 - cy);
        for x in x_lo..=x_hi {
            let dx = i64::from(x as i32 - cx);
            if dx * dx + dy * dy <= rr {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn paint_rect(canvas: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let (x_min, x_max) = (x0.min(x1), x0.max(x1));
    let (y_min, y_max) = (y0.min(y1), y0.max(y1));
    let Some((y_lo, y_hi)) = clip_span(y_min, y_max, canvas.height()) else {
        return;
    };
    let Some((x_lo, x_hi)) = clip_span(x_min, x_max, canvas.width()) else {
        return;
    };
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Stroke a segment as a capsule: every pixel whose center lies within
/// half the stroke width of the segment is filled.
fn paint_line(
    canvas: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    width: i32,
    color: Rgb<u8>,
) {
    let half = f64::from(width) / 2.0;
    let pad = half.ceil() as i32;
    let Some((y_lo, y_hi)) = clip_span(y0.min(y1) - pad, y0.max(y1) + pad, canvas.height()) else {
        return;
    };
    let Some((x_lo, x_hi)) = clip_span(x0.min(x1) - pad, x0.max(x1) + pad, canvas.width()) else {
        return;
    };
    let (ax, ay) = (f64::from(x0), f64::from(y0));
    let (dx, dy) = (f64::from(x1) - ax, f64::from(y1) - ay);
    let len_sq = dx * dx + dy * dy;
    let limit = half * half;
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let (px, py) = (f64::from(x) - ax, f64::from(y) - ay);
            let t = if len_sq == 0.0 {
                0.0
            } else {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            };
            let (ex, ey) = (px - t * dx, py - t * dy);
            if ex * ex + ey * ey <= limit {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}
