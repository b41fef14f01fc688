//! The two canvas generators: layered-shape posts and concentric-ring
//! profile pictures.
//!
//! Both take the RNG as a parameter. Callers that want reproducible
//! output pass a seeded [`rand::rngs::StdRng`]; the running service
//! passes [`rand::thread_rng`] so consecutive canvases differ.

use image::{Rgb, RgbImage};
use rand::Rng;

use super::color::{self, WHITE};
use super::shape::Shape;

/// Edge length of the square post canvas, in pixels.
pub const POST_SIZE: u32 = 1080;
/// Edge length of the square profile canvas, in pixels.
pub const PROFILE_SIZE: u32 = 400;
/// Shapes layered onto each post canvas.
pub const SHAPES_PER_POST: usize = 20;

/// Concentric rings on a profile canvas.
pub const PROFILE_RINGS: u32 = 8;
/// Radius of the outermost profile ring.
const OUTER_RING_RADIUS: i32 = 150;
/// Radius shrink and channel shift between consecutive rings.
const RING_STEP: i32 = 20;

/// Generate a post canvas: white background, one sampled primary color,
/// and [`SHAPES_PER_POST`] shapes each filled with a fresh jitter of that
/// primary, painted in sample order.
pub fn generate_post(width: u32, height: u32, rng: &mut impl Rng) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    let primary = color::sample_primary(rng);
    for _ in 0..SHAPES_PER_POST {
        let fill = color::jitter(primary, rng);
        Shape::sample(width, height, rng).paint(&mut canvas, fill);
    }
    canvas
}

/// Generate a profile canvas: white background and the concentric ring
/// pattern derived from one sampled base color.
pub fn generate_profile(width: u32, height: u32, rng: &mut impl Rng) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    let base = color::sample_primary(rng);
    paint_rings(&mut canvas, base);
    canvas
}

/// Radius of ring `i`, with ring 0 outermost.
pub fn ring_radius(i: u32) -> i32 {
    OUTER_RING_RADIUS - RING_STEP * i as i32
}

/// Color of ring `i`: every channel of `base` shifted up by `20·i`,
/// wrapping modulo 256.
pub fn ring_color(base: Rgb<u8>, i: u32) -> Rgb<u8> {
    let shift = (RING_STEP * i as i32) as i16;
    let Rgb([r, g, b]) = base;
    Rgb([
        color::shift_channel(r, shift),
        color::shift_channel(g, shift),
        color::shift_channel(b, shift),
    ])
}

/// Paint the ring pattern for a known base color, centered by integer
/// division of the canvas dimensions.
///
/// Rings go largest-first so each smaller disc overlays the previous
/// ones, leaving visible 20 px bands.
pub fn paint_rings(canvas: &mut RgbImage, base: Rgb<u8>) {
    let cx = (canvas.width() / 2) as i32;
    let cy = (canvas.height() / 2) as i32;
    for i in 0..PROFILE_RINGS {
        Shape::Circle {
            cx,
            cy,
            radius: ring_radius(i),
        }
        .paint(canvas, ring_color(base, i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::thread_rng;

    // ===== post canvas =====

    #[test]
    fn post_has_requested_dimensions() {
        let canvas = generate_post(64, 48, &mut StdRng::seed_from_u64(1));
        assert_eq!((canvas.width(), canvas.height()), (64, 48));
    }

    #[test]
    fn post_is_not_blank() {
        let canvas = generate_post(POST_SIZE, POST_SIZE, &mut StdRng::seed_from_u64(42));
        assert!(canvas.pixels().any(|p| *p != WHITE));
    }

    #[test]
    fn post_is_deterministic_for_a_seed() {
        let a = generate_post(POST_SIZE, POST_SIZE, &mut StdRng::seed_from_u64(9));
        let b = generate_post(POST_SIZE, POST_SIZE, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn posts_from_different_seeds_differ() {
        let a = generate_post(POST_SIZE, POST_SIZE, &mut StdRng::seed_from_u64(1));
        let b = generate_post(POST_SIZE, POST_SIZE, &mut StdRng::seed_from_u64(2));
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn painted_pixels_come_from_the_shape_fills() {
        // Paint the sampled shapes with one fixed fill; every non-white
        // pixel must then carry exactly that fill.
        let ink = image::Rgb([10, 20, 30]);
        let mut canvas = RgbImage::from_pixel(POST_SIZE, POST_SIZE, WHITE);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..SHAPES_PER_POST {
            Shape::sample(POST_SIZE, POST_SIZE, &mut rng).paint(&mut canvas, ink);
        }
        let mut painted = 0usize;
        for p in canvas.pixels() {
            if *p != WHITE {
                assert_eq!(*p, ink);
                painted += 1;
            }
        }
        assert!(painted > 0);
    }

    // ===== profile canvas =====

    #[test]
    fn profile_has_requested_dimensions() {
        let canvas = generate_profile(PROFILE_SIZE, PROFILE_SIZE, &mut thread_rng());
        assert_eq!((canvas.width(), canvas.height()), (PROFILE_SIZE, PROFILE_SIZE));
    }

    #[test]
    fn ring_radii_shrink_by_a_fixed_step() {
        let radii: Vec<i32> = (0..PROFILE_RINGS).map(ring_radius).collect();
        assert_eq!(radii, vec![150, 130, 110, 90, 70, 50, 30, 10]);
    }

    #[test]
    fn ring_colors_shift_and_wrap() {
        let base = image::Rgb([250, 0, 100]);
        assert_eq!(ring_color(base, 0), base);
        assert_eq!(ring_color(base, 1), image::Rgb([14, 20, 120]));
        assert_eq!(ring_color(base, 7), image::Rgb([134, 140, 240]));
    }

    #[test]
    fn rings_layer_smallest_on_top() {
        let base = image::Rgb([10, 20, 30]);
        let mut canvas = RgbImage::from_pixel(PROFILE_SIZE, PROFILE_SIZE, WHITE);
        paint_rings(&mut canvas, base);

        // Center lands inside the innermost ring (index 7, shift 140).
        assert_eq!(*canvas.get_pixel(200, 200), image::Rgb([150, 160, 170]));
        // 140 px out is past every inner ring but inside ring 0.
        assert_eq!(*canvas.get_pixel(340, 200), base);
        // The corner is ~283 px from the center, beyond every ring.
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn profile_center_follows_integer_division_on_odd_canvases() {
        let base = image::Rgb([0, 0, 0]);
        let mut canvas = RgbImage::from_pixel(401, 401, WHITE);
        paint_rings(&mut canvas, base);

        // 401 / 2 = 200, so the pattern centers on (200, 200).
        assert_eq!(*canvas.get_pixel(200, 200), image::Rgb([140, 140, 140]));
        assert_eq!(*canvas.get_pixel(350, 200), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn profile_is_deterministic_for_a_seed() {
        let a = generate_profile(PROFILE_SIZE, PROFILE_SIZE, &mut StdRng::seed_from_u64(12));
        let b = generate_profile(PROFILE_SIZE, PROFILE_SIZE, &mut StdRng::seed_from_u64(12));
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
