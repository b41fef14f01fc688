//! Color sampling and the per-channel jitter.
//!
//! Every canvas starts from one uniformly sampled "primary" color; each
//! shape painted onto it gets a bounded per-channel variation of that
//! primary. All functions here are pure given an RNG, so the palette
//! logic is testable without touching a canvas.

use image::Rgb;
use rand::Rng;

/// Canvas background fill.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Largest per-channel offset the jitter applies in either direction.
pub const JITTER_SPREAD: i16 = 50;

/// Sample a primary color: three independent uniform channel draws.
pub fn sample_primary(rng: &mut impl Rng) -> Rgb<u8> {
    Rgb([
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
    ])
}

/// Shift one channel by `offset`, wrapping modulo 256.
///
/// Out-of-range values wrap rather than clamp: 250 shifted by +50 becomes
/// 44, and 10 shifted by −50 becomes 216. The result is always a valid
/// channel value.
pub fn shift_channel(channel: u8, offset: i16) -> u8 {
    (i16::from(channel) + offset).rem_euclid(256) as u8
}

/// Derive a variation of `base`: each channel shifted by an independent
/// uniform offset in `[-JITTER_SPREAD, JITTER_SPREAD]`.
pub fn jitter(base: Rgb<u8>, rng: &mut impl Rng) -> Rgb<u8> {
    let Rgb([r, g, b]) = base;
    Rgb([
        shift_channel(r, rng.gen_range(-JITTER_SPREAD..=JITTER_SPREAD)),
        shift_channel(g, rng.gen_range(-JITTER_SPREAD..=JITTER_SPREAD)),
        shift_channel(b, rng.gen_range(-JITTER_SPREAD..=JITTER_SPREAD)),
    ])
}
