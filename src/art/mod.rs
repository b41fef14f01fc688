//! Procedural canvas generation.
//!
//! | Module      | Role                                                |
//! |-------------|-----------------------------------------------------|
//! | `color`     | Primary-color sampling and per-channel jitter       |
//! | `shape`     | Shape primitives: sampling plus clipped rasterizing |
//! | `generator` | Post and profile canvas assembly                    |
//!
//! Everything here is pure given an RNG: no I/O, no clock, no network.

pub mod color;
pub mod generator;
pub mod shape;

pub use generator::{
    POST_SIZE, PROFILE_SIZE, SHAPES_PER_POST, generate_post, generate_profile,
};
pub use shape::Shape;
