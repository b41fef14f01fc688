//! # Easelbot
//!
//! A bot that paints procedurally-random abstract art and posts it to a
//! social account on a fixed schedule. Every post is a 1080×1080 canvas:
//! one random primary color, twenty circles, rectangles and lines in
//! near-primary shades, layered over white. Roughly one post in ten also
//! swaps the account's profile picture for a fresh concentric-ring
//! pattern.
//!
//! # Architecture: One Cycle at a Time
//!
//! The bot is a loop around a single synchronous "publish cycle":
//!
//! ```text
//! generate   RNG        →  RgbImage           (pure, no I/O)
//! encode     canvas     →  art_<stamp>.jpg    (transient, delete-on-drop)
//! publish    JPEG bytes →  the account        (fresh session per cycle)
//! ```
//!
//! Each stage is its own module with its own error type, so the scheduler
//! can tell a bad password from a dead network from a full disk, and log
//! accordingly before carrying on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`art`] | Canvas generation: color jitter, shape primitives, post and profile layouts |
//! | [`artifact`] | Timestamped transient JPEGs with delete-on-drop guards |
//! | [`publish`] | The `Publisher` trait, credentials, and the blocking HTTP implementation |
//! | [`cycle`] | One generate → encode → sign-in → upload → cleanup pass |
//! | [`schedule`] | Ticker, the 1-in-10 profile rotation draw, and the forever loop |
//! | [`config`] | `easelbot.toml` loading, validation, and the stock config printer |
//!
//! # Design Decisions
//!
//! ## Injected RNG
//!
//! Nothing in the generator reaches for global randomness. Every sampling
//! function takes `&mut impl Rng`: production passes [`rand::thread_rng`],
//! tests and `easelbot render --seed` pass a seeded
//! [`StdRng`](rand::rngs::StdRng). The draw order is fixed, so one seed
//! reproduces one canvas pixel-for-pixel, which is what makes the
//! generator testable at all.
//!
//! ## Scoped Artifact Cleanup
//!
//! Canvases transit through disk as timestamped JPEGs so the exact bytes
//! that went over the wire can be inspected while a cycle runs. The files
//! are held by [`tempfile::TempPath`] guards owned by the cycle: whether
//! the upload succeeds, the server refuses, or the sign-in fails, the
//! guard drops and the file goes with it. A crashed upload never leaves
//! artifacts accumulating in the work directory.
//!
//! ## Tagged Errors, No Retries
//!
//! Failures are classified (`Auth`, `Transport`, `Rejected`, encode, I/O)
//! but never retried: a failed slot costs one interval and the schedule
//! moves on. Retry policy belongs in the operator's hands (the interval
//! is short); the bot's only obligation is to keep running and say
//! clearly what went wrong.
//!
//! ## Blocking by Design
//!
//! One thread, one cycle at a time, `reqwest`'s blocking client, a plain
//! `thread::sleep` between slots. A bot that does one upload every few
//! minutes gets nothing from an async runtime except moving parts.

pub mod art;
pub mod artifact;
pub mod config;
pub mod cycle;
pub mod publish;
pub mod schedule;
