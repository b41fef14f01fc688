//! One publish cycle: generate, encode, sign in, upload, clean up.
//!
//! The cycle is generic over [`Publisher`], so everything here runs
//! against the recording double in tests. The artifact guards make
//! cleanup unconditional: whichever way a cycle exits, the files it
//! wrote are gone by the time it returns.

use std::path::Path;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::art::{self, POST_SIZE, PROFILE_SIZE};
use crate::artifact::{Artifact, ArtifactError, ArtifactKind};
use crate::publish::{Credentials, PostId, PublishError, Publisher};

/// Caption for the startup smoke-test post.
pub const TEST_CAPTION: &str = "🎨 Test Post - Generated Art\n#GenerativeArt #Test";

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to encode canvas: {0}")]
    Encode(image::ImageError),

    #[error("failed to write artifact: {0}")]
    Io(std::io::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl From<ArtifactError> for CycleError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::Encode(e) => Self::Encode(e),
            ArtifactError::Io(e) => Self::Io(e),
        }
    }
}

/// Per-cycle inputs that do not change between cycles.
pub struct CycleOptions<'a> {
    /// Directory artifacts are written into while their upload runs.
    pub work_dir: &'a Path,
    /// Caption attached to the uploaded post.
    pub caption: &'a str,
    /// Startup smoke-test cycles name their artifact `test_…` instead of
    /// `art_…`.
    pub test: bool,
}

/// What a completed cycle produced.
#[derive(Debug)]
pub struct CycleReport {
    pub post_id: PostId,
    /// File name the post canvas was written under (already deleted).
    pub artifact: String,
    /// File name of the profile canvas, when this cycle rotated it.
    pub profile_artifact: Option<String>,
}

impl CycleReport {
    pub fn profile_updated(&self) -> bool {
        self.profile_artifact.is_some()
    }
}

/// Run one full cycle against `publisher`.
///
/// Generates a post canvas, writes it under a delete-on-drop guard,
/// signs in, and uploads it. When `update_profile` is set, a fresh
/// profile canvas goes through the same steps inside the same session.
pub fn run_cycle(
    publisher: &dyn Publisher,
    creds: &Credentials,
    opts: &CycleOptions<'_>,
    update_profile: bool,
    rng: &mut impl Rng,
) -> Result<CycleReport, CycleError> {
    let kind = if opts.test {
        ArtifactKind::TestPost
    } else {
        ArtifactKind::Post
    };

    let canvas = art::generate_post(POST_SIZE, POST_SIZE, rng);
    let artifact = Artifact::write(opts.work_dir, kind, &canvas)?;
    info!(file = artifact.name(), "post canvas ready");

    let session = publisher.authenticate(creds)?;
    info!(username = %session.username, "logged in");

    let post_id = publisher.upload_photo(&session, artifact.bytes(), opts.caption)?;
    info!(%post_id, file = artifact.name(), "post uploaded");

    let profile_artifact = if update_profile {
        let canvas = art::generate_profile(PROFILE_SIZE, PROFILE_SIZE, rng);
        let profile = Artifact::write(opts.work_dir, ArtifactKind::Profile, &canvas)?;
        publisher.set_profile_photo(&session, profile.bytes())?;
        info!(file = profile.name(), "profile picture updated");
        Some(profile.name().to_string())
    } else {
        None
    };

    Ok(CycleReport {
        post_id,
        artifact: artifact.name().to_string(),
        profile_artifact,
    })
}
