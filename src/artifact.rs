//! On-disk artifact lifecycle: encode a canvas, name it, clean it up.
//!
//! Uploads read from memory, but every canvas is also written out as a
//! timestamped JPEG so the bytes that went over the wire can be inspected
//! while the cycle runs. The file is removed when the [`Artifact`] drops,
//! whether the upload succeeded or not.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage};
use tempfile::TempPath;
use thiserror::Error;

/// JPEG quality for every encoded canvas.
pub const JPEG_QUALITY: u8 = 85;

/// Timestamp layout embedded in artifact file names.
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to encode canvas as JPEG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write artifact file: {0}")]
    Io(#[from] std::io::Error),
}

/// The three artifact roles, each with its own file-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A scheduled post canvas, `art_<stamp>.jpg`.
    Post,
    /// A profile picture canvas, `profile_<stamp>.jpg`.
    Profile,
    /// The startup smoke-test canvas, `test_<stamp>.jpg`.
    TestPost,
}

impl ArtifactKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Post => "art",
            Self::Profile => "profile",
            Self::TestPost => "test",
        }
    }
}

/// File name for an artifact of `kind` stamped at `moment`.
pub fn file_name(kind: ArtifactKind, moment: DateTime<Local>) -> String {
    format!("{}_{}.jpg", kind.prefix(), moment.format(STAMP_FORMAT))
}

/// An encoded canvas written to disk for the duration of one upload.
pub struct Artifact {
    bytes: Vec<u8>,
    name: String,
    path: TempPath,
}

impl Artifact {
    /// Encode `canvas` as JPEG and write it under `dir`, named for `kind`
    /// and the current local time.
    pub fn write(dir: &Path, kind: ArtifactKind, canvas: &RgbImage) -> Result<Self, ArtifactError> {
        Self::write_at(dir, kind, canvas, Local::now())
    }

    /// As [`Artifact::write`], with the timestamp supplied by the caller.
    pub fn write_at(
        dir: &Path,
        kind: ArtifactKind,
        canvas: &RgbImage,
        moment: DateTime<Local>,
    ) -> Result<Self, ArtifactError> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgb8,
        )?;

        let name = file_name(kind, moment);
        let path = dir.join(&name);
        fs::write(&path, &bytes)?;
        Ok(Self {
            bytes,
            name,
            // Drop guard: deletes the file on every exit path.
            path: TempPath::from_path(path),
        })
    }

    /// The encoded JPEG bytes, identical to the file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File name, e.g. `art_20260825_140502.jpg`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarm the delete-on-drop guard and persist the backing file.
    pub fn keep(self) -> Result<std::path::PathBuf, ArtifactError> {
        self.path.keep().map_err(|e| ArtifactError::Io(e.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::Rgb;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 25, 14, 5, 2).unwrap()
    }

    fn canvas() -> RgbImage {
        RgbImage::from_pixel(32, 24, Rgb([200, 40, 90]))
    }

    // ===== naming =====

    #[test]
    fn file_names_embed_prefix_and_stamp() {
        assert_eq!(file_name(ArtifactKind::Post, stamp()), "art_20260825_140502.jpg");
        assert_eq!(
            file_name(ArtifactKind::Profile, stamp()),
            "profile_20260825_140502.jpg"
        );
        assert_eq!(
            file_name(ArtifactKind::TestPost, stamp()),
            "test_20260825_140502.jpg"
        );
    }

    // ===== write =====

    #[test]
    fn write_produces_a_decodable_jpeg_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let artifact =
            Artifact::write_at(tmp.path(), ArtifactKind::Post, &canvas(), stamp()).unwrap();

        assert_eq!(artifact.name(), "art_20260825_140502.jpg");
        assert!(artifact.path().exists());
        assert_eq!(std::fs::read(artifact.path()).unwrap(), artifact.bytes());

        // JPEG streams open with the SOI marker.
        assert_eq!(&artifact.bytes()[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(artifact.bytes()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn backing_file_is_removed_on_drop() {
        let tmp = tempfile::TempDir::new().unwrap();
        let artifact =
            Artifact::write_at(tmp.path(), ArtifactKind::Profile, &canvas(), stamp()).unwrap();
        let path = artifact.path().to_path_buf();

        assert!(path.exists());
        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn keep_disarms_the_cleanup_guard() {
        let tmp = tempfile::TempDir::new().unwrap();
        let artifact =
            Artifact::write_at(tmp.path(), ArtifactKind::Post, &canvas(), stamp()).unwrap();

        let path = artifact.keep().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_into_missing_directory_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = Artifact::write_at(
            &tmp.path().join("nope"),
            ArtifactKind::Post,
            &canvas(),
            stamp(),
        );
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }
}
