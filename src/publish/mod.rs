//! Publishing: the account-facing seam.
//!
//! [`Publisher`] is the narrow interface the publish cycle drives. The
//! production implementation is [`HttpPublisher`](http::HttpPublisher),
//! blocking HTTP against a JSON/multipart API. Tests substitute a
//! recording mock.

pub mod http;

pub use http::HttpPublisher;

use std::env;
use std::fmt;

use thiserror::Error;

/// Environment variable holding the account name.
pub const USERNAME_VAR: &str = "EASELBOT_USERNAME";
/// Environment variable holding the account password.
pub const PASSWORD_VAR: &str = "EASELBOT_PASSWORD";

#[derive(Error, Debug)]
pub enum PublishError {
    /// The server rejected the credentials.
    #[error("authentication failed for '{username}': {reason}")]
    Auth { username: String, reason: String },

    /// The request never got a verdict: DNS, connect, TLS or read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected the request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The server answered 2xx but the body was not the expected shape.
    #[error("malformed server response: {0}")]
    Response(String),
}

/// Account credentials, read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read [`USERNAME_VAR`] and [`PASSWORD_VAR`].
    ///
    /// Missing variables become empty strings rather than startup errors;
    /// the server rejects them at sign-in and the failure surfaces as
    /// [`PublishError::Auth`] in the first cycle.
    pub fn from_env() -> Self {
        Self {
            username: env::var(USERNAME_VAR).unwrap_or_default(),
            password: env::var(PASSWORD_VAR).unwrap_or_default(),
        }
    }
}

/// Proof of a successful sign-in, passed back into every upload.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Server-assigned identifier of an uploaded post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One posting account, behind whatever wire the deployment uses.
///
/// Sessions are short-lived: the cycle authenticates fresh each time it
/// runs and never stores a session across cycles.
pub trait Publisher {
    /// Exchange credentials for a session.
    fn authenticate(&self, creds: &Credentials) -> Result<Session, PublishError>;

    /// Upload a finished post under `caption`. Returns the new post's id.
    fn upload_photo(
        &self,
        session: &Session,
        jpeg: &[u8],
        caption: &str,
    ) -> Result<PostId, PublishError>;

    /// Replace the account's profile picture.
    fn set_profile_photo(&self, session: &Session, jpeg: &[u8]) -> Result<(), PublishError>;
}
