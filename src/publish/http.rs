//! Blocking HTTP implementation of [`Publisher`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation             | Request                                         |
//! |-----------------------|-------------------------------------------------|
//! | `authenticate`        | `POST /api/v1/session`, JSON credentials        |
//! | `upload_photo`        | `POST /api/v1/posts`, multipart photo + caption |
//! | `set_profile_photo`   | `PUT /api/v1/profile/photo`, multipart photo    |
//!
//! A successful sign-in returns a bearer token carried on the two upload
//! requests. 401/403 from the session endpoint means bad credentials;
//! any other non-success status is a rejection.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response, multipart};
use serde::Deserialize;
use tracing::debug;

use super::{Credentials, PostId, PublishError, Publisher, Session};

#[derive(Debug, Deserialize)]
struct SessionReply {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PostReply {
    id: String,
}

/// [`Publisher`] over a JSON/multipart HTTP API.
pub struct HttpPublisher {
    client: Client,
    base_url: String,
}

impl HttpPublisher {
    /// Build a publisher for `base_url` (scheme + host, no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Result<Self, PublishError> {
        let client = Client::builder()
            .user_agent(concat!("easelbot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn photo_form(jpeg: &[u8]) -> Result<multipart::Form, PublishError> {
        let part = multipart::Part::bytes(jpeg.to_vec())
            .file_name("photo.jpg")
            .mime_str("image/jpeg")?;
        Ok(multipart::Form::new().part("photo", part))
    }
}

/// Consume a non-success response into the `Rejected` variant.
fn rejected(response: Response) -> PublishError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    PublishError::Rejected { status, body }
}

/// Parse a 2xx body as JSON, tagging parse failures as `Response`.
fn parse_reply<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, PublishError> {
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|e| PublishError::Response(e.to_string()))
}

impl Publisher for HttpPublisher {
    fn authenticate(&self, creds: &Credentials) -> Result<Session, PublishError> {
        debug!(username = %creds.username, "opening session");
        let response = self
            .client
            .post(self.endpoint("/api/v1/session"))
            .json(&serde_json::json!({
                "username": creds.username,
                "password": creds.password,
            }))
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PublishError::Auth {
                username: creds.username.clone(),
                reason: response.text().unwrap_or_default(),
            });
        }
        if !status.is_success() {
            return Err(rejected(response));
        }

        let reply: SessionReply = parse_reply(response)?;
        Ok(Session {
            username: creds.username.clone(),
            token: reply.token,
        })
    }

    fn upload_photo(
        &self,
        session: &Session,
        jpeg: &[u8],
        caption: &str,
    ) -> Result<PostId, PublishError> {
        debug!(bytes = jpeg.len(), "uploading post");
        let form = Self::photo_form(jpeg)?.text("caption", caption.to_string());
        let response = self
            .client
            .post(self.endpoint("/api/v1/posts"))
            .bearer_auth(&session.token)
            .multipart(form)
            .send()?;

        if !response.status().is_success() {
            return Err(rejected(response));
        }
        let reply: PostReply = parse_reply(response)?;
        Ok(PostId(reply.id))
    }

    fn set_profile_photo(&self, session: &Session, jpeg: &[u8]) -> Result<(), PublishError> {
        debug!(bytes = jpeg.len(), "updating profile picture");
        let response = self
            .client
            .put(self.endpoint("/api/v1/profile/photo"))
            .bearer_auth(&session.token)
            .multipart(Self::photo_form(jpeg)?)
            .send()?;

        if !response.status().is_success() {
            return Err(rejected(response));
        }
        Ok(())
    }
}
