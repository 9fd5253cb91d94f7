use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::responses::PlatformApiError;

use crate::{domain::payload::StaffPayload, error::HarnessError};

/// Status and body of one round trip, before any expectation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body into the typed schema `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        serde_json::from_str(&self.body).map_err(|e| {
            HarnessError::Decode(format!(
                "{e} (status {}, body {:?})",
                self.status,
                truncate(&self.body, 200)
            ))
        })
    }

    /// The platform error envelope, if the body holds one.
    pub fn platform_error(&self) -> Option<PlatformApiError> {
        serde_json::from_str::<PlatformApiError>(&self.body)
            .ok()
            .filter(PlatformApiError::has_message)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The staff resource as seen from the harness.
///
/// Implementations only transport requests; status checks belong to the caller.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait StaffApi: Send + Sync {
    /// `POST /staff`
    async fn create_staff(&self, payload: StaffPayload) -> Result<RawResponse, HarnessError>;

    /// `GET /staff/{id}`
    async fn get_staff(&self, id: i64) -> Result<RawResponse, HarnessError>;

    /// `GET /staff`, with `?status=` when `status` is set.
    async fn list_staff(&self, status: Option<String>) -> Result<RawResponse, HarnessError>;
}
