use std::fmt;

use crate::{domain::client::RawResponse, error::HarnessError};

/// The three status contracts the staff scenarios assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseExpectation {
    Success,
    ValidationError,
    NotFound,
}

impl ResponseExpectation {
    pub fn status_code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::ValidationError => 400,
            Self::NotFound => 404,
        }
    }

    /// Passes the response through when its status matches, fails the scenario otherwise.
    pub fn verify(self, response: RawResponse) -> Result<RawResponse, HarnessError> {
        let expected = self.status_code();
        if response.status == expected {
            return Ok(response);
        }

        let detail = match response.platform_error() {
            Some(err) => err.summary(),
            None if response.body.is_empty() => "empty body".to_owned(),
            None => "unrecognised body".to_owned(),
        };

        tracing::debug!(expected, actual = response.status, %detail, "Status mismatch");

        Err(HarnessError::UnexpectedStatus {
            expected,
            actual: response.status,
            detail,
        })
    }
}

impl fmt::Display for ResponseExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::ValidationError => "validation error",
            Self::NotFound => "not found",
        };
        write!(f, "{label} ({})", self.status_code())
    }
}
