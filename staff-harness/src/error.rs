use thiserror::Error;

/// Everything that can fail a scenario or the harness around it.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The server answered with a status the scenario did not expect.
    #[error("Unexpected status: expected {expected}, got {actual}: {detail}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        detail: String,
    },

    /// A response field did not hold the expected value.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// The response body did not match the typed schema.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Connection-level failure talking to the server.
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    /// The login collaborator refused or failed.
    #[error("Login failed: {0}")]
    Login(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration Error: {0}")]
    Config(String),
}

impl HarnessError {
    /// True for failures raised by the scenario's own checks rather than the environment.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. } | Self::Assertion(_) | Self::Decode(_)
        )
    }
}
