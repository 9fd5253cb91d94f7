use serde::{Deserialize, Serialize};

/// Error envelope the platform returns for 4xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformApiError {
    pub developer_message: Option<String>,
    pub http_status_code: Option<String>,
    pub default_user_message: Option<String>,
    pub user_message_globalisation_code: Option<String>,
    pub errors: Vec<ApiParameterError>,
}

/// A single offending parameter inside a [`PlatformApiError`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiParameterError {
    pub developer_message: Option<String>,
    pub default_user_message: Option<String>,
    pub user_message_globalisation_code: Option<String>,
    pub parameter_name: Option<String>,
}

impl PlatformApiError {
    /// True when the body names a message or an offending parameter.
    ///
    /// Every field is optional, so any JSON object decodes; this tells a real
    /// error envelope apart from an unrelated body.
    pub fn has_message(&self) -> bool {
        self.default_user_message.is_some()
            || self.developer_message.is_some()
            || !self.errors.is_empty()
    }

    /// One-line summary suitable for logs and assertion messages.
    pub fn summary(&self) -> String {
        let head = self
            .default_user_message
            .as_deref()
            .or(self.developer_message.as_deref())
            .unwrap_or("no message");

        let params: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.parameter_name.as_deref())
            .collect();

        if params.is_empty() {
            head.to_owned()
        } else {
            format!("{head} [{}]", params.join(", "))
        }
    }
}

/// Response of the platform's `POST /authentication` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub username: Option<String>,
    pub authenticated: Option<bool>,
    pub base64_encoded_authentication_key: String,
}
