use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header};
use shared::responses::{AuthenticationResponse, PlatformApiError};

use crate::{
    config::{AuthMode, AuthSettings, ServerSettings},
    error::HarnessError,
    infrastructure::template::tenant_url,
};

/// Builds the HTTP client shared by login and staff requests.
pub fn build_http_client(server: &ServerSettings) -> Result<Client, HarnessError> {
    let client = Client::builder()
        .timeout(server.timeout())
        .danger_accept_invalid_certs(server.accept_invalid_certs)
        .build()?;
    Ok(client)
}

/// The key the platform hands out is plain base64 of `username:password`.
pub fn static_key(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

/// Obtains the Basic credential used by every staff request.
pub struct Authenticator<'a> {
    client: &'a Client,
    server: &'a ServerSettings,
    auth: &'a AuthSettings,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a Client, server: &'a ServerSettings, auth: &'a AuthSettings) -> Self {
        Self {
            client,
            server,
            auth,
        }
    }

    #[tracing::instrument(
        skip(self),
        fields(username = %self.auth.username, mode = ?self.auth.mode)
    )]
    pub async fn login(&self) -> Result<String, HarnessError> {
        match self.auth.mode {
            AuthMode::Static => Ok(static_key(&self.auth.username, &self.auth.password)),
            AuthMode::Server => self.login_with_server().await,
        }
    }

    async fn login_with_server(&self) -> Result<String, HarnessError> {
        let url = tenant_url(
            self.server,
            "authentication",
            &[
                ("username", self.auth.username.as_str()),
                ("password", self.auth.password.as_str()),
            ],
        )?;

        let res = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| login_failure("authentication request failed", e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| login_failure("failed to read authentication response", e))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<PlatformApiError>(&body)
                .ok()
                .filter(PlatformApiError::has_message)
                .map_or_else(|| "no error body".to_owned(), |e| e.summary());
            return Err(HarnessError::Login(format!(
                "server returned status {status}: {detail}"
            )));
        }

        let auth: AuthenticationResponse = serde_json::from_str(&body)
            .map_err(|e| HarnessError::Login(format!("unexpected authentication body: {e}")))?;

        if auth.authenticated == Some(false) {
            return Err(HarnessError::Login("server reported authenticated=false".into()));
        }

        tracing::debug!("Obtained authentication key");
        Ok(auth.base64_encoded_authentication_key)
    }
}

/// The login URL carries the password, so it is stripped before formatting.
fn login_failure(context: &str, err: reqwest::Error) -> HarnessError {
    HarnessError::Login(format!("{context}: {}", err.without_url()))
}
