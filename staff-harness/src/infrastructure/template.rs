use reqwest::{
    Url,
    header::{self, HeaderMap, HeaderValue},
};

use crate::{config::ServerSettings, error::HarnessError};

const TENANT_PARAM: &str = "tenantIdentifier";

/// Per-scenario request defaults: JSON content type, Basic credentials and
/// the tenant query parameter.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    server: ServerSettings,
    headers: HeaderMap,
}

impl RequestTemplate {
    /// `auth_key` is the base64 credential, without the `Basic ` scheme.
    pub fn new(server: &ServerSettings, auth_key: &str) -> Result<Self, HarnessError> {
        let mut authorization =
            HeaderValue::from_str(&format!("Basic {auth_key}")).map_err(|e| {
                HarnessError::Login(format!("authentication key is not a valid header: {e}"))
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, authorization);

        Ok(Self {
            server: server.clone(),
            headers,
        })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Absolute URL for `path` below the API root, tenant parameter included.
    pub fn url(&self, path: &str) -> Result<Url, HarnessError> {
        self.url_with(path, &[])
    }

    pub fn url_with(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, HarnessError> {
        tenant_url(&self.server, path, query)
    }
}

/// Builds an endpoint URL carrying the tenant parameter followed by `query`.
pub(crate) fn tenant_url(
    server: &ServerSettings,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, HarnessError> {
    let raw = server.endpoint(path);
    let mut url =
        Url::parse(&raw).map_err(|e| HarnessError::Config(format!("invalid URL {raw:?}: {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(TENANT_PARAM, &server.tenant_identifier);
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
