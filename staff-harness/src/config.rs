use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    domain::payload::{
        FIRSTNAME, FIRSTNAME_PREFIX, LASTNAME, LASTNAME_PREFIX, MOBILE_NO, MOBILE_NO_PREFIX,
    },
    error::HarnessError,
};

/// Top-level harness configuration, loaded from TOML and overridden by env vars.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub suite: SuiteSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub api_root: String,
    pub tenant_identifier: String,
    /// The platform's development server ships a self-signed certificate.
    pub accept_invalid_certs: bool,
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8443".to_string(),
            api_root: "/mifosng-provider/api/v1".to_string(),
            tenant_identifier: "default".to_string(),
            accept_invalid_certs: true,
            timeout_secs: 30,
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins base URL, API root and `path` without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let root = self.api_root.trim_matches('/');
        let path = path.trim_start_matches('/');
        if root.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{root}/{path}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Log in through `POST /authentication` and use the key it returns.
    Server,
    /// Encode `username:password` locally.
    Static,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            mode: AuthMode::Server,
            username: "mifos".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Values the scenarios depend on that belong to the server under test.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuiteSettings {
    pub office_id: i64,
    pub known_staff_id: i64,
    pub limits: FieldLimits,
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            office_id: 1,
            known_staff_id: 1,
            limits: FieldLimits::default(),
        }
    }
}

/// Maximum accepted lengths for the bounded staff fields.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub firstname: usize,
    pub lastname: usize,
    pub mobile_no: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            firstname: 50,
            lastname: 50,
            mobile_no: 50,
        }
    }
}

impl HarnessConfig {
    /// Loads the TOML file at `path` (defaults when absent), then applies env overrides.
    pub fn load(path: &str) -> Result<Self, HarnessError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, HarnessError> {
        if !Path::new(path).exists() {
            tracing::info!("Config file not found at {path}, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::Config(format!("failed to read {path}: {e}")))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(?config.server, "Loaded harness config from {path}");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, HarnessError> {
        toml::from_str(content).map_err(|e| HarnessError::Config(e.to_string()))
    }

    /// Applies `STAFF_API_*` overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STAFF_API_URL") {
            self.server.base_url = url;
        }
        if let Some(tenant) = lookup("STAFF_API_TENANT") {
            self.server.tenant_identifier = tenant;
        }
        if let Some(username) = lookup("STAFF_API_USERNAME") {
            self.auth.username = username;
        }
        if let Some(password) = lookup("STAFF_API_PASSWORD") {
            self.auth.password = password;
        }
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        let url = &self.server.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HarnessError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.server.base_url
            )));
        }
        if self.server.timeout_secs == 0 {
            return Err(HarnessError::Config("timeout_secs must be positive".into()));
        }
        // Generated names start with a fixed prefix, so no limit may be shorter.
        let limits = &self.suite.limits;
        for (field, limit, prefix) in [
            (FIRSTNAME, limits.firstname, FIRSTNAME_PREFIX),
            (LASTNAME, limits.lastname, LASTNAME_PREFIX),
            (MOBILE_NO, limits.mobile_no, MOBILE_NO_PREFIX),
        ] {
            let min = prefix.chars().count();
            if limit < min {
                return Err(HarnessError::Config(format!(
                    "{field} limit must be at least {min} (the length of {prefix:?}), got {limit}"
                )));
            }
        }
        Ok(())
    }
}
