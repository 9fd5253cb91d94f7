use async_trait::async_trait;
use opentelemetry::global;
use opentelemetry::propagation::Injector;
use reqwest::{Client, RequestBuilder, header};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::{
    config::HarnessConfig,
    domain::{
        client::{RawResponse, StaffApi},
        payload::StaffPayload,
    },
    error::HarnessError,
    infrastructure::{
        auth::{Authenticator, build_http_client},
        template::RequestTemplate,
    },
};

/// HTTP client for the staff resource, carrying the scenario's request template.
pub struct HttpStaffClient {
    client: Client,
    template: RequestTemplate,
}

impl HttpStaffClient {
    pub fn new(client: Client, template: RequestTemplate) -> Self {
        Self { client, template }
    }

    /// Runs the per-scenario setup: build the HTTP client, log in, build the template.
    #[tracing::instrument(skip_all, fields(base_url = %config.server.base_url))]
    pub async fn connect(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let client = build_http_client(&config.server)?;
        let key = Authenticator::new(&client, &config.server, &config.auth)
            .login()
            .await?;
        let template = RequestTemplate::new(&config.server, &key)?;
        Ok(Self::new(client, template))
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, HarnessError> {
        let mut headers = self.template.headers().clone();
        let cx = tracing::Span::current().context();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(&cx, &mut HeaderMapInjector(&mut headers));
        });

        let res = request.headers(headers).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        tracing::debug!(status, bytes = body.len(), "Staff endpoint responded");
        Ok(RawResponse { status, body })
    }
}

/// Adapter to inject OpenTelemetry trace context into HTTP request headers.
struct HeaderMapInjector<'a>(&'a mut header::HeaderMap);

impl Injector for HeaderMapInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = header::HeaderName::from_bytes(key.as_bytes())
            && let Ok(val) = header::HeaderValue::from_str(&value)
        {
            self.0.insert(name, val);
        }
    }
}

#[async_trait]
impl StaffApi for HttpStaffClient {
    #[tracing::instrument(
        skip(self, payload),
        fields(fields = ?payload.field_names().collect::<Vec<_>>())
    )]
    async fn create_staff(&self, payload: StaffPayload) -> Result<RawResponse, HarnessError> {
        let url = self.template.url("staff")?;
        self.send(self.client.post(url).json(&payload)).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_staff(&self, id: i64) -> Result<RawResponse, HarnessError> {
        let url = self.template.url(&format!("staff/{id}"))?;
        self.send(self.client.get(url)).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_staff(&self, status: Option<String>) -> Result<RawResponse, HarnessError> {
        let url = match status.as_deref() {
            Some(status) => self.template.url_with("staff", &[("status", status)])?,
            None => self.template.url("staff")?,
        };
        self.send(self.client.get(url)).await
    }
}
