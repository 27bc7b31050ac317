use crate::config::Config;
use crate::error::{WarcalcError, WcResult};
use crate::protocol::{CalcResult, CalculationRequest};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// The external statistics service. Given the ordered request list it
/// returns one aggregated result.
#[async_trait(?Send)]
pub trait CalculationEngine {
    async fn calculate(&self, requests: &[CalculationRequest]) -> WcResult<CalcResult>;
}

/// POSTs the request array as JSON and decodes the response body.
pub struct HttpEngine {
    client: Client,
    url: String,
}

impl HttpEngine {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &Config) -> WcResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.engine_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl CalculationEngine for HttpEngine {
    async fn calculate(&self, requests: &[CalculationRequest]) -> WcResult<CalcResult> {
        debug!("📡 POST {} ({} units)", self.url, requests.len());

        let response = self.client.post(&self.url).json(requests).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WarcalcError::EngineStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<CalcResult>().await?)
    }
}
