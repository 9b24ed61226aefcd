use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::{
    Config,
    endpoint::{API_KEY_PLACEHOLDER, SUBJECT_PLACEHOLDER},
    error::{SourceError, truncate_body},
};

/// Fetch gateway: expands an endpoint template and returns the parsed body.
///
/// Implementations never cache and never retry; every call is a request.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, template: &str, subject: &str) -> Result<Value, SourceError>;
}

#[derive(Debug, Clone)]
pub struct AccuWeatherSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AccuWeatherSource {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        let source = Self::new(
            api_key.to_owned(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(source)
    }

    /// Substitutes both placeholders, percent-encoding the values.
    pub fn expand(&self, template: &str, subject: &str) -> String {
        let path = template
            .replace(SUBJECT_PLACEHOLDER, &encode(subject))
            .replace(API_KEY_PLACEHOLDER, &encode(&self.api_key));
        format!("{}{}", self.base_url, path)
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[async_trait]
impl WeatherSource for AccuWeatherSource {
    async fn fetch(&self, template: &str, subject: &str) -> Result<Value, SourceError> {
        debug!(template, subject, "fetching");
        let url = self.expand(template, subject);

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(template, status = status.as_u16(), "provider request failed");
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
