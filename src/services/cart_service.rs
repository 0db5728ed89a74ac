use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::{config::AppConfig, dto::cart::AdjustQuantityRequest};

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("cart service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cart service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid cart service configuration: {0}")]
    Config(String),
}

/// Remote holder of the persisted cart.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Adds `request.quantity` (which may be negative) to the stored quantity.
    async fn adjust_quantity(&self, request: AdjustQuantityRequest) -> Result<(), CartServiceError>;
}

pub struct HttpCartService {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpCartService {
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CartServiceError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| CartServiceError::Config("token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: format!("{}/cart/", base_url.trim_end_matches('/')),
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CartServiceError> {
        Self::new(
            &config.cart_service_url,
            config.cart_service_token.as_deref(),
            config.cart_service_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CartService for HttpCartService {
    async fn adjust_quantity(&self, request: AdjustQuantityRequest) -> Result<(), CartServiceError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            slug = %request.slug,
            quantity = request.quantity,
            "adjusting cart quantity"
        );
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CartServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let service =
            HttpCartService::new("http://cart.local/api/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(service.endpoint(), "http://cart.local/api/cart/");
    }

    #[test]
    fn rejects_unprintable_token() {
        let result = HttpCartService::new("http://cart.local", Some("bad\ntoken"), Duration::from_secs(1));
        assert!(matches!(result, Err(CartServiceError::Config(_))));
    }
}
