use std::{env, time::Duration};

use anyhow::Context;

use crate::i18n::Language;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cart_service_url: String,
    pub cart_service_token: Option<String>,
    pub cart_service_timeout: Duration,
    pub default_language: Language,
    pub checkout_route: String,
    pub notification_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let cart_service_url =
            env::var("CART_SERVICE_URL").context("CART_SERVICE_URL must be set")?;
        let cart_service_token = env::var("CART_SERVICE_TOKEN").ok().filter(|t| !t.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let cart_service_timeout = env::var("CART_SERVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));
        let default_language = match env::var("DEFAULT_LANGUAGE") {
            Ok(code) => code.parse()?,
            Err(_) => Language::default(),
        };
        let checkout_route = env::var("CHECKOUT_ROUTE").unwrap_or_else(|_| "/checkouts".to_string());
        let notification_capacity = env::var("NOTIFICATION_CAPACITY")
            .ok()
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(50);
        Ok(Self {
            host,
            port,
            cart_service_url,
            cart_service_token,
            cart_service_timeout,
            default_language,
            checkout_route,
            notification_capacity,
        })
    }
}
