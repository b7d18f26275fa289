use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub roster_dir: String,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3230".to_string(),
            api_token: None,
            roster_dir: "./roster".to_string(),
            default_page_limit: 100,
            max_page_limit: 1000,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("MUSTER_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.roster_dir = resolve_path(base, &self.roster_dir);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.max_page_limit == 0 {
            return Err(anyhow!("max_page_limit must be greater than 0"));
        }
        if self.default_page_limit == 0 || self.default_page_limit > self.max_page_limit {
            return Err(anyhow!(
                "default_page_limit must be between 1 and max_page_limit"
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            roster_dir: self.roster_dir.clone(),
            default_page_limit: self.default_page_limit,
            max_page_limit: self.max_page_limit,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MUSTER_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MUSTER_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("MUSTER_ROSTER_DIR") {
            self.roster_dir = value;
        }
        if let Ok(value) = env::var("MUSTER_DEFAULT_PAGE_LIMIT") {
            self.default_page_limit = value.parse().unwrap_or(self.default_page_limit);
        }
        if let Ok(value) = env::var("MUSTER_MAX_PAGE_LIMIT") {
            self.max_page_limit = value.parse().unwrap_or(self.max_page_limit);
        }
        if let Ok(value) = env::var("MUSTER_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MUSTER_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_token_normalizes_to_none() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn validate_rejects_bad_bind_addr() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        config.validate().expect_err("reject bind addr");
    }

    #[test]
    fn validate_rejects_default_limit_above_max() {
        let config = AppConfig {
            default_page_limit: 2000,
            max_page_limit: 1000,
            ..AppConfig::default()
        };
        config.validate().expect_err("reject limits");
    }
}
