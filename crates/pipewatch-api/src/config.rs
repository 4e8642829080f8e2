use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use pipewatch_gateway::GatewayConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub listen_addr: String,
    pub log_level: String,
    /// "development" switches CORS to permissive; anything else restricts
    /// origins to `cors.allowed_origins`.
    pub environment: String,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            log_level: "info".to_string(),
            environment: "development".to_string(),
            cors: CorsConfig::default(),
            telemetry: TelemetryConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "CorsConfig::default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: Self::default_origins() }
    }
}

impl CorsConfig {
    fn default_origins() -> Vec<String> {
        vec!["https://verificationsaas.com.br".to_string()]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { json: false }
    }
}

#[derive(Debug, Clone)]
pub struct Args {
    pub config: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        let mut config: Option<String> = None;
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(v) = it.next() {
                        config = Some(v);
                    }
                }
                _ => {}
            }
        }
        Self { config }
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let mut cfg = match path {
        None => AppConfig::default(),
        Some(p) => {
            let raw = fs::read_to_string(Path::new(p))?;
            serde_json::from_str(&raw).map_err(|e| anyhow!("invalid config json: {e}"))?
        }
    };

    apply_env(&mut cfg);

    if cfg.listen_addr.trim().is_empty() {
        cfg.listen_addr = AppConfig::default().listen_addr;
    }
    if cfg.log_level.trim().is_empty() {
        cfg.log_level = AppConfig::default().log_level;
    }
    Ok(cfg)
}

/// Environment overrides for the knobs deployments usually inject.
fn apply_env(cfg: &mut AppConfig) {
    if let Ok(env) = std::env::var("ENV") {
        if !env.trim().is_empty() {
            cfg.environment = env;
        }
    }
    if let Ok(token) = std::env::var("MP_ACCESS_TOKEN") {
        if !token.trim().is_empty() {
            cfg.gateway.access_token = Some(token);
        }
    }
    if let Ok(url) = std::env::var("MP_WEBHOOK_URL") {
        if !url.trim().is_empty() {
            cfg.gateway.notification_url = Some(url);
        }
    }
    let host = std::env::var("API_HOST").ok().filter(|v| !v.trim().is_empty());
    let port = std::env::var("API_PORT").ok().filter(|v| !v.trim().is_empty());
    if host.is_some() || port.is_some() {
        let (cur_host, cur_port) = cfg
            .listen_addr
            .rsplit_once(':')
            .map(|(h, p)| (h.to_string(), p.to_string()))
            .unwrap_or_else(|| (DEFAULT_HOST.to_string(), DEFAULT_PORT.to_string()));
        cfg.listen_addr =
            format!("{}:{}", host.unwrap_or(cur_host), port.unwrap_or(cur_port));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
        assert_eq!(cfg.environment, "development");
        assert!(cfg.gateway.access_token.is_none());
    }

    #[test]
    fn config_json_round_trips() {
        let cfg = AppConfig::default();
        let raw = serde_json::to_string(&cfg).unwrap();
        let parsed: AppConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.listen_addr, cfg.listen_addr);
        assert_eq!(parsed.cors.allowed_origins, cfg.cors.allowed_origins);
    }

    // All env scenarios live in one test: the process environment is shared
    // across the parallel test harness.
    #[test]
    fn env_overrides_merge_into_config() {
        std::env::set_var("ENV", "production");
        std::env::set_var("MP_ACCESS_TOKEN", "TEST-token");
        std::env::set_var("MP_WEBHOOK_URL", "https://hooks.example.com/mp");
        std::env::set_var("API_HOST", "127.0.0.1");
        std::env::set_var("API_PORT", "9100");

        let mut cfg = AppConfig::default();
        apply_env(&mut cfg);
        assert_eq!(cfg.environment, "production");
        assert_eq!(cfg.gateway.access_token.as_deref(), Some("TEST-token"));
        assert_eq!(cfg.gateway.notification_url.as_deref(), Some("https://hooks.example.com/mp"));
        assert_eq!(cfg.listen_addr, "127.0.0.1:9100");

        // Port-only override keeps the configured host.
        std::env::remove_var("API_HOST");
        let mut cfg = AppConfig::default();
        cfg.listen_addr = "10.0.0.5:8000".to_string();
        apply_env(&mut cfg);
        assert_eq!(cfg.listen_addr, "10.0.0.5:9100");

        // A listen_addr with no port falls back to the default host/port.
        let mut cfg = AppConfig::default();
        cfg.listen_addr = "not-an-addr".to_string();
        apply_env(&mut cfg);
        assert_eq!(cfg.listen_addr, format!("{DEFAULT_HOST}:9100"));

        for key in ["ENV", "MP_ACCESS_TOKEN", "MP_WEBHOOK_URL", "API_PORT"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: AppConfig = serde_json::from_str(
            r#"{"listen_addr":"127.0.0.1:9000","log_level":"debug","environment":"production"}"#,
        )
        .unwrap();
        assert_eq!(parsed.listen_addr, "127.0.0.1:9000");
        assert_eq!(parsed.cors.allowed_origins, CorsConfig::default_origins());
        assert!(!parsed.telemetry.json);
    }
}
