use std::net::Ipv4Addr;

use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::rules::AlertStates;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PushoverConfig {
    pub device_id: String,
    pub user_secret: String,
    pub websocket_url: String,
    pub api_url: String,
    pub acknowledge: bool,
    /// Seconds without any frame before the socket is considered dead
    pub keepalive_timeout: u64,
    pub states: AlertStates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Milliseconds
    pub delay: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HueConfig {
    pub host: String,
    pub username: String,
    pub light: u32,
    pub animation: AnimationConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: Ipv4Addr,
    pub port: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub pushover: PushoverConfig,
    pub hue: HueConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn validate(&self) -> ApiResult<()> {
        let required = [
            ("pushover.device_id", &self.pushover.device_id),
            ("pushover.user_secret", &self.pushover.user_secret),
            ("hue.host", &self.hue.host),
            ("hue.username", &self.hue.username),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::MissingSetting(name));
            }
        }

        if self.pushover.keepalive_timeout == 0 {
            return Err(ApiError::ZeroSetting("pushover.keepalive_timeout"));
        }

        Ok(())
    }
}

fn builder() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("pushover.device_id", "")?
        .set_default("pushover.user_secret", "")?
        .set_default("pushover.websocket_url", "wss://client.pushover.net/push")?
        .set_default("pushover.api_url", "https://api.pushover.net/1")?
        .set_default("pushover.acknowledge", true)?
        .set_default("pushover.keepalive_timeout", 120)?
        .set_default("hue.host", "")?
        .set_default("hue.username", "")?
        .set_default("hue.light", 1)?
        .set_default("hue.animation.delay", 500)?
        .set_default("server.address", "0.0.0.0")?
        .set_default("server.port", 3000)
}

fn finish(settings: Config) -> ApiResult<AppConfig> {
    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn parse(filename: &Utf8Path) -> ApiResult<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name(filename.as_str()))
        .build()?;

    finish(settings)
}

pub fn parse_str(yaml: &str) -> ApiResult<AppConfig> {
    let settings = builder()?
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .build()?;

    finish(settings)
}
