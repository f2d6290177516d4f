pub mod legacy_api;

use std::time::Duration;

use crate::alert::{LightControl, LightState};
use crate::config::HueConfig;
use crate::error::ApiResult;
use crate::hue::legacy_api::{ApiLight, GetReply, UpdateReply};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the v1 (`/api/<username>/...`) api of a hue bridge
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    pub fn new(conf: &HueConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base = format!("http://{}/api/{}", conf.host, conf.username);

        Ok(Self { http, base })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    pub async fn light(&self, id: u32) -> ApiResult<ApiLight> {
        let reply: GetReply<ApiLight> = self
            .http
            .get(self.url(&format!("lights/{id}")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        reply.into_result()
    }
}

impl LightControl for Client {
    async fn update_light(&self, light: u32, state: LightState) -> ApiResult<LightState> {
        log::debug!("PUT light {light}: {}", serde_json::to_string(&state)?);

        let reply: UpdateReply = self
            .http
            .put(self.url(&format!("lights/{light}/state")))
            .json(&state)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        reply.check()?;

        Ok(state)
    }
}
