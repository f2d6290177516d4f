use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::types::XY;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HueError {
    #[serde(rename = "type")]
    pub typ: u32,
    pub address: String,
    pub description: String,
}

impl From<HueError> for ApiError {
    fn from(err: HueError) -> Self {
        Self::HueError {
            typ: err.typ,
            address: err.address,
            description: err.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum HueResult<T> {
    Success(T),
    Error(HueError),
}

/// Reply to a v1 state update: one entry per changed attribute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateReply(pub Vec<HueResult<Value>>);

impl UpdateReply {
    /// Fail on the first error entry. An empty reply means nothing was
    /// applied, which is an error too.
    pub fn check(self) -> ApiResult<()> {
        if self.0.is_empty() {
            return Err(ApiError::HueEmptyReply);
        }

        for res in self.0 {
            if let HueResult::Error(err) = res {
                return Err(err.into());
            }
        }

        Ok(())
    }
}

/// A v1 GET either returns the object, or a list of errors.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetReply<T> {
    Found(T),
    Failed(Vec<HueResult<Value>>),
}

impl<T> GetReply<T> {
    pub fn into_result(self) -> ApiResult<T> {
        match self {
            Self::Found(obj) => Ok(obj),
            Self::Failed(errors) => Err(UpdateReply(errors)
                .check()
                .err()
                .unwrap_or(ApiError::HueEmptyReply)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiLightState {
    pub on: bool,
    #[serde(default)]
    pub bri: Option<u8>,
    #[serde(default)]
    pub xy: Option<XY>,
    #[serde(default)]
    pub colormode: Option<String>,
    #[serde(default)]
    pub reachable: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiLight {
    pub name: String,
    #[serde(rename = "type")]
    pub light_type: String,
    #[serde(default)]
    pub modelid: Option<String>,
    #[serde(default)]
    pub manufacturername: Option<String>,
    pub state: ApiLightState,
}
