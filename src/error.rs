use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /* mapped errors */
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    TungsteniteError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),

    /* hue errors */
    #[error("Hue bridge rejected update of {address}: {description} (type {typ})")]
    HueError {
        typ: u32,
        address: String,
        description: String,
    },

    #[error("Hue bridge sent empty reply")]
    HueEmptyReply,

    /* pushover errors */
    #[error("Pushover request failed with status {0}: {1:?}")]
    PushoverStatus(i64, Vec<String>),

    #[error("Pushover rejected the session, device must log in again")]
    PushoverRejected,

    #[error("Pushover session closed by another login")]
    SessionClosed,

    #[error("Unexpected eof on pushover socket")]
    UnexpectedPushoverEof,

    /* alert errors */
    #[error("Alert aborted at step {step}: {source}")]
    AlertAborted {
        step: usize,
        #[source]
        source: Box<ApiError>,
    },

    /* config errors */
    #[error("Setting {0} must be set")]
    MissingSetting(&'static str),

    #[error("Setting {0} must be greater than zero")]
    ZeroSetting(&'static str),
}

pub type ApiResult<T> = Result<T, ApiError>;
