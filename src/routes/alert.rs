use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::alert::LightControl;
use crate::rules::AlertKind;
use crate::state::AppState;
use crate::types::{Rgb, XY};

#[derive(Debug, Serialize, Deserialize)]
pub struct ColorRequest {
    pub color: Rgb,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlertReply {
    pub state: Option<AlertKind>,
    pub color: Rgb,
    pub xy: XY,
}

impl AlertReply {
    fn accepted(state: Option<AlertKind>, color: Rgb) -> impl IntoResponse {
        let reply = Self {
            state,
            color,
            xy: color.to_xy(),
        };
        (StatusCode::ACCEPTED, Json(reply))
    }
}

async fn get_status<C: LightControl + 'static>(
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    let hue = &state.config().hue;
    Json(json!({
        "light": hue.light,
        "delay_ms": hue.animation.delay,
        "states": AlertKind::ALL,
    }))
}

async fn post_alert_state<C: LightControl + 'static>(
    State(state): State<AppState<C>>,
    Path(kind): Path<AlertKind>,
) -> impl IntoResponse {
    log::info!("Manual alert: {kind}");
    state.alert(kind);

    AlertReply::accepted(Some(kind), state.config().pushover.states.get(kind).color)
}

async fn post_alert_color<C: LightControl + 'static>(
    State(state): State<AppState<C>>,
    Json(req): Json<ColorRequest>,
) -> impl IntoResponse {
    log::info!("Manual alert: {:?}", req.color);
    state.alerter().trigger(req.color);

    AlertReply::accepted(None, req.color)
}

async fn post_notify<C: LightControl + 'static>(
    State(state): State<AppState<C>>,
    Json(req): Json<NotifyRequest>,
) -> impl IntoResponse {
    let kind = state.notify(&req.message);

    AlertReply::accepted(Some(kind), state.config().pushover.states.get(kind).color)
}

pub fn router<C: LightControl + 'static>() -> Router<AppState<C>> {
    Router::new()
        .route("/status", get(get_status::<C>))
        .route("/alert", post(post_alert_color::<C>))
        .route("/alert/:state", post(post_alert_state::<C>))
        .route("/notify", post(post_notify::<C>))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::alert::tests::MockLight;
    use crate::{config, routes};

    const CONFIG: &str = "
pushover:
  device_id: dev
  user_secret: secret
  states:
    success: { text: 'succeeded', color: [0, 255, 0] }
    warning: { text: 'unstable', color: [255, 160, 0] }
    error: { text: 'failed', color: [255, 0, 0] }
    default: { color: [0, 0, 255] }
hue:
  host: 10.0.0.2
  username: user
  light: 3
  animation:
    delay: 100
";

    fn appstate() -> AppState<MockLight> {
        AppState::new(config::parse_str(CONFIG).unwrap(), MockLight::default())
    }

    async fn call(
        state: &AppState<MockLight>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        let req = match body {
            Some(body) => req.body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = routes::router(state.clone()).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    #[tokio::test(start_paused = true)]
    async fn status() {
        let state = appstate();
        let (status, json) = call(&state, Method::GET, "/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["light"], 3);
        assert_eq!(json["delay_ms"], 100);
        assert_eq!(
            json["states"],
            json!(["success", "warning", "error", "default"])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn alert_by_state() {
        let state = appstate();
        let (status, json) = call(&state, Method::POST, "/alert/error", None).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["state"], "error");
        assert_eq!(json["color"], json!([255, 0, 0]));
        assert_eq!(json["xy"], json!([0.7006, 0.2993]));

        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert_eq!(state.alerter().client().states().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn alert_unknown_state() {
        let state = appstate();
        let (status, _) = call(&state, Method::POST, "/alert/purple", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn alert_by_color() {
        let state = appstate();
        let body = json!({"color": [0, 255, 0]});
        let (status, json) = call(&state, Method::POST, "/alert", Some(body)).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["state"], Value::Null);
        assert_eq!(json["xy"], json!([0.1724, 0.7468]));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_classifies() {
        let state = appstate();
        let body = json!({"message": "nightly build unstable"});
        let (status, json) = call(&state, Method::POST, "/notify", Some(body)).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["state"], "warning");
        assert_eq!(json["color"], json!([255, 160, 0]));
    }
}
