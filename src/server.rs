use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

use crate::alert::LightControl;
use crate::error::ApiResult;
use crate::routes;
use crate::state::AppState;

fn trace_layer_on_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record(
        "latency",
        tracing::field::display(format!("{}μs", latency.as_micros())),
    );
    span.record("status", tracing::field::display(response.status()));
}

fn router<C: LightControl + 'static>(appstate: AppState<C>) -> Router<()> {
    routes::router(appstate).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                info_span!(
                    "http",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    status = tracing::field::Empty,
                    latency = tracing::field::Empty,
                )
            })
            .on_response(trace_layer_on_response),
    )
}

#[must_use]
pub fn build_service<C: LightControl + 'static>(
    appstate: AppState<C>,
) -> IntoMakeService<NormalizePath<Router>> {
    let normalized = NormalizePathLayer::trim_trailing_slash().layer(router(appstate));

    ServiceExt::<Request>::into_make_service(normalized)
}

pub async fn http_server(
    listen_addr: Ipv4Addr,
    listen_port: u16,
    svc: IntoMakeService<NormalizePath<Router>>,
) -> ApiResult<()> {
    let addr = SocketAddr::from((listen_addr, listen_port));
    log::info!("http listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, svc).await?;

    Ok(())
}
