use camino::Utf8PathBuf;
use clap::Parser;
use tokio::task::JoinSet;

use huelert::config;
use huelert::error::ApiResult;
use huelert::hue;
use huelert::pushover;
use huelert::rules::AlertKind;
use huelert::server;
use huelert::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: Utf8PathBuf,

    /// Blink the light once for the given state, then exit
    #[arg(long, value_name = "STATE")]
    alert: Option<AlertKind>,
}

fn init_logging() -> ApiResult<()> {
    let mut builder = pretty_env_logger::formatted_timed_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        let filters = [
            "debug",
            "hyper=info",
            "reqwest=info",
            "rustls=info",
            "tungstenite=info",
            "tokio_tungstenite=info",
            "tower_http::trace::on_request=info",
            "axum::rejection=trace",
        ];
        builder.parse_filters(&filters.join(","));
    }

    Ok(builder.try_init()?)
}

async fn check_light(client: &hue::Client, id: u32) {
    match client.light(id).await {
        Ok(light) => {
            log::info!(
                "Using light {id}: {:?} ({} {}, {})",
                light.name,
                light.manufacturername.as_deref().unwrap_or("unknown"),
                light.modelid.as_deref().unwrap_or("unknown model"),
                light.light_type,
            );
            log::debug!(
                "Light {id} state: on: {}, bri: {:?}, xy: {:?}, mode: {:?}, reachable: {}",
                light.state.on,
                light.state.bri,
                light.state.xy,
                light.state.colormode,
                light.state.reachable
            );
        }
        Err(err) => log::warn!("Could not find light {id}: {err}"),
    }
}

fn build_tasks(appstate: &AppState<hue::Client>) -> ApiResult<JoinSet<ApiResult<()>>> {
    let mut tasks = JoinSet::new();

    let conf = &appstate.config().server;
    let svc = server::build_service(appstate.clone());
    tasks.spawn(server::http_server(conf.address, conf.port, svc));

    let client = pushover::Client::new(appstate.clone())?;
    tasks.spawn(client.run_forever());

    Ok(tasks)
}

async fn run() -> ApiResult<()> {
    init_logging()?;

    let args = Args::parse();

    let conf = config::parse(&args.config)?;
    log::debug!("Configuration loaded successfully");

    let client = hue::Client::new(&conf.hue)?;
    let appstate = AppState::new(conf, client);
    let alerter = appstate.alerter();

    check_light(alerter.client(), alerter.light()).await;
    log::info!(
        "Alerting on light {} with {}ms animation delay",
        alerter.light(),
        alerter.delay().as_millis()
    );

    if let Some(kind) = args.alert {
        let color = appstate.config().pushover.states.get(kind).color;
        return alerter.fire(color).await;
    }

    let mut tasks = build_tasks(&appstate)?;

    loop {
        match tasks.join_next().await {
            None => break Ok(()),
            Some(Ok(Ok(res))) => log::info!("Worker returned: {res:?}"),
            Some(Ok(Err(res))) => log::error!("Worker task failed: {res:?}"),
            Some(Err(err)) => log::error!("Error spawning from worker: {err:?}"),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("Huelert error: {err}");
        log::error!("Fatal error encountered, cannot continue.");
    }
}
