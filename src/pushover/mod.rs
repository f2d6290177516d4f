pub mod api;

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};

use crate::alert::LightControl;
use crate::config::PushoverConfig;
use crate::error::{ApiError, ApiResult};
use crate::pushover::api::{MessageList, PushFrame, StatusReply};
use crate::rules::AlertKind;
use crate::state::AppState;

const RECONNECT_DELAY: Duration = Duration::from_millis(2000);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pushover Open Client: listens on the push socket, and fetches new
/// messages whenever the server announces them.
pub struct Client<C> {
    conf: PushoverConfig,
    http: reqwest::Client,
    state: AppState<C>,
}

impl<C: LightControl + 'static> Client<C> {
    pub fn new(state: AppState<C>) -> ApiResult<Self> {
        let conf = state.config().pushover.clone();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { conf, http, state })
    }

    pub async fn fetch_messages(&self) -> ApiResult<MessageList> {
        let list: MessageList = self
            .http
            .get(format!("{}/messages.json", self.conf.api_url))
            .query(&[
                ("secret", self.conf.user_secret.as_str()),
                ("device_id", self.conf.device_id.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if list.status != 1 {
            return Err(ApiError::PushoverStatus(list.status, list.errors));
        }

        Ok(list)
    }

    /// Delete all messages up to and including `highest`, so they are not
    /// returned by the next fetch.
    pub async fn acknowledge(&self, highest: u64) -> ApiResult<()> {
        let message = highest.to_string();
        let reply: StatusReply = self
            .http
            .post(format!(
                "{}/devices/{}/update_highest_message.json",
                self.conf.api_url, self.conf.device_id
            ))
            .form(&[
                ("secret", self.conf.user_secret.as_str()),
                ("message", message.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if reply.status != 1 {
            return Err(ApiError::PushoverStatus(reply.status, reply.errors));
        }

        log::debug!("[pushover] Acknowledged messages up to {highest}");
        Ok(())
    }

    /// Alert on the latest message in `list`, if any.
    pub fn dispatch(&self, list: &MessageList) -> Option<AlertKind> {
        let Some(msg) = list.latest() else {
            log::warn!("[pushover] New message announced, but none were returned");
            return None;
        };

        log::info!(
            "[pushover] Message {} from {} at {} (priority {}): {:?} {:?}",
            msg.id,
            msg.app.as_deref().unwrap_or("unknown app"),
            msg.date,
            msg.priority,
            msg.title.as_deref().unwrap_or_default(),
            msg.message
        );

        Some(self.state.notify(&msg.message))
    }

    async fn handle_new_message(&self) -> ApiResult<()> {
        let list = self.fetch_messages().await?;

        self.dispatch(&list);

        if self.conf.acknowledge {
            if let Some(highest) = list.highest_id() {
                self.acknowledge(highest).await?;
            }
        }

        Ok(())
    }

    async fn login(
        &self,
        socket: &mut WebSocketStream<MaybeTlsStream<TcpStream>>,
    ) -> ApiResult<()> {
        let login = format!("login:{}:{}\n", self.conf.device_id, self.conf.user_secret);
        socket.send(tungstenite::Message::Text(login)).await?;
        log::info!("[pushover] Logged in as device {}", self.conf.device_id);
        Ok(())
    }

    /// Returns `Ok(())` when the connection should be re-established.
    pub async fn event_loop(
        &self,
        mut socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    ) -> ApiResult<()> {
        self.login(&mut socket).await?;

        let keepalive = Duration::from_secs(self.conf.keepalive_timeout);

        loop {
            let Ok(pkt) = timeout(keepalive, socket.next()).await else {
                log::warn!(
                    "[pushover] No keep-alive for {}s, reconnecting",
                    keepalive.as_secs()
                );
                return Ok(());
            };

            let txt = match pkt.ok_or(ApiError::UnexpectedPushoverEof)?? {
                tungstenite::Message::Text(txt) => txt,
                tungstenite::Message::Binary(data) => {
                    String::from_utf8_lossy(&data).into_owned()
                }
                tungstenite::Message::Close(frame) => {
                    log::warn!("[pushover] Socket closed by server: {frame:?}");
                    return Err(ApiError::UnexpectedPushoverEof);
                }
                _ => continue,
            };

            match PushFrame::parse(&txt) {
                PushFrame::KeepAlive => log::trace!("[pushover] Keep-alive"),
                PushFrame::NewMessage => {
                    if let Err(err) = self.handle_new_message().await {
                        log::error!("[pushover] Could not handle new message: {err}");
                    }
                }
                PushFrame::Reload => {
                    log::info!("[pushover] Server requested reconnect");
                    return Ok(());
                }
                PushFrame::Error => return Err(ApiError::PushoverRejected),
                PushFrame::SessionClosed => return Err(ApiError::SessionClosed),
                PushFrame::Unknown(frame) => {
                    log::warn!("[pushover] Ignoring unknown frame {frame:?}");
                }
            }
        }
    }

    pub async fn run_forever(self) -> ApiResult<()> {
        loop {
            log::info!("[pushover] Connecting to {}", self.conf.websocket_url);
            match connect_async(&self.conf.websocket_url).await {
                Ok((socket, _)) => match self.event_loop(socket).await {
                    Ok(()) => {}
                    Err(err @ (ApiError::PushoverRejected | ApiError::SessionClosed)) => {
                        log::error!("[pushover] {err}, giving up");
                        return Err(err);
                    }
                    Err(err) => log::error!("[pushover] Event loop broke: {err:?}"),
                },
                Err(err) => log::error!("[pushover] Connect failed: {err:?}"),
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }
}
