//! HTTP backend adapter.
//!
//! Implements [`CallGateway`] and [`ScheduleGateway`] against the care
//! service REST API:
//!
//! ```text
//!   POST {base}/calls/voice                 originate a call
//!   GET  {base}/calls/{sid}/status          probe call status
//!   GET  {base}/owners/{id}/call-schedule   load schedule (404 = none yet)
//!   PUT  {base}/owners/{id}/call-schedule   save schedule
//! ```
//!
//! The ports are fire-and-forget, so every request is spawned onto a Tokio
//! runtime handle and its outcome lands in a [`ReplyMailbox`]. The runtime
//! loop drains the mailbox once per tick and feeds each [`Reply`] into the
//! core. [`HttpBackend`] is cheap to clone (the underlying `reqwest` client
//! is shared), which lets one connection serve both gateway ports.

use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::ports::{CallGateway, CallReply, Reply, ScheduleGateway, ScheduleReply};
use crate::call::{CallGrant, CallStatusRecord, OriginateRequest};
use crate::error::{RemoteError, Result};
use crate::schedule::ScheduleRecord;

/// Error body shape the care service uses for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Gateway adapter backed by the care service REST API.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    handle: Handle,
    tx: UnboundedSender<Reply>,
}

/// Receiving end for completed requests. Owned by the runtime loop.
pub struct ReplyMailbox {
    rx: UnboundedReceiver<Reply>,
}

impl HttpBackend {
    /// `base_url` with or without a trailing slash; `handle` must belong to
    /// a runtime that outlives this backend.
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        handle: Handle,
    ) -> Result<(Self, ReplyMailbox)> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(transport_error)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            handle,
            tx,
        };
        Ok((backend, ReplyMailbox { rx }))
    }

    fn send(tx: &UnboundedSender<Reply>, reply: Reply) {
        if tx.send(reply).is_err() {
            debug!("reply mailbox dropped before delivery");
        }
    }
}

impl ReplyMailbox {
    /// Completions that arrived since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<Reply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            replies.push(reply);
        }
        replies
    }
}

// ─── port implementations ──────────────────────────────────────

impl CallGateway for HttpBackend {
    fn originate(&mut self, request: OriginateRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let url = format!("{}/calls/voice", self.base_url);
        self.handle.spawn(async move {
            let result = match client.post(&url).json(&request).send().await {
                Ok(response) => read_json::<CallGrant>(response).await,
                Err(e) => Err(transport_error(e)),
            };
            Self::send(&tx, Reply::Call(CallReply::Originated(result)));
        });
    }

    fn fetch_status(&mut self, call_sid: &str) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let url = format!("{}/calls/{}/status", self.base_url, call_sid);
        self.handle.spawn(async move {
            let result = match client.get(&url).send().await {
                Ok(response) => read_json::<CallStatusRecord>(response).await,
                Err(e) => Err(transport_error(e)),
            };
            Self::send(&tx, Reply::Call(CallReply::Status(result)));
        });
    }
}

impl ScheduleGateway for HttpBackend {
    fn load_schedule(&mut self, owner_id: &str) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let owner = owner_id.to_string();
        let url = format!("{}/owners/{}/call-schedule", self.base_url, owner_id);
        self.handle.spawn(async move {
            let result = read_schedule(client, &url).await;
            Self::send(
                &tx,
                Reply::Schedule(ScheduleReply::Loaded {
                    owner_id: owner,
                    result,
                }),
            );
        });
    }

    fn save_schedule(&mut self, owner_id: &str, record: &ScheduleRecord) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let owner = owner_id.to_string();
        let url = format!("{}/owners/{}/call-schedule", self.base_url, owner_id);
        let body = record.clone();
        self.handle.spawn(async move {
            let result = match client.put(&url).json(&body).send().await {
                Ok(response) if response.status().is_success() => Ok(()),
                Ok(response) => Err(remote_error(response).await),
                Err(e) => Err(transport_error(e)),
            };
            Self::send(
                &tx,
                Reply::Schedule(ScheduleReply::Saved {
                    owner_id: owner,
                    result,
                }),
            );
        });
    }
}

// ─── response handling ─────────────────────────────────────────

/// Decode a 2xx JSON body, or turn the response into a [`RemoteError`].
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> core::result::Result<T, RemoteError> {
    if !response.status().is_success() {
        return Err(remote_error(response).await);
    }
    response.json::<T>().await.map_err(transport_error)
}

/// Schedule loads get extra leniency: a 404, an empty body, or a JSON
/// `null` all mean "no schedule stored for this owner yet".
async fn read_schedule(
    client: reqwest::Client,
    url: &str,
) -> core::result::Result<Option<ScheduleRecord>, RemoteError> {
    let response = client.get(url).send().await.map_err(transport_error)?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(remote_error(response).await);
    }
    let text = response.text().await.map_err(transport_error)?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<ScheduleRecord>>(&text)
        .map_err(|e| RemoteError::message(e.to_string()))
}

/// Error for a non-2xx response, carrying the backend's `message` field
/// when the body has one.
async fn remote_error(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => None,
    };
    RemoteError {
        status: Some(status),
        detail,
    }
}

/// Error raised by the transport itself (connect refused, timeout, bad
/// TLS, undecodable body).
fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError {
        status: err.status().map(|s| s.as_u16()),
        detail: Some(err.without_url().to_string()),
    }
}
