// Realtime database feed - watches one path for scalar updates over the
// streaming REST protocol
use crate::infrastructure::sse::{self, SseEvent};
use futures::{StreamExt, pin_mut};
use serde::Deserialize;
use tokio::sync::mpsc;

/// One `put`/`patch` frame of the streaming protocol.
#[derive(Debug, Deserialize)]
struct FeedFrame {
    #[allow(dead_code)]
    path: String,
    data: serde_json::Value,
}

/// Streaming REST URL for one watched path.
fn feed_url(base: &str, path: &str) -> String {
    format!("{}/{}.json", base.trim_end_matches('/'), path.trim_matches('/'))
}

/// Extract the scalar payload from one feed event. Keep-alive and other
/// control events carry no reading.
fn decode_feed_event(event: &SseEvent) -> Option<f64> {
    if event.name != "put" && event.name != "patch" {
        return None;
    }
    let frame: FeedFrame = match serde_json::from_str(&event.data) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("dropping undecodable feed frame: {}", e);
            return None;
        }
    };
    let value = frame.data.as_f64();
    if value.is_none() && !frame.data.is_null() {
        tracing::warn!("feed pushed a non-numeric value: {}", frame.data);
    }
    value
}

/// Pump scalar values from the realtime feed into the session queue until
/// the server or the session goes away.
pub async fn pump_feed_values(
    client: reqwest::Client,
    base_url: String,
    path: String,
    tx: mpsc::Sender<f64>,
) {
    let stream = sse::subscribe(client, feed_url(&base_url, &path));
    pin_mut!(stream);
    while let Some(event) = stream.next().await {
        match event {
            Ok(event) => {
                if event.name == "cancel" || event.name == "auth_revoked" {
                    tracing::warn!("realtime feed closed by the server: {}", event.name);
                    return;
                }
                if let Some(value) = decode_feed_event(&event) {
                    if tx.send(value).await.is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::error!("realtime feed error: {}", e);
                return;
            }
        }
    }
    tracing::warn!("realtime feed disconnected");
}
