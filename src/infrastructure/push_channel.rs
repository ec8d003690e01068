// Motion push channel - decodes the named sensor event into samples
use crate::domain::motion::MotionSample;
use crate::infrastructure::sse;
use futures::{StreamExt, pin_mut};
use serde::Deserialize;
use tokio::sync::mpsc;

/// Wire payload of one sensor event. Every field is optional so a
/// truncated payload still decodes; gaps become NaN channels downstream.
#[derive(Debug, Deserialize)]
struct MotionPayload {
    #[serde(rename = "accX")]
    acc_x: Option<f64>,
    #[serde(rename = "accY")]
    acc_y: Option<f64>,
    #[serde(rename = "accZ")]
    acc_z: Option<f64>,
    #[serde(rename = "gyroX")]
    gyro_x: Option<f64>,
    #[serde(rename = "gyroY")]
    gyro_y: Option<f64>,
    #[serde(rename = "gyroZ")]
    gyro_z: Option<f64>,
}

impl From<MotionPayload> for MotionSample {
    fn from(payload: MotionPayload) -> Self {
        Self {
            acc_x: payload.acc_x.unwrap_or(f64::NAN),
            acc_y: payload.acc_y.unwrap_or(f64::NAN),
            acc_z: payload.acc_z.unwrap_or(f64::NAN),
            gyro_x: payload.gyro_x.unwrap_or(f64::NAN),
            gyro_y: payload.gyro_y.unwrap_or(f64::NAN),
            gyro_z: payload.gyro_z.unwrap_or(f64::NAN),
        }
    }
}

/// Decode one event payload; a payload that is not a JSON object at all
/// is dropped with a warning.
fn decode_motion_event(data: &str) -> Option<MotionSample> {
    match serde_json::from_str::<MotionPayload>(data) {
        Ok(payload) => Some(payload.into()),
        Err(e) => {
            tracing::warn!("dropping undecodable sensor event: {}", e);
            None
        }
    }
}

/// Pump decoded samples from the push channel into the session queue, in
/// exact delivery order, until the transport or the session goes away.
pub async fn pump_motion_events(
    client: reqwest::Client,
    url: String,
    event_name: String,
    tx: mpsc::Sender<MotionSample>,
) {
    let stream = sse::subscribe(client, url);
    pin_mut!(stream);
    while let Some(event) = stream.next().await {
        match event {
            Ok(event) if event.name == event_name => {
                if let Some(sample) = decode_motion_event(&event.data) {
                    if tx.send(sample).await.is_err() {
                        return;
                    }
                }
            }
            // unrelated event names are skipped
            Ok(_) => {}
            Err(e) => {
                tracing::error!("push channel error: {}", e);
                return;
            }
        }
    }
    tracing::warn!("push channel disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_payload() {
        let sample = decode_motion_event(
            r#"{"accX":0.1,"accY":0.2,"accZ":9.8,"gyroX":1.0,"gyroY":-1.0,"gyroZ":0.0}"#,
        )
        .unwrap();
        assert_eq!(sample.acc_x, 0.1);
        assert_eq!(sample.acc_z, 9.8);
        assert_eq!(sample.gyro_y, -1.0);
    }

    #[test]
    fn test_missing_fields_become_nan() {
        let sample = decode_motion_event(r#"{"accX":0.1}"#).unwrap();
        assert_eq!(sample.acc_x, 0.1);
        assert!(sample.acc_y.is_nan());
        assert!(sample.gyro_z.is_nan());
    }

    #[test]
    fn test_garbage_payload_is_dropped() {
        assert!(decode_motion_event("not json").is_none());
        assert!(decode_motion_event(r#"{"accX":"high"}"#).is_none());
    }
}
