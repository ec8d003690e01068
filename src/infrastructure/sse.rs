// Server-sent-events transport - request plumbing and wire decoding
use bytes::BytesMut;
use futures::{Stream, StreamExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SseError {
    #[error("push channel request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One dispatched event: the event name (defaulting to `message`) and the
/// joined data payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub name: String,
    pub data: String,
}

/// Incremental decoder for the `text/event-stream` wire format. Chunks
/// may split lines and events arbitrarily; an event is dispatched on the
/// blank line that terminates it.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    event_name: Option<String>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of the response body; returns every event the chunk
    /// completed, in wire order.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(line) = self.take_line() {
            if let Some(event) = self.push_line(&line) {
                events.push(event);
            }
        }
        events
    }

    fn take_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line = self.buffer.split_to(pos + 1);
        let mut line = &line[..pos];
        if line.ends_with(b"\r") {
            line = &line[..line.len() - 1];
        }
        Some(String::from_utf8_lossy(line).into_owned())
    }

    fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            let name = self.event_name.take();
            if self.data_lines.is_empty() {
                // an event without data is discarded, name and all
                return None;
            }
            let data = self.data_lines.join("\n");
            self.data_lines.clear();
            return Some(SseEvent {
                name: name.unwrap_or_else(|| "message".to_string()),
                data,
            });
        }
        if line.starts_with(':') {
            // comment / keep-alive line
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event_name = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // id and retry are left to the transport
            _ => {}
        }
        None
    }
}

/// Open an event-stream request and yield decoded events until the server
/// closes the connection.
pub fn subscribe(
    client: reqwest::Client,
    url: String,
) -> impl Stream<Item = Result<SseEvent, SseError>> {
    async_stream::try_stream! {
        let response = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!("event stream connected: {}", url);

        let mut decoder = SseDecoder::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            for event in decoder.push_chunk(&chunk?) {
                yield event;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_event_dispatches_on_blank_line() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push_chunk(b"event: datas\ndata: {\"accX\":1}\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                name: "datas".to_string(),
                data: "{\"accX\":1}".to_string(),
            }]
        );
    }

    #[test]
    fn test_default_event_name_is_message() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push_chunk(b"data: 42\n\n");
        assert_eq!(events[0].name, "message");
        assert_eq!(events[0].data, "42");
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push_chunk(b"event: da").is_empty());
        assert!(decoder.push_chunk(b"tas\ndata: 1").is_empty());
        let events = decoder.push_chunk(b"\n\n");
        assert_eq!(events[0].name, "datas");
        assert_eq!(events[0].data, "1");
    }

    #[test]
    fn test_crlf_lines() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push_chunk(b"event: put\r\ndata: 3.5\r\n\r\n");
        assert_eq!(events[0].name, "put");
        assert_eq!(events[0].data, "3.5");
    }

    #[test]
    fn test_multi_line_data_is_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push_chunk(b"data: a\ndata: b\n\n");
        assert_eq!(events[0].data, "a\nb");
    }

    #[test]
    fn test_comments_and_dataless_events_are_dropped() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push_chunk(b": keep-alive\n\n").is_empty());
        assert!(decoder.push_chunk(b"event: open\n\n").is_empty());
        // state does not leak into the next event
        let events = decoder.push_chunk(b"data: 1\n\n");
        assert_eq!(events[0].name, "message");
    }

    #[test]
    fn test_two_events_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push_chunk(b"data: 1\n\ndata: 2\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "1");
        assert_eq!(events[1].data, "2");
    }
}
