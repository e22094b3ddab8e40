//! Line reader for event-stream answers.
//!
//! Turns a streaming `reqwest::Response` into a [`FragmentStream`] of raw
//! lines. Framing is left in place; the domain assembler strips it.

use futures::StreamExt;
use relay_application::{FragmentStream, GatewayError};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

/// Lines buffered between the reader task and the consumer.
const LINE_BUFFER: usize = 64;

/// Spawn a task that forwards each line of `response` to the returned stream.
///
/// Lines that are not valid UTF-8 are logged and skipped. The task stops
/// when the body ends, when reading fails (the error is forwarded), or when
/// the consumer drops the stream.
pub fn spawn_line_reader(response: reqwest::Response) -> FragmentStream {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    tokio::spawn(async move {
        let byte_stream = response
            .bytes_stream()
            .map(|result| result.map_err(std::io::Error::other));
        let mut reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
        let mut buf = Vec::new();
        let mut count = 0usize;
        let mut skipped = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    count += 1;
                    let Some(line) = decode_line(&buf) else {
                        skipped += 1;
                        warn!(
                            "Skipping stream line {} that is not valid UTF-8 ({} bytes)",
                            count,
                            buf.len()
                        );
                        continue;
                    };
                    if tx.send(Ok(line.to_string())).await.is_err() {
                        debug!("Stream consumer went away after {} lines", count);
                        return;
                    }
                }
                Err(e) => {
                    warn!("Answer stream broke after {} lines: {}", count, e);
                    let _ = tx.send(Err(GatewayError::ConnectionError(e.to_string()))).await;
                    return;
                }
            }
        }

        debug!("Answer stream closed after {} lines ({} skipped)", count, skipped);
    });

    FragmentStream::new(rx)
}

/// Strip the line terminator (`\n` or `\r\n`) and decode as UTF-8.
fn decode_line(raw: &[u8]) -> Option<&str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"data: {}\n"), Some("data: {}"));
        assert_eq!(decode_line(b"data: {}\r\n"), Some("data: {}"));
        assert_eq!(decode_line(b"data: {}"), Some("data: {}"));
        assert_eq!(decode_line(b"\n"), Some(""));
    }

    #[test]
    fn test_decode_line_rejects_invalid_utf8() {
        assert_eq!(decode_line(b"data: {\"content\": \"\xff\xfe\"}\n"), None);
    }

    #[test]
    fn test_decode_line_keeps_multibyte_text() {
        assert_eq!(
            decode_line("data: {\"content\": \"día\"}\n".as_bytes()),
            Some("data: {\"content\": \"día\"}")
        );
    }
}
