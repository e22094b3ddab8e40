//! JSONL file writer for exchange events.
//!
//! Each [`ExchangeEvent`] becomes one JSON line carrying `type` and
//! `timestamp` next to the event payload. The file is opened in append mode
//! so restarts of the relay extend the same transcript.

use relay_application::{ExchangeEvent, ExchangeLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Exchange logger that appends one JSON object per line.
pub struct JsonlExchangeLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlExchangeLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create exchange log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open exchange log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: ExchangeEvent) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    match event.payload {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::String(event.event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        }
        other => serde_json::json!({
            "type": event.event_type,
            "timestamp": timestamp,
            "data": other,
        }),
    }
}

impl ExchangeLogger for JsonlExchangeLogger {
    fn log(&self, event: ExchangeEvent) {
        let Ok(line) = serde_json::to_string(&record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlExchangeLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
