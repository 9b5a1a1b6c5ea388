//! JSONL file writer for exchange events.
//!
//! Each [`ExchangeEvent`] becomes a single JSON line:
//!
//! ```json
//! {"type":"chat_exchange","timestamp":"2025-01-01T00:00:00.000Z","kind":"generated","outcome":"success","latency_ms":812,"message_chars":24}
//! ```
//!
//! The file is opened in append mode so restarts keep earlier records.

use finchat_application::{ExchangeEvent, ExchangeLogger};
use finchat_domain::ReplyKind;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const EVENT_TYPE: &str = "chat_exchange";

/// On-disk shape of one exchange
#[derive(Serialize)]
struct ExchangeRecord {
    #[serde(rename = "type")]
    event_type: &'static str,
    timestamp: String,
    kind: Option<ReplyKind>,
    outcome: &'static str,
    latency_ms: u64,
    message_chars: usize,
}

impl From<ExchangeEvent> for ExchangeRecord {
    fn from(event: ExchangeEvent) -> Self {
        Self {
            event_type: EVENT_TYPE,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            kind: event.reply_kind,
            outcome: event.outcome,
            latency_ms: u64::try_from(event.latency.as_millis()).unwrap_or(u64::MAX),
            message_chars: event.message_chars,
        }
    }
}

/// Exchange logger writing one JSON object per line.
///
/// Shared across request tasks behind a `Mutex<BufWriter<File>>`; every
/// record is flushed as it is written.
pub struct JsonlExchangeLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlExchangeLogger {
    /// Open (or create) the log file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExchangeLogger for JsonlExchangeLogger {
    fn log(&self, event: ExchangeEvent) {
        let Ok(line) = serde_json::to_string(&ExchangeRecord::from(event)) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write exchange log {}: {}", self.path.display(), e);
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
