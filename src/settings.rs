use crate::error::{Result, VodnavError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Key the selected category index is persisted under
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Persistent key/value settings shared with the rest of the application.
///
/// Writes are fire-and-forget: implementations log failures instead of
/// returning them, so navigation never aborts on a persistence problem.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    fn set_config_value(&self, key: &str, value: i64);

    fn config_value(&self, key: &str) -> Option<i64>;

    /// Wait until every earlier write has been handed to storage
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, i64>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    fn set_config_value(&self, key: &str, value: i64) {
        self.values.lock().insert(key.to_string(), value);
    }

    fn config_value(&self, key: &str) -> Option<i64> {
        self.values.lock().get(key).copied()
    }
}

enum WriteRequest {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// Flat TOML table. Every change is serialized in the caller and written by
/// a background task, so the event loop never blocks on the disk.
pub struct TomlSettingsStore {
    path: PathBuf,
    table: Mutex<toml::Table>,
    writer: mpsc::UnboundedSender<WriteRequest>,
}

impl TomlSettingsStore {
    /// Open the store at `path` and start its writer task. A missing file
    /// starts an empty table; an unparsable one is an error so it is not
    /// silently overwritten.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let table = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents.parse::<toml::Table>()?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, starting empty", path.display());
                toml::Table::new()
            }
            Err(e) => {
                return Err(VodnavError::component(
                    "settings",
                    format!("Failed to read {}: {}", path.display(), e),
                ))
            }
        };

        let (writer, requests) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(path.clone(), requests));

        Ok(Self {
            path,
            table: Mutex::new(table),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer_stopped(&self) -> VodnavError {
        VodnavError::component(
            "settings",
            format!("Writer for {} has stopped", self.path.display()),
        )
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    fn set_config_value(&self, key: &str, value: i64) {
        let mut table = self.table.lock();
        table.insert(key.to_string(), toml::Value::Integer(value));

        // Queued under the lock so writes land in the order they were made.
        let queued = toml::to_string(&*table)
            .map_err(VodnavError::from)
            .and_then(|contents| {
                self.writer
                    .send(WriteRequest::Write(contents))
                    .map_err(|_| self.writer_stopped())
            });

        match queued {
            Ok(()) => debug!("Queued {} = {} for {}", key, value, self.path.display()),
            Err(e) => warn!("Failed to persist {}: {}", key, e),
        }
    }

    fn config_value(&self, key: &str) -> Option<i64> {
        self.table.lock().get(key).and_then(|v| v.as_integer())
    }

    async fn flush(&self) -> Result<()> {
        let (done, flushed) = oneshot::channel();
        self.writer
            .send(WriteRequest::Flush(done))
            .map_err(|_| self.writer_stopped())?;
        flushed.await.map_err(|_| self.writer_stopped())
    }
}

async fn run_writer(path: PathBuf, mut requests: mpsc::UnboundedReceiver<WriteRequest>) {
    while let Some(request) = requests.recv().await {
        match request {
            WriteRequest::Write(contents) => {
                if let Err(e) = write_settings(&path, &contents).await {
                    warn!("Failed to write settings to {}: {}", path.display(), e);
                }
            }
            WriteRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Settings writer for {} exited", path.display());
}

async fn write_settings(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}
