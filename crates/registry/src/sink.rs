//! Event sink framework for registry notifications.
//!
//! The registry writes one [`RegistryEvent`] per applied mutation to an
//! injected sink, keeping notification delivery decoupled from the
//! state-mutation logic itself.
//!
//! # Architecture
//!
//! - [`EventSink`] trait defines the interface for pluggable backends
//! - [`NullEventSink`] is a no-op for when notifications are unused
//! - [`MemoryEventSink`] buffers events for tests and for collaborators
//!   that republish them to their own ledger or bus
//! - [`FileEventSink`] writes JSON Lines to disk with durable writes and
//!   log rotation
//!
//! # Log Rotation
//!
//! When the active log exceeds the configured size limit, it is rotated:
//! `events.jsonl` → `events.jsonl.1` → `events.jsonl.2` → ... → deleted.
//! Rotation is atomic (rename) and protected by a mutex.

use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use comptrack_types::{EventLogConfig, RegistryEvent};
use parking_lot::Mutex;
use snafu::{ResultExt, Snafu};

/// Event sink trait for pluggable notification backends.
///
/// Implementations must be `Send + Sync`; the registry emits from within
/// its mutation critical section so that sink ordering matches mutation
/// ordering.
pub trait EventSink: Send + Sync {
    /// Delivers one event to the sink.
    ///
    /// Returns an error if the event cannot be delivered. Sink failures
    /// never roll back the mutation that produced the event.
    fn emit(&self, event: &RegistryEvent) -> Result<(), SinkError>;
}

/// No-op event sink for when notifications are disabled.
///
/// Returns `Ok(())` immediately with zero overhead.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: &RegistryEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// In-memory event sink buffering events in arrival order.
///
/// Intended for tests and for embedding collaborators that forward
/// notifications to an external ledger or bus on their own schedule.
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RegistryEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all buffered events in arrival order.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns all buffered events in arrival order.
    pub fn drain(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: &RegistryEvent) -> Result<(), SinkError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// File-based event sink with durable writes and log rotation.
///
/// Writes events as JSON Lines (one JSON object per line) to disk. Each
/// write is followed by `sync_data()` so the event reaches stable storage
/// before the mutation response is returned.
///
/// # Thread Safety
///
/// The sink is protected by a mutex. Writes and rotations are serialized
/// to prevent interleaved lines and ensure sequential event ordering.
pub struct FileEventSink {
    inner: Mutex<FileEventSinkInner>,
    config: EventLogConfig,
}

struct FileEventSinkInner {
    file: File,
    bytes_written: u64,
}

impl FileEventSink {
    /// Creates a new file-based event sink.
    ///
    /// Opens (or creates) the log file at the configured path. If the file
    /// already exists, new events are appended. The current file size is
    /// tracked for rotation decisions.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the file cannot be opened or created.
    pub fn new(config: EventLogConfig) -> Result<Self, SinkError> {
        let path = Path::new(&config.path);

        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context(IoSnafu { path: config.path.clone() })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(IoSnafu { path: config.path.clone() })?;

        let bytes_written = file.metadata().context(IoSnafu { path: config.path.clone() })?.len();

        Ok(Self { inner: Mutex::new(FileEventSinkInner { file, bytes_written }), config })
    }

    /// Rotates log files when the active file exceeds the size limit.
    ///
    /// Rotation scheme: `events.jsonl` → `events.jsonl.1` → `events.jsonl.2`
    /// → ... Files beyond `max_rotated_files` are deleted.
    fn rotate(&self, inner: &mut FileEventSinkInner) -> Result<(), SinkError> {
        let path = PathBuf::from(&self.config.path);

        // Delete the oldest file if it exceeds max_rotated_files
        let oldest = format!("{}.{}", self.config.path, self.config.max_rotated_files);
        let _ = fs::remove_file(&oldest);

        // Shift existing rotated files: .N → .N+1
        for i in (1..self.config.max_rotated_files).rev() {
            let from = format!("{}.{}", self.config.path, i);
            let to = format!("{}.{}", self.config.path, i + 1);
            if Path::new(&from).exists() {
                fs::rename(&from, &to).context(IoSnafu { path: from })?;
            }
        }

        // Rotate current file to .1
        let rotated = format!("{}.1", self.config.path);
        fs::rename(&path, &rotated).context(IoSnafu { path: self.config.path.clone() })?;

        // Open new file
        inner.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context(IoSnafu { path: self.config.path.clone() })?;
        inner.bytes_written = 0;

        Ok(())
    }

    /// Returns the current file size in bytes (for testing).
    pub fn bytes_written(&self) -> u64 {
        self.inner.lock().bytes_written
    }
}

impl EventSink for FileEventSink {
    fn emit(&self, event: &RegistryEvent) -> Result<(), SinkError> {
        let mut line =
            serde_json::to_vec(event).context(SerializationSnafu { event_id: &event.event_id })?;
        line.push(b'\n');

        let mut inner = self.inner.lock();

        // Check if rotation is needed before writing
        if inner.bytes_written + line.len() as u64 > self.config.max_file_size_bytes {
            self.rotate(&mut inner)?;
        }

        inner.file.write_all(&line).context(IoSnafu { path: &self.config.path })?;
        inner.file.sync_data().context(IoSnafu { path: &self.config.path })?;
        inner.bytes_written += line.len() as u64;

        Ok(())
    }
}

/// Creates an event sink based on configuration.
///
/// Returns a [`FileEventSink`] if config is `Some`, or a [`NullEventSink`]
/// if `None`.
pub fn create_event_sink(config: Option<EventLogConfig>) -> Result<Arc<dyn EventSink>, SinkError> {
    match config {
        Some(config) => Ok(Arc::new(FileEventSink::new(config)?)),
        None => Ok(Arc::new(NullEventSink)),
    }
}

/// Event sink error.
#[derive(Debug, Snafu)]
pub enum SinkError {
    /// I/O error during event log write or rotation.
    #[snafu(display("event log I/O error for {path}: {source}"))]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Serialization error when encoding an event.
    #[snafu(display("failed to serialize event {event_id}: {source}"))]
    Serialization {
        /// Event ID that failed to serialize.
        event_id: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}
