//! Debounced persistence of the editor state
//!
//! The coordinator watches the editor revision. Each change restarts a fixed
//! delay; when it elapses and the document is dirty the committed snapshot is
//! handed to the persistence collaborator, then marked saved. A failed save
//! keeps the document dirty and schedules another attempt.
//!
//! Time is passed in by the caller so the coordinator can be driven from a
//! tokio timer or stepped by hand.

use crate::constants::AUTOSAVE_DELAY;
use crate::document::{BookEditor, Snapshot};
use crate::types::*;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Where snapshots go when they are saved
pub trait Persistence {
    fn persist(&self, snapshot: &Snapshot) -> impl Future<Output = Result<()>> + Send;
}

/// Writes each snapshot as pretty JSON, replacing the file atomically
#[cfg(feature = "serde")]
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: std::path::PathBuf,
}

#[cfg(feature = "serde")]
impl JsonFilePersistence {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read back the last saved snapshot, if the file exists
    pub async fn load(&self) -> Result<Option<Snapshot>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Snapshot::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl Persistence for JsonFilePersistence {
    async fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let snapshot = snapshot.clone();
        let json = tokio::task::spawn_blocking(move || snapshot.to_json()).await??;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("Wrote snapshot to {}", self.path.display());
        Ok(())
    }
}

/// Keeps saved snapshots in memory. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    saved: Arc<Mutex<Vec<Snapshot>>>,
    failures: Arc<AtomicUsize>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` saves fail
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    pub fn saved(&self) -> Vec<Snapshot> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().map(|saved| saved.len()).unwrap_or(0)
    }

    pub fn last_saved(&self) -> Option<Snapshot> {
        self.saved
            .lock()
            .ok()
            .and_then(|saved| saved.last().cloned())
    }
}

impl Persistence for MemoryPersistence {
    async fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(LayoutError::Persistence("injected failure".to_string()));
        }
        self.saved
            .lock()
            .map_err(|e| LayoutError::Persistence(format!("storage lock poisoned: {}", e)))?
            .push(snapshot.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Nothing to write; the persistence collaborator was not called
    AlreadyClean,
}

#[derive(Debug)]
pub struct AutosaveCoordinator<P> {
    persistence: P,
    delay: Duration,
    deadline: Option<Instant>,
    seen_revision: u64,
    last_error: Option<String>,
}

impl<P: Persistence> AutosaveCoordinator<P> {
    pub fn new(persistence: P) -> Self {
        Self::with_delay(persistence, AUTOSAVE_DELAY)
    }

    pub fn with_delay(persistence: P, delay: Duration) -> Self {
        Self {
            persistence,
            delay,
            deadline: None,
            seen_revision: 0,
            last_error: None,
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// When the pending autosave fires, if one is scheduled
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn status(&self, editor: &BookEditor) -> SaveStatus {
        if editor.is_dirty() {
            SaveStatus::Dirty
        } else {
            SaveStatus::Clean
        }
    }

    /// Restart the timer if the editor changed since the last call.
    /// Returns whether a change was seen.
    pub fn observe(&mut self, editor: &BookEditor, now: Instant) -> bool {
        if editor.revision() == self.seen_revision {
            return false;
        }
        self.seen_revision = editor.revision();
        self.deadline = Some(now + self.delay);
        true
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Save if the deadline has passed. `None` when nothing was due.
    pub async fn tick(&mut self, editor: &mut BookEditor, now: Instant) -> Option<Result<SaveOutcome>> {
        self.observe(editor, now);
        if !self.is_due(now) {
            return None;
        }
        Some(self.save_now(editor, now).await)
    }

    /// Save immediately and cancel the pending timer.
    ///
    /// On failure the document stays dirty and a retry is scheduled one
    /// delay from `now`.
    pub async fn save_now(&mut self, editor: &mut BookEditor, now: Instant) -> Result<SaveOutcome> {
        self.seen_revision = editor.revision();
        self.deadline = None;
        if !editor.is_dirty() {
            return Ok(SaveOutcome::AlreadyClean);
        }

        match self.persistence.persist(editor.committed_snapshot()).await {
            Ok(()) => {
                editor.commit();
                self.last_error = None;
                log::info!("Saved revision {}", editor.revision());
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                log::warn!("Save failed, will retry: {}", e);
                self.last_error = Some(e.to_string());
                self.deadline = Some(now + self.delay);
                Err(e)
            }
        }
    }
}
