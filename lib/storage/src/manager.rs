use crate::persistence::ArtifactFile;
use lexiq_core::{Error, Result, TrainingArtifact};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Snapshot of the durable slot, for the check-training endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatus {
    pub is_training_available: bool,
    pub record_count: usize,
    pub field_count: usize,
}

/// Informational snapshot of the store, for the status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub trained: bool,
    pub record_count: usize,
    pub field_count: usize,
    pub trained_file: bool,
    pub active_sessions: usize,
}

/// Holds trained artifacts: a session-scoped in-memory table plus one
/// durable on-disk slot.
///
/// Artifacts are immutable `Arc`s behind a single `RwLock`, so a concurrent
/// reader sees either the fully-old or the fully-new artifact, never a
/// partial one. The durable slot is last-write-wins.
pub struct ArtifactStore {
    sessions: RwLock<HashMap<String, Arc<TrainingArtifact>>>,
    artifact_file: ArtifactFile,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Ok(Self {
            sessions: RwLock::new(HashMap::new()),
            artifact_file: ArtifactFile::new(data_dir)?,
        })
    }

    /// Register a freshly trained artifact under `session_id` (generating an
    /// id when none is given) and persist it to the durable slot. Returns the
    /// session id in use.
    pub fn store(&self, session_id: Option<String>, artifact: TrainingArtifact) -> Result<String> {
        let session_id = session_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.artifact_file.save(&artifact)?;
        self.sessions
            .write()
            .insert(session_id.clone(), Arc::new(artifact));

        info!(session_id = session_id.as_str(), "artifact stored");
        Ok(session_id)
    }

    /// Resolve the artifact a query should run against: the session artifact
    /// when present, else the persisted one, else [`Error::NotTrained`].
    pub fn resolve(&self, session_id: Option<&str>) -> Result<Arc<TrainingArtifact>> {
        if let Some(id) = session_id {
            if let Some(artifact) = self.sessions.read().get(id) {
                return Ok(artifact.clone());
            }
        }

        match self.artifact_file.load()? {
            Some(artifact) => Ok(Arc::new(artifact)),
            None => Err(Error::NotTrained),
        }
    }

    /// Report whether the durable slot holds a loadable artifact. Never
    /// fails; an unreadable slot degrades to "not available".
    pub fn check_training(&self) -> TrainingStatus {
        match self.artifact_file.load() {
            Ok(Some(artifact)) => TrainingStatus {
                is_training_available: true,
                record_count: artifact.record_count(),
                field_count: artifact.field_count(),
            },
            _ => TrainingStatus {
                is_training_available: false,
                record_count: 0,
                field_count: 0,
            },
        }
    }

    /// Informational snapshot: counts come from the session artifact when one
    /// is present, the durable-slot flag is reported separately.
    pub fn status(&self, session_id: Option<&str>) -> StoreStatus {
        let sessions = self.sessions.read();
        let session_artifact = session_id.and_then(|id| sessions.get(id));
        let trained_file = self.artifact_file.exists();

        StoreStatus {
            trained: session_artifact.is_some() || trained_file,
            record_count: session_artifact.map_or(0, |a| a.record_count()),
            field_count: session_artifact.map_or(0, |a| a.field_count()),
            trained_file,
            active_sessions: sessions.len(),
        }
    }

    #[inline]
    #[must_use]
    pub fn artifact_path(&self) -> &Path {
        self.artifact_file.path()
    }
}
