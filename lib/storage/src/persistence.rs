use lexiq_core::{Error, Result, TrainingArtifact};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the durable artifact slot inside the data directory.
const ARTIFACT_FILE: &str = "trained_vectors.json";

/// Durable single-slot persistence for a [`TrainingArtifact`].
///
/// Every save overwrites the slot wholesale - no versioning, no merge,
/// last write wins. Writes go through a temp file and an atomic rename so a
/// reader never observes a partially written artifact.
pub struct ArtifactFile {
    path: PathBuf,
}

impl ArtifactFile {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(ARTIFACT_FILE),
        })
    }

    /// Serialize the artifact to the slot, replacing whatever was there.
    pub fn save(&self, artifact: &TrainingArtifact) -> Result<()> {
        let data = serde_json::to_vec(artifact)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), bytes = data.len(), "artifact persisted");
        Ok(())
    }

    /// Load the persisted artifact, or `None` when the slot is empty.
    pub fn load(&self) -> Result<Option<TrainingArtifact>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let artifact = serde_json::from_slice(&data)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Some(artifact))
    }

    #[inline]
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexiq_core::{flatten, search};

    fn sample_artifact() -> TrainingArtifact {
        let document = serde_json::json!([
            {"ad": "Ali", "yaş": "30"},
            {"ad": "Veli", "yaş": "25"}
        ]);
        TrainingArtifact::build(flatten(&document)).unwrap()
    }

    #[test]
    fn test_load_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let file = ArtifactFile::new(dir.path()).unwrap();
        assert!(!file.exists());
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = ArtifactFile::new(dir.path()).unwrap();

        let artifact = sample_artifact();
        file.save(&artifact).unwrap();
        assert!(file.exists());

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, artifact);

        // Reloaded artifacts answer queries identically.
        let before = search(&artifact, "yaş 30");
        let after = search(&loaded, "yaş 30");
        assert_eq!(before.interpretation, after.interpretation);
        assert_eq!(before.results, after.results);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let file = ArtifactFile::new(dir.path()).unwrap();

        file.save(&sample_artifact()).unwrap();

        let replacement =
            TrainingArtifact::build(flatten(&serde_json::json!([{"kod": "7"}]))).unwrap();
        file.save(&replacement).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.record_count(), 1);
        assert!(loaded.fields.contains_key("kod"));
        assert!(!loaded.fields.contains_key("ad"));
    }
}
