pub mod manager;
pub mod persistence;

pub use manager::{ArtifactStore, StoreStatus, TrainingStatus};
pub use persistence::ArtifactFile;
