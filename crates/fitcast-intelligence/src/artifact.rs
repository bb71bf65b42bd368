// ABOUTME: Trained model artifact, its JSON file store, and the single-flight model provider
// ABOUTME: Absent or corrupt artifacts are retrained synchronously and persisted atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ModelError;
use crate::features::FeatureRecord;
use crate::forest::RandomForestRegressor;
use crate::preprocessing::FeaturePreprocessor;
use crate::synthetic::{CohortGenerator, SyntheticDataGenerator};
use crate::trainer::ModelTrainer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, TryLockError};
use tracing::{info, warn};

/// Version written into every artifact; other versions load as corrupt
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Raw outputs of both regressors for one feature record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    /// Predicted weekly weight change (kg/week)
    pub weekly_weight_change: f64,
    /// Predicted fitness score, unclamped
    pub fitness_score: f64,
}

/// Both fitted regressors sharing one fitted preprocessing transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModelArtifact {
    /// Artifact layout version
    pub format_version: u32,
    /// When training finished
    pub created_at: DateTime<Utc>,
    /// Rows in the training table
    pub n_training_samples: usize,
    /// Shared scaler and encoder
    pub preprocessor: FeaturePreprocessor,
    /// Weekly weight change regressor
    pub weight_change_model: RandomForestRegressor,
    /// Fitness score regressor
    pub fitness_score_model: RandomForestRegressor,
}

impl TrainedModelArtifact {
    /// Run both regressors on one record
    ///
    /// # Errors
    ///
    /// Returns an error if a regressor is unfitted or was fitted on a different width
    pub fn predict(&self, record: &FeatureRecord) -> Result<RawPrediction, ModelError> {
        let encoded = self.preprocessor.transform(record);
        Ok(RawPrediction {
            weekly_weight_change: self.weight_change_model.predict_row(&encoded)?,
            fitness_score: self.fitness_score_model.predict_row(&encoded)?,
        })
    }

    /// Whether the version matches and both forests fit the preprocessor's output
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let width = self.preprocessor.output_width();
        self.format_version == ARTIFACT_FORMAT_VERSION
            && self.weight_change_model.is_well_formed()
            && self.fitness_score_model.is_well_formed()
            && self.weight_change_model.n_features() == width
            && self.fitness_score_model.n_features() == width
    }
}

/// Outcome of reading the artifact file
#[derive(Debug, Clone)]
pub enum ArtifactStatus {
    /// No file at the configured path
    Absent,
    /// A file exists but cannot be used; carries the reason
    Corrupt(String),
    /// A usable artifact
    Loaded(Arc<TrainedModelArtifact>),
}

impl ArtifactStatus {
    /// Short label for logs and status output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Corrupt(_) => "corrupt",
            Self::Loaded(_) => "loaded",
        }
    }
}

/// JSON file holding one [`TrainedModelArtifact`]
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    /// Store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Artifact location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the artifact
    #[must_use]
    pub fn load(&self) -> ArtifactStatus {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return ArtifactStatus::Absent,
            Err(e) => return ArtifactStatus::Corrupt(format!("cannot open artifact: {e}")),
        };

        match serde_json::from_reader::<_, TrainedModelArtifact>(BufReader::new(file)) {
            Ok(artifact) if artifact.format_version != ARTIFACT_FORMAT_VERSION => {
                ArtifactStatus::Corrupt(format!(
                    "unsupported format version {} (expected {ARTIFACT_FORMAT_VERSION})",
                    artifact.format_version
                ))
            }
            Ok(artifact) if !artifact.is_consistent() => ArtifactStatus::Corrupt(
                "model structure does not match its preprocessor".to_owned(),
            ),
            Ok(artifact) => ArtifactStatus::Loaded(Arc::new(artifact)),
            Err(e) => ArtifactStatus::Corrupt(format!("invalid artifact JSON: {e}")),
        }
    }

    /// Persist the artifact, replacing any previous file atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the artifact cannot be encoded
    pub fn save(&self, artifact: &TrainedModelArtifact) -> Result<(), ModelError> {
        let io_error = |source| ModelError::ArtifactIo {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        let file = File::create(&staging).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, artifact)?;
        writer.flush().map_err(io_error)?;
        drop(writer);

        fs::rename(&staging, &self.path).map_err(io_error)
    }
}

/// Owner of the shared artifact
///
/// Cold-start training happens under a single lock, so concurrent first
/// requests train at most once and then share the same `Arc`.
pub struct ModelProvider {
    store: ArtifactStore,
    trainer: ModelTrainer,
    generator: Box<dyn SyntheticDataGenerator>,
    current: Mutex<Option<Arc<TrainedModelArtifact>>>,
}

impl ModelProvider {
    /// Provider training with the default synthetic cohort
    #[must_use]
    pub fn new(store: ArtifactStore, trainer: ModelTrainer) -> Self {
        let generator = CohortGenerator::new(
            crate::synthetic::RuleBasedLabels,
            trainer.config().synthetic_seed,
        );
        Self::with_generator(store, trainer, Box::new(generator))
    }

    /// Provider training with a custom generator
    #[must_use]
    pub fn with_generator(
        store: ArtifactStore,
        trainer: ModelTrainer,
        generator: Box<dyn SyntheticDataGenerator>,
    ) -> Self {
        Self {
            store,
            trainer,
            generator,
            current: Mutex::new(None),
        }
    }

    /// The backing store
    #[must_use]
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Return the artifact, loading it or training it on first use
    ///
    /// # Errors
    ///
    /// Returns an error if training or persisting a replacement fails
    pub fn artifact(&self) -> Result<Arc<TrainedModelArtifact>, ModelError> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| ModelError::ProviderPoisoned)?;
        if let Some(artifact) = current.as_ref() {
            return Ok(Arc::clone(artifact));
        }

        let artifact = match self.store.load() {
            ArtifactStatus::Loaded(artifact) => {
                info!(
                    path = %self.store.path().display(),
                    trained_at = %artifact.created_at,
                    "Using existing fitness model"
                );
                artifact
            }
            ArtifactStatus::Absent => {
                info!(path = %self.store.path().display(), "Training fitness model...");
                self.train_and_persist()?
            }
            ArtifactStatus::Corrupt(reason) => {
                warn!(
                    path = %self.store.path().display(),
                    reason = %reason,
                    "Fitness model artifact is unusable, retraining"
                );
                self.train_and_persist()?
            }
        };

        *current = Some(Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Train a fresh artifact, persist it, and make it current
    ///
    /// # Errors
    ///
    /// Returns an error if training or persisting fails
    pub fn retrain(&self) -> Result<Arc<TrainedModelArtifact>, ModelError> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| ModelError::ProviderPoisoned)?;
        let artifact = self.train_and_persist()?;
        *current = Some(Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Whether an artifact is available without training
    ///
    /// Returns `false` while a training run holds the lock.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self.current.try_lock() {
            Ok(mut current) => {
                if current.is_some() {
                    return true;
                }
                if let ArtifactStatus::Loaded(artifact) = self.store.load() {
                    *current = Some(artifact);
                    return true;
                }
                false
            }
            Err(TryLockError::WouldBlock | TryLockError::Poisoned(_)) => false,
        }
    }

    fn train_and_persist(&self) -> Result<Arc<TrainedModelArtifact>, ModelError> {
        let artifact = self.trainer.train_from(self.generator.as_ref())?;
        self.store.save(&artifact)?;
        info!(
            path = %self.store.path().display(),
            samples = artifact.n_training_samples,
            "Persisted fitness model"
        );
        Ok(Arc::new(artifact))
    }
}

impl std::fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelProvider")
            .field("store", &self.store)
            .field("trainer", &self.trainer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::synthetic::{RuleBasedLabels, TrainingTable};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn small_trainer() -> ModelTrainer {
        ModelTrainer::new(ModelConfig {
            training_samples: 80,
            n_estimators: 4,
            synthetic_seed: Some(13),
            ..ModelConfig::default()
        })
    }

    struct CountingGenerator {
        calls: Arc<AtomicUsize>,
    }

    impl SyntheticDataGenerator for CountingGenerator {
        fn generate(&self, n: usize) -> TrainingTable {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CohortGenerator::new(RuleBasedLabels, Some(5)).generate(n)
        }
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("model.json"));
        assert!(matches!(store.load(), ArtifactStatus::Absent));
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"not json").unwrap();

        let status = ArtifactStore::new(&path).load();
        assert_eq!(status.label(), "corrupt");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("nested").join("model.json"));
        let artifact = small_trainer()
            .train_from(&CohortGenerator::new(RuleBasedLabels, Some(1)))
            .unwrap();

        store.save(&artifact).unwrap();
        match store.load() {
            ArtifactStatus::Loaded(loaded) => assert_eq!(*loaded, artifact),
            other => panic!("expected loaded artifact, got {}", other.label()),
        }
        assert!(!dir.path().join("nested").join("model.json.tmp").exists());
    }

    #[test]
    fn test_provider_trains_once_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(ModelProvider::with_generator(
            ArtifactStore::new(dir.path().join("model.json")),
            small_trainer(),
            Box::new(CountingGenerator {
                calls: Arc::clone(&calls),
            }),
        ));
        assert!(!provider.is_ready());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || provider.artifact().unwrap())
            })
            .collect();
        let artifacts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(artifacts.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert!(provider.is_ready());
        assert!(matches!(provider.store().load(), ArtifactStatus::Loaded(_)));
    }

    #[test]
    fn test_provider_replaces_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"{\"format_version\": 1}").unwrap();

        let provider = ModelProvider::new(ArtifactStore::new(&path), small_trainer());
        provider.artifact().unwrap();

        assert!(matches!(
            ArtifactStore::new(&path).load(),
            ArtifactStatus::Loaded(_)
        ));
    }

    #[test]
    fn test_provider_reuses_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("model.json"));
        let artifact = small_trainer()
            .train_from(&CohortGenerator::new(RuleBasedLabels, Some(1)))
            .unwrap();
        store.save(&artifact).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ModelProvider::with_generator(
            store,
            small_trainer(),
            Box::new(CountingGenerator {
                calls: Arc::clone(&calls),
            }),
        );

        assert!(provider.is_ready());
        assert_eq!(*provider.artifact().unwrap(), artifact);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
