// ============================================================
// Layer 2 — Application Facade
// ============================================================
// Owns the three user-facing operations the presentation layer
// consumes:
//
//   predict(text)                       → (category, meaning?)
//   add_record(text, category, meaning) → append + full retrain
//   list_categories()                   → current Category Set
//
// Startup mirrors the original application: when a usable
// checkpoint exists it is loaded immediately; otherwise training
// is kicked off on ONE background thread while the caller stays
// responsive, and the readiness gate holds predictions back until
// the model is installed. A checkpoint whose stored label space
// no longer matches the dataset counts as unusable and triggers
// the same background retrain.
//
// add_record retrains synchronously in the foreground: the call
// blocks for the full training duration. Single-user scale
// accepts that. No cancellation exists; training runs to
// completion.

use std::sync::{Arc, Mutex};
use std::thread;

use crate::application::model_state::{ModelGate, ModelPhase};
use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::data::{encoder::TextEncoder, store::DatasetStore};
use crate::domain::error::{Error, Result};
use crate::domain::record::Record;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::predictor::Predictor;
use crate::ml::similarity::nearest_meaning;

/// The combined answer for one input text.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Category assigned by the classifier.
    pub category: String,
    /// Meaning of the lexically closest record, when any record
    /// scored above zero. `None` renders as "no meaning found".
    pub meaning: Option<String>,
}

pub struct App {
    config:    TrainConfig,
    store:     DatasetStore,
    ckpt:      CheckpointManager,
    gate:      ModelGate,
    predictor: Mutex<Option<Predictor>>,
}

impl App {
    /// Build the application without touching the model. Enough for
    /// operations that only read or write the dataset.
    pub fn open(config: TrainConfig) -> Arc<Self> {
        let store = DatasetStore::new(&config.dataset_path);
        let ckpt  = CheckpointManager::new(&config.checkpoint_dir);

        Arc::new(Self {
            config,
            store,
            ckpt,
            gate:      ModelGate::new(),
            predictor: Mutex::new(None),
        })
    }

    /// Build the application and make the model available: load the
    /// checkpoint when it is present and still matches the dataset's
    /// Category Set, otherwise start a background training run.
    pub fn start(config: TrainConfig) -> Arc<Self> {
        let app = Self::open(config);

        if app.ckpt.has_checkpoint() {
            match app.install_predictor() {
                Ok(()) => app.gate.set(ModelPhase::Ready),
                Err(e) => {
                    tracing::warn!("checkpoint unusable ({e}); retraining in the background");
                    Self::spawn_training(&app);
                }
            }
        } else {
            tracing::info!("no checkpoint found; training in the background");
            Self::spawn_training(&app);
        }

        app
    }

    /// Classify `text` and look up the nearest recorded meaning.
    ///
    /// Blocks until the model is Ready; empty input is rejected
    /// before any model work.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("enter a proverb to classify"));
        }

        self.gate.wait_ready()?;

        let guard = self.predictor.lock().expect("predictor lock poisoned");
        let predictor = guard
            .as_ref()
            .ok_or_else(|| Error::model("model gate is ready but no predictor is installed"))?;
        let category = predictor.predict_category(text)?;
        drop(guard);

        let records = self.store.load()?;
        let meaning = nearest_meaning(text, &records).map(String::from);

        Ok(Prediction { category, meaning })
    }

    /// Append a fully labelled record and retrain on the spot.
    ///
    /// All three fields are required. The retrain happens in the
    /// foreground and blocks until the new checkpoint is installed;
    /// if a background startup training is still running it is
    /// waited out first, so at most one training run ever exists.
    pub fn add_record(&self, text: &str, category: &str, meaning: &str) -> Result<()> {
        let (text, category, meaning) = (text.trim(), category.trim(), meaning.trim());
        if text.is_empty() || category.is_empty() || meaning.is_empty() {
            return Err(Error::validation(
                "text, category and meaning are all required to add a record",
            ));
        }

        if self.gate.phase() == ModelPhase::Training {
            // Result deliberately ignored: a failed startup training
            // does not block the append, the retrain below supersedes it
            let _ = self.gate.wait_ready();
        }

        self.store.append(Record::labeled(text, category, meaning))?;
        self.retrain()
    }

    /// The dataset's current Category Set.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        self.store.categories()
    }

    /// Run a full training pass in the calling thread and install the
    /// resulting predictor. Leaves the gate Failed on error.
    pub fn retrain(&self) -> Result<()> {
        self.gate.set(ModelPhase::Training);
        match self.train_and_install() {
            Ok(()) => {
                self.gate.set(ModelPhase::Ready);
                Ok(())
            }
            Err(e) => {
                self.gate.set(ModelPhase::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn spawn_training(app: &Arc<Self>) {
        app.gate.set(ModelPhase::Training);
        let app = Arc::clone(app);
        thread::spawn(move || match app.train_and_install() {
            Ok(()) => {
                app.gate.set(ModelPhase::Ready);
                tracing::info!("background training finished, model ready");
            }
            Err(e) => {
                tracing::error!("background training failed: {e}");
                app.gate.set(ModelPhase::Failed(e.to_string()));
            }
        });
    }

    fn train_and_install(&self) -> Result<()> {
        TrainUseCase::new(self.config.clone()).execute()?;
        self.install_predictor()
    }

    /// Load the checkpoint into a fresh predictor, verifying its label
    /// space against the dataset's current categories.
    fn install_predictor(&self) -> Result<()> {
        let categories = self.store.categories()?;
        let tokenizer  = TokenizerStore::new(&self.config.checkpoint_dir).load()?;
        let encoder    = TextEncoder::new(tokenizer, self.config.max_seq_len);
        let predictor  = Predictor::from_checkpoint(&self.ckpt, encoder, &categories)?;

        *self.predictor.lock().expect("predictor lock poisoned") = Some(predictor);
        Ok(())
    }
}
