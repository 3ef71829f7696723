// ============================================================
// Layer 2 — Model Readiness Gate
// ============================================================
// The classifier is shared between the foreground (prediction
// requests) and at most one background training task. This gate
// makes the lifecycle an explicit state machine
//
//   Uninitialized → Training → Ready
//                        └───→ Failed
//
// guarded by a Mutex + Condvar: a prediction requested while the
// parameters are mid-update blocks until the model is Ready, and
// a training run that errors moves the gate to Failed so waiters
// are released with an error instead of hanging forever.

use std::sync::{Condvar, Mutex};

use crate::domain::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPhase {
    /// No model has been loaded or trained yet.
    Uninitialized,
    /// A training run is updating the parameters.
    Training,
    /// A trained model is installed and safe to serve.
    Ready,
    /// The last training run aborted; the message says why.
    Failed(String),
}

pub struct ModelGate {
    phase:   Mutex<ModelPhase>,
    changed: Condvar,
}

impl ModelGate {
    pub fn new() -> Self {
        Self {
            phase:   Mutex::new(ModelPhase::Uninitialized),
            changed: Condvar::new(),
        }
    }

    /// Move to a new phase and wake every waiter.
    pub fn set(&self, phase: ModelPhase) {
        let mut guard = self.phase.lock().expect("model gate lock poisoned");
        *guard = phase;
        self.changed.notify_all();
    }

    pub fn phase(&self) -> ModelPhase {
        self.phase.lock().expect("model gate lock poisoned").clone()
    }

    /// Block until the model is Ready.
    ///
    /// Returns a `Model` error if the gate reaches Failed instead.
    pub fn wait_ready(&self) -> Result<()> {
        let mut guard = self.phase.lock().expect("model gate lock poisoned");
        loop {
            match &*guard {
                ModelPhase::Ready => return Ok(()),
                ModelPhase::Failed(msg) => {
                    return Err(Error::model(format!("model unavailable: {msg}")));
                }
                ModelPhase::Uninitialized | ModelPhase::Training => {
                    guard = self
                        .changed
                        .wait(guard)
                        .expect("model gate lock poisoned");
                }
            }
        }
    }
}

impl Default for ModelGate {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_waiter_released_on_ready() {
        let gate = Arc::new(ModelGate::new());
        gate.set(ModelPhase::Training);

        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.wait_ready())
        };

        thread::sleep(Duration::from_millis(50));
        gate.set(ModelPhase::Ready);

        assert!(waiter.join().unwrap().is_ok());
    }

    #[test]
    fn test_failed_training_surfaces_an_error() {
        let gate = Arc::new(ModelGate::new());
        gate.set(ModelPhase::Training);

        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.wait_ready())
        };

        thread::sleep(Duration::from_millis(50));
        gate.set(ModelPhase::Failed("disk full".into()));

        let err = waiter.join().unwrap().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }

    #[test]
    fn test_ready_gate_does_not_block() {
        let gate = ModelGate::new();
        gate.set(ModelPhase::Ready);
        assert!(gate.wait_ready().is_ok());
        assert_eq!(gate.phase(), ModelPhase::Ready);
    }
}
