//! Runs generations against the studio state.

use crate::{Action, AppState, GenerationOutcome, StoryOrchestrator, StudioState, update};
use nithan_config::{Capabilities, NithanConfig};
use nithan_core::AudioContext;
use nithan_error::NithanResult;
use nithan_interface::StoryBackend;
use nithan_models::GeminiClient;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Cancels the studio's current generation from another task.
///
/// Cancelling marks the run's token and queues [`Action::Cancel`], so the
/// state returns to idle immediately while in-flight requests finish in the
/// background and are discarded.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    slot: Arc<Mutex<CancellationToken>>,
    actions: UnboundedSender<Action>,
}

impl CancelHandle {
    /// Requests cancellation of the current run.
    pub fn cancel(&self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
        if self.actions.send(Action::Cancel).is_err() {
            debug!("Studio dropped before cancel was delivered");
        }
    }

    /// Whether the current run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_cancelled()
    }
}

/// The studio: state, reducer and orchestrator wired together.
///
/// Form edits and navigation go through [`Studio::dispatch`]. A generation
/// started with [`Studio::generate`] feeds its progress events through the
/// same reducer, so the state is only ever changed by [`update`].
#[derive(Debug)]
pub struct Studio<B: StoryBackend> {
    orchestrator: StoryOrchestrator<B>,
    state: StudioState,
    cancel_slot: Arc<Mutex<CancellationToken>>,
    actions_tx: UnboundedSender<Action>,
    actions_rx: UnboundedReceiver<Action>,
}

impl Studio<GeminiClient> {
    /// Builds a studio on the Gemini backend.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured or the audio layout is invalid.
    pub fn from_config(caps: &Capabilities, config: &NithanConfig) -> NithanResult<Self> {
        let client = GeminiClient::from_capabilities(caps, config.gemini.clone())?;
        let audio = AudioContext::new(config.audio.sample_rate, config.audio.channels)?;
        Ok(Self::new(client, audio))
    }
}

impl<B: StoryBackend> Studio<B> {
    /// Creates a studio with an empty form and history.
    pub fn new(backend: B, audio: AudioContext) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            orchestrator: StoryOrchestrator::new(backend, audio),
            state: StudioState::new(),
            cancel_slot: Arc::new(Mutex::new(CancellationToken::new())),
            actions_tx,
            actions_rx,
        }
    }

    /// Current state.
    pub fn state(&self) -> &StudioState {
        &self.state
    }

    /// The orchestrator generations run on.
    pub fn orchestrator(&self) -> &StoryOrchestrator<B> {
        &self.orchestrator
    }

    /// A handle that cancels whichever run is current when it is used.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            slot: Arc::clone(&self.cancel_slot),
            actions: self.actions_tx.clone(),
        }
    }

    /// Applies a user action. Returns `false` if it was ignored.
    pub fn dispatch(&mut self, action: Action) -> bool {
        update(&mut self.state, action)
    }

    /// Generates a story from the current form. See [`Studio::generate_with`].
    pub async fn generate(&mut self) -> AppState {
        self.generate_with(|_| {}).await
    }

    /// Generates a story from the current form, calling `observe` after every
    /// state change.
    ///
    /// An empty prompt does nothing. Returns the state the run settled in:
    /// [`AppState::Ready`] on success, [`AppState::Error`] on failure and
    /// [`AppState::Idle`] when cancelled.
    #[instrument(name = "studio.generate", skip(self, observe), fields(provider = self.orchestrator.backend().provider_name()))]
    pub async fn generate_with<F>(&mut self, observe: F) -> AppState
    where
        F: FnMut(&StudioState),
    {
        let token = self.arm_cancellation();
        self.run_armed(token, observe).await
    }

    /// Installs a fresh token for the next run; from here on every
    /// [`CancelHandle::cancel`] lands on it.
    fn arm_cancellation(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self
            .cancel_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token.clone();
        token
    }

    async fn run_armed<F>(&mut self, token: CancellationToken, mut observe: F) -> AppState
    where
        F: FnMut(&StudioState),
    {
        // Anything queued between runs (a stray cancel) is applied first.
        while let Ok(action) = self.actions_rx.try_recv() {
            if update(&mut self.state, action) {
                observe(&self.state);
            }
        }

        let prompt = self.state.form().prompt.trim().to_string();
        if prompt.is_empty() || self.state.app_state().is_generating() {
            debug!("Nothing to generate");
            return *self.state.app_state();
        }
        let config = match self.state.form().to_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Invalid form");
                return *self.state.app_state();
            }
        };

        let mut sink = self.actions_tx.clone();
        let run = self
            .orchestrator
            .generate(&prompt, config, &token, &mut sink);
        tokio::pin!(run);

        let outcome = loop {
            tokio::select! {
                biased;
                Some(action) = self.actions_rx.recv() => {
                    if update(&mut self.state, action) {
                        observe(&self.state);
                    }
                }
                outcome = &mut run => break outcome,
            }
        };
        while let Ok(action) = self.actions_rx.try_recv() {
            if update(&mut self.state, action) {
                observe(&self.state);
            }
        }

        let last = match outcome {
            GenerationOutcome::Completed(item) => Some(Action::GenerationCompleted(item)),
            GenerationOutcome::Failed(e) => Some(Action::GenerationFailed {
                reason: e.to_string(),
            }),
            GenerationOutcome::Cancelled => Some(Action::Cancel),
            GenerationOutcome::Rejected => None,
        };
        if let Some(action) = last
            && update(&mut self.state, action)
        {
            observe(&self.state);
        }

        info!(state = %self.state.app_state(), "Generation settled");
        *self.state.app_state()
    }
}
