//! End-to-end story generation.

use crate::Action;
use crate::messages::preview;
use nithan_core::{
    AudioContext, GeneratedSceneMedia, HistoryItem, StoryConfig, StoryData, decode_audio_data,
};
use nithan_error::{NithanError, NithanResult, StoryError, StoryErrorKind};
use nithan_interface::StoryBackend;
use nithan_models::map_voice_config;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Receives progress events from a running generation.
pub trait EventSink {
    /// Delivers one event.
    fn emit(&mut self, action: Action);
}

impl EventSink for Vec<Action> {
    fn emit(&mut self, action: Action) {
        self.push(action);
    }
}

impl EventSink for UnboundedSender<Action> {
    fn emit(&mut self, action: Action) {
        // A closed channel means nobody is rendering; the run still finishes.
        if self.send(action).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

/// How a generation ended.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Every scene was generated
    Completed(HistoryItem),
    /// Cancellation was observed; nothing is kept
    Cancelled,
    /// A request, decode or validation step failed
    Failed(NithanError),
    /// The prompt was empty; nothing was started
    Rejected,
}

/// Drives one generation: script, then image and narration for each scene.
///
/// Scenes are processed strictly in order. Within a scene the image and
/// narration requests run concurrently and both must succeed.
#[derive(Debug)]
pub struct StoryOrchestrator<B: StoryBackend> {
    backend: B,
    audio: AudioContext,
}

impl<B: StoryBackend> StoryOrchestrator<B> {
    /// Creates an orchestrator decoding narration on `audio`.
    pub fn new(backend: B, audio: AudioContext) -> Self {
        Self { backend, audio }
    }

    /// The generation backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The audio context narration is decoded on.
    pub fn audio_context(&self) -> &AudioContext {
        &self.audio
    }

    /// Generates a story for `prompt`.
    ///
    /// Cancellation is polled before starting, after the script, and before
    /// and after each scene's requests. In-flight requests are not aborted;
    /// their results are dropped. A failure observed while `cancel` is set
    /// is reported as [`GenerationOutcome::Cancelled`].
    #[tracing::instrument(
        name = "story.generate",
        skip(self, prompt, config, cancel, events),
        fields(provider = self.backend.provider_name(), mode = %config.duration(), prompt_len = prompt.len())
    )]
    pub async fn generate<S: EventSink>(
        &self,
        prompt: &str,
        config: StoryConfig,
        cancel: &CancellationToken,
        events: &mut S,
    ) -> GenerationOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            debug!("Rejecting empty prompt");
            return GenerationOutcome::Rejected;
        }
        if cancel.is_cancelled() {
            return GenerationOutcome::Cancelled;
        }

        match self.run(prompt, config, cancel, events).await {
            Ok(Some(item)) => GenerationOutcome::Completed(item),
            Ok(None) => {
                info!("Generation cancelled");
                GenerationOutcome::Cancelled
            }
            Err(e) if cancel.is_cancelled() => {
                info!(error = %e, "Generation cancelled; discarding concurrent failure");
                GenerationOutcome::Cancelled
            }
            Err(e) => {
                error!(error = %e, "Generation failed");
                GenerationOutcome::Failed(e)
            }
        }
    }

    /// `Ok(None)` means cancellation was observed.
    async fn run<S: EventSink>(
        &self,
        prompt: &str,
        config: StoryConfig,
        cancel: &CancellationToken,
        events: &mut S,
    ) -> NithanResult<Option<HistoryItem>> {
        let mode = *config.duration();
        events.emit(Action::GenerationStarted { mode });

        let story = if mode.is_long() {
            self.backend.generate_long_story_script(prompt, mode).await?
        } else {
            self.backend.generate_story_script(prompt, mode).await?
        };
        if cancel.is_cancelled() {
            return Ok(None);
        }

        let story = validate_script(story)?.with_config(config);
        let total = story.scenes.len();
        if !mode.scene_range().contains(&total) {
            warn!(
                scenes = total,
                expected = ?mode.scene_range(),
                "Script scene count outside the mode's range"
            );
        }
        info!(title = %story.title, scenes = total, "Script ready");
        events.emit(Action::ScriptReady {
            title: story.title.clone(),
        });

        let voice = map_voice_config(*config.voice_gender(), *config.voice_tone());
        let mut media = Vec::with_capacity(total);

        for (index, scene) in story.scenes.iter().enumerate() {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            events.emit(Action::SceneStarted {
                index: index + 1,
                total,
                preview: preview(&scene.story_text),
            });

            let (image_url, audio_payload) = async {
                tokio::try_join!(
                    self.backend.generate_scene_image(&scene.image_prompt),
                    self.backend.generate_scene_audio(&scene.story_text, voice),
                )
            }
            .instrument(info_span!("story.scene", scene = index + 1, total))
            .await?;
            if cancel.is_cancelled() {
                return Ok(None);
            }

            let audio = decode_audio_data(&audio_payload, &self.audio)?;
            debug!(scene = index + 1, duration = ?audio.duration(), "Scene ready");
            media.push(GeneratedSceneMedia::from_scene(scene, image_url, audio));
            events.emit(Action::SceneCompleted {
                completed: index + 1,
                total,
            });
        }

        HistoryItem::new(story, media).map(Some)
    }
}

fn validate_script(story: StoryData) -> NithanResult<StoryData> {
    if story.title.trim().is_empty() {
        return Err(StoryError::new(StoryErrorKind::EmptyTitle).into());
    }
    if story.scenes.is_empty() {
        return Err(StoryError::new(StoryErrorKind::NoScenes(story.title)).into());
    }
    Ok(story)
}
