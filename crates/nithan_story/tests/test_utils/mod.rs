//! Mock story backend for testing.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nithan_core::{AudioContext, Scene, StoryData, StoryMode};
use nithan_error::{GeminiError, GeminiErrorKind, NithanResult};
use nithan_interface::StoryBackend;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Samples per narration clip (0.1 s at 24 kHz).
pub const CLIP_SAMPLES: usize = 2_400;

/// Which request a hook is observing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Script,
    LongScript,
    /// 0-based image call number
    Image(usize),
    /// 0-based audio call number
    Audio(usize),
}

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Every request succeeds
    Succeed,
    /// The script request fails
    FailScript(GeminiErrorKind),
    /// The nth image call (0-based) fails
    FailImageAt(usize),
    /// The nth audio call (0-based) fails
    FailAudioAt(usize),
    /// Narration comes back as invalid base64
    GarbledAudio,
}

type Hook = Box<dyn Fn(MockCall) + Send + Sync>;

struct MockState {
    story: StoryData,
    behavior: MockBehavior,
    hook: Mutex<Option<Hook>>,
    script_calls: AtomicUsize,
    long_script_calls: AtomicUsize,
    image_calls: AtomicUsize,
    audio_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    voices: Mutex<Vec<String>>,
}

/// Mock backend that returns a fixed script and synthetic media.
///
/// Clones share counters, so a test can keep one clone for assertions
/// while the studio owns another.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    /// A backend whose script has `scenes` scenes and every request succeeds.
    pub fn new_success(scenes: usize) -> Self {
        Self::new_with_behavior(story(scenes), MockBehavior::Succeed)
    }

    /// A backend with custom behavior.
    pub fn new_with_behavior(story: StoryData, behavior: MockBehavior) -> Self {
        Self {
            state: Arc::new(MockState {
                story,
                behavior,
                hook: Mutex::new(None),
                script_calls: AtomicUsize::new(0),
                long_script_calls: AtomicUsize::new(0),
                image_calls: AtomicUsize::new(0),
                audio_calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                voices: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Runs `hook` at the start of every request.
    pub fn on_call(self, hook: impl Fn(MockCall) + Send + Sync + 'static) -> Self {
        *self.state.hook.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn script_calls(&self) -> usize {
        self.state.script_calls.load(Ordering::SeqCst)
    }

    pub fn long_script_calls(&self) -> usize {
        self.state.long_script_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.state.image_calls.load(Ordering::SeqCst)
    }

    pub fn audio_calls(&self) -> usize {
        self.state.audio_calls.load(Ordering::SeqCst)
    }

    /// Total requests of any kind.
    pub fn total_calls(&self) -> usize {
        self.script_calls() + self.long_script_calls() + self.image_calls() + self.audio_calls()
    }

    /// Most media requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    /// Voice names narration was requested with.
    pub fn voices(&self) -> Vec<String> {
        self.state.voices.lock().unwrap().clone()
    }

    fn fire(&self, call: MockCall) {
        if let Some(hook) = self.state.hook.lock().unwrap().as_ref() {
            hook(call);
        }
    }

    /// Holds a media request open across a few polls so that a concurrent
    /// sibling request can start before this one finishes.
    async fn in_flight(&self) {
        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn script(&self) -> NithanResult<StoryData> {
        match &self.state.behavior {
            MockBehavior::FailScript(kind) => Err(GeminiError::new(kind.clone()).into()),
            _ => Ok(self.state.story.clone()),
        }
    }
}

#[async_trait]
impl StoryBackend for MockBackend {
    async fn generate_story_script(
        &self,
        _prompt: &str,
        _mode: StoryMode,
    ) -> NithanResult<StoryData> {
        self.state.script_calls.fetch_add(1, Ordering::SeqCst);
        self.fire(MockCall::Script);
        self.script()
    }

    async fn generate_long_story_script(
        &self,
        _prompt: &str,
        _mode: StoryMode,
    ) -> NithanResult<StoryData> {
        self.state.long_script_calls.fetch_add(1, Ordering::SeqCst);
        self.fire(MockCall::LongScript);
        self.script()
    }

    async fn generate_scene_image(&self, image_prompt: &str) -> NithanResult<String> {
        let n = self.state.image_calls.fetch_add(1, Ordering::SeqCst);
        self.fire(MockCall::Image(n));
        self.in_flight().await;
        match self.state.behavior {
            MockBehavior::FailImageAt(at) if at == n => Err(GeminiError::new(
                GeminiErrorKind::MissingInlineData {
                    model: "mock-image".into(),
                    expected: "image".into(),
                },
            )
            .into()),
            _ => Ok(format!(
                "data:image/png;base64,{}",
                STANDARD.encode(image_prompt)
            )),
        }
    }

    async fn generate_scene_audio(&self, text: &str, voice_name: &str) -> NithanResult<String> {
        let n = self.state.audio_calls.fetch_add(1, Ordering::SeqCst);
        self.state.voices.lock().unwrap().push(voice_name.to_string());
        self.fire(MockCall::Audio(n));
        self.in_flight().await;
        match self.state.behavior {
            MockBehavior::FailAudioAt(at) if at == n => Err(GeminiError::new(
                GeminiErrorKind::HttpError {
                    status_code: 500,
                    message: format!("tts failed for {}", text.len()),
                },
            )
            .into()),
            MockBehavior::GarbledAudio => Ok("not base64!".to_string()),
            _ => Ok(pcm_clip(CLIP_SAMPLES)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Base64 mono PCM with `samples` samples.
pub fn pcm_clip(samples: usize) -> String {
    let bytes: Vec<u8> = (0..samples)
        .flat_map(|i| ((i % 256) as i16 * 64).to_le_bytes())
        .collect();
    STANDARD.encode(bytes)
}

/// A script with `scenes` numbered scenes.
pub fn story(scenes: usize) -> StoryData {
    StoryData::new(
        "กระต่ายน้อยผจญภัย",
        (1..=scenes)
            .map(|i| Scene {
                story_text: format!("ฉากที่ {} กระต่ายน้อยเดินทางต่อไปในเมืองขนม", i),
                english_translation: format!("Scene {}: the little rabbit travels on", i),
                image_prompt: format!("rabbit in candy town, scene {}", i),
                visual_effect: "zoom-in".into(),
                sound_effect: "birds".into(),
            })
            .collect(),
    )
}

/// The 24 kHz mono context the Gemini speech endpoint produces.
pub fn audio_context() -> AudioContext {
    AudioContext::new(24_000, 1).unwrap()
}
