//! Gemini REST client implementing [`StoryBackend`].

use crate::gemini::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, SpeechConfig,
};
use crate::gemini::parse::{ChapterScenes, parse_json};
use crate::gemini::prompts::{self, StoryOutline};
use async_trait::async_trait;
use nithan_config::{Capabilities, GeminiConfig};
use nithan_core::{StoryData, StoryMode};
use nithan_error::{
    GeminiError, GeminiErrorKind, HttpError, JsonError, NithanError, NithanResult,
};
use nithan_interface::StoryBackend;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Gemini client for scripts, illustrations and narration.
///
/// Requests are sent once; there is no retry, rate limiting or timeout.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .field("script_model", &self.config.script_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client cannot be
    /// initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> NithanResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        let client = Client::builder().build().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string()))
        })?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Creates a client from the startup capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when no key was configured.
    pub fn from_capabilities(caps: &Capabilities, config: GeminiConfig) -> NithanResult<Self> {
        let api_key = caps
            .api_key()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::new(api_key, config)
    }

    /// Endpoint and model configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    #[instrument(name = "gemini.generate_content", skip(self, request), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> NithanResult<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()).with_endpoint(&url))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            warn!(status_code, "Gemini request rejected");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: error_text,
            })
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| -> NithanError {
            if e.is_decode() {
                JsonError::new(format!("generateContent response from {}: {}", model, e)).into()
            } else {
                HttpError::new(e.to_string()).with_endpoint(&url).into()
            }
        })?;

        if body.parts().is_empty() {
            let reason = body.finish_reason().unwrap_or("no candidates");
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse(format!(
                "{} ({})",
                model, reason
            )))
            .into());
        }

        Ok(body)
    }

    async fn generate_json(
        &self,
        model: &str,
        prompt: String,
        schema: serde_json::Value,
    ) -> NithanResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: Some(Content::instruction(prompts::STORYTELLER_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                ..Default::default()
            }),
        };

        let response = self.generate_content(model, &request).await?;
        response.text().ok_or_else(|| {
            NithanError::from(GeminiError::new(GeminiErrorKind::EmptyResponse(format!(
                "{} (no text part)",
                model
            ))))
        })
    }
}

#[async_trait]
impl StoryBackend for GeminiClient {
    #[instrument(skip(self, prompt), fields(mode = %mode, prompt_len = prompt.len()))]
    async fn generate_story_script(
        &self,
        prompt: &str,
        mode: StoryMode,
    ) -> NithanResult<StoryData> {
        let text = self
            .generate_json(
                &self.config.script_model,
                prompts::script_prompt(prompt, mode),
                prompts::script_schema(),
            )
            .await?;

        let story: StoryData = parse_json(&text, "Story script")?;
        info!(title = %story.title, scenes = story.scenes.len(), "Script generated");
        Ok(story)
    }

    #[instrument(skip(self, prompt), fields(mode = %mode, prompt_len = prompt.len()))]
    async fn generate_long_story_script(
        &self,
        prompt: &str,
        mode: StoryMode,
    ) -> NithanResult<StoryData> {
        let model = &self.config.long_script_model;
        let (_, scenes_per_chapter) = prompts::chapter_plan(mode);

        let text = self
            .generate_json(
                model,
                prompts::outline_prompt(prompt, mode),
                prompts::outline_schema(),
            )
            .await?;
        let outline: StoryOutline = parse_json(&text, "Story outline")?;
        if outline.chapters.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MalformedScript(format!(
                "Outline for '{}' has no chapters",
                outline.title
            )))
            .into());
        }
        debug!(title = %outline.title, chapters = outline.chapters.len(), "Outline generated");

        // Chapters are written in order so each can continue from the plan.
        let mut scenes = Vec::new();
        for index in 0..outline.chapters.len() {
            let text = self
                .generate_json(
                    model,
                    prompts::chapter_prompt(prompt, &outline, index, &scenes_per_chapter),
                    prompts::chapter_schema(),
                )
                .await?;
            let chapter: ChapterScenes = parse_json(&text, "Chapter scenes")?;
            debug!(chapter = index + 1, scenes = chapter.scenes.len(), "Chapter generated");
            scenes.extend(chapter.scenes);
        }

        info!(title = %outline.title, scenes = scenes.len(), "Long script generated");
        Ok(StoryData::new(outline.title, scenes))
    }

    #[instrument(skip(self, image_prompt), fields(prompt_len = image_prompt.len()))]
    async fn generate_scene_image(&self, image_prompt: &str) -> NithanResult<String> {
        let model = &self.config.image_model;
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompts::illustration_prompt(image_prompt))],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
        };

        let response = self.generate_content(model, &request).await?;
        let inline = response.first_inline_data().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::MissingInlineData {
                model: model.clone(),
                expected: "image".to_string(),
            })
        })?;

        debug!(mime_type = %inline.mime_type, bytes = inline.data.len(), "Image generated");
        Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
    }

    #[instrument(skip(self, text), fields(voice = %voice_name, text_len = text.len()))]
    async fn generate_scene_audio(&self, text: &str, voice_name: &str) -> NithanResult<String> {
        let model = &self.config.tts_model;
        let request = GenerateContentRequest {
            contents: vec![Content::user(text)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig::prebuilt(voice_name)),
                ..Default::default()
            }),
        };

        let response = self.generate_content(model, &request).await?;
        let inline = response.first_inline_data().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::MissingInlineData {
                model: model.clone(),
                expected: "audio".to_string(),
            })
        })?;

        debug!(mime_type = %inline.mime_type, bytes = inline.data.len(), "Narration generated");
        Ok(inline.data.clone())
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
