//! Decoding model text into story types.

use nithan_core::Scene;
use nithan_error::{GeminiError, GeminiErrorKind, NithanResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Strips a surrounding Markdown code fence (```` ```json ... ``` ````).
///
/// Text without a fence is returned trimmed.
///
/// ```
/// use nithan_models::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
/// ```
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parses model output as JSON, tolerating a code fence.
pub(crate) fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> NithanResult<T> {
    serde_json::from_str(strip_code_fences(text)).map_err(|e| {
        GeminiError::new(GeminiErrorKind::MalformedScript(format!(
            "{} is not valid JSON: {}",
            what, e
        )))
        .into()
    })
}

/// Scenes of one chapter on the long-narrative path.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChapterScenes {
    #[serde(default)]
    pub scenes: Vec<Scene>,
}
