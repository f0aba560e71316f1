//! TOML configuration with layered overrides.
//!
//! Sources, later ones winning:
//! 1. Bundled defaults (`nithan.toml` shipped with the library)
//! 2. `~/.config/nithan/nithan.toml`
//! 3. `./nithan.toml`
//! 4. `NITHAN__<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use nithan_error::{ConfigError, NithanError, NithanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../nithan.toml");

/// Generative service endpoint and model names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// REST base URL, without a trailing slash
    pub base_url: String,
    /// Model for short and medium scripts
    pub script_model: String,
    /// Model for long and mega-long scripts
    pub long_script_model: String,
    /// Image generation model
    pub image_model: String,
    /// Speech generation model
    pub tts_model: String,
}

/// PCM layout of narration audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
}

/// Where session state is kept between runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// State directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    /// Key the identity token is stored under
    pub token_key: String,
}

impl SessionConfig {
    /// The configured state directory, or `<data dir>/nithan`.
    ///
    /// Falls back to `./.nithan` on platforms without a data directory.
    pub fn resolved_state_dir(&self) -> PathBuf {
        match &self.state_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|d| d.join("nithan"))
                .unwrap_or_else(|| PathBuf::from(".nithan")),
        }
    }
}

/// Top-level Nithan configuration.
///
/// # Example
///
/// ```no_run
/// use nithan_config::NithanConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NithanConfig::load()?;
/// println!("TTS model: {}", config.gemini.tts_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NithanConfig {
    /// Generative service settings
    pub gemini: GeminiConfig,
    /// Narration audio layout
    pub audio: AudioConfig,
    /// Session storage
    pub session: SessionConfig,
}

impl NithanConfig {
    /// Bundled defaults only, ignoring user files and environment.
    ///
    /// ```
    /// use nithan_config::NithanConfig;
    ///
    /// let config = NithanConfig::bundled().unwrap();
    /// assert_eq!(config.audio.sample_rate, 24_000);
    /// assert_eq!(config.session.token_key, "user_token");
    /// ```
    pub fn bundled() -> NithanResult<Self> {
        Self::finish(Self::defaults())
    }

    /// Load with full precedence: environment > `./nithan.toml` >
    /// `~/.config/nithan/nithan.toml` > bundled defaults.
    ///
    /// Missing user files are skipped.
    #[instrument]
    pub fn load() -> NithanResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/nithan/nithan.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("nithan").required(false))
            .add_source(
                Environment::with_prefix("NITHAN")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load a specific file layered over the bundled defaults.
    ///
    /// The file may set only the values it wants to change.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NithanResult<Self> {
        debug!("Loading configuration from file");
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.display()
            ))
            .into());
        }
        Self::finish(Self::defaults().add_source(File::from(path)))
    }

    /// Parse TOML text layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> NithanResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> NithanResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                NithanError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NithanError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> NithanResult<()> {
        if self.audio.sample_rate == 0 || self.audio.channels == 0 {
            return Err(ConfigError::new(format!(
                "audio.sample_rate and audio.channels must be non-zero (got {} Hz, {} channels)",
                self.audio.sample_rate, self.audio.channels
            ))
            .into());
        }
        if self.session.token_key.trim().is_empty() {
            return Err(ConfigError::new("session.token_key must not be empty").into());
        }
        Ok(())
    }
}
