//! Narration audio decoding.
//!
//! The speech endpoint returns base64-encoded raw PCM: signed 16-bit
//! little-endian samples, interleaved when there is more than one channel.
//! Decoding turns that payload into an [`AudioBuffer`] without resampling or
//! trimming, so every sample the service produced is kept.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nithan_error::{AudioError, AudioErrorKind, NithanResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

/// Sample rate of the speech endpoint's PCM output.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Decoding context: the PCM layout buffers are created with.
///
/// Stands in for a platform audio context. It tracks how many buffers it
/// has handed out.
#[derive(Debug)]
pub struct AudioContext {
    sample_rate: u32,
    channels: u16,
    allocated: AtomicUsize,
}

impl AudioContext {
    /// Creates a context for the given layout.
    pub fn new(sample_rate: u32, channels: u16) -> NithanResult<Self> {
        if sample_rate == 0 || channels == 0 {
            return Err(AudioError::new(AudioErrorKind::InvalidContext(format!(
                "sample_rate={} channels={}",
                sample_rate, channels
            )))
            .into());
        }
        Ok(Self {
            sample_rate,
            channels,
            allocated: AtomicUsize::new(0),
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of buffers decoded through this context.
    pub fn allocated_buffers(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    fn create_buffer(&self, samples: Vec<i16>) -> AudioBuffer {
        self.allocated.fetch_add(1, Ordering::Relaxed);
        AudioBuffer {
            sample_rate: self.sample_rate,
            channels: self.channels,
            samples,
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 1,
            allocated: AtomicUsize::new(0),
        }
    }
}

/// Decoded, playable narration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
    /// Interleaved signed 16-bit samples
    pub samples: Vec<i16>,
}

impl AudioBuffer {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Samples of one channel as floats in `[-1.0, 1.0)`.
    pub fn channel_data(&self, channel: u16) -> Vec<f32> {
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels.max(1) as usize)
            .map(|s| *s as f32 / 32768.0)
            .collect()
    }

    /// Encodes the buffer as a 16-bit PCM RIFF/WAVE file.
    ///
    /// ```
    /// use nithan_core::AudioBuffer;
    ///
    /// let buffer = AudioBuffer { sample_rate: 24_000, channels: 1, samples: vec![0, 1, -1] };
    /// let wav = buffer.to_wav_bytes();
    /// assert_eq!(&wav[0..4], b"RIFF");
    /// assert_eq!(wav.len(), 44 + 6);
    /// ```
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        let data_len = (self.samples.len() * 2) as u32;
        let block_align = self.channels * 2;
        let byte_rate = self.sample_rate * block_align as u32;

        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            out.extend_from_slice(&sample.to_le_bytes());
        }
        out
    }
}

/// Decodes a base64 PCM payload into a buffer allocated on `ctx`.
///
/// # Errors
///
/// Fails if the payload is not base64, is empty, or does not split into
/// whole frames for the context's channel count.
///
/// # Examples
///
/// ```
/// use nithan_core::{AudioContext, decode_audio_data};
///
/// let ctx = AudioContext::default();
/// // two samples: 1 and -2, little-endian
/// let buffer = decode_audio_data("AQD+/w==", &ctx).unwrap();
/// assert_eq!(buffer.samples, vec![1, -2]);
/// assert_eq!(ctx.allocated_buffers(), 1);
/// ```
#[instrument(skip(payload, ctx), fields(payload_len = payload.len()))]
pub fn decode_audio_data(payload: &str, ctx: &AudioContext) -> NithanResult<AudioBuffer> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(&compact)
        .map_err(|e| AudioError::new(AudioErrorKind::Base64Decode(e.to_string())))?;

    if bytes.is_empty() {
        return Err(AudioError::new(AudioErrorKind::Empty).into());
    }

    let frame_size = 2 * ctx.channels() as usize;
    if bytes.len() % frame_size != 0 {
        return Err(AudioError::new(AudioErrorKind::PartialFrame {
            len: bytes.len(),
            frame_size,
        })
        .into());
    }

    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    debug!(samples = samples.len(), "Decoded narration audio");
    Ok(ctx.create_buffer(samples))
}
