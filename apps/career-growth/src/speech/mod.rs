//! Narration Synthesizer — voiceover text → WAV bytes.
//!
//! The production backend is the OpenAI-compatible `/audio/speech` endpoint on the
//! same service as the completion API. No retries and no caching: every slide is
//! synthesized exactly once per run.

use std::borrow::Cow;
use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("synthesis returned no audio")]
    EmptyAudio,

    #[error("synthesized audio is not a readable WAV stream: {0}")]
    InvalidWav(#[from] hound::Error),

    #[error("synthesized audio has zero duration")]
    ZeroDuration,
}

/// The synthesis engine boundary.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns WAV-encoded speech for `text`.
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError>;
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// HTTP client for the `/audio/speech` endpoint.
#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

impl SpeechClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
        voice: String,
    ) -> Result<Self, SpeechError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            voice,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "wav",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        debug!(bytes = audio.len(), chars = text.len(), "Synthesized narration");
        Ok(audio)
    }
}

/// Rewrites placeholder lengths in a WAV header to match the bytes actually present.
///
/// Streaming synthesis writes the header before the audio length is known, so the
/// `data` chunk (and the RIFF size) often carry `0xFFFFFFFF` or `0`. When the `data`
/// length is a placeholder or runs past the buffer, a patched copy is returned with
/// the length rounded down to whole frames. Well-formed buffers are borrowed as-is;
/// anything that isn't RIFF/WAVE is left for the decoder to reject.
pub fn normalize_wav(audio: &[u8]) -> Cow<'_, [u8]> {
    if audio.len() < 12 || &audio[0..4] != b"RIFF" || &audio[8..12] != b"WAVE" {
        return Cow::Borrowed(audio);
    }

    let mut block_align: usize = 0;
    let mut pos = 12;
    while pos + 8 <= audio.len() {
        let id = &audio[pos..pos + 4];
        let size = read_u32_le(audio, pos + 4);
        let body = pos + 8;

        if id == b"fmt " && body + 14 <= audio.len() {
            block_align = u16::from_le_bytes([audio[body + 12], audio[body + 13]]) as usize;
        }

        if id == b"data" {
            let available = audio.len() - body;
            if size != 0 && size != u32::MAX && size as usize <= available {
                return Cow::Borrowed(audio);
            }

            let data_len = match block_align {
                0 => available,
                align => available - available % align,
            };
            let end = body + data_len;
            let mut patched = audio[..end].to_vec();
            patched[pos + 4..body].copy_from_slice(&(data_len as u32).to_le_bytes());
            patched[4..8].copy_from_slice(&((end - 8) as u32).to_le_bytes());
            debug!(
                declared = size,
                actual = data_len,
                "Patched placeholder WAV data length"
            );
            return Cow::Owned(patched);
        }

        // Chunks are word-aligned.
        pos = body.saturating_add(size as usize).saturating_add(size as usize & 1);
    }
    Cow::Borrowed(audio)
}

fn read_u32_le(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Playback duration of a WAV buffer, after placeholder lengths are normalized.
pub fn wav_duration(audio: &[u8]) -> Result<Duration, SpeechError> {
    if audio.is_empty() {
        return Err(SpeechError::EmptyAudio);
    }

    let audio = normalize_wav(audio);
    let reader = hound::WavReader::new(Cursor::new(audio.as_ref()))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(SpeechError::ZeroDuration);
    }

    let frames = reader.duration();
    if frames == 0 {
        return Err(SpeechError::ZeroDuration);
    }
    Ok(Duration::from_secs_f64(frames as f64 / spec.sample_rate as f64))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a mono 16-bit WAV of `seconds` silence at `sample_rate`.
    pub(crate) fn silent_wav(seconds: f64, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            let total = (seconds * sample_rate as f64) as usize;
            for _ in 0..total {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_wav_duration_matches_sample_count() {
        let wav = silent_wav(1.5, 16_000);
        let duration = wav_duration(&wav).unwrap();
        assert!((duration.as_secs_f64() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_wav_duration_with_oversized_length() {
        let mut wav = silent_wav(2.0, 8_000);
        // data chunk length lives at bytes 40..44 of the canonical header
        wav[40..44].copy_from_slice(&0x7FFF_FFFEu32.to_le_bytes());
        let duration = wav_duration(&wav).unwrap();
        assert!((duration.as_secs_f64() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_streaming_placeholder_lengths_are_patched() {
        let mut wav = silent_wav(1.0, 24_000);
        wav[4..8].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        wav[40..44].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

        let duration = wav_duration(&wav).unwrap();
        assert!((duration.as_secs_f64() - 1.0).abs() < 1e-3);

        let patched = normalize_wav(&wav);
        assert!(matches!(patched, Cow::Owned(_)));
        assert_eq!(read_u32_le(&patched, 40), 48_000);
        assert_eq!(read_u32_le(&patched, 4), patched.len() as u32 - 8);
        let reader = hound::WavReader::new(Cursor::new(patched.as_ref())).unwrap();
        assert_eq!(reader.duration(), 24_000);
    }

    #[test]
    fn test_placeholder_with_partial_frame_rounds_down() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for _ in 0..8_000 * 2 {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        let mut wav = cursor.into_inner();
        wav.extend_from_slice(&[0, 0, 0]); // a truncated trailing frame
        wav[40..44].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

        let patched = normalize_wav(&wav);
        assert_eq!(read_u32_le(&patched, 40), 32_000);
        assert_eq!(patched.len(), wav.len() - 3);
        let duration = wav_duration(&wav).unwrap();
        assert!((duration.as_secs_f64() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_well_formed_wav_is_borrowed() {
        let wav = silent_wav(0.25, 8_000);
        assert!(matches!(normalize_wav(&wav), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_audio_rejected() {
        assert!(matches!(wav_duration(&[]), Err(SpeechError::EmptyAudio)));
    }

    #[test]
    fn test_non_wav_rejected() {
        let err = wav_duration(b"ID3\x03mp3 data here").unwrap_err();
        assert!(matches!(err, SpeechError::InvalidWav(_)));
    }

    #[test]
    fn test_zero_sample_wav_rejected() {
        let wav = silent_wav(0.0, 22_050);
        assert!(matches!(wav_duration(&wav), Err(SpeechError::ZeroDuration)));
    }

    #[test]
    fn test_speech_request_shape() {
        let body = serde_json::to_value(SpeechRequest {
            model: "playai-tts",
            input: "Welcome to Data Science",
            voice: "Fritz-PlayAI",
            response_format: "wav",
        })
        .unwrap();
        assert_eq!(body["input"], "Welcome to Data Science");
        assert_eq!(body["response_format"], "wav");
    }
}
