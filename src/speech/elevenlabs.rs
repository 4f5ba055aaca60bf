//! ElevenLabs text-to-speech client.

use super::{pcm_to_wav, AudioPayload, SpeechSynthesizer};
use crate::config::ElevenLabsSettings;
use crate::error::{BlogcastError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Synthesizer backed by the ElevenLabs REST API.
pub struct ElevenLabsSynthesizer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
    output_format: String,
}

impl ElevenLabsSynthesizer {
    /// Create a synthesizer for the given API key.
    pub fn new(api_key: &str, settings: &ElevenLabsSettings) -> Result<Self> {
        if settings.voice_id.is_empty() {
            return Err(BlogcastError::Config("elevenlabs.voice_id is empty".to_string()));
        }
        if !is_wav_format(&settings.output_format) {
            return Err(BlogcastError::Config(format!(
                "elevenlabs.output_format '{}' is not supported; use pcm_<rate> or wav_<rate>",
                settings.output_format
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            voice_id: settings.voice_id.clone(),
            model_id: settings.model_id.clone(),
            output_format: settings.output_format.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[instrument(skip(self, text), fields(chars = text.chars().count(), voice = %self.voice_id))]
    async fn synthesize(&self, text: &str) -> Result<AudioPayload> {
        if text.trim().is_empty() {
            return Err(BlogcastError::Speech("no text to synthesize".to_string()));
        }

        debug!("Requesting speech");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", &self.api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.model_id,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlogcastError::Speech(format!("{} ({})", status, body.trim())));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(BlogcastError::Speech("service returned no audio".to_string()));
        }

        debug!("Received {} bytes of audio", bytes.len());
        encode_output(&bytes, &self.output_format)
    }
}

/// Turn the raw API body into a WAV payload, wrapping raw PCM.
fn encode_output(bytes: &[u8], output_format: &str) -> Result<AudioPayload> {
    let wav = match pcm_sample_rate(output_format) {
        Some(rate) => pcm_to_wav(bytes, rate)?,
        None => bytes.to_vec(),
    };
    Ok(AudioPayload::from_bytes(&wav, "audio/wav"))
}

/// Sample rate of a `pcm_<rate>` output format.
fn pcm_sample_rate(output_format: &str) -> Option<u32> {
    output_format.strip_prefix("pcm_")?.parse().ok()
}

/// Formats whose output is stored as WAV.
fn is_wav_format(output_format: &str) -> bool {
    pcm_sample_rate(output_format).is_some() || output_format.starts_with("wav_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_sample_rate() {
        assert_eq!(pcm_sample_rate("pcm_24000"), Some(24_000));
        assert_eq!(pcm_sample_rate("pcm_44100"), Some(44_100));
        assert_eq!(pcm_sample_rate("mp3_44100_128"), None);
        assert_eq!(pcm_sample_rate("pcm_fast"), None);
    }

    #[test]
    fn test_encode_output_wraps_pcm() {
        let payload = encode_output(&[0, 0, 1, 0], "pcm_16000").unwrap();
        assert_eq!(payload.mime_type, "audio/wav");
        let bytes = payload.decode().unwrap();
        assert_eq!(&bytes[..4], b"RIFF");

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn test_rejects_non_wav_formats() {
        let mut settings = ElevenLabsSettings::default();
        settings.output_format = "mp3_44100_128".to_string();
        let err = ElevenLabsSynthesizer::new("el-test", &settings).err().unwrap();
        assert!(matches!(err, BlogcastError::Config(_)));

        settings.output_format = "wav_44100".to_string();
        assert!(ElevenLabsSynthesizer::new("el-test", &settings).is_ok());
    }

    #[test]
    fn test_encode_output_passes_wav_through() {
        let payload = encode_output(b"RIFFdata", "wav_44100").unwrap();
        assert_eq!(payload.mime_type, "audio/wav");
        assert_eq!(payload.decode().unwrap(), b"RIFFdata");
    }

    #[test]
    fn test_endpoint_uses_voice() {
        let synth = ElevenLabsSynthesizer::new("el-test", &ElevenLabsSettings::default()).unwrap();
        assert_eq!(
            synth.endpoint(),
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );
    }
}
