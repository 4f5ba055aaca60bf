//! Text-to-speech synthesis.
//!
//! Synthesis is delegated to a hosted voice API. Audio travels through the
//! agent as base64 so it can be handed around as plain text.

mod elevenlabs;

pub use elevenlabs::ElevenLabsSynthesizer;

use crate::error::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// A single piece of synthesized audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioPayload {
    /// Identifier assigned when the audio was produced.
    pub id: String,
    /// Audio bytes, base64-encoded.
    pub base64_audio: String,
    /// MIME type of the decoded bytes.
    pub mime_type: String,
}

impl AudioPayload {
    /// Wrap raw audio bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            base64_audio: STANDARD.encode(bytes),
            mime_type: mime_type.to_string(),
        }
    }

    /// Decode the payload back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.base64_audio.trim())?)
    }
}

/// Trait for text-to-speech services.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Convert text into audio.
    async fn synthesize(&self, text: &str) -> Result<AudioPayload>;
}

/// Wrap 16-bit little-endian mono PCM into a WAV container.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::with_capacity(pcm.len() + 44);
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)?;
        // A trailing odd byte is not a full sample and is dropped
        for sample in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
        }
        writer.finalize()?;
    }

    Ok(buffer)
}
