//! Procedural formant speech synthesis in Rust.
//!
//! Text goes in, a RIFF/WAVE container comes out. Nothing is sampled or
//! learned: every phoneme is a handful of sine partials or a band of filtered
//! noise, shaped by a short fade envelope.
//!
//! ```
//! use voder::{Synthesizer, VoicePreset};
//!
//! let synth = Synthesizer::default();
//! let wav = synth.render_wav("hello world", &VoicePreset::Robot.profile()).unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```
//!
//! The pipeline is split into stages that can be used on their own:
//! [`PhonemeMapper`] turns text into [`Phoneme`]s from the [`AcousticTable`],
//! the [`Renderer`] mixes them into an [`AudioBuffer`] using the
//! [`FormantOscillatorBank`], [`NoiseGenerator`] and [`EnvelopeShaper`], and
//! the [`WaveEncoder`] writes the container.
//!
//! ## `no_std`
//!
//! Without the `std` feature this library is `no_std` compatible.
//! `alloc` is required. Enable `libm` for the math functions instead.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    unsafe_code,
    rustdoc::all
)]
// fine for us since loss of precision/sign is not that important, as long as it's the same every time.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
// no public repository yet
#![allow(clippy::cargo_common_metadata)]

#[cfg(all(feature = "std", feature = "libm"))]
compile_error!("Features \"std\" and \"libm\" are mutually exclusive.");

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Must specify a math feature: either \"std\" or \"libm\".");

extern crate alloc;

mod buffer;
mod config;
mod envelope;
mod error;
mod filter;
mod mapper;
mod math;
mod noise;
mod oscillator;
mod render;
mod table;
mod traits;
mod voice;
mod wav;

pub use buffer::{AudioBuffer, FULL_SCALE, clip_to_i16};
pub use config::{
    DEFAULT_AGC_RMS_LEVEL, DEFAULT_FADE_MS, DEFAULT_FORMANT_WEIGHTS, DEFAULT_HARMONIC_COUNT,
    DEFAULT_HARMONIC_DECAY, DEFAULT_HARMONIC_MIX, DEFAULT_NOISE_SEED, DEFAULT_SAMPLE_RATE,
    MAX_FADE_MS, MAX_HARMONIC_COUNT, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, SynthConfig,
};
pub use envelope::{EnvelopeShaper, FadeCurve};
pub use error::{Error, Result};
pub use mapper::{PhonemeMapper, text_to_phonemes};
pub use noise::NoiseGenerator;
pub use oscillator::{FormantOscillatorBank, PhaseAccumulator};
pub use render::{Renderer, SampleClock};
pub use table::{
    AcousticTable, LONG_PAUSE, NEUTRAL_VOWEL, Phoneme, PhonemeClass, SHORT_PAUSE, WORD_GAP,
};
pub use traits::Filter;
pub use voice::{
    BREATHINESS_RANGE, DEFAULT_PITCH, DEFAULT_SPEED, DEFAULT_VOLUME, PITCH_RANGE, SPEED_RANGE,
    VOLUME_RANGE, VoicePreset, VoiceProfile,
};
pub use wav::{HEADER_LEN, WavFormat, WaveEncoder, decode_wav, encode_wav};

use alloc::{string::String, vec::Vec};

/// Everything one synthesis call needs: the text and how to say it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthesisRequest {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub voice: VoiceProfile,
}

impl SynthesisRequest {
    #[must_use]
    pub fn new(text: impl Into<String>, voice: VoiceProfile) -> Self {
        SynthesisRequest {
            text: text.into(),
            voice,
        }
    }
}

/// Text-to-speech front end: mapper, renderer and encoder in one.
///
/// A synthesizer holds only its configuration. Every call starts from fresh
/// oscillator phases and a freshly seeded noise generator, so the same request
/// always produces the same samples, and one synthesizer can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    mapper: PhonemeMapper,
    renderer: Renderer,
}

impl Synthesizer {
    #[must_use]
    pub fn new(config: SynthConfig) -> Self {
        Synthesizer {
            mapper: PhonemeMapper::default(),
            renderer: Renderer::new(config),
        }
    }

    /// The configuration in use, after clamping.
    #[must_use]
    pub fn config(&self) -> &SynthConfig {
        self.renderer.config()
    }

    /// Maps `text` to phonemes without rendering.
    #[must_use]
    pub fn phonemes(&self, text: &str) -> Vec<Phoneme> {
        self.mapper.map(text)
    }

    /// Renders `text` with `voice` into 16-bit samples.
    #[must_use]
    pub fn render(&self, text: &str, voice: &VoiceProfile) -> AudioBuffer {
        let phonemes = self.mapper.map(text);
        log::debug!("{:?} -> {} phonemes", text, phonemes.len());
        self.renderer.render(&phonemes, voice)
    }

    /// Renders `text` with `voice` into a complete WAV container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerTooLarge`] if the rendered audio does not fit
    /// in a RIFF container.
    pub fn render_wav(&self, text: &str, voice: &VoiceProfile) -> Result<Vec<u8>> {
        WaveEncoder.encode(&self.render(text, voice))
    }

    /// Renders a [`SynthesisRequest`].
    #[must_use]
    pub fn synthesize(&self, request: &SynthesisRequest) -> AudioBuffer {
        self.render(&request.text, &request.voice)
    }
}

/// Renders `request` with the default configuration.
#[must_use]
pub fn synthesize(request: &SynthesisRequest) -> AudioBuffer {
    Synthesizer::default().synthesize(request)
}

/// Renders `request` with the default configuration into a WAV container.
///
/// # Errors
///
/// See [`Synthesizer::render_wav`].
pub fn synthesize_wav(request: &SynthesisRequest) -> Result<Vec<u8>> {
    encode_wav(&synthesize(request))
}
