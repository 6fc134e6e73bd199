//! Synthesizer tunables.
//!
//! These are the knobs of the renderer itself, as opposed to the per-request
//! [`VoiceProfile`](crate::VoiceProfile). Like the voice, every value is
//! clamped into range instead of being rejected.

use crate::envelope::FadeCurve;
use crate::voice::clamp_logged;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;
/// Lowest and highest accepted sample rates in Hz.
pub const MIN_SAMPLE_RATE: u32 = 8_000;
pub const MAX_SAMPLE_RATE: u32 = 96_000;
/// Default fade-in and fade-out length per segment, in milliseconds.
pub const DEFAULT_FADE_MS: f64 = 8.0;
pub const MAX_FADE_MS: f64 = 50.0;
/// Default number of harmonic partials, the fundamental included.
pub const DEFAULT_HARMONIC_COUNT: usize = 4;
pub const MAX_HARMONIC_COUNT: usize = 16;
/// Default amplitude ratio between neighbouring harmonics.
pub const DEFAULT_HARMONIC_DECAY: f64 = 0.5;
/// Default weight of the harmonic series against the formant partials.
pub const DEFAULT_HARMONIC_MIX: f64 = 0.4;
/// Default weights of the F1, F2 and F3 partials.
pub const DEFAULT_FORMANT_WEIGHTS: [f64; 3] = [1.0, 0.6, 0.3];
/// RMS level used by automatic gain control when a NaN level is given.
pub const DEFAULT_AGC_RMS_LEVEL: f64 = 0.18;
/// Default noise seed. Any value works; a fixed one keeps output reproducible.
pub const DEFAULT_NOISE_SEED: u64 = 0x5eed_f00d;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthConfig {
    /// output sample rate in Hz
    pub sample_rate: u32,
    /// fade length at each end of a segment, in milliseconds
    pub fade_ms: f64,
    pub fade_curve: FadeCurve,
    /// number of harmonic partials, the fundamental included
    pub harmonic_count: usize,
    /// amplitude ratio between harmonic k+1 and harmonic k
    pub harmonic_decay: f64,
    /// weight of the whole harmonic series, the formant partials use `formant_weights`
    pub harmonic_mix: f64,
    pub formant_weights: [f64; 3],
    /// seed of the noise generator, reused for every synthesis call
    pub noise_seed: u64,
    /// RMS level for automatic gain control, `None` to leave the mix as is
    pub agc_rms_level: Option<f64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            fade_ms: DEFAULT_FADE_MS,
            fade_curve: FadeCurve::Linear,
            harmonic_count: DEFAULT_HARMONIC_COUNT,
            harmonic_decay: DEFAULT_HARMONIC_DECAY,
            harmonic_mix: DEFAULT_HARMONIC_MIX,
            formant_weights: DEFAULT_FORMANT_WEIGHTS,
            noise_seed: DEFAULT_NOISE_SEED,
            agc_rms_level: None,
        }
    }
}

impl SynthConfig {
    #[must_use]
    pub fn with_sample_rate(self, sample_rate: u32) -> Self {
        SynthConfig {
            sample_rate,
            ..self
        }
        .clamped()
    }

    #[must_use]
    pub fn with_noise_seed(self, noise_seed: u64) -> Self {
        SynthConfig { noise_seed, ..self }
    }

    #[must_use]
    pub fn with_fade(self, fade_ms: f64, fade_curve: FadeCurve) -> Self {
        SynthConfig {
            fade_ms,
            fade_curve,
            ..self
        }
        .clamped()
    }

    #[must_use]
    pub fn with_agc(self, rms_level: f64) -> Self {
        SynthConfig {
            agc_rms_level: Some(rms_level),
            ..self
        }
        .clamped()
    }

    /// Returns a copy with every value inside its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        let sample_rate = self.sample_rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE);
        if sample_rate != self.sample_rate {
            log::warn!(
                "sample rate {} outside {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}, clamped to {sample_rate}",
                self.sample_rate
            );
        }
        let harmonic_count = self.harmonic_count.clamp(1, MAX_HARMONIC_COUNT);
        if harmonic_count != self.harmonic_count {
            log::warn!(
                "harmonic count {} outside 1..={MAX_HARMONIC_COUNT}, clamped to {harmonic_count}",
                self.harmonic_count
            );
        }
        let formant_weights = self
            .formant_weights
            .map(|w| clamp_logged("formant weight", w, &(0.0..=1.0), 0.0));
        SynthConfig {
            sample_rate,
            fade_ms: clamp_logged("fade", self.fade_ms, &(0.0..=MAX_FADE_MS), DEFAULT_FADE_MS),
            fade_curve: self.fade_curve,
            harmonic_count,
            harmonic_decay: clamp_logged(
                "harmonic decay",
                self.harmonic_decay,
                &(0.0..=1.0),
                DEFAULT_HARMONIC_DECAY,
            ),
            harmonic_mix: clamp_logged(
                "harmonic mix",
                self.harmonic_mix,
                &(0.0..=1.0),
                DEFAULT_HARMONIC_MIX,
            ),
            formant_weights,
            noise_seed: self.noise_seed,
            agc_rms_level: self
                .agc_rms_level
                .map(|level| clamp_logged("AGC level", level, &(0.0..=1.0), DEFAULT_AGC_RMS_LEVEL)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_already_clamped() {
        let config = SynthConfig::default();
        assert_eq!(config, config.clamped());
        assert_eq!(config.sample_rate, 22_050);
    }

    #[test]
    fn sample_rate_is_clamped() {
        assert_eq!(SynthConfig::default().with_sample_rate(0).sample_rate, MIN_SAMPLE_RATE);
        assert_eq!(
            SynthConfig::default().with_sample_rate(1_000_000).sample_rate,
            MAX_SAMPLE_RATE
        );
        assert_eq!(SynthConfig::default().with_sample_rate(44_100).sample_rate, 44_100);
    }

    #[test]
    fn tunables_are_clamped() {
        let config = SynthConfig {
            fade_ms: 500.0,
            harmonic_count: 0,
            harmonic_decay: 3.0,
            formant_weights: [2.0, -1.0, 0.5],
            agc_rms_level: Some(f64::NAN),
            ..SynthConfig::default()
        }
        .clamped();
        assert_eq!(config.fade_ms, MAX_FADE_MS);
        assert_eq!(config.harmonic_count, 1);
        assert_eq!(config.harmonic_decay, 1.0);
        assert_eq!(config.formant_weights, [1.0, 0.0, 0.5]);
        assert_eq!(config.agc_rms_level, Some(DEFAULT_AGC_RMS_LEVEL));
    }
}
