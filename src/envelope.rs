//! Attack/release shaping of rendered segments.
//!
//! Every voiced or noise segment starts and ends at zero gain, so segment
//! boundaries never step abruptly. Silence is not shaped at all.

use crate::math::{exp, round};

/// Steepness of the exponential fade; larger is a slower start.
pub const EXPONENTIAL_STEEPNESS: f64 = 4.0;

/// Shape of the fade-in and fade-out ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FadeCurve {
    #[default]
    Linear,
    /// `(e^(kx) - 1) / (e^k - 1)`, quiet for longer then rising quickly
    Exponential,
}

impl FadeCurve {
    /// Maps ramp progress `x` in 0 .. 1 to a gain in 0 .. 1.
    #[must_use]
    pub fn shape(self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => x,
            FadeCurve::Exponential => {
                (exp(EXPONENTIAL_STEEPNESS * x) - 1.0) / (exp(EXPONENTIAL_STEEPNESS) - 1.0)
            }
        }
    }
}

/// Applies a fade-in, sustain, fade-out gain envelope to a segment.
///
/// When a segment is shorter than two fades, both fades shrink to half the
/// segment and meet at its midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShaper {
    fade_samples: usize,
    curve: FadeCurve,
}

impl EnvelopeShaper {
    #[must_use]
    pub fn new(fade_ms: f64, sample_rate: u32, curve: FadeCurve) -> Self {
        let fade = round(fade_ms.max(0.0) / 1000.0 * f64::from(sample_rate));
        EnvelopeShaper {
            fade_samples: fade as usize,
            curve,
        }
    }

    /// Length of one full fade, in samples.
    #[must_use]
    pub fn fade_samples(&self) -> usize {
        self.fade_samples
    }

    /// Gain of sample `i` in a segment of `len` samples.
    #[must_use]
    pub fn gain_at(&self, i: usize, len: usize) -> f64 {
        if i >= len {
            return 0.0;
        }
        if self.fade_samples == 0 {
            return 1.0;
        }
        let fade = self.fade_samples.min(len / 2).max(1) as f64;
        let rise = i as f64 / fade;
        let fall = (len - 1 - i) as f64 / fade;
        self.curve.shape(rise.min(fall))
    }

    /// Shapes `segment` in place.
    pub fn apply(&self, segment: &mut [f64]) {
        let len = segment.len();
        for (i, sample) in segment.iter_mut().enumerate() {
            *sample *= self.gain_at(i, len);
        }
    }
}
