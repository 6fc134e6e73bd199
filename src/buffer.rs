use crate::math::round;
use alloc::vec::Vec;

/// Full-scale amplitude of a unit signal.
pub const FULL_SCALE: f64 = 32767.0;

/// Mono 16-bit PCM samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    sample_rate: u32,
    samples: Vec<i16>,
}

impl AudioBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        AudioBuffer {
            sample_rate,
            samples: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_samples(sample_rate: u32, samples: Vec<i16>) -> Self {
        AudioBuffer {
            sample_rate,
            samples,
        }
    }

    /// Converts a unit-range signal, scaled by `gain`, to 16-bit samples.
    /// Anything beyond full scale is clipped.
    #[must_use]
    pub fn from_unit_signal(sample_rate: u32, signal: &[f64], gain: f64) -> Self {
        let samples = signal.iter().map(|x| clip_to_i16(x * gain * FULL_SCALE)).collect();
        AudioBuffer {
            sample_rate,
            samples,
        }
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    #[must_use]
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Rounds to the nearest 16-bit value, saturating at the extremes. NaN maps to 0.
#[must_use]
pub fn clip_to_i16(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    round(value).clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}
