//! Voiced sound: a bank of sine partials.
//!
//! A voiced phoneme is the sum of a harmonic series on `F0 * pitch` and one
//! sine per formant at `F * pitch`. Each partial slot owns a phase
//! accumulator that lives as long as the bank, so back-to-back segments
//! continue each partial where the previous segment left it.

use crate::config::SynthConfig;
use crate::math::sin;
use crate::table::Phoneme;
use alloc::{vec, vec::Vec};
use core::f64::consts::PI;

pub const TWO_PI: f64 = 2.0 * PI;

/// Running phase of one oscillator, kept in `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseAccumulator {
    phase: f64,
}

impl PhaseAccumulator {
    #[must_use]
    pub fn new() -> Self {
        PhaseAccumulator { phase: 0.0 }
    }

    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Returns the current phase, then moves it on by one sample at `freq`.
    pub fn advance(&mut self, freq: f64, sample_rate: f64) -> f64 {
        let current = self.phase;
        self.phase += TWO_PI * freq / sample_rate;
        while self.phase >= TWO_PI {
            self.phase -= TWO_PI;
        }
        current
    }
}

/// Renders voiced segments as summed sine partials with continuous phase.
#[derive(Debug, Clone)]
pub struct FormantOscillatorBank {
    sample_rate: f64,
    /// amplitude of harmonic k+1, harmonic mix already applied
    harmonic_weights: Vec<f64>,
    formant_weights: [f64; 3],
    harmonics: Vec<PhaseAccumulator>,
    formants: [PhaseAccumulator; 3],
}

impl FormantOscillatorBank {
    #[must_use]
    pub fn new(config: &SynthConfig) -> Self {
        let mut harmonic_weights = Vec::with_capacity(config.harmonic_count);
        let mut weight = config.harmonic_mix;
        for _ in 0..config.harmonic_count {
            harmonic_weights.push(weight);
            weight *= config.harmonic_decay;
        }
        FormantOscillatorBank {
            sample_rate: f64::from(config.sample_rate),
            harmonics: vec![PhaseAccumulator::new(); harmonic_weights.len()],
            harmonic_weights,
            formant_weights: config.formant_weights,
            formants: [PhaseAccumulator::new(); 3],
        }
    }

    /// Renders `len` samples of `phoneme` with every frequency scaled by `pitch`.
    /// The result stays within -1 ..= 1.
    pub fn render(&mut self, phoneme: &Phoneme, pitch: f64, len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len];
        self.render_into(phoneme, pitch, &mut out);
        out
    }

    /// Like [`FormantOscillatorBank::render`], writing into `out`.
    pub fn render_into(&mut self, phoneme: &Phoneme, pitch: f64, out: &mut [f64]) {
        let nyquist = self.sample_rate / 2.0;
        let audible = |f: f64| f > 0.0 && f < nyquist;
        let f0 = phoneme.f0 * pitch;

        let harmonic_freqs: Vec<f64> = (1..=self.harmonics.len())
            .map(|k| k as f64 * f0)
            .collect();
        let formant_freqs = phoneme.formants.map(|f| f * pitch);

        let total_weight: f64 = harmonic_freqs
            .iter()
            .zip(&self.harmonic_weights)
            .chain(formant_freqs.iter().zip(&self.formant_weights))
            .filter(|(f, _)| audible(**f))
            .map(|(_, w)| w)
            .sum();
        if total_weight <= 0.0 {
            out.fill(0.0);
            return;
        }

        for sample in out.iter_mut() {
            let mut v = 0.0;
            for ((osc, &f), &w) in self
                .harmonics
                .iter_mut()
                .zip(&harmonic_freqs)
                .zip(&self.harmonic_weights)
            {
                if audible(f) {
                    v += w * sin(osc.advance(f, self.sample_rate));
                }
            }
            for ((osc, &f), &w) in self
                .formants
                .iter_mut()
                .zip(&formant_freqs)
                .zip(&self.formant_weights)
            {
                if audible(f) {
                    v += w * sin(osc.advance(f, self.sample_rate));
                }
            }
            *sample = v / total_weight;
        }
    }
}
