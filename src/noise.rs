//! Unvoiced sound: band-weighted pseudo-random noise.

use crate::filter::{HpFilter1, LpFilter1};
use crate::math::sqrt;
use crate::table::Phoneme;
use crate::traits::Filter;
use alloc::{vec, vec::Vec};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Upper bound of the loudness compensation for narrow noise bands.
pub const MAX_BAND_GAIN: f64 = 4.0;

/// Seedable noise source for fricatives and breathiness.
///
/// The band of a fricative is taken from its first two formant slots: white
/// noise goes through a one-pole low-pass at the upper edge, then a one-pole
/// high-pass at the lower edge.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    rng: Pcg32,
    nyquist: f64,
    lp: LpFilter1,
    hp: HpFilter1,
}

impl NoiseGenerator {
    #[must_use]
    pub fn new(seed: u64, sample_rate: u32) -> Self {
        NoiseGenerator {
            rng: Pcg32::seed_from_u64(seed),
            nyquist: f64::from(sample_rate) / 2.0,
            lp: LpFilter1::new(sample_rate),
            hp: HpFilter1::new(sample_rate),
        }
    }

    /// Returns a random number within the range -1 .. 1.
    pub fn white(&mut self) -> f64 {
        self.rng.random_range(-1.0..=1.0)
    }

    /// Renders `len` samples of band-limited noise for `phoneme`.
    pub fn render(&mut self, phoneme: &Phoneme, len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len];
        self.render_into(phoneme, &mut out);
        out
    }

    /// Like [`NoiseGenerator::render`], writing into `out`.
    pub fn render_into(&mut self, phoneme: &Phoneme, out: &mut [f64]) {
        let [low, high, _] = phoneme.formants;
        // keep some band below Nyquist even for very bright fricatives
        let low = low.min(self.nyquist / 2.0);
        let high = high.min(self.nyquist);
        self.lp.set_cutoff(high);
        self.hp.set_cutoff(low);
        self.lp.reset();
        self.hp.reset();

        let gain = band_gain(low, high, self.nyquist);
        for sample in out.iter_mut() {
            let x = self.white();
            let y = self.hp.step(self.lp.step(x));
            *sample = (y * gain).clamp(-1.0, 1.0);
        }
    }
}

/// Narrow bands carry less power than broadband noise; boost them by the
/// square root of the lost bandwidth.
fn band_gain(low: f64, high: f64, nyquist: f64) -> f64 {
    let width = (high - low).max(1.0);
    sqrt(nyquist / width).clamp(1.0, MAX_BAND_GAIN)
}
