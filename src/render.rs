//! Mixing phonemes into one PCM buffer.
//!
//! Segment lengths are decided up front by a [`SampleClock`], then every
//! segment is rendered into its slice of one shared mix buffer. The oscillator
//! bank and the noise generator live for the whole call, so phases and the
//! noise sequence run on across segment boundaries.

use crate::buffer::AudioBuffer;
use crate::config::SynthConfig;
use crate::envelope::EnvelopeShaper;
use crate::math::{floor, sqrt};
use crate::noise::NoiseGenerator;
use crate::oscillator::FormantOscillatorBank;
use crate::table::{NEUTRAL_VOWEL, Phoneme, PhonemeClass};
use crate::voice::VoiceProfile;
use alloc::{vec, vec::Vec};
use log::{debug, trace};

/// Converts phoneme durations to sample counts without drift.
///
/// Each call adds the exact (fractional) length of a segment to a running
/// total and returns how many whole samples that total has gained, so the
/// rounding error never builds up past a single sample.
///
/// # Formulas
///
/// ```text
/// exact    += duration_ms * fs / (1000 * speed)
/// n         = floor(exact) - emitted
/// emitted  += n
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleClock {
    sample_rate: f64,
    exact: f64,
    emitted: usize,
}

impl SampleClock {
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        SampleClock {
            sample_rate: f64::from(sample_rate),
            exact: 0.0,
            emitted: 0,
        }
    }

    /// Returns the sample count of the next segment.
    pub fn advance(&mut self, duration_ms: f64, speed: f64) -> usize {
        if duration_ms > 0.0 && speed > 0.0 {
            self.exact += duration_ms * self.sample_rate / (1000.0 * speed);
        }
        let target = floor(self.exact) as usize;
        let n = target.saturating_sub(self.emitted);
        self.emitted += n;
        n
    }

    /// Samples handed out so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Renders phoneme sequences with a fixed [`SynthConfig`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: SynthConfig,
}

impl Renderer {
    #[must_use]
    pub fn new(config: SynthConfig) -> Self {
        Renderer {
            config: config.clamped(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Sample count of every phoneme at `speed`, in order.
    #[must_use]
    pub fn segment_lengths(&self, phonemes: &[Phoneme], speed: f64) -> Vec<usize> {
        let mut clock = SampleClock::new(self.config.sample_rate);
        phonemes
            .iter()
            .map(|p| clock.advance(p.duration_ms, speed))
            .collect()
    }

    /// Renders `phonemes` in order with `voice`.
    ///
    /// Pauses become runs of zeros. Every other segment is scaled by its
    /// phoneme's amplitude and shaped by the fade envelope. The voice volume
    /// is applied last, on conversion to 16 bit.
    #[must_use]
    pub fn render(&self, phonemes: &[Phoneme], voice: &VoiceProfile) -> AudioBuffer {
        let voice = voice.clamped();
        let sample_rate = self.config.sample_rate;
        let lengths = self.segment_lengths(phonemes, voice.speed);
        let total: usize = lengths.iter().sum();
        let mut mix = vec![0.0; total];

        let mut bank = FormantOscillatorBank::new(&self.config);
        let mut noise = NoiseGenerator::new(self.config.noise_seed, sample_rate);
        let envelope = EnvelopeShaper::new(self.config.fade_ms, sample_rate, self.config.fade_curve);

        let mut pos = 0;
        for (phoneme, &len) in phonemes.iter().zip(&lengths) {
            let segment = &mut mix[pos..pos + len];
            pos += len;
            trace!(
                "{:?} {:?}: {len} samples, f0 {:.1} Hz",
                phoneme.symbol,
                phoneme.class,
                phoneme.f0 * voice.pitch
            );
            match phoneme.class {
                PhonemeClass::Silence => continue,
                PhonemeClass::Fricative => {
                    render_fricative(&mut bank, &mut noise, phoneme, voice.pitch, segment);
                }
                PhonemeClass::Vowel | PhonemeClass::Consonant => {
                    bank.render_into(phoneme, voice.pitch, segment);
                    if voice.breathiness > 0.0 {
                        for s in segment.iter_mut() {
                            *s = (1.0 - voice.breathiness) * *s + voice.breathiness * noise.white();
                        }
                    }
                }
            }
            for s in segment.iter_mut() {
                *s *= phoneme.amplitude;
            }
            envelope.apply(segment);
        }

        if let Some(level) = self.config.agc_rms_level {
            adjust_signal_gain(&mut mix, level);
        }
        debug!(
            "rendered {} phonemes into {total} samples ({:.3} s at {sample_rate} Hz)",
            phonemes.len(),
            total as f64 / f64::from(sample_rate)
        );
        AudioBuffer::from_unit_signal(sample_rate, &mix, voice.volume)
    }
}

/// Band noise, with a voice bar blended in at the phoneme's voicing share.
fn render_fricative(
    bank: &mut FormantOscillatorBank,
    noise: &mut NoiseGenerator,
    phoneme: &Phoneme,
    pitch: f64,
    segment: &mut [f64],
) {
    noise.render_into(phoneme, segment);
    let voicing = phoneme.voicing.clamp(0.0, 1.0);
    if voicing <= 0.0 {
        return;
    }
    // the voice bar sits on neutral formants, the fricative's own slots hold its noise band
    let bar = Phoneme {
        formants: NEUTRAL_VOWEL.formants,
        ..*phoneme
    };
    let tone = bank.render(&bar, pitch, segment.len());
    for (s, t) in segment.iter_mut().zip(tone) {
        *s = (1.0 - voicing) * *s + voicing * t;
    }
}

/// Scales `buf` to `target_rms`. Silent buffers are left alone.
fn adjust_signal_gain(buf: &mut [f64], target_rms: f64) {
    let rms = compute_rms(buf);
    if rms <= 0.0 {
        return;
    }
    let r = target_rms / rms;
    for b_i in buf.iter_mut() {
        *b_i *= r;
    }
}

pub(crate) fn compute_rms(buf: &[f64]) -> f64 {
    if buf.is_empty() {
        return 0.0;
    }
    sqrt(buf.iter().map(|f| f * f).sum::<f64>() / buf.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{AcousticTable, LONG_PAUSE, WORD_GAP};

    fn phoneme(pattern: &str) -> Phoneme {
        *AcousticTable::standard().get(pattern).unwrap()
    }

    #[test]
    fn vowel_length_at_default_rate() {
        let mut clock = SampleClock::new(22_050);
        assert_eq!(clock.advance(150.0, 1.0), 3307);
    }

    #[test]
    fn clock_carries_the_residue() {
        let mut clock = SampleClock::new(22_050);
        let lengths: Vec<usize> = (0..10).map(|_| clock.advance(150.0, 1.0)).collect();
        // 3307.5 per segment: the half samples add up every second call
        assert_eq!(lengths[..4], [3307, 3308, 3307, 3308]);
        assert_eq!(clock.emitted(), 33_075);
    }

    #[test]
    fn clock_never_drifts() {
        let mut clock = SampleClock::new(44_100);
        let mut exact = 0.0;
        for i in 0..1000 {
            let ms = 37.0 + f64::from(i % 7);
            clock.advance(ms, 1.3);
            exact += ms * 44_100.0 / 1300.0;
            assert!((exact - clock.emitted() as f64).abs() < 1.0);
        }
    }

    #[test]
    fn speed_halves_and_doubles_lengths() {
        let renderer = Renderer::default();
        let vowel = [phoneme("a")];
        let normal = renderer.segment_lengths(&vowel, 1.0)[0];
        let fast = renderer.segment_lengths(&vowel, 2.0)[0];
        let slow = renderer.segment_lengths(&vowel, 0.5)[0];
        assert!(normal.abs_diff(2 * fast) <= 1);
        assert_eq!(slow, 2 * normal + 1);
    }

    #[test]
    fn pauses_are_zero_runs() {
        let renderer = Renderer::default();
        let buf = renderer.render(&[WORD_GAP, LONG_PAUSE], &VoiceProfile::default());
        // 80 ms + 400 ms
        assert_eq!(buf.len(), 1764 + 8820);
        assert!(buf.samples().iter().all(|s| *s == 0));
    }

    #[test]
    fn segments_start_and_end_silent() {
        let renderer = Renderer::default();
        let phonemes = [phoneme("a"), WORD_GAP, phoneme("s"), phoneme("m")];
        let buf = renderer.render(&phonemes, &VoiceProfile::default());
        let lengths = renderer.segment_lengths(&phonemes, 1.0);
        let mut pos = 0;
        for len in lengths {
            assert_eq!(buf.samples()[pos], 0);
            assert_eq!(buf.samples()[pos + len - 1], 0);
            pos += len;
        }
    }

    #[test]
    fn volume_scales_output() {
        let renderer = Renderer::default();
        let vowel = [phoneme("a")];
        let quiet = renderer.render(&vowel, &VoiceProfile::new(1.0, 1.0, 0.25));
        let loud = renderer.render(&vowel, &VoiceProfile::new(1.0, 1.0, 1.0));
        let peak = |b: &AudioBuffer| b.samples().iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak(&loud) > 3 * peak(&quiet));
        let mute = renderer.render(&vowel, &VoiceProfile::new(1.0, 1.0, 0.0));
        assert!(mute.samples().iter().all(|s| *s == 0));
    }

    #[test]
    fn out_of_range_voice_is_clamped() {
        let renderer = Renderer::default();
        let vowel = [phoneme("a")];
        let wild = renderer.render(&vowel, &VoiceProfile {
            pitch: 9.0,
            speed: 0.01,
            volume: 5.0,
            ..VoiceProfile::default()
        });
        let edge = renderer.render(&vowel, &VoiceProfile {
            pitch: 2.0,
            speed: 0.5,
            volume: 1.0,
            ..VoiceProfile::default()
        });
        assert_eq!(wild, edge);
    }

    #[test]
    fn agc_reaches_target_level() {
        let renderer = Renderer::new(SynthConfig::default().with_agc(0.25));
        let buf = renderer.render(&[phoneme("o"), phoneme("m")], &VoiceProfile::new(1.0, 1.0, 1.0));
        let unit: Vec<f64> = buf.samples().iter().map(|s| f64::from(*s) / 32_767.0).collect();
        assert!((compute_rms(&unit) - 0.25).abs() < 0.01);
    }

    #[test]
    fn agc_leaves_silence_alone() {
        let renderer = Renderer::new(SynthConfig::default().with_agc(0.25));
        let buf = renderer.render(&[WORD_GAP], &VoiceProfile::default());
        assert!(buf.samples().iter().all(|s| *s == 0));
    }

    #[test]
    fn breathiness_changes_voiced_segments() {
        let renderer = Renderer::default();
        let vowel = [phoneme("a")];
        let clean = renderer.render(&vowel, &VoiceProfile::default());
        let breathy = renderer.render(&vowel, &VoiceProfile::default().with_breathiness(0.5));
        assert_ne!(clean, breathy);
        assert_eq!(clean.len(), breathy.len());
    }

    #[test]
    fn voiced_fricative_differs_from_unvoiced() {
        let renderer = Renderer::default();
        let mut unvoiced = phoneme("z");
        unvoiced.voicing = 0.0;
        let z = renderer.render(&[phoneme("z")], &VoiceProfile::default());
        let s = renderer.render(&[unvoiced], &VoiceProfile::default());
        assert_ne!(z, s);
    }
}
