//! Per-request voice settings and the named presets.

use crate::error::{Error, Result};
use alloc::string::ToString;
use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;
use log::warn;

pub const PITCH_RANGE: RangeInclusive<f64> = 0.5..=2.0;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.5..=2.0;
pub const VOLUME_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const BREATHINESS_RANGE: RangeInclusive<f64> = 0.0..=1.0;

pub const DEFAULT_PITCH: f64 = 1.0;
pub const DEFAULT_SPEED: f64 = 1.0;
/// Mid-scale gain.
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Pitch, speed and loudness of one synthesis request.
///
/// Values outside their valid range are clamped, never rejected, so a profile
/// can always be rendered. [`VoiceProfile::new`] clamps at construction and the
/// renderer clamps again, which covers profiles built with struct syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VoiceProfile {
    /// frequency multiplier for every oscillator, 0.5 .. 2.0
    pub pitch: f64,
    /// duration divisor for every phoneme, 0.5 .. 2.0
    pub speed: f64,
    /// final linear gain, 0 .. 1
    pub volume: f64,
    /// share of white noise mixed into voiced phonemes, 0 .. 1
    pub breathiness: f64,
    /// preset this profile was built from, if any
    pub preset: Option<VoicePreset>,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        VoiceProfile {
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            volume: DEFAULT_VOLUME,
            breathiness: 0.0,
            preset: None,
        }
    }
}

impl VoiceProfile {
    /// Builds a profile, clamping every value into its valid range.
    #[must_use]
    pub fn new(pitch: f64, speed: f64, volume: f64) -> Self {
        VoiceProfile {
            pitch,
            speed,
            volume,
            ..VoiceProfile::default()
        }
        .clamped()
    }

    #[must_use]
    pub fn with_breathiness(self, breathiness: f64) -> Self {
        VoiceProfile {
            breathiness,
            ..self
        }
        .clamped()
    }

    /// Looks up a preset by name, see [`VoicePreset`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] if no preset has that name.
    pub fn from_preset_name(name: &str) -> Result<Self> {
        Ok(name.parse::<VoicePreset>()?.profile())
    }

    /// Returns a copy with every value inside its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        VoiceProfile {
            pitch: clamp_logged("pitch", self.pitch, &PITCH_RANGE, DEFAULT_PITCH),
            speed: clamp_logged("speed", self.speed, &SPEED_RANGE, DEFAULT_SPEED),
            volume: clamp_logged("volume", self.volume, &VOLUME_RANGE, DEFAULT_VOLUME),
            breathiness: clamp_logged("breathiness", self.breathiness, &BREATHINESS_RANGE, 0.0),
            preset: self.preset,
        }
    }
}

/// Clamps `value` into `range`. NaN falls back to `default`.
// exact comparison is intended: any change made by the clamp gets logged
#[allow(clippy::float_cmp)]
pub(crate) fn clamp_logged(
    name: &str,
    value: f64,
    range: &RangeInclusive<f64>,
    default: f64,
) -> f64 {
    if value.is_nan() {
        warn!("{name} is NaN, using {default}");
        return default;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warn!(
            "{name} {value} outside {}..={}, clamped to {clamped}",
            range.start(),
            range.end()
        );
    }
    clamped
}

/// Named bundles of voice settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VoicePreset {
    Normal,
    Fast,
    Slow,
    /// low, flat and slightly slow
    Robot,
    /// lowest pitch, a little louder
    Deep,
    High,
    /// breathy and quiet
    Whisper,
    Excited,
    Calm,
}

impl VoicePreset {
    pub const ALL: [VoicePreset; 9] = [
        VoicePreset::Normal,
        VoicePreset::Fast,
        VoicePreset::Slow,
        VoicePreset::Robot,
        VoicePreset::Deep,
        VoicePreset::High,
        VoicePreset::Whisper,
        VoicePreset::Excited,
        VoicePreset::Calm,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            VoicePreset::Normal => "normal",
            VoicePreset::Fast => "fast",
            VoicePreset::Slow => "slow",
            VoicePreset::Robot => "robot",
            VoicePreset::Deep => "deep",
            VoicePreset::High => "high",
            VoicePreset::Whisper => "whisper",
            VoicePreset::Excited => "excited",
            VoicePreset::Calm => "calm",
        }
    }

    /// The settings this preset stands for.
    ///
    /// | preset  | pitch | speed | volume | breathiness |
    /// |---------|-------|-------|--------|-------------|
    /// | normal  | 1.0   | 1.0   | 0.5    | 0.0         |
    /// | fast    | 1.0   | 1.43  | 0.5    | 0.0         |
    /// | slow    | 1.0   | 0.69  | 0.5    | 0.0         |
    /// | robot   | 0.6   | 0.86  | 0.45   | 0.0         |
    /// | deep    | 0.5   | 0.91  | 0.55   | 0.0         |
    /// | high    | 1.6   | 1.03  | 0.5    | 0.0         |
    /// | whisper | 0.8   | 0.8   | 0.3    | 0.8         |
    /// | excited | 1.4   | 1.26  | 0.6    | 0.0         |
    /// | calm    | 0.9   | 0.86  | 0.425  | 0.0         |
    #[must_use]
    pub fn profile(self) -> VoiceProfile {
        let (pitch, speed, volume, breathiness) = match self {
            VoicePreset::Normal => (1.0, 1.0, 0.5, 0.0),
            VoicePreset::Fast => (1.0, 1.43, 0.5, 0.0),
            VoicePreset::Slow => (1.0, 0.69, 0.5, 0.0),
            VoicePreset::Robot => (0.6, 0.86, 0.45, 0.0),
            VoicePreset::Deep => (0.5, 0.91, 0.55, 0.0),
            VoicePreset::High => (1.6, 1.03, 0.5, 0.0),
            VoicePreset::Whisper => (0.8, 0.8, 0.3, 0.8),
            VoicePreset::Excited => (1.4, 1.26, 0.6, 0.0),
            VoicePreset::Calm => (0.9, 0.86, 0.425, 0.0),
        };
        VoiceProfile {
            pitch,
            speed,
            volume,
            breathiness,
            preset: Some(self),
        }
    }
}

impl fmt::Display for VoicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VoicePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        VoicePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

impl From<VoicePreset> for VoiceProfile {
    fn from(preset: VoicePreset) -> Self {
        preset.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mid_scale() {
        let voice = VoiceProfile::default();
        assert_eq!(voice.pitch, 1.0);
        assert_eq!(voice.speed, 1.0);
        assert_eq!(voice.volume, 0.5);
        assert_eq!(voice.preset, None);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let voice = VoiceProfile::new(5.0, 0.1, -1.0);
        assert_eq!(voice.pitch, 2.0);
        assert_eq!(voice.speed, 0.5);
        assert_eq!(voice.volume, 0.0);
    }

    #[test]
    fn nan_falls_back_to_default() {
        let voice = VoiceProfile::new(f64::NAN, 1.5, f64::NAN);
        assert_eq!(voice.pitch, DEFAULT_PITCH);
        assert_eq!(voice.speed, 1.5);
        assert_eq!(voice.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn presets_round_trip_by_name() {
        for preset in VoicePreset::ALL {
            let parsed: VoicePreset = preset.to_string().parse().unwrap();
            assert_eq!(parsed, preset);
            assert_eq!(preset.profile().preset, Some(preset));
        }
        assert_eq!("  ROBOT ".parse::<VoicePreset>(), Ok(VoicePreset::Robot));
    }

    #[test]
    fn preset_profiles_are_in_range() {
        for preset in VoicePreset::ALL {
            let voice = preset.profile();
            assert_eq!(voice, voice.clamped(), "{preset}");
        }
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert_eq!(
            VoiceProfile::from_preset_name("chipmunk"),
            Err(Error::UnknownPreset("chipmunk".into()))
        );
    }

    #[test]
    fn whisper_is_breathy_and_quiet() {
        let whisper = VoicePreset::Whisper.profile();
        let normal = VoicePreset::Normal.profile();
        assert!(whisper.breathiness > normal.breathiness);
        assert!(whisper.volume < normal.volume);
    }
}
