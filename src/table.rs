//! The acoustic table: grapheme patterns and the phoneme each one sounds as.
//!
//! Formant values for the vowels are the classic averages for an adult male
//! speaker. The consonant "formants" are only rough resonance positions for a
//! short voiced burst, and for fricatives F1 and F2 are the lower and upper
//! edges of the noise band.

/// Broad sound class of a phoneme, which selects how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonemeClass {
    /// Voiced, rendered by the oscillator bank at full length.
    Vowel,
    /// Voiced, rendered by the oscillator bank as a shorter, quieter burst.
    Consonant,
    /// Rendered as band-weighted noise, optionally blended with voicing.
    Fricative,
    /// A pause, rendered as a run of zero samples.
    Silence,
}

impl PhonemeClass {
    /// `true` for classes rendered by the oscillator bank.
    #[must_use]
    pub fn is_voiced(self) -> bool {
        matches!(self, PhonemeClass::Vowel | PhonemeClass::Consonant)
    }
}

/// A single sound unit, ready to be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phoneme {
    /// Short printable name, e.g. `"a"`, `"sh"` or `","`.
    pub symbol: &'static str,
    pub class: PhonemeClass,
    /// fundamental frequency in Hz, 0 for noise and silence
    pub f0: f64,
    /// F1, F2, F3 in Hz. For fricatives, F1 and F2 bound the noise band.
    pub formants: [f64; 3],
    /// duration at speed 1.0, in milliseconds
    pub duration_ms: f64,
    /// relative amplitude, 0 .. 1
    pub amplitude: f64,
    /// share of tonal signal blended into a fricative, 0 .. 1
    pub voicing: f64,
}

/// Base pitch of every voiced template, in Hz.
pub const BASE_F0: f64 = 120.0;
/// Nominal duration of a vowel, in milliseconds.
pub const VOWEL_MS: f64 = 150.0;
/// Nominal duration of a voiced consonant, in milliseconds.
pub const CONSONANT_MS: f64 = 80.0;
/// Nominal duration of a fricative, in milliseconds.
pub const FRICATIVE_MS: f64 = 100.0;
/// Pause between words.
pub const WORD_GAP_MS: f64 = 80.0;
/// Pause after `,` `;` `:`.
pub const SHORT_PAUSE_MS: f64 = 200.0;
/// Pause after `.` `!` `?`.
pub const LONG_PAUSE_MS: f64 = 400.0;

const fn vowel(symbol: &'static str, f1: f64, f2: f64, f3: f64) -> Phoneme {
    Phoneme {
        symbol,
        class: PhonemeClass::Vowel,
        f0: BASE_F0,
        formants: [f1, f2, f3],
        duration_ms: VOWEL_MS,
        amplitude: 1.0,
        voicing: 1.0,
    }
}

const fn consonant(symbol: &'static str, f1: f64, f2: f64, f3: f64) -> Phoneme {
    Phoneme {
        symbol,
        class: PhonemeClass::Consonant,
        f0: BASE_F0,
        formants: [f1, f2, f3],
        duration_ms: CONSONANT_MS,
        amplitude: 0.6,
        voicing: 1.0,
    }
}

const fn fricative(
    symbol: &'static str,
    low: f64,
    high: f64,
    amplitude: f64,
    voicing: f64,
) -> Phoneme {
    Phoneme {
        symbol,
        class: PhonemeClass::Fricative,
        f0: BASE_F0,
        formants: [low, high, (low + high) / 2.0],
        duration_ms: FRICATIVE_MS,
        amplitude,
        voicing,
    }
}

const fn pause(symbol: &'static str, duration_ms: f64) -> Phoneme {
    Phoneme {
        symbol,
        class: PhonemeClass::Silence,
        f0: 0.0,
        formants: [0.0; 3],
        duration_ms,
        amplitude: 0.0,
        voicing: 0.0,
    }
}

/// The neutral vowel used for letters and digits the table does not know.
pub const NEUTRAL_VOWEL: Phoneme = vowel("ə", 500.0, 1500.0, 2500.0);
/// Pause emitted for whitespace and stray symbols.
pub const WORD_GAP: Phoneme = pause("_", WORD_GAP_MS);
/// Pause emitted for `,` `;` `:`.
pub const SHORT_PAUSE: Phoneme = pause(",", SHORT_PAUSE_MS);
/// Pause emitted for `.` `!` `?`.
pub const LONG_PAUSE: Phoneme = pause(".", LONG_PAUSE_MS);

const VOWEL_A: Phoneme = vowel("a", 730.0, 1090.0, 2440.0);
const VOWEL_E: Phoneme = vowel("e", 530.0, 1840.0, 2480.0);
const VOWEL_I: Phoneme = vowel("i", 270.0, 2290.0, 3010.0);
const VOWEL_O: Phoneme = vowel("o", 570.0, 840.0, 2410.0);
const VOWEL_U: Phoneme = vowel("u", 440.0, 1020.0, 2240.0);
const CONS_K: Phoneme = consonant("k", 250.0, 500.0, 2400.0);
const CONS_W: Phoneme = consonant("w", 300.0, 900.0, 2200.0);
const FRIC_F: Phoneme = fricative("f", 3000.0, 6000.0, 0.35, 0.0);

static STANDARD_ENTRIES: [(&str, Phoneme); 39] = [
    // digraphs
    ("sh", fricative("sh", 1800.0, 7000.0, 0.6, 0.0)),
    ("ch", fricative("ch", 1500.0, 6000.0, 0.5, 0.0)),
    ("th", fricative("th", 1200.0, 6500.0, 0.3, 0.2)),
    ("ph", FRIC_F),
    ("wh", CONS_W),
    ("ck", CONS_K),
    ("ng", consonant("ng", 250.0, 1000.0, 2300.0)),
    ("ee", VOWEL_I),
    ("ea", VOWEL_I),
    ("oo", VOWEL_U),
    ("ai", VOWEL_E),
    ("ay", VOWEL_E),
    ("oa", VOWEL_O),
    // vowels
    ("a", VOWEL_A),
    ("e", VOWEL_E),
    ("i", VOWEL_I),
    ("o", VOWEL_O),
    ("u", VOWEL_U),
    // voiced consonants
    ("b", consonant("b", 150.0, 300.0, 2200.0)),
    ("c", CONS_K),
    ("d", consonant("d", 150.0, 300.0, 2600.0)),
    ("g", consonant("g", 200.0, 400.0, 2300.0)),
    ("j", consonant("j", 200.0, 500.0, 2500.0)),
    ("k", CONS_K),
    ("l", consonant("l", 400.0, 1500.0, 2700.0)),
    ("m", consonant("m", 250.0, 1000.0, 2200.0)),
    ("n", consonant("n", 300.0, 1500.0, 2500.0)),
    ("p", consonant("p", 150.0, 300.0, 2200.0)),
    ("q", CONS_K),
    ("r", consonant("r", 350.0, 1600.0, 1900.0)),
    ("t", consonant("t", 200.0, 400.0, 2600.0)),
    ("v", consonant("v", 200.0, 600.0, 2200.0)),
    ("w", CONS_W),
    ("x", consonant("x", 200.0, 400.0, 2400.0)),
    ("y", consonant("y", 300.0, 2200.0, 2900.0)),
    // fricatives
    ("s", fricative("s", 4000.0, 8000.0, 0.5, 0.0)),
    ("z", fricative("z", 3000.0, 7000.0, 0.5, 0.35)),
    ("f", FRIC_F),
    ("h", fricative("h", 500.0, 2000.0, 0.3, 0.0)),
];

static STANDARD: AcousticTable = AcousticTable::new(&STANDARD_ENTRIES);

/// Read-only mapping from lowercase grapheme patterns to phoneme templates.
///
/// Matching is longest-pattern-first; between patterns of equal length the
/// earlier entry wins.
#[derive(Debug, Clone, Copy)]
pub struct AcousticTable {
    entries: &'static [(&'static str, Phoneme)],
}

impl AcousticTable {
    /// Wraps a custom set of entries. Patterns must be lowercase and non-empty.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, Phoneme)]) -> Self {
        AcousticTable { entries }
    }

    /// The built-in English-ish table, shared by every synthesis call.
    #[must_use]
    pub fn standard() -> &'static AcousticTable {
        &STANDARD
    }

    /// Finds the longest pattern that prefixes `input`.
    /// Returns the phoneme and the number of bytes it consumes.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<(Phoneme, usize)> {
        let mut best: Option<(Phoneme, usize)> = None;
        for (pattern, phoneme) in self.entries {
            if pattern.is_empty() || !input.starts_with(pattern) {
                continue;
            }
            if best.is_none_or(|(_, len)| pattern.len() > len) {
                best = Some((*phoneme, pattern.len()));
            }
        }
        best
    }

    /// Exact lookup of a single pattern.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<&Phoneme> {
        self.entries
            .iter()
            .find(|(p, _)| *p == pattern)
            .map(|(_, phoneme)| phoneme)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static Phoneme)> {
        self.entries.iter().map(|(p, phoneme)| (*p, phoneme))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
