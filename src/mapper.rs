//! Text to phoneme conversion.
//!
//! The mapper lowercases the text, splits it into words and separators,
//! respells a handful of common words whose spelling misleads the letter
//! rules, then walks each word with the table's longest-match rule.

use crate::table::{AcousticTable, LONG_PAUSE, NEUTRAL_VOWEL, Phoneme, SHORT_PAUSE, WORD_GAP};
use alloc::string::String;
use alloc::vec::Vec;

/// Whole-word respellings applied before grapheme matching.
const RESPELLINGS: [(&str, &str); 9] = [
    ("hello", "helo"),
    ("world", "werld"),
    ("arduino", "ardeeno"),
    ("voice", "voys"),
    ("text", "tekst"),
    ("the", "thu"),
    ("is", "iz"),
    ("are", "ar"),
    ("you", "yu"),
];

/// Maps text to phonemes using a fixed acoustic table.
#[derive(Debug, Clone, Copy)]
pub struct PhonemeMapper {
    table: &'static AcousticTable,
}

impl Default for PhonemeMapper {
    fn default() -> Self {
        PhonemeMapper::new(AcousticTable::standard())
    }
}

impl PhonemeMapper {
    #[must_use]
    pub fn new(table: &'static AcousticTable) -> Self {
        PhonemeMapper { table }
    }

    #[must_use]
    pub fn table(&self) -> &'static AcousticTable {
        self.table
    }

    /// Converts `text` into an ordered phoneme sequence. Never fails.
    #[must_use]
    pub fn map(&self, text: &str) -> Vec<Phoneme> {
        let lowered = text.to_lowercase();
        let mut phonemes = Vec::with_capacity(lowered.len());
        let mut word = String::new();
        let mut in_gap = false;

        for c in lowered.chars() {
            if c.is_alphanumeric() {
                word.push(c);
                in_gap = false;
                continue;
            }
            self.flush_word(&mut word, &mut phonemes);
            match separator_pause(c) {
                Some(pause) => {
                    phonemes.push(pause);
                    in_gap = false;
                }
                // runs of whitespace and stray symbols make a single gap
                None if !in_gap => {
                    phonemes.push(WORD_GAP);
                    in_gap = true;
                }
                None => {}
            }
        }
        self.flush_word(&mut word, &mut phonemes);
        phonemes
    }

    fn flush_word(&self, word: &mut String, out: &mut Vec<Phoneme>) {
        if word.is_empty() {
            return;
        }
        let spelled = respell(word);
        let mut rest = spelled;
        while let Some(c) = rest.chars().next() {
            let consumed = match self.table.longest_match(rest) {
                Some((phoneme, len)) => {
                    out.push(phoneme);
                    len
                }
                None => {
                    out.push(NEUTRAL_VOWEL);
                    c.len_utf8()
                }
            };
            rest = &rest[consumed..];
        }
        word.clear();
    }
}

/// Pause for sentence punctuation, `None` for any other separator.
fn separator_pause(c: char) -> Option<Phoneme> {
    match c {
        ',' | ';' | ':' => Some(SHORT_PAUSE),
        '.' | '!' | '?' => Some(LONG_PAUSE),
        _ => None,
    }
}

fn respell(word: &str) -> &str {
    RESPELLINGS
        .iter()
        .find(|(from, _)| *from == word)
        .map_or(word, |(_, to)| *to)
}

/// Maps text with the standard table.
#[must_use]
pub fn text_to_phonemes(text: &str) -> Vec<Phoneme> {
    PhonemeMapper::default().map(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::PhonemeClass;
    use alloc::vec::Vec;

    fn symbols(text: &str) -> Vec<&'static str> {
        text_to_phonemes(text).iter().map(|p| p.symbol).collect()
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(symbols("SHOP"), symbols("shop"));
        assert_eq!(symbols("shop"), ["sh", "o", "p"]);
    }

    #[test]
    fn longest_match_first() {
        assert_eq!(symbols("think"), ["th", "i", "n", "k"]);
        assert_eq!(symbols("sing"), ["s", "i", "ng"]);
    }

    #[test]
    fn punctuation_pauses() {
        assert_eq!(symbols("a, b. c! d? e"), [
            "a", ",", "_", "b", ".", "_", "c", ".", "_", "d", ".", "_", "e"
        ]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(symbols("a  \t\n b"), ["a", "_", "b"]);
        assert_eq!(symbols("a - b"), ["a", "_", "b"]);
    }

    #[test]
    fn unknown_characters_degrade_to_neutral_vowel() {
        let phonemes = text_to_phonemes("7é");
        assert_eq!(phonemes, [NEUTRAL_VOWEL, NEUTRAL_VOWEL]);
    }

    #[test]
    fn respelled_words() {
        assert_eq!(symbols("the"), ["th", "u"]);
        assert_eq!(symbols("Hello"), ["h", "e", "l", "o"]);
        // "ee" sounds as the i vowel
        assert_eq!(symbols("Arduino"), ["a", "r", "d", "i", "n", "o"]);
        // only whole words are respelled
        assert_eq!(symbols("theme"), ["th", "e", "m", "e"]);
    }

    #[test]
    fn empty_text() {
        assert!(text_to_phonemes("").is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "Hello from a tiny board. This is offline voice generation!";
        assert_eq!(text_to_phonemes(text), text_to_phonemes(text));
    }

    #[test]
    fn silence_only_for_separators() {
        for phoneme in text_to_phonemes("quick brown fox") {
            assert_eq!(phoneme.class == PhonemeClass::Silence, phoneme.symbol == "_");
        }
    }
}
