//! Error type for the synthesis core.
//!
//! Synthesis of text never fails: unknown characters degrade to a neutral
//! vowel and out-of-range settings are clamped. What remains are preset names
//! that do not exist and containers that are not 16-bit mono PCM.

use alloc::string::String;
use thiserror::Error;

/// Result type for voder operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when configuring a voice or handling a container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The named voice preset does not exist.
    #[error("unknown voice preset: {0:?}")]
    UnknownPreset(String),

    /// The container does not start with a `RIFF` header.
    #[error("not a RIFF container")]
    NotRiff,

    /// The RIFF container is not of form type `WAVE`.
    #[error("RIFF container is not WAVE")]
    NotWave,

    /// A required chunk is absent.
    #[error("missing {0:?} chunk")]
    MissingChunk(&'static str),

    /// The `fmt ` chunk describes something other than mono 16-bit PCM.
    #[error(
        "unsupported format: tag {format_tag}, {channels} channel(s), {bits_per_sample} bits per sample"
    )]
    UnsupportedFormat {
        /// Audio format tag, 1 for PCM.
        format_tag: u16,
        /// Channel count.
        channels: u16,
        /// Bits per sample.
        bits_per_sample: u16,
    },

    /// A chunk claims more bytes than the container holds.
    #[error("container truncated: {0}")]
    Truncated(&'static str),

    /// The byte rate of this sample rate does not fit the 32-bit header field.
    #[error("sample rate {0} Hz is too high for a WAV header")]
    SampleRateTooHigh(u32),

    /// The sample data does not fit the 32-bit RIFF size fields.
    #[error("{samples} samples do not fit in a RIFF container")]
    ContainerTooLarge {
        /// Number of samples that were to be encoded.
        samples: usize,
    },
}
