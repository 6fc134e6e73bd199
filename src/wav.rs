//! RIFF/WAVE container for mono 16-bit PCM.
//!
//! The encoder always writes the canonical 44-byte header followed by the
//! sample data. The decoder accepts any chunk order and skips chunks it does
//! not know, so files written by other tools can be read back as long as
//! they hold mono 16-bit PCM.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use alloc::vec::Vec;

/// Size of the canonical header: RIFF descriptor, `fmt ` chunk, `data` chunk header.
pub const HEADER_LEN: usize = 44;

const PCM_FORMAT_TAG: u16 = 1;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const FMT_CHUNK_LEN: u32 = 16;

/// Format parameters written to the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Mono 16-bit PCM at `sample_rate`.
    #[must_use]
    pub fn mono16(sample_rate: u32) -> Self {
        WavFormat {
            channels: CHANNELS,
            sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
        }
    }

    /// Bytes per sample frame, `None` if it does not fit the 16-bit field.
    #[must_use]
    pub fn block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bits_per_sample / 8)
    }

    /// Bytes per second, `None` if it does not fit the 32-bit field.
    #[must_use]
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()?))
    }
}

/// Serializes [`AudioBuffer`]s as RIFF/WAVE containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveEncoder;

impl WaveEncoder {
    /// Encodes the whole container into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerTooLarge`] if the data does not fit the
    /// 32-bit size fields, or [`Error::SampleRateTooHigh`] if the byte rate
    /// does not.
    pub fn encode(&self, buffer: &AudioBuffer) -> Result<Vec<u8>> {
        let header = header(buffer)?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + buffer.len() * 2);
        bytes.extend_from_slice(&header);
        for sample in buffer.samples() {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        Ok(bytes)
    }

    /// Streams the container into `writer`.
    ///
    /// # Errors
    ///
    /// Fails with [`std::io::ErrorKind::InvalidInput`] if the buffer cannot be
    /// described by a RIFF header, or with whatever error `writer` returns.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(
        &self,
        buffer: &AudioBuffer,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let header =
            header(buffer).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        writer.write_all(&header)?;
        let mut pcm = Vec::with_capacity(buffer.len() * 2);
        for sample in buffer.samples() {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        writer.write_all(&pcm)
    }
}

fn header(buffer: &AudioBuffer) -> Result<[u8; HEADER_LEN]> {
    let too_large = || Error::ContainerTooLarge {
        samples: buffer.len(),
    };
    let format = WavFormat::mono16(buffer.sample_rate());
    let (block_align, byte_rate) = format
        .block_align()
        .zip(format.byte_rate())
        .ok_or(Error::SampleRateTooHigh(format.sample_rate))?;
    let data_len = buffer
        .len()
        .checked_mul(usize::from(block_align))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    // RIFF size counts everything after the size field itself
    let riff_len = data_len
        .checked_add((HEADER_LEN - 8) as u32)
        .ok_or_else(too_large)?;

    let mut h = [0u8; HEADER_LEN];
    h[0..4].copy_from_slice(b"RIFF");
    h[4..8].copy_from_slice(&riff_len.to_le_bytes());
    h[8..12].copy_from_slice(b"WAVE");
    h[12..16].copy_from_slice(b"fmt ");
    h[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    h[20..22].copy_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    h[22..24].copy_from_slice(&format.channels.to_le_bytes());
    h[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    h[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    h[32..34].copy_from_slice(&block_align.to_le_bytes());
    h[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());
    h[36..40].copy_from_slice(b"data");
    h[40..44].copy_from_slice(&data_len.to_le_bytes());
    Ok(h)
}

/// Encodes `buffer` with the default encoder.
///
/// # Errors
///
/// See [`WaveEncoder::encode`].
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    WaveEncoder.encode(buffer)
}

/// Parses a RIFF/WAVE container holding mono 16-bit PCM.
///
/// # Errors
///
/// Returns an error if the bytes are not a RIFF/WAVE container, if a chunk
/// runs past the end of the input, if the `fmt ` or `data` chunk is missing,
/// or if the format is anything but mono 16-bit PCM.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer> {
    if bytes.len() < 4 || &bytes[0..4] != b"RIFF" {
        return Err(Error::NotRiff);
    }
    if bytes.len() < 12 {
        return Err(Error::Truncated("RIFF header"));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(Error::NotWave);
    }

    let mut format: Option<(u16, WavFormat)> = None;
    let mut data: Option<&[u8]> = None;
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let len = le_u32(bytes, pos + 4) as usize;
        let start = pos + 8;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= bytes.len())
            .ok_or(Error::Truncated("chunk body"))?;
        let body = &bytes[start..end];

        match id {
            b"fmt " => {
                if body.len() < FMT_CHUNK_LEN as usize {
                    return Err(Error::Truncated("fmt chunk"));
                }
                let tag = le_u16(body, 0);
                format = Some((
                    tag,
                    WavFormat {
                        channels: le_u16(body, 2),
                        sample_rate: le_u32(body, 4),
                        bits_per_sample: le_u16(body, 14),
                    },
                ));
            }
            b"data" => data = Some(body),
            _ => {}
        }

        // chunks are word aligned
        pos = end + (len % 2);
    }

    let (tag, format) = format.ok_or(Error::MissingChunk("fmt "))?;
    let data = data.ok_or(Error::MissingChunk("data"))?;
    if tag != PCM_FORMAT_TAG
        || format.channels != CHANNELS
        || format.bits_per_sample != BITS_PER_SAMPLE
    {
        return Err(Error::UnsupportedFormat {
            format_tag: tag,
            channels: format.channels,
            bits_per_sample: format.bits_per_sample,
        });
    }
    if data.len() % 2 != 0 {
        return Err(Error::Truncated("data chunk"));
    }

    let samples = data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(AudioBuffer::from_samples(format.sample_rate, samples))
}

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
