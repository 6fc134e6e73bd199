use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use voder::{Synthesizer, VoicePreset, VoiceProfile, WaveEncoder, decode_wav};

#[test]
fn hound_reads_what_we_write() {
    let synth = Synthesizer::default();
    let sound = synth.render("Sphinx of black quartz, judge my vow.", &VoiceProfile::default());
    let bytes = WaveEncoder.encode(&sound).unwrap();

    let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(
        reader.spec(),
        WavSpec {
            channels: 1,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    );
    assert_eq!(reader.len() as usize, sound.len());
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, sound.samples());
}

#[test]
fn we_read_what_hound_writes() {
    let sound = Synthesizer::default().render("zoo", &VoicePreset::Deep.profile());
    let spec = WavSpec {
        channels: 1,
        sample_rate: sound.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in sound.samples() {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    assert_eq!(decode_wav(&cursor.into_inner()).unwrap(), sound);
}

#[test]
fn streamed_container_is_readable() {
    let sound = Synthesizer::default().render("hi", &VoiceProfile::default());
    let mut bytes = Vec::new();
    WaveEncoder.write_to(&sound, &mut bytes).unwrap();
    let reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len() as usize, sound.len());
}

#[test]
fn empty_container_is_readable() {
    let bytes = Synthesizer::default()
        .render_wav("", &VoiceProfile::default())
        .unwrap();
    assert_eq!(bytes.len(), 44);
    let reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len(), 0);
}
