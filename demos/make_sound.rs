use hound::{SampleFormat, WavSpec, WavWriter};
use voder::{SynthConfig, Synthesizer, VoicePreset};

const PHRASE: &str = "Hello world. The quick brown fox jumps over the lazy dog!";

fn write_preset(synth: &Synthesizer, preset: VoicePreset) -> Result<(), hound::Error> {
    let sound = synth.render(PHRASE, &preset.profile());
    let path = format!("voder-{preset}.wav");
    let mut wav = WavWriter::create(
        &path,
        WavSpec {
            channels: 1,
            sample_rate: sound.sample_rate(),
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
    )?;
    for &sample in sound.samples() {
        wav.write_sample(sample)?;
    }
    wav.finalize()?;
    println!("{path}: {:.2} s", sound.duration_secs());
    Ok(())
}

fn main() {
    env_logger::init();
    let synth = Synthesizer::new(SynthConfig::default().with_sample_rate(16_000));
    for preset in VoicePreset::ALL {
        if let Err(error) = write_preset(&synth, preset) {
            println!("Error: {error}");
            std::process::exit(1);
        }
    }
}
