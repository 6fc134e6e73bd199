use std::io::{self, Write};
use voder::{Synthesizer, VoicePreset, VoiceProfile, WaveEncoder};

const DEFAULT_TEXT: &str = "Hello world. This is a voice made of sine waves.";

/// Voice preset to use, by name, when set.
const PRESET_VAR: &str = "VODER_PRESET";

fn voice() -> VoiceProfile {
    match std::env::var(PRESET_VAR) {
        Ok(name) => match name.parse::<VoicePreset>() {
            Ok(preset) => preset.profile(),
            Err(error) => {
                eprintln!("Error: {error}");
                std::process::exit(1);
            }
        },
        Err(_) => VoiceProfile::default(),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        args.join(" ")
    };

    let buffer = Synthesizer::default().render(&text, &voice());
    log::info!(
        "{} samples, {:.2} s",
        buffer.len(),
        buffer.duration_secs()
    );

    let mut stdout = io::stdout().lock();
    if let Err(error) = WaveEncoder
        .write_to(&buffer, &mut stdout)
        .and_then(|()| stdout.flush())
    {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
