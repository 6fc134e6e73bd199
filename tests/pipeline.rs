use voder::{
    PhonemeClass, Renderer, SynthConfig, SynthesisRequest, Synthesizer, VoicePreset,
    VoiceProfile, synthesize_wav,
};

const TEXTS: [&str; 5] = [
    "a",
    "hello world",
    "The quick brown fox; jumps over the lazy dog?!",
    "   spaced     out   ",
    "42 crème brûlée, s'il vous plaît.",
];

fn expected_len(synth: &Synthesizer, text: &str, speed: f64) -> f64 {
    let ms: f64 = synth.phonemes(text).iter().map(|p| p.duration_ms).sum();
    ms / 1000.0 * f64::from(synth.config().sample_rate) / speed
}

#[test]
fn sample_count_follows_durations() {
    let synth = Synthesizer::default();
    for text in TEXTS {
        for speed in [0.5, 0.8, 1.0, 1.7, 2.0] {
            let voice = VoiceProfile::new(1.0, speed, 0.5);
            let got = synth.render(text, &voice).len() as f64;
            let want = expected_len(&synth, text, speed);
            assert!((got - want).abs() < 1.0, "{text:?} at {speed}: {got} vs {want}");
        }
    }
}

#[test]
fn doubling_speed_halves_the_length() {
    let synth = Synthesizer::default();
    for text in TEXTS {
        let normal = synth.render(text, &VoiceProfile::new(1.0, 1.0, 0.5)).len();
        let fast = synth.render(text, &VoiceProfile::new(1.0, 2.0, 0.5)).len();
        assert!(normal.abs_diff(2 * fast) <= 1, "{text:?}: {normal} vs {fast}");
    }
}

#[test]
fn pitch_does_not_change_the_length() {
    let synth = Synthesizer::default();
    let low = synth.render("hello", &VoiceProfile::new(0.5, 1.0, 0.5));
    let high = synth.render("hello", &VoiceProfile::new(2.0, 1.0, 0.5));
    assert_eq!(low.len(), high.len());
    assert_ne!(low, high);
}

#[test]
fn all_printable_ascii_synthesizes() {
    let synth = Synthesizer::default();
    for c in ' '..='~' {
        let text = format!("{c}");
        let sound = synth.render(&text, &VoiceProfile::default());
        assert_eq!(synth.phonemes(&text).len(), 1, "{c:?}");
        assert!(!sound.is_empty(), "{c:?}");
    }
}

#[test]
fn pauses_are_silent() {
    let synth = Synthesizer::default();
    let voice = VoiceProfile::default();
    let text = "one, two. three";
    let phonemes = synth.phonemes(text);
    let lengths = Renderer::default().segment_lengths(&phonemes, voice.speed);
    let sound = synth.render(text, &voice);

    let mut pos = 0;
    let mut pauses = 0;
    for (phoneme, len) in phonemes.iter().zip(lengths) {
        if phoneme.class == PhonemeClass::Silence {
            assert!(sound.samples()[pos..pos + len].iter().all(|s| *s == 0));
            pauses += 1;
        }
        pos += len;
    }
    assert_eq!(pos, sound.len());
    assert!(pauses >= 3);
}

#[test]
fn identical_requests_give_identical_bytes() {
    for preset in VoicePreset::ALL {
        let request = SynthesisRequest::new("Is this the real life?", preset.profile());
        let first = synthesize_wav(&request).unwrap();
        let second = synthesize_wav(&request).unwrap();
        assert_eq!(first, second, "{preset}");
    }
}

#[test]
fn synthesizer_is_shareable_between_threads() {
    let synth = Synthesizer::new(SynthConfig::default().with_agc(0.2));
    let reference = synth.render("concurrency", &VoiceProfile::default());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| synth.render("concurrency", &VoiceProfile::default())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}

#[test]
fn presets_parse_by_name() {
    for preset in VoicePreset::ALL {
        let name = preset.to_string().to_uppercase();
        assert_eq!(VoiceProfile::from_preset_name(&name).unwrap(), preset.profile());
    }
    assert!(VoiceProfile::from_preset_name("gravel").is_err());
}
