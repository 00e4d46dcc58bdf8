//! Placeholder tone synthesis: 16-bit mono PCM WAV rendered in memory.

const SAMPLE_RATE: u32 = 22_050;

/// Shape of a synthesised placeholder cue.
#[derive(Debug, Clone, Copy)]
pub struct ToneSpec {
    /// Start frequency in Hz.
    pub freq_start: f32,
    /// End frequency in Hz (equal to start for a steady tone).
    pub freq_end: f32,
    /// Duration in seconds.
    pub seconds: f32,
    /// Peak amplitude 0-1.
    pub amplitude: f32,
    /// Attack/release fade as a fraction of the duration (0-0.5).
    pub fade: f32,
}

impl ToneSpec {
    /// Steady tone (loopable hums and beds).
    pub fn steady(freq: f32, seconds: f32, amplitude: f32) -> Self {
        Self {
            freq_start: freq,
            freq_end: freq,
            seconds,
            amplitude,
            fade: 0.0,
        }
    }

    /// Frequency sweep with fade in/out (activation cues).
    pub fn sweep(freq_start: f32, freq_end: f32, seconds: f32, amplitude: f32) -> Self {
        Self {
            freq_start,
            freq_end,
            seconds,
            amplitude,
            fade: 0.1,
        }
    }
}

/// Render a spec to a complete WAV file in memory.
pub fn render_wav(spec: ToneSpec) -> Vec<u8> {
    let samples = render_samples(spec);
    let mut wav = Vec::with_capacity(44 + samples.len() * 2);

    let data_len = (samples.len() * 2) as u32;
    let byte_rate = SAMPLE_RATE * 2;

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    // fmt chunk: PCM, mono, 16-bit
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

fn render_samples(spec: ToneSpec) -> Vec<i16> {
    let count = (SAMPLE_RATE as f32 * spec.seconds) as usize;
    let fade_samples = (count as f32 * spec.fade.clamp(0.0, 0.5)) as usize;
    let mut phase = 0.0_f32;

    (0..count)
        .map(|i| {
            let t = i as f32 / count.max(1) as f32;
            let freq = spec.freq_start + (spec.freq_end - spec.freq_start) * t;
            phase += std::f32::consts::TAU * freq / SAMPLE_RATE as f32;

            let mut envelope = 1.0;
            if fade_samples > 0 {
                if i < fade_samples {
                    envelope = i as f32 / fade_samples as f32;
                } else if i >= count - fade_samples {
                    envelope = (count - i) as f32 / fade_samples as f32;
                }
            }

            let value = phase.sin() * spec.amplitude * envelope;
            (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_and_length() {
        let wav = render_wav(ToneSpec::steady(220.0, 0.5, 0.5));
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        let expected_samples = (SAMPLE_RATE as f32 * 0.5) as usize;
        assert_eq!(wav.len(), 44 + expected_samples * 2);
    }

    #[test]
    fn sweep_fades_to_silence() {
        let samples = render_samples(ToneSpec::sweep(800.0, 200.0, 0.2, 0.8));
        assert_eq!(samples[0], 0);
        let tail = *samples.last().unwrap();
        assert!(tail.abs() < 700, "tail sample {} should be faded", tail);
    }

    #[test]
    fn amplitude_bounds_samples() {
        let samples = render_samples(ToneSpec::steady(440.0, 0.1, 0.25));
        let limit = (0.26 * i16::MAX as f32) as i16;
        assert!(samples.iter().all(|s| s.abs() <= limit));
    }
}
