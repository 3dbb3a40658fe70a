use crate::config::sample_count;
use std::f64::consts::PI;

/// Normalized mono samples in [-1, 1] together with their sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Generate a fixed-duration sine tone.
///
/// `sample[i] = amplitude * sin(2π * freq * i / sample_rate)`; phase restarts at zero for every
/// tone. A duration shorter than one sample period yields an empty tone.
pub fn generate_tone(freq: f64, duration: f64, sample_rate: u32, amplitude: f64) -> Vec<f32> {
    let num_samples = sample_count(duration, sample_rate);
    let angular_freq = 2.0 * PI * freq / sample_rate as f64;

    (0..num_samples)
        .map(|i| (amplitude * (angular_freq * i as f64).sin()) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length() {
        assert_eq!(generate_tone(1000.0, 0.005, 44100, 0.5).len(), 220);
        assert_eq!(generate_tone(1000.0, 1.0, 8000, 0.5).len(), 8000);
    }

    #[test]
    fn test_tone_values() {
        let tone = generate_tone(1000.0, 0.01, 8000, 0.5);
        assert_eq!(tone[0], 0.0);
        // Quarter period of 1 kHz at 8 kHz is two samples
        assert!((tone[2] - 0.5).abs() < 1e-6);
        assert!((tone[6] + 0.5).abs() < 1e-6);
        assert!(tone.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn test_tone_zero_length() {
        assert!(generate_tone(1000.0, 1e-6, 44100, 0.5).is_empty());
    }

    #[test]
    fn test_tone_is_deterministic() {
        let a = generate_tone(45000.0, 0.005, 44100, 0.5);
        let b = generate_tone(45000.0, 0.005, 44100, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_waveform_duration() {
        let waveform = Waveform::new(vec![0.0; 22050], 44100);
        assert_eq!(waveform.len(), 22050);
        assert!((waveform.duration() - 0.5).abs() < 1e-12);
        assert!(Waveform::new(Vec::new(), 44100).is_empty());
    }
}
