use crate::config::ModemConfig;
use crate::tone::generate_tone;

/// Binary FSK modulator.
///
/// Every bit becomes one tone of `bit_duration` seconds: `f0` for 0, `f1` for 1. Tones are
/// synthesized independently and concatenated, so each one starts at zero phase.
pub struct FskModulator {
    config: ModemConfig,
    tone_zero: Vec<f32>,
    tone_one: Vec<f32>,
}

impl FskModulator {
    pub fn new(config: ModemConfig) -> Self {
        let tone = |freq| generate_tone(freq, config.bit_duration, config.sample_rate, config.amplitude);
        Self {
            tone_zero: tone(config.f0),
            tone_one: tone(config.f1),
            config,
        }
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Samples produced per bit.
    pub fn samples_per_bit(&self) -> usize {
        self.tone_zero.len()
    }

    pub fn modulate_bit(&self, bit: bool) -> &[f32] {
        if bit {
            &self.tone_one
        } else {
            &self.tone_zero
        }
    }

    /// Modulate a bit sequence into a contiguous waveform.
    pub fn modulate(&self, bits: &[bool]) -> Vec<f32> {
        let mut samples = Vec::with_capacity(bits.len() * self.samples_per_bit());
        for &bit in bits {
            samples.extend_from_slice(self.modulate_bit(bit));
        }
        samples
    }
}
