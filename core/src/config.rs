use crate::error::{ModemError, Result};
use crate::framing::SyncSearch;
use crate::{DEFAULT_AMPLITUDE, DEFAULT_BIT_DURATION, DEFAULT_F0, DEFAULT_F1, DEFAULT_SAMPLE_RATE};

/// Absorbs binary float error in `duration × rate` products such as 0.29 × 100.
const SAMPLE_COUNT_EPSILON: f64 = 1e-9;

/// Modulation parameters shared read-only by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Carrier frequency for bit 0 (Hz)
    pub f0: f64,
    /// Carrier frequency for bit 1 (Hz)
    pub f1: f64,
    /// Duration of one bit (seconds)
    pub bit_duration: f64,
    /// Sample rate used for synthesis (Hz)
    pub sample_rate: u32,
    /// Peak tone amplitude, in (0, 1]
    pub amplitude: f64,
    /// How the frame parser locates the sync word
    pub sync_search: SyncSearch,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            f0: DEFAULT_F0,
            f1: DEFAULT_F1,
            bit_duration: DEFAULT_BIT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            sync_search: SyncSearch::FirstMatch,
        }
    }
}

impl ModemConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, freq) in [("f0", self.f0), ("f1", self.f1)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ModemError::InvalidConfig(format!(
                    "{} must be a positive frequency, got {}",
                    name, freq
                )));
            }
        }
        if self.f0 == self.f1 {
            return Err(ModemError::InvalidConfig(format!(
                "carrier frequencies must differ, both are {} Hz",
                self.f0
            )));
        }
        if !self.bit_duration.is_finite() || self.bit_duration <= 0.0 {
            return Err(ModemError::InvalidConfig(format!(
                "bit duration must be positive, got {}",
                self.bit_duration
            )));
        }
        if self.sample_rate == 0 {
            return Err(ModemError::InvalidConfig("sample rate must be positive".into()));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(ModemError::InvalidConfig(format!(
                "amplitude must be in (0, 1], got {}",
                self.amplitude
            )));
        }
        self.check_samples_per_bit(self.sample_rate)?;
        Ok(())
    }

    /// Samples in one bit period at the given sample rate.
    pub fn samples_per_bit(&self, sample_rate: u32) -> usize {
        sample_count(self.bit_duration, sample_rate)
    }

    /// Like [`samples_per_bit`](Self::samples_per_bit) but rejects a zero-length bit.
    pub fn check_samples_per_bit(&self, sample_rate: u32) -> Result<usize> {
        match self.samples_per_bit(sample_rate) {
            0 => Err(ModemError::InvalidConfig(format!(
                "bit duration {} s yields no samples at {} Hz",
                self.bit_duration, sample_rate
            ))),
            n => Ok(n),
        }
    }
}

/// Number of whole samples covering `duration` seconds at `sample_rate`.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    let exact = duration * sample_rate as f64;
    if !exact.is_finite() || exact <= 0.0 {
        return 0;
    }
    (exact + SAMPLE_COUNT_EPSILON).floor() as usize
}

/// Frequency a tone at `freq` folds to once sampled at `sample_rate`.
///
/// `alias(f) = |f - round(f / fs) * fs|`: 45000 Hz sampled at 44100 Hz is observed at 900 Hz.
/// Carriers below Nyquist map to themselves.
pub fn alias_frequency(freq: f64, sample_rate: u32) -> f64 {
    let fs = sample_rate as f64;
    (freq - (freq / fs).round() * fs).abs()
}
