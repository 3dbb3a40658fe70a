use crate::config::alias_frequency;
use crate::error::{ModemError, Result};
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Per-window carrier decision.
///
/// Implementations always produce a bit: `true` when the window carries more energy at `f1`
/// than at `f0`, `false` otherwise (ties resolve to 0). A window extending past the end of
/// `samples` is classified as 0.
pub trait ToneDetector {
    fn classify(
        &mut self,
        samples: &[f32],
        start: usize,
        window_len: usize,
        f0: f64,
        f1: f64,
        sample_rate: u32,
    ) -> bool;

    fn name(&self) -> &'static str;
}

/// Available detector strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorKind {
    /// Single-bin Goertzel power comparison
    #[default]
    Goertzel,
    /// Hann-windowed FFT magnitude comparison at the aliased carrier bins
    Spectral,
}

impl DetectorKind {
    pub fn build(self) -> Box<dyn ToneDetector> {
        match self {
            DetectorKind::Goertzel => Box::new(GoertzelDetector::new()),
            DetectorKind::Spectral => Box::new(SpectralDetector::new()),
        }
    }
}

fn window<'a>(samples: &'a [f32], start: usize, window_len: usize) -> Option<&'a [f32]> {
    let end = start.checked_add(window_len)?;
    samples.get(start..end)
}

// ============================================================================
// GOERTZEL
// ============================================================================

/// Goertzel power at the bin nearest `target_freq`.
///
/// k = floor(0.5 + N * f / fs), ω = 2πk / N. A bin index past N wraps through the cosine,
/// which is exactly where an above-Nyquist carrier shows up after sampling.
pub fn goertzel_power(samples: &[f32], target_freq: f64, sample_rate: u32) -> f64 {
    let len = samples.len();
    if len == 0 {
        return 0.0;
    }

    let k = (0.5 + len as f64 * target_freq / sample_rate as f64).floor();
    let omega = 2.0 * PI * k / len as f64;
    let coeff = 2.0 * omega.cos();

    let mut s1 = 0.0;
    let mut s2 = 0.0;
    for &sample in samples {
        let s0 = sample as f64 + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }

    s1 * s1 + s2 * s2 - coeff * s1 * s2
}

#[derive(Debug, Default)]
pub struct GoertzelDetector;

impl GoertzelDetector {
    pub fn new() -> Self {
        Self
    }
}

impl ToneDetector for GoertzelDetector {
    fn classify(
        &mut self,
        samples: &[f32],
        start: usize,
        window_len: usize,
        f0: f64,
        f1: f64,
        sample_rate: u32,
    ) -> bool {
        let Some(block) = window(samples, start, window_len) else {
            log::trace!("Goertzel window at {} runs past the waveform end", start);
            return false;
        };

        let p0 = goertzel_power(block, f0, sample_rate);
        let p1 = goertzel_power(block, f1, sample_rate);
        p1 > p0
    }

    fn name(&self) -> &'static str {
        "goertzel"
    }
}

// ============================================================================
// SPECTRAL (FFT + ALIAS CORRECTION)
// ============================================================================

/// Symmetric Hann (raised-cosine) taper.
pub fn hann_window(len: usize) -> Vec<f32> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (len - 1) as f64;
            (0..len)
                .map(|n| (0.5 - 0.5 * (2.0 * PI * n as f64 / denom).cos()) as f32)
                .collect()
        }
    }
}

/// Nearest FFT bin for an observed frequency; must lie in `[0, window_len)`.
pub fn spectral_bin(freq: f64, window_len: usize, sample_rate: u32) -> Result<usize> {
    let bin = (freq * window_len as f64 / sample_rate as f64).round();
    if !bin.is_finite() || bin < 0.0 || bin >= window_len as f64 {
        return Err(ModemError::DetectorBinOutOfRange {
            bin: if bin.is_finite() { bin as i64 } else { i64::MAX },
            window_len,
        });
    }
    Ok(bin as usize)
}

/// Analysis bins for both carriers after alias correction, `(bin0, bin1)`.
pub fn carrier_bins(f0: f64, f1: f64, window_len: usize, sample_rate: u32) -> Result<(usize, usize)> {
    let bin0 = spectral_bin(alias_frequency(f0, sample_rate), window_len, sample_rate)?;
    let bin1 = spectral_bin(alias_frequency(f1, sample_rate), window_len, sample_rate)?;
    Ok((bin0, bin1))
}

/// Full-block magnitude detector.
///
/// Each window is Hann-tapered and transformed with a forward FFT of the window length. Carriers
/// are mapped to their aliased frequencies first, so tones above Nyquist are looked up where they
/// actually land in the sampled spectrum.
pub struct SpectralDetector {
    planner: FftPlanner<f32>,
    taper: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectralDetector {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            taper: Vec::new(),
            buffer: Vec::new(),
        }
    }

    fn transform(&mut self, block: &[f32]) {
        let n = block.len();
        if self.taper.len() != n {
            self.taper = hann_window(n);
        }

        self.buffer.clear();
        self.buffer.extend(
            block
                .iter()
                .zip(self.taper.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0)),
        );

        if n > 0 {
            // The planner keeps one plan per length, so repeated windows reuse it.
            let fft = self.planner.plan_fft_forward(n);
            fft.process(&mut self.buffer);
        }
    }
}

impl Default for SpectralDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneDetector for SpectralDetector {
    fn classify(
        &mut self,
        samples: &[f32],
        start: usize,
        window_len: usize,
        f0: f64,
        f1: f64,
        sample_rate: u32,
    ) -> bool {
        let Some(block) = window(samples, start, window_len) else {
            log::trace!("Spectral window at {} runs past the waveform end", start);
            return false;
        };

        let (bin0, bin1) = match carrier_bins(f0, f1, window_len, sample_rate) {
            Ok(bins) => bins,
            Err(e) => {
                log::debug!("Window at {} defaults to 0: {}", start, e);
                return false;
            }
        };

        self.transform(block);
        let m0 = self.buffer[bin0].norm();
        let m1 = self.buffer[bin1].norm();
        m1 > m0
    }

    fn name(&self) -> &'static str {
        "spectral"
    }
}
