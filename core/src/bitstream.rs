use crate::detector::ToneDetector;

/// Lazily demodulated bits of a waveform.
///
/// Walks consecutive, non-overlapping windows of `samples_per_bit` samples from sample 0 and
/// classifies each one with the configured detector. A trailing partial window is discarded.
/// Bits are produced in window order and never revisited.
pub struct BitStream<'a> {
    samples: &'a [f32],
    detector: &'a mut dyn ToneDetector,
    samples_per_bit: usize,
    f0: f64,
    f1: f64,
    sample_rate: u32,
    next_window: usize,
    total_windows: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(
        samples: &'a [f32],
        detector: &'a mut dyn ToneDetector,
        samples_per_bit: usize,
        f0: f64,
        f1: f64,
        sample_rate: u32,
    ) -> Self {
        let total_windows = if samples_per_bit == 0 {
            0
        } else {
            samples.len() / samples_per_bit
        };

        Self {
            samples,
            detector,
            samples_per_bit,
            f0,
            f1,
            sample_rate,
            next_window: 0,
            total_windows,
        }
    }
}

impl Iterator for BitStream<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.next_window >= self.total_windows {
            return None;
        }

        let start = self.next_window * self.samples_per_bit;
        if start + self.samples_per_bit > self.samples.len() {
            self.next_window = self.total_windows;
            return None;
        }

        self.next_window += 1;
        Some(self.detector.classify(
            self.samples,
            start,
            self.samples_per_bit,
            self.f0,
            self.f1,
            self.sample_rate,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_windows - self.next_window;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitStream<'_> {}
