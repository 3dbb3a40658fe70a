use crate::bitstream::BitStream;
use crate::config::ModemConfig;
use crate::detector::{carrier_bins, DetectorKind, ToneDetector};
use crate::error::Result;
use crate::framing::FrameDecoder;
use crate::tone::Waveform;

/// Outcome of a successful decode, with the diagnostics the CLI reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub sample_count: usize,
    pub samples_per_bit: usize,
    pub bits_recovered: usize,
    pub sync_position: usize,
    pub payload_len: u16,
    pub payload: Vec<u8>,
}

impl DecodeReport {
    /// Payload as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// FSK waveform to text.
///
/// The waveform's own sample rate drives the bit windows and detection; carriers and bit
/// duration come from the configuration.
pub struct Decoder {
    config: ModemConfig,
    kind: DetectorKind,
    detector: Box<dyn ToneDetector>,
}

impl Decoder {
    pub fn new(config: ModemConfig, kind: DetectorKind) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            kind,
            detector: kind.build(),
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    pub fn detector_kind(&self) -> DetectorKind {
        self.kind
    }

    /// Recover the raw bitstream, one bit per whole bit window.
    pub fn demodulate(&mut self, waveform: &Waveform) -> Result<Vec<bool>> {
        let samples_per_bit = self.config.check_samples_per_bit(waveform.sample_rate)?;

        if self.kind == DetectorKind::Spectral {
            match carrier_bins(self.config.f0, self.config.f1, samples_per_bit, waveform.sample_rate) {
                Ok((bin0, bin1)) if bin0 == bin1 => log::warn!(
                    "Carriers {} Hz and {} Hz share spectral bin {} at {} Hz; every bit will read as 0",
                    self.config.f0,
                    self.config.f1,
                    bin0,
                    waveform.sample_rate
                ),
                Ok(_) => {}
                Err(e) => log::warn!("Spectral detection degraded: {}", e),
            }
        }

        let stream = BitStream::new(
            &waveform.samples,
            self.detector.as_mut(),
            samples_per_bit,
            self.config.f0,
            self.config.f1,
            waveform.sample_rate,
        );
        let bits: Vec<bool> = stream.collect();

        log::debug!(
            "{} detector recovered {} bits from {} samples ({} per bit)",
            self.detector.name(),
            bits.len(),
            waveform.len(),
            samples_per_bit
        );

        Ok(bits)
    }

    /// Demodulate and parse a frame. Any failure aborts the whole decode.
    pub fn decode(&mut self, waveform: &Waveform) -> Result<DecodeReport> {
        let samples_per_bit = self.config.check_samples_per_bit(waveform.sample_rate)?;
        let bits = self.demodulate(waveform)?;
        let frame = FrameDecoder::decode(&bits, self.config.sync_search)?;

        log::debug!(
            "Sync word at bit {}, payload length {} bytes",
            frame.sync_position,
            frame.payload_len
        );

        Ok(DecodeReport {
            sample_count: waveform.len(),
            samples_per_bit,
            bits_recovered: bits.len(),
            sync_position: frame.sync_position,
            payload_len: frame.payload_len,
            payload: frame.payload,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            config: ModemConfig::default(),
            kind: DetectorKind::default(),
            detector: DetectorKind::default().build(),
        }
    }
}
