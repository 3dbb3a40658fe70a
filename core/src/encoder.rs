use crate::config::ModemConfig;
use crate::error::Result;
use crate::framing::FrameEncoder;
use crate::fsk::FskModulator;
use crate::tone::Waveform;

/// Text to FSK waveform: frame (sync + length + payload) then per-bit tones.
pub struct Encoder {
    fsk: FskModulator,
}

impl Encoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fsk: FskModulator::new(config),
        })
    }

    pub fn config(&self) -> &ModemConfig {
        self.fsk.config()
    }

    /// Encode raw text bytes into audio samples at the configured sample rate.
    pub fn encode(&self, text: &[u8]) -> Result<Waveform> {
        let bits = FrameEncoder::encode(text)?;
        let samples = self.fsk.modulate(&bits);

        log::debug!(
            "Encoded {} bytes as {} bits, {} samples ({} per bit)",
            text.len(),
            bits.len(),
            samples.len(),
            self.fsk.samples_per_bit()
        );

        Ok(Waveform::new(samples, self.config().sample_rate))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            fsk: FskModulator::new(ModemConfig::default()),
        }
    }
}
