//! Acoustic FSK modem
//!
//! Turns text into a binary frequency-shift-keyed tone sequence and recovers it again.
//! Frames are `SYNC (16 bits) || LENGTH (16 bits) || PAYLOAD (LENGTH bytes)`, one tone per bit.
//! Two detectors are available: single-bin Goertzel power and Hann-windowed FFT magnitude with
//! alias correction for carriers above Nyquist.

pub mod error;
pub mod config;
pub mod tone;
pub mod bits;
pub mod fsk;
pub mod detector;
pub mod bitstream;
pub mod framing;
pub mod encoder;
pub mod decoder;

pub use bitstream::BitStream;
pub use config::{alias_frequency, ModemConfig};
pub use decoder::{DecodeReport, Decoder};
pub use detector::{DetectorKind, GoertzelDetector, SpectralDetector, ToneDetector};
pub use encoder::Encoder;
pub use error::{ModemError, Result};
pub use framing::{Frame, FrameDecoder, FrameEncoder, SyncSearch, SYNC_WORD};
pub use tone::{generate_tone, Waveform};

// Default modulation parameters (ultrasonic carriers, 200 bits/sec)
pub const DEFAULT_F0: f64 = 35000.0; // Hz, bit 0
pub const DEFAULT_F1: f64 = 45000.0; // Hz, bit 1
pub const DEFAULT_BIT_DURATION: f64 = 0.005; // seconds
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

// Frame configuration
pub const LENGTH_FIELD_BITS: usize = 16;
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize; // 65535 bytes
