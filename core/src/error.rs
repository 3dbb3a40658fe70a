use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("Sync word not found in decoded bitstream (noise, bad signal or wrong modulation parameters)")]
    SyncNotFound,

    #[error("Bitstream too short for length field: sync at bit {sync_position}, {available} bits follow it")]
    TruncatedLength { sync_position: usize, available: usize },

    #[error("Bitstream too short for payload: need {expected} bits, {available} available")]
    TruncatedPayload { expected: usize, available: usize },

    #[error("Unsupported audio format: {0}")]
    UnsupportedAudioFormat(String),

    #[error("Spectral bin {bin} outside analysis window of {window_len} bins")]
    DetectorBinOutOfRange { bin: i64, window_len: usize },

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;
