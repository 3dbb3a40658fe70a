use fskmodem_core::{ModemError, Waveform};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Read, Seek, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WavError {
    #[error(transparent)]
    Format(#[from] ModemError),

    #[error("WAV error: {0}")]
    Hound(#[from] hound::Error),
}

fn pcm16_mono_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Scale a normalized sample to 16-bit PCM, truncating toward zero.
pub fn to_pcm16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Inverse of the writer's scaling, normalized by 32768.
pub fn from_pcm16(sample: i16) -> f32 {
    sample as f32 / 32768.0
}

pub fn write_waveform<W: Write + Seek>(writer: W, waveform: &Waveform) -> Result<(), WavError> {
    let mut writer = WavWriter::new(writer, pcm16_mono_spec(waveform.sample_rate))?;
    for &sample in &waveform.samples {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read mono 16-bit integer PCM. Any other layout is rejected before decoding starts.
pub fn read_waveform<R: Read>(reader: R) -> Result<Waveform, WavError> {
    let reader = match WavReader::new(reader) {
        Ok(reader) => reader,
        Err(hound::Error::Unsupported) => {
            return Err(ModemError::UnsupportedAudioFormat("only PCM WAV supported".into()).into())
        }
        Err(hound::Error::FormatError(reason)) => {
            return Err(ModemError::UnsupportedAudioFormat(reason.into()).into())
        }
        Err(e) => return Err(e.into()),
    };
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(ModemError::UnsupportedAudioFormat("only PCM WAV supported".into()).into());
    }
    if spec.channels != 1 {
        return Err(ModemError::UnsupportedAudioFormat(format!(
            "only mono WAV supported, got {} channels",
            spec.channels
        ))
        .into());
    }
    if spec.bits_per_sample != 16 {
        return Err(ModemError::UnsupportedAudioFormat(format!(
            "only 16-bit WAV supported, got {} bits",
            spec.bits_per_sample
        ))
        .into());
    }

    let sample_rate = spec.sample_rate;
    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(from_pcm16))
        .collect::<Result<Vec<f32>, _>>()?;

    log::debug!("Read {} samples at {} Hz", samples.len(), sample_rate);
    Ok(Waveform::new(samples, sample_rate))
}

pub fn save(path: &Path, waveform: &Waveform) -> Result<(), WavError> {
    let file = std::io::BufWriter::new(std::fs::File::create(path).map_err(hound::Error::IoError)?);
    write_waveform(file, waveform)
}

pub fn load(path: &Path) -> Result<Waveform, WavError> {
    let file = std::io::BufReader::new(std::fs::File::open(path).map_err(hound::Error::IoError)?);
    read_waveform(file)
}
