mod wav;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fskmodem_core::{Decoder, DetectorKind, Encoder, ModemConfig, SyncSearch};
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fskmodem")]
#[command(about = "Acoustic FSK modem: text to tones and back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one line from stdin and encode it to a WAV file
    Encode {
        /// Output WAV file
        #[arg(short, long, value_name = "OUTPUT.WAV", default_value = "auxon_fsk.wav")]
        output: PathBuf,

        #[command(flatten)]
        modulation: ModulationArgs,
    },

    /// Decode a WAV file and write the recovered text
    Decode {
        /// Input WAV file
        #[arg(short, long, value_name = "INPUT.WAV", default_value = "auxon_fsk.wav")]
        input: PathBuf,

        /// Output text file
        #[arg(short, long, value_name = "OUTPUT.TXT", default_value = "decoded.txt")]
        output: PathBuf,

        /// Tone detection strategy
        #[arg(short, long, value_enum, default_value_t = Detector::Goertzel)]
        detector: Detector,

        /// Retry at the next sync word when the first one leads to a truncated frame
        #[arg(long)]
        resync: bool,

        #[command(flatten)]
        modulation: ModulationArgs,
    },
}

#[derive(Args)]
struct ModulationArgs {
    /// Carrier frequency for bit 0 (Hz)
    #[arg(long, default_value_t = fskmodem_core::DEFAULT_F0)]
    f0: f64,

    /// Carrier frequency for bit 1 (Hz)
    #[arg(long, default_value_t = fskmodem_core::DEFAULT_F1)]
    f1: f64,

    /// Bit duration in seconds
    #[arg(long, default_value_t = fskmodem_core::DEFAULT_BIT_DURATION)]
    bit_duration: f64,

    /// Sample rate used when encoding (Hz); decoding uses the file's rate
    #[arg(long, default_value_t = fskmodem_core::DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Tone amplitude in (0, 1]
    #[arg(long, default_value_t = fskmodem_core::DEFAULT_AMPLITUDE)]
    amplitude: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Detector {
    Goertzel,
    Spectral,
}

impl From<Detector> for DetectorKind {
    fn from(detector: Detector) -> Self {
        match detector {
            Detector::Goertzel => DetectorKind::Goertzel,
            Detector::Spectral => DetectorKind::Spectral,
        }
    }
}

impl ModulationArgs {
    fn config(&self, sync_search: SyncSearch) -> ModemConfig {
        ModemConfig {
            f0: self.f0,
            f1: self.f1,
            bit_duration: self.bit_duration,
            sample_rate: self.sample_rate,
            amplitude: self.amplitude,
            sync_search,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Encode { output, modulation } => {
            encode_command(&output, modulation.config(SyncSearch::FirstMatch))?
        }
        Commands::Decode {
            input,
            output,
            detector,
            resync,
            modulation,
        } => {
            let sync_search = if resync {
                SyncSearch::Resync
            } else {
                SyncSearch::FirstMatch
            };
            decode_command(&input, &output, detector.into(), modulation.config(sync_search))?
        }
    }

    Ok(())
}

fn encode_command(output_path: &Path, config: ModemConfig) -> Result<(), Box<dyn std::error::Error>> {
    print!("Convert following to audio: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut message = String::new();
    std::io::stdin().lock().read_line(&mut message)?;
    let message = message.trim_end_matches(['\r', '\n']);
    println!("Encoding: {}", message);

    let encoder = Encoder::new(config)?;
    let waveform = encoder.encode(message.as_bytes())?;
    println!(
        "Encoded {} bytes to {} audio samples at {} Hz",
        message.len(),
        waveform.len(),
        waveform.sample_rate
    );

    wav::save(output_path, &waveform)?;
    println!("Saved as {}", output_path.display());
    Ok(())
}

fn decode_command(
    input_path: &Path,
    output_path: &Path,
    detector: DetectorKind,
    config: ModemConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let waveform = wav::load(input_path)?;
    println!(
        "Loaded WAV with {} samples ({:.3} s at {} Hz).",
        waveform.len(),
        waveform.duration(),
        waveform.sample_rate
    );

    let mut decoder = Decoder::new(config, detector)?;
    let report = decoder.decode(&waveform)?;
    println!("Total bits recovered: {}", report.bits_recovered);
    println!("Sync word found at bit index: {}", report.sync_position);
    println!("Payload length = {} bytes", report.payload_len);

    println!("\nDECODED MESSAGE:\n{}", report.text());

    std::fs::write(output_path, &report.payload)?;
    println!("Wrote {} bytes to {}", report.payload.len(), output_path.display());
    Ok(())
}
