use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fskmodem"))
}

fn tmp_path(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("fskmodem-cli");
    fs::create_dir_all(&dir).ok();
    dir.join(name)
}

fn run_fskmodem(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute fskmodem");

    child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for fskmodem")
}

fn text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string() + &String::from_utf8_lossy(&output.stdout)
}

#[test]
fn test_encode_then_decode() {
    let wav = tmp_path("roundtrip.wav");
    let decoded = tmp_path("roundtrip.txt");

    let output = run_fskmodem(&["encode", "--output", wav.to_str().unwrap()], "Hello modem\n");
    assert!(output.status.success(), "encode failed: {}", text(&output));
    assert!(text(&output).contains("Encoding: Hello modem"));

    // (16 + 16 + 11 * 8) bits * 220 samples * 2 bytes, plus the header
    let size = fs::metadata(&wav).expect("WAV not created").len();
    let data_bytes = 120 * 220 * 2;
    assert!(size > data_bytes && size < data_bytes + 100, "unexpected size {}", size);

    let output = run_fskmodem(
        &[
            "decode",
            "--input",
            wav.to_str().unwrap(),
            "--output",
            decoded.to_str().unwrap(),
        ],
        "",
    );
    let log = text(&output);
    assert!(output.status.success(), "decode failed: {}", log);
    assert!(log.contains("Loaded WAV with 26400 samples (0.599 s at 44100 Hz)."), "{}", log);
    assert!(log.contains("Sync word found at bit index: 0"), "{}", log);
    assert!(log.contains("Payload length = 11 bytes"), "{}", log);
    assert_eq!(fs::read_to_string(&decoded).unwrap(), "Hello modem");
}

#[test]
fn test_spectral_detector_and_custom_carriers() {
    let wav = tmp_path("audible.wav");
    let decoded = tmp_path("audible.txt");
    let carriers = ["--f0", "1200", "--f1", "2200", "--bit-duration", "0.01", "--sample-rate", "8000"];

    let mut args = vec!["encode", "--output", wav.to_str().unwrap()];
    args.extend_from_slice(&carriers);
    let output = run_fskmodem(&args, "audible\n");
    assert!(output.status.success(), "encode failed: {}", text(&output));

    let mut args = vec![
        "decode",
        "--input",
        wav.to_str().unwrap(),
        "--output",
        decoded.to_str().unwrap(),
        "--detector",
        "spectral",
    ];
    args.extend_from_slice(&carriers);
    let output = run_fskmodem(&args, "");
    assert!(output.status.success(), "decode failed: {}", text(&output));
    assert_eq!(fs::read_to_string(&decoded).unwrap(), "audible");
}

#[test]
fn test_decode_missing_file_exits_with_failure() {
    let output = run_fskmodem(
        &["decode", "--input", tmp_path("does-not-exist.wav").to_str().unwrap()],
        "",
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_decode_silence_reports_missing_sync() {
    let wav = tmp_path("silence.wav");
    let spec = hound_spec();
    let mut writer = hound_writer(&wav, spec);
    for _ in 0..44100 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let output = run_fskmodem(
        &["decode", "--input", wav.to_str().unwrap(), "--output", tmp_path("silence.txt").to_str().unwrap()],
        "",
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Sync word not found"), "{}", text(&output));
    assert!(!stderr.contains("SyncNotFound"), "{}", stderr);
}

#[test]
fn test_decode_rejects_stereo() {
    let wav = tmp_path("stereo.wav");
    let spec = hound::WavSpec {
        channels: 2,
        ..hound_spec()
    };
    let mut writer = hound_writer(&wav, spec);
    for _ in 0..100 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let output = run_fskmodem(&["decode", "--input", wav.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unsupported audio format: only mono"), "{}", text(&output));
}

#[test]
fn test_decode_rejects_alaw() {
    let wav = tmp_path("alaw.wav");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&44u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&6u16.to_le_bytes()); // A-law
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&8u32.to_le_bytes());
    bytes.extend_from_slice(&[0xd5; 8]);
    fs::write(&wav, bytes).unwrap();

    let output = run_fskmodem(&["decode", "--input", wav.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unsupported audio format"), "{}", text(&output));
}

fn hound_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn hound_writer(path: &PathBuf, spec: hound::WavSpec) -> hound::WavWriter<std::io::BufWriter<fs::File>> {
    hound::WavWriter::create(path, spec).expect("Failed to create WAV")
}
