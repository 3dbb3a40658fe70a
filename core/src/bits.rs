//! Bit codec: bytes to MSB-first bits and back.
//!
//! Bits are carried as `bool` (`true` = 1). Text is treated as raw 8-bit code units, so
//! multi-byte UTF-8 characters simply travel as their individual bytes.

/// Expand each byte into 8 bits, most significant bit first.
pub fn text_to_bits(text: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(text.len() * 8);
    for &byte in text {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Pack bits into bytes, 8 at a time, MSB first. A trailing group shorter than 8 bits is dropped.
pub fn bits_to_text(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8).map(bits_to_byte).collect()
}

fn bits_to_byte(chunk: &[bool]) -> u8 {
    chunk
        .iter()
        .fold(0u8, |byte, &bit| (byte << 1) | bit as u8)
}

/// Interpret up to 16 bits as an unsigned big-endian integer.
pub fn bits_to_u16(bits: &[bool]) -> u16 {
    bits.iter().fold(0u16, |value, &bit| (value << 1) | bit as u16)
}

/// 16-bit big-endian bit representation of `value`.
pub fn u16_to_bits(value: u16) -> Vec<bool> {
    (0..16).rev().map(|i| (value >> i) & 1 == 1).collect()
}

/// Render bits as a string of '0'/'1' characters.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

/// Parse a '0'/'1' string. Returns `None` on any other character.
pub fn parse_bits(text: &str) -> Option<Vec<bool>> {
    text.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}
