use crate::bits::{bits_to_text, bits_to_u16, text_to_bits, u16_to_bits};
use crate::error::{ModemError, Result};
use crate::{LENGTH_FIELD_BITS, MAX_PAYLOAD_SIZE};

/// Sync word `1111000011110000` marking the start of a frame.
#[rustfmt::skip]
pub const SYNC_WORD: [bool; 16] = [
    true, true, true, true, false, false, false, false,
    true, true, true, true, false, false, false, false,
];

/// How the parser picks a sync word occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncSearch {
    /// Accept the first exact match and never look further.
    #[default]
    FirstMatch,
    /// If the length or payload after a match is truncated, retry at the next match.
    Resync,
}

/// A parsed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Bit index of the sync word in the decoded stream
    pub sync_position: usize,
    pub payload_len: u16,
    pub payload: Vec<u8>,
}

pub struct FrameEncoder;
pub struct FrameDecoder;

impl FrameEncoder {
    /// SYNC || LENGTH (16 bits, big-endian) || PAYLOAD (MSB-first per byte)
    pub fn encode(payload: &[u8]) -> Result<Vec<bool>> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ModemError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let mut bits = Vec::with_capacity(SYNC_WORD.len() + LENGTH_FIELD_BITS + payload.len() * 8);
        bits.extend_from_slice(&SYNC_WORD);
        bits.extend(u16_to_bits(payload.len() as u16));
        bits.extend(text_to_bits(payload));
        Ok(bits)
    }
}

impl FrameDecoder {
    pub fn decode(bits: &[bool], search: SyncSearch) -> Result<Frame> {
        let first = find_sync(bits, 0).ok_or(ModemError::SyncNotFound)?;

        match search {
            SyncSearch::FirstMatch => Self::decode_at(bits, first),
            SyncSearch::Resync => {
                let first_result = Self::decode_at(bits, first);
                if first_result.is_ok() {
                    return first_result;
                }

                let mut from = first + 1;
                while let Some(pos) = find_sync(bits, from) {
                    match Self::decode_at(bits, pos) {
                        Ok(frame) => {
                            log::debug!("Resynchronized on sync word at bit {} (first match at {})", pos, first);
                            return Ok(frame);
                        }
                        Err(e) => log::trace!("Rejected sync candidate at bit {}: {}", pos, e),
                    }
                    from = pos + 1;
                }

                first_result
            }
        }
    }

    /// Parse length and payload following a sync word at `sync_position`.
    pub fn decode_at(bits: &[bool], sync_position: usize) -> Result<Frame> {
        let length_start = sync_position + SYNC_WORD.len();
        let available = bits.len().saturating_sub(length_start);
        if available < LENGTH_FIELD_BITS {
            return Err(ModemError::TruncatedLength {
                sync_position,
                available,
            });
        }

        let payload_len = bits_to_u16(&bits[length_start..length_start + LENGTH_FIELD_BITS]);

        let payload_start = length_start + LENGTH_FIELD_BITS;
        let expected = payload_len as usize * 8;
        let available = bits.len() - payload_start;
        if available < expected {
            return Err(ModemError::TruncatedPayload { expected, available });
        }

        let payload = bits_to_text(&bits[payload_start..payload_start + expected]);

        Ok(Frame {
            sync_position,
            payload_len,
            payload,
        })
    }
}

/// Index of the first exact sync word match at or after `from`.
pub fn find_sync(bits: &[bool], from: usize) -> Option<usize> {
    if from >= bits.len() {
        return None;
    }
    bits[from..]
        .windows(SYNC_WORD.len())
        .position(|window| window == SYNC_WORD)
        .map(|offset| from + offset)
}
