use std::fmt::Write as _;

use crate::EncodingError;

const BITS_PER_BYTE: usize = 8;

pub(crate) fn encode(bytes: &[u8]) -> String {
    bytes.iter().fold(
        String::with_capacity(bytes.len() * BITS_PER_BYTE),
        |mut out, b| {
            let _ = write!(out, "{b:08b}");
            out
        },
    )
}

pub(crate) fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    if text.chars().count() % BITS_PER_BYTE != 0 {
        return Err(EncodingError::BadLength);
    }
    if !text.is_ascii() {
        return Err(EncodingError::BadChars);
    }
    text.as_bytes()
        .chunks_exact(BITS_PER_BYTE)
        .map(|bits| {
            bits.iter().try_fold(0u8, |acc, &bit| match bit {
                b'0' => Some(acc << 1),
                b'1' => Some((acc << 1) | 1),
                _ => None,
            })
        })
        .collect::<Option<Vec<_>>>()
        .ok_or(EncodingError::BadChars)
}
