//! Percent encoding.
//!
//! Decoding is lenient: a `%` that is not followed by two hex digits is kept
//! as a literal byte instead of failing, `+` stays a literal plus sign, and
//! characters outside ASCII pass through as their UTF-8 bytes.

use std::fmt::Write as _;

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b'~')
}

/// Every byte outside the unreserved set, space and `+` included, becomes `%XX`.
pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if is_unreserved(b) {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

pub(crate) fn decode(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let mut escaped = [0; 1];
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| hex::decode_to_slice(pair, &mut escaped).is_ok());
            if valid {
                out.push(escaped[0]);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}
