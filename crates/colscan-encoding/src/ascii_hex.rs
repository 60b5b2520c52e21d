use hex::FromHexError;

use crate::EncodingError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Length is validated before the alphabet, so an odd-length string is a
/// length error even if it also contains non-hex characters. Length counts
/// characters, not UTF-8 bytes.
pub(crate) fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    if text.chars().count() % 2 != 0 {
        return Err(EncodingError::BadLength);
    }
    if !text.is_ascii() {
        return Err(EncodingError::BadChars);
    }
    hex::decode(text).map_err(|e| match e {
        FromHexError::OddLength => EncodingError::BadLength,
        FromHexError::InvalidHexCharacter { .. } | FromHexError::InvalidStringLength => {
            EncodingError::BadChars
        }
    })
}
