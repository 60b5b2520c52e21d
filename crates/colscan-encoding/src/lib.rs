//! Textual encodings understood by the colscan input reader.
//!
//! Every input line is text in one of a closed set of schemes; decoding turns
//! it into the byte row that the column analyzer works on. Each scheme also
//! encodes, so that decode-after-encode is the identity for every byte string
//! the scheme can represent.
//!
//! | name       | scheme                         |
//! |------------|--------------------------------|
//! | `base64`   | [`EncodingScheme::Base64`]     |
//! | `asciihex` | [`EncodingScheme::AsciiHex`]   |
//! | `binary`   | [`EncodingScheme::Binary`]     |
//! | `url`      | [`EncodingScheme::Url`]        |
//! | `plain`    | [`EncodingScheme::Plain`]      |
//!
//! # Examples
//!
//! ```
//! use colscan_encoding::EncodingScheme;
//!
//! let scheme = "asciihex".parse::<EncodingScheme>().unwrap();
//! assert_eq!(scheme.decode("00ff7F").unwrap(), vec![0x00, 0xff, 0x7f]);
//! assert_eq!(scheme.encode(&[0x00, 0x0a]).unwrap(), "000a");
//! ```

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD};

mod ascii_hex;
mod binary;
mod url;

/// Failures raised while encoding, decoding or selecting a scheme.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EncodingError {
    #[display("input does not have a correct length for this encoding scheme")]
    BadLength,
    #[display("invalid characters for this encoding scheme")]
    BadChars,
    #[display("invalid encoder specified: '{name}'")]
    BadEncoder { name: String },
}

/// One of the supported textual encodings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingScheme {
    /// Standard alphabet base64 with padding.
    Base64,
    /// Two hex digits per byte.
    AsciiHex,
    /// Eight `0`/`1` characters per byte, no prefix.
    Binary,
    /// Percent encoding; `+` is an ordinary character.
    Url,
    /// The UTF-8 bytes of the line itself.
    #[default]
    Plain,
}

impl EncodingScheme {
    pub const ALL: [Self; 5] = [
        Self::Base64,
        Self::AsciiHex,
        Self::Binary,
        Self::Url,
        Self::Plain,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::AsciiHex => "asciihex",
            Self::Binary => "binary",
            Self::Url => "url",
            Self::Plain => "plain",
        }
    }

    /// Resolves an optional scheme name; no name selects [`Plain`](Self::Plain).
    ///
    /// # Examples
    ///
    /// ```
    /// # use colscan_encoding::{EncodingError, EncodingScheme};
    /// assert_eq!(EncodingScheme::from_name(None), Ok(EncodingScheme::Plain));
    /// assert_eq!(EncodingScheme::from_name(Some("URL")), Ok(EncodingScheme::Url));
    /// assert!(matches!(
    ///     EncodingScheme::from_name(Some("rot13")),
    ///     Err(EncodingError::BadEncoder { .. })
    /// ));
    /// ```
    pub fn from_name(name: Option<&str>) -> Result<Self, EncodingError> {
        name.map_or(Ok(Self::Plain), str::parse::<Self>)
    }

    /// Encodes `bytes` into this scheme's textual form.
    ///
    /// Only [`Plain`](Self::Plain) can fail, for bytes that are not UTF-8.
    pub fn encode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Self::Base64 => Ok(STANDARD.encode(bytes)),
            Self::AsciiHex => Ok(ascii_hex::encode(bytes)),
            Self::Binary => Ok(binary::encode(bytes)),
            Self::Url => Ok(url::encode(bytes)),
            Self::Plain => String::from_utf8(bytes.to_vec()).map_err(|_| EncodingError::BadChars),
        }
    }

    /// Decodes one line of text into bytes.
    pub fn decode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Base64 => STANDARD.decode(text).map_err(|_| EncodingError::BadChars),
            Self::AsciiHex => ascii_hex::decode(text),
            Self::Binary => binary::decode(text),
            Self::Url => Ok(url::decode(text)),
            Self::Plain => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl FromStr for EncodingScheme {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EncodingError::BadEncoder { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SAMPLES: [&[u8]; 5] = [b"", b"\x00", b"\xff", b"hello world", b"\x00\x7f\x80\xff +%/"];

    #[test]
    fn test_names_round_trip() {
        for scheme in EncodingScheme::ALL {
            assert_eq!(scheme.name().parse::<EncodingScheme>(), Ok(scheme));
            assert_eq!(scheme.to_string(), scheme.name());
        }
    }

    #[test]
    fn test_names_ignore_case() {
        assert_eq!("BASE64".parse(), Ok(EncodingScheme::Base64));
        assert_eq!("AsciiHex".parse(), Ok(EncodingScheme::AsciiHex));
        assert_eq!(
            EncodingScheme::from_name(Some("plain")),
            Ok(EncodingScheme::Plain)
        );
    }

    #[test]
    fn test_url_plus_is_literal() {
        assert_eq!(EncodingScheme::Url.decode("a+b").unwrap(), b"a+b");
        assert_eq!(EncodingScheme::Url.encode(b"a+b c").unwrap(), "a%2Bb%20c");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "hex".parse::<EncodingScheme>(),
            Err(EncodingError::BadEncoder {
                name: "hex".to_owned()
            })
        );
    }

    #[test]
    fn test_round_trip_samples() {
        for scheme in [
            EncodingScheme::Base64,
            EncodingScheme::AsciiHex,
            EncodingScheme::Binary,
            EncodingScheme::Url,
        ] {
            for sample in SAMPLES {
                let encoded = scheme.encode(sample).unwrap();
                assert_eq!(
                    scheme.decode(&encoded).unwrap(),
                    sample,
                    "{scheme} round trip of {sample:?} via {encoded:?}"
                );
            }
        }
    }

    #[test]
    fn test_plain_round_trip() {
        for sample in [&b""[..], b"\x00", b"hello world", "caf\u{e9}".as_bytes()] {
            let encoded = EncodingScheme::Plain.encode(sample).unwrap();
            assert_eq!(EncodingScheme::Plain.decode(&encoded).unwrap(), sample);
        }
    }

    #[test]
    fn test_plain_rejects_invalid_utf8() {
        assert_eq!(
            EncodingScheme::Plain.encode(b"\xff"),
            Err(EncodingError::BadChars)
        );
    }

    #[test]
    fn test_base64() {
        assert_eq!(EncodingScheme::Base64.decode("AQE=").unwrap(), [1, 1]);
        assert_eq!(EncodingScheme::Base64.encode(b"\xff").unwrap(), "/w==");
        assert_eq!(
            EncodingScheme::Base64.decode("A*=="),
            Err(EncodingError::BadChars)
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            for scheme in [
                EncodingScheme::Base64,
                EncodingScheme::AsciiHex,
                EncodingScheme::Binary,
                EncodingScheme::Url,
            ] {
                let encoded = scheme.encode(&bytes).unwrap();
                prop_assert_eq!(scheme.decode(&encoded).unwrap(), bytes.clone());
            }
        }

        #[test]
        fn prop_plain_round_trip(text in ".{0,32}") {
            let decoded = EncodingScheme::Plain.decode(&text).unwrap();
            prop_assert_eq!(EncodingScheme::Plain.encode(&decoded).unwrap(), text);
        }
    }
}
