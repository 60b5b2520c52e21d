//! Turning encoded text into a [`ByteTable`].
//!
//! Every line is trimmed and blank lines are skipped; each remaining line is
//! decoded with the selected [`EncodingScheme`]. Decoding is fail-fast: the
//! first line that does not decode aborts ingestion and no table is built.

use colscan_encoding::{EncodingError, EncodingScheme};

use crate::table::ByteTable;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("failed to decode line {line} as {scheme}")]
pub struct IngestError {
    /// 1-based line number in the input.
    pub line: usize,
    pub scheme: EncodingScheme,
    pub source: EncodingError,
}

/// Decodes text with one encoded row per line.
///
/// # Examples
///
/// ```
/// # use colscan_analysis::ingest::decode_text;
/// # use colscan_encoding::EncodingScheme;
/// let table = decode_text("AQE=\n\n  AQI=  \n", EncodingScheme::Base64).unwrap();
/// assert_eq!(table.rows(), [vec![1, 1], vec![1, 2]]);
/// ```
pub fn decode_text(text: &str, scheme: EncodingScheme) -> Result<ByteTable, IngestError> {
    decode_lines(text.lines(), scheme)
}

/// Decodes a sequence of lines, numbering them from 1 for error reports.
pub fn decode_lines<I, S>(lines: I, scheme: EncodingScheme) -> Result<ByteTable, IngestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rows = lines
        .into_iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.as_ref().trim();
            if line.is_empty() {
                return None;
            }
            Some(scheme.decode(line).map_err(|source| IngestError {
                line: i + 1,
                scheme,
                source,
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(rows = rows.len(), %scheme, "decoded input rows");
    Ok(ByteTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let table = decode_text("ab\ncde\n", EncodingScheme::Plain).unwrap();
        assert_eq!(table.rows(), [b"ab".to_vec(), b"cde".to_vec()]);
    }

    #[test]
    fn test_blank_and_padded_lines() {
        let table = decode_lines(["  0102 ", "", "\t", "ff"], EncodingScheme::AsciiHex).unwrap();
        assert_eq!(table.rows(), [vec![1, 2], vec![255]]);
    }

    #[test]
    fn test_fail_fast_reports_line() {
        let err = decode_text("0102\n\n010\nzz\n", EncodingScheme::AsciiHex).unwrap_err();
        assert_eq!(
            err,
            IngestError {
                line: 3,
                scheme: EncodingScheme::AsciiHex,
                source: EncodingError::BadLength,
            }
        );
    }

    #[test]
    fn test_binary_bad_length() {
        let err = decode_text("0000000100000010\n0101\n", EncodingScheme::Binary).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.source, EncodingError::BadLength);
    }

    #[test]
    fn test_empty_input() {
        let table = decode_text("\n \n", EncodingScheme::Base64).unwrap();
        assert!(table.is_empty());
    }
}
