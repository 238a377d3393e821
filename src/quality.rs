//! Conversion between numeric Phred quality scores and their ASCII encoding
use thiserror::Error;

/// Highest score that still encodes to a printable character with the Phred+33 offset
pub const MAX_PHRED: i32 = 93;

/// Character encoding a score of 0
const OFFSET: u8 = b'!';

/// Returned when a score or a quality character can't be converted
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    #[error("Phred score {score} at position {index} is outside of 0..={max}")]
    ScoreOutOfRange { score: i32, index: usize, max: i32 },
    #[error("quality character '{}' at position {index} is below the offset {offset}", .found.escape_default())]
    BelowOffset { found: char, index: usize, offset: u8 },
}

/// Encodes Phred scores as a Phred+33 string.
/// Every score has to be within `0..=93`.
///
/// ```
/// use rsbio_seq::quality::phred_to_ascii;
///
/// assert_eq!(phred_to_ascii(&[0, 1, 2, 3, 4]).unwrap(), "!\"#$%");
/// assert!(phred_to_ascii(&[94]).is_err());
/// ```
pub fn phred_to_ascii(scores: &[i32]) -> Result<String, QualityError> {
    let mut qual = String::with_capacity(scores.len());
    for (index, &score) in scores.iter().enumerate() {
        if !(0..=MAX_PHRED).contains(&score) {
            return Err(QualityError::ScoreOutOfRange {
                score,
                index,
                max: MAX_PHRED,
            });
        }
        qual.push(char::from(score as u8 + OFFSET));
    }
    Ok(qual)
}

/// Decodes a Phred+33 string into scores. Characters below `!` are rejected.
///
/// ```
/// use rsbio_seq::quality::ascii_to_phred;
///
/// assert_eq!(ascii_to_phred("!\"#$%").unwrap(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(ascii_to_phred("").unwrap(), Vec::<i32>::new());
/// ```
pub fn ascii_to_phred(qual: &str) -> Result<Vec<i32>, QualityError> {
    let mut scores = Vec::with_capacity(qual.len());
    for (index, c) in qual.chars().enumerate() {
        let code = c as u32;
        if code < u32::from(OFFSET) {
            return Err(QualityError::BelowOffset {
                found: c,
                index,
                offset: OFFSET,
            });
        }
        scores.push((code - u32::from(OFFSET)) as i32);
    }
    Ok(scores)
}
