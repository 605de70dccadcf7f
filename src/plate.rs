// 🚗 Plate Validation - Raw input → structured plate code
// Spanish national format since 2000: 4 digits + 3 letters (1234BCD)

use crate::error::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Letters never issued in plates: vowels plus Ñ and Q (visually ambiguous)
pub const DISALLOWED_LETTERS: [char; 5] = ['Ñ', 'Q', 'I', 'O', 'U'];

pub const PLATE_LENGTH: usize = 7;
const DIGIT_COUNT: usize = 4;
const LETTER_COUNT: usize = 3;

// ============================================================================
// SUFFIX
// ============================================================================

/// Three-letter plate suffix over the reduced alphabet.
///
/// Ordering is plain byte comparison. Since the alphabet is restricted to
/// ASCII `A-Z`, this matches issuance order exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Suffix([u8; LETTER_COUNT]);

impl Suffix {
    /// Build a suffix from exactly three letters (already uppercase).
    pub fn new(letters: &str) -> Result<Suffix, ValidationError> {
        let chars: Vec<char> = letters.chars().collect();
        if chars.len() != LETTER_COUNT || !chars.iter().all(|c| c.is_alphabetic()) {
            return Err(ValidationError::WrongShape);
        }

        if let Some(letter) = chars.iter().find(|c| DISALLOWED_LETTERS.contains(c)) {
            return Err(ValidationError::DisallowedLetter(*letter));
        }

        if !chars.iter().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::WrongShape);
        }

        let mut bytes = [0u8; LETTER_COUNT];
        bytes.copy_from_slice(letters.as_bytes());
        Ok(Suffix(bytes))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII bytes ever reach the array
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Suffix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// PLATE CODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlateCode {
    /// Numeric part, 0..=9999 (leading zeros only exist in `Display`)
    pub number: u16,
    pub letters: Suffix,
}

impl fmt::Display for PlateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{}", self.number, self.letters)
    }
}

/// Trim surrounding whitespace and uppercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Validate a raw plate string.
///
/// Checks run in a fixed order: length, shape, disallowed letters. The
/// disallowed check runs before the ASCII check so that `Ñ` reports as a
/// disallowed letter rather than a shape error.
pub fn validate(raw: &str) -> Result<PlateCode, ValidationError> {
    let clean = normalize(raw);
    let chars: Vec<char> = clean.chars().collect();

    if chars.len() != PLATE_LENGTH {
        return Err(ValidationError::WrongLength { found: chars.len() });
    }

    let (digits, letters) = chars.split_at(DIGIT_COUNT);
    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::WrongShape);
    }

    let letters: String = letters.iter().collect();
    let suffix = Suffix::new(&letters)?;

    let digits: String = digits.iter().collect();
    let number = digits
        .parse::<u16>()
        .map_err(|_| ValidationError::WrongShape)?;

    Ok(PlateCode {
        number,
        letters: suffix,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plate() {
        let plate = validate("1234BCD").unwrap();
        assert_eq!(plate.number, 1234);
        assert_eq!(plate.letters.as_str(), "BCD");
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let plate = validate("  0042mxp \n").unwrap();
        assert_eq!(plate.number, 42);
        assert_eq!(plate.to_string(), "0042MXP");
    }

    #[test]
    fn test_display_round_trips_normalized_input() {
        for raw in ["0000BBB", "9999ZZZ", " 0107nfd", "5000MYF "] {
            let plate = validate(raw).unwrap();
            assert_eq!(plate.to_string(), normalize(raw));
        }
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(validate("123BCD"), Err(ValidationError::WrongLength { found: 6 }));
        assert_eq!(validate("12345BCD"), Err(ValidationError::WrongLength { found: 8 }));
        assert_eq!(validate(""), Err(ValidationError::WrongLength { found: 0 }));
    }

    #[test]
    fn test_wrong_shape() {
        assert_eq!(validate("BCD1234"), Err(ValidationError::WrongShape));
        assert_eq!(validate("123ABCD"), Err(ValidationError::WrongShape));
        assert_eq!(validate("1234BC1"), Err(ValidationError::WrongShape));
        assert_eq!(validate("12 4BCD"), Err(ValidationError::WrongShape));
    }

    #[test]
    fn test_disallowed_letters_any_position() {
        for letter in DISALLOWED_LETTERS {
            let combos = [
                format!("1234{}BC", letter),
                format!("1234B{}C", letter),
                format!("1234BC{}", letter),
            ];
            for raw in combos {
                assert_eq!(
                    validate(&raw),
                    Err(ValidationError::DisallowedLetter(letter)),
                    "input {}",
                    raw
                );
            }
        }
    }

    #[test]
    fn test_lowercase_enye_is_disallowed() {
        assert_eq!(validate("1234bñc"), Err(ValidationError::DisallowedLetter('Ñ')));
    }

    #[test]
    fn test_non_ascii_letter_is_wrong_shape() {
        assert_eq!(validate("1234BÇD"), Err(ValidationError::WrongShape));
    }

    #[test]
    fn test_suffix_ordering_is_bytewise() {
        let a = Suffix::new("MYF").unwrap();
        let b = Suffix::new("MYG").unwrap();
        let c = Suffix::new("NBB").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_suffix_serializes_as_string() {
        let json = serde_json::to_string(&validate("0001BBB").unwrap()).unwrap();
        assert_eq!(json, r#"{"number":1,"letters":"BBB"}"#);
    }
}
