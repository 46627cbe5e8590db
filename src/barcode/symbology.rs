use thiserror::Error;

/// Symbologies the acquisition subsystem accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
}

pub const ALL: [Symbology; 4] = [
    Symbology::Ean13,
    Symbology::Ean8,
    Symbology::UpcA,
    Symbology::UpcE,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbologyError {
    #[error("barcode must contain only digits")]
    NotDigits,
    #[error("no supported symbology has {0} digits")]
    UnsupportedLength(usize),
    #[error("check digit mismatch")]
    BadCheckDigit,
}

/// Classify a digit string by length alone.
pub fn classify(code: &str) -> Result<Symbology, SymbologyError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(SymbologyError::NotDigits);
    }
    match code.len() {
        13 => Ok(Symbology::Ean13),
        12 => Ok(Symbology::UpcA),
        8 => Ok(Symbology::Ean8),
        // UPC-E carries its check digit only after expansion to UPC-A,
        // which is not done here.
        6 | 7 => Ok(Symbology::UpcE),
        n => Err(SymbologyError::UnsupportedLength(n)),
    }
}

/// Classify and, where the symbology carries its check digit in place
/// (EAN-8, UPC-A, EAN-13), verify it. Guards the catalog against a
/// corrupted decode.
pub fn verify(code: &str) -> Result<Symbology, SymbologyError> {
    let symbology = classify(code)?;
    match symbology {
        Symbology::Ean13 | Symbology::Ean8 | Symbology::UpcA => {
            if gs1_checksum_valid(code) {
                Ok(symbology)
            } else {
                Err(SymbologyError::BadCheckDigit)
            }
        }
        Symbology::UpcE => Ok(symbology),
    }
}

/// GS1 mod-10 check: weights 1 and 3 alternate from the check digit
/// leftwards; a valid code sums to a multiple of ten.
fn gs1_checksum_valid(code: &str) -> bool {
    let sum: u32 = code
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = (b - b'0') as u32;
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_length() {
        assert_eq!(classify("4006381333931"), Ok(Symbology::Ean13));
        assert_eq!(classify("036000291452"), Ok(Symbology::UpcA));
        assert_eq!(classify("73513537"), Ok(Symbology::Ean8));
        assert_eq!(classify("654321"), Ok(Symbology::UpcE));
        assert_eq!(classify("12345"), Err(SymbologyError::UnsupportedLength(5)));
        assert_eq!(classify("40063813339x1"), Err(SymbologyError::NotDigits));
        assert_eq!(classify(""), Err(SymbologyError::NotDigits));
    }

    #[test]
    fn verifies_known_good_codes() {
        assert_eq!(verify("4006381333931"), Ok(Symbology::Ean13));
        assert_eq!(verify("036000291452"), Ok(Symbology::UpcA));
        assert_eq!(verify("73513537"), Ok(Symbology::Ean8));
    }

    #[test]
    fn rejects_a_corrupted_digit() {
        // one digit off in an otherwise valid EAN-13
        assert_eq!(verify("4006381333932"), Err(SymbologyError::BadCheckDigit));
        assert_eq!(verify("4106381333931"), Err(SymbologyError::BadCheckDigit));
    }

    #[test]
    fn upc_e_is_accepted_without_check() {
        assert_eq!(verify("123456"), Ok(Symbology::UpcE));
    }
}
