// Scanned-token parsing
// A scanner hands us either a card number or a veteran id; anything else is
// malformed and must be rejected before any ledger access.

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::VeteranId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanToken {
    /// All-digit membership card number.
    Card(u32),
    /// Explicit veteran id, e.g. from a manual lookup.
    Veteran(VeteranId),
}

#[derive(Debug, Error)]
#[error("malformed scan token '{0}'")]
pub struct MalformedToken(pub String);

impl ScanToken {
    pub fn parse(raw: &str) -> Result<Self, MalformedToken> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MalformedToken(raw.to_string()));
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return trimmed
                .parse::<u32>()
                .map(ScanToken::Card)
                .map_err(|_| MalformedToken(raw.to_string()));
        }
        if let Ok(id) = Uuid::parse_str(trimmed) {
            return Ok(ScanToken::Veteran(VeteranId(id)));
        }
        Err(MalformedToken(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_card_number() {
        let token = ScanToken::parse("4242").expect("parse card");
        assert_eq!(token, ScanToken::Card(4242));
    }

    #[test]
    fn parse_trims_whitespace() {
        let token = ScanToken::parse(" 17 ").expect("parse card");
        assert_eq!(token, ScanToken::Card(17));
    }

    #[test]
    fn parse_accepts_veteran_id() {
        let id = "01234567-89ab-cdef-0123-456789abcdef";
        let token = ScanToken::parse(id).expect("parse uuid");
        let expected = VeteranId(Uuid::parse_str(id).expect("uuid"));
        assert_eq!(token, ScanToken::Veteran(expected));
    }

    #[test]
    fn parse_rejects_empty_token() {
        ScanToken::parse("   ").expect_err("reject empty");
    }

    #[test]
    fn parse_rejects_mixed_garbage() {
        ScanToken::parse("42ab").expect_err("reject garbage");
    }

    #[test]
    fn parse_rejects_card_number_overflow() {
        ScanToken::parse("99999999999999999999").expect_err("reject overflow");
    }
}
