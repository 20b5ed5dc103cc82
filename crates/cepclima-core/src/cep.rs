//! Postal code (CEP) validation.

use serde::Deserialize;

use crate::error::ClientInputError;

/// Number of digits in a CEP.
pub const CEP_LENGTH: usize = 8;

/// Returns true when `input` is exactly eight ASCII decimal digits.
///
/// The input is taken verbatim: no trimming, no padding.
pub fn is_valid_cep(input: &str) -> bool {
    input.len() == CEP_LENGTH && input.bytes().all(|b| b.is_ascii_digit())
}

/// A postal code that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeQuery {
    code: String,
}

impl PostalCodeQuery {
    /// Validate `code` and wrap it.
    pub fn parse(code: &str) -> Result<Self, ClientInputError> {
        if code.is_empty() {
            return Err(ClientInputError::MissingCep);
        }
        if !is_valid_cep(code) {
            return Err(ClientInputError::InvalidCep);
        }
        Ok(Self {
            code: code.to_string(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl std::fmt::Display for PostalCodeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Gateway request body: `{"cep": "01001000"}`.
///
/// Decoded fresh for every request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CepRequest {
    #[serde(default)]
    pub cep: Option<String>,
}

impl CepRequest {
    /// Decode a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ClientInputError> {
        serde_json::from_slice(body).map_err(|e| ClientInputError::MalformedRequest(e.to_string()))
    }

    /// Turn the decoded body into a validated query.
    pub fn into_query(self) -> Result<PostalCodeQuery, ClientInputError> {
        PostalCodeQuery::parse(self.cep.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_eight_digits() {
        assert!(is_valid_cep("01001000"));
        assert!(is_valid_cep("99999999"));
        assert!(is_valid_cep("00000000"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid_cep(""));
        assert!(!is_valid_cep("0100100"));
        assert!(!is_valid_cep("010010000"));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(!is_valid_cep("abc"));
        assert!(!is_valid_cep("01001-00"));
        assert!(!is_valid_cep("0100100a"));
        assert!(!is_valid_cep(" 1001000"));
        assert!(!is_valid_cep("01001000\n"));
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(!is_valid_cep("٠١٠٠١٠٠٠"));
        // Fullwidth digits
        assert!(!is_valid_cep("０１００１０００"));
    }

    #[test]
    fn test_validity_matches_definition() {
        let samples = [
            "", "1", "12345678", "1234567", "123456789", "1234567x", "x2345678", "12 45678",
            "+1234567", "-1234567", "12345678 ", "ABCDEFGH", "00000001",
        ];
        for s in samples {
            let expected = s.chars().count() == 8 && s.chars().all(|c| c.is_ascii_digit());
            assert_eq!(is_valid_cep(s), expected, "mismatch for {:?}", s);
        }
    }

    #[test]
    fn test_parse_distinguishes_missing_from_invalid() {
        assert_eq!(PostalCodeQuery::parse(""), Err(ClientInputError::MissingCep));
        assert_eq!(PostalCodeQuery::parse("abc"), Err(ClientInputError::InvalidCep));
        let query = PostalCodeQuery::parse("01001000").unwrap();
        assert_eq!(query.code(), "01001000");
        assert_eq!(query.to_string(), "01001000");
    }

    #[test]
    fn test_request_body_decoding() {
        let req = CepRequest::from_slice(br#"{"cep": "01001000"}"#).unwrap();
        assert_eq!(req.into_query().unwrap().code(), "01001000");

        let req = CepRequest::from_slice(b"{}").unwrap();
        assert_eq!(req.into_query(), Err(ClientInputError::MissingCep));

        let req = CepRequest::from_slice(br#"{"cep": null}"#).unwrap();
        assert_eq!(req.into_query(), Err(ClientInputError::MissingCep));
    }

    #[test]
    fn test_request_body_malformed() {
        assert!(matches!(
            CepRequest::from_slice(b""),
            Err(ClientInputError::MalformedRequest(_))
        ));
        assert!(matches!(
            CepRequest::from_slice(br#"{"cep": 1001000}"#),
            Err(ClientInputError::MalformedRequest(_))
        ));
        assert!(matches!(
            CepRequest::from_slice(b"cep=01001000"),
            Err(ClientInputError::MalformedRequest(_))
        ));
    }
}
