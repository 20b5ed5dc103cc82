//! City name folding for the weather query.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics from `city` and percent-encode it for a query string.
///
/// "São Paulo" becomes "Sao%20Paulo". Total over any input; empty stays empty.
pub fn normalize_city(city: &str) -> String {
    let folded: String = city
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();
    urlencoding::encode(&folded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(s: &str) -> String {
        urlencoding::decode(s).unwrap().into_owned()
    }

    #[test]
    fn test_ascii_name_unchanged() {
        assert_eq!(normalize_city("Fortaleza"), "Fortaleza");
        assert_eq!(normalize_city("Recife"), "Recife");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(decoded(&normalize_city("São Paulo")), "Sao Paulo");
        assert_eq!(decoded(&normalize_city("Goiânia")), "Goiania");
        assert_eq!(decoded(&normalize_city("Maceió")), "Maceio");
        assert_eq!(decoded(&normalize_city("Florianópolis")), "Florianopolis");
        assert_eq!(decoded(&normalize_city("Cuiabá")), "Cuiaba");
    }

    #[test]
    fn test_cedilla_is_folded() {
        assert_eq!(decoded(&normalize_city("Iguaçu")), "Iguacu");
    }

    #[test]
    fn test_already_decomposed_input() {
        // "a" followed by COMBINING TILDE
        assert_eq!(normalize_city("Sa\u{303}o"), "Sao");
    }

    #[test]
    fn test_spaces_and_reserved_are_encoded() {
        assert_eq!(normalize_city("São Paulo"), "Sao%20Paulo");
        assert_eq!(normalize_city("Embu-Guaçu"), "Embu-Guacu");
        assert_eq!(normalize_city("A&B=C"), "A%26B%3DC");
        assert_eq!(normalize_city("Pau d'Alho"), "Pau%20d%27Alho");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_city(""), "");
    }

    #[test]
    fn test_deterministic() {
        let first = normalize_city("Ribeirão Preto");
        let second = normalize_city("Ribeirão Preto");
        assert_eq!(first, second);
    }
}
