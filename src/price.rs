use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

/// Normalizes raw price text from listing markup into a decimal amount.
///
/// Peruvian listings mix anglo ("S/ 1,299.90") and latin ("S/ 1.299,90")
/// separator conventions, sometimes within the same page. The rule: when
/// both separators appear, the rightmost is the decimal point; a single
/// comma is a decimal comma; repeated separators of one kind are thousands
/// groupings.
pub struct PriceParser {
    junk: Regex,
}

impl PriceParser {
    pub fn new() -> Self {
        PriceParser {
            junk: Regex::new(r"[^\d,\.]").unwrap(),
        }
    }

    /// Parse a raw price string. Returns `None` when no digits survive
    /// cleanup or the remainder is not a valid number.
    pub fn parse(&self, raw: &str) -> Option<Decimal> {
        let cleaned = self.junk.replace_all(raw, "");
        // "S/." sheds a stray separator into the cleaned text
        let cleaned = cleaned.trim_matches(|c| c == '.' || c == ',');
        if cleaned.is_empty() {
            return None;
        }
        Decimal::from_str(&normalize_separators(cleaned)).ok()
    }
}

impl Default for PriceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_separators(cleaned: &str) -> String {
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if cleaned.matches(',').count() == 1 => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("S/ 1,299.90", "1299.90")]
    #[case("S/ 1.299,90", "1299.90")]
    #[case("S/149", "149")]
    #[case("S/ 89.90", "89.90")]
    #[case("1,5", "1.5")]
    #[case("1.299.000", "1299000")]
    #[case("1,299,000", "1299000")]
    #[case("Antes: S/. 2,499.00", "2499.00")]
    fn test_parse_known_formats(#[case] raw: &str, #[case] expected: &str) {
        let parser = PriceParser::new();
        assert_eq!(parser.parse(raw), Some(Decimal::from_str(expected).unwrap()));
    }

    #[rstest]
    #[case("")]
    #[case("S/")]
    #[case("precio no disponible")]
    fn test_parse_rejects_non_prices(#[case] raw: &str) {
        let parser = PriceParser::new();
        assert_eq!(parser.parse(raw), None);
    }

    #[test]
    fn test_parse_keeps_centimos() {
        let parser = PriceParser::new();
        assert_eq!(parser.parse("S/ 0.90"), Some(Decimal::new(90, 2)));
    }
}
