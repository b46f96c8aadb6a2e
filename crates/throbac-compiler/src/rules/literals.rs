//! literals.rs — Numéraux, chaînes, booléens, lectures de variables.

use crate::error::{Result, TranslateError};

/// Mots-chiffres → chiffres décimaux.
const DIGITS: [(&str, char); 10] = [
    ("NIL", '0'),
    ("I", '1'),
    ("II", '2'),
    ("III", '3'),
    ("IV", '4'),
    ("V", '5'),
    ("VI", '6'),
    ("VII", '7'),
    ("VIII", '8'),
    ("IX", '9'),
];

fn digit(word: &str) -> Result<char> {
    DIGITS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, d)| *d)
        .ok_or_else(|| TranslateError::UnknownDigit(word.to_string()))
}

/// `.NIL.NIL.VII.` → `7`. Les zéros de tête sont retirés (C les lirait en octal) ;
/// aucun passage par un entier, donc pas de dépassement.
pub fn number(text: &str) -> Result<String> {
    let mut digits = String::new();
    for word in text.trim_matches('.').split('.') {
        digits.push(digit(word)?);
    }
    let trimmed = digits.trim_start_matches('0');
    Ok(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
}

/// `^YO+^` → `"YO\n"` (les `+` deviennent la séquence d’échappement `\n`).
pub fn string(text: &str) -> String {
    let body = text
        .strip_prefix('^')
        .and_then(|s| s.strip_suffix('^'))
        .unwrap_or(text);
    format!("\"{}\"", body.replace('+', "\\n"))
}

pub fn boolean(text: &str) -> Result<String> {
    match text {
        "VERUM" => Ok("true".to_string()),
        "FALSUM" => Ok("false".to_string()),
        other => Err(TranslateError::spelling("un booléen", other)),
    }
}

/// Les identifiants Throbac sont des identifiants C valides : recopiés tels quels.
pub fn variable(name: &str) -> String {
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numerals() {
        assert_eq!(number(".NIL.").unwrap(), "0");
        assert_eq!(number(".NIL.NIL.VII.").unwrap(), "7");
        assert_eq!(number(".I.II.III.IV.V.VI.VII.VIII.IX.NIL.").unwrap(), "1234567890");
        assert_eq!(number(".NIL.NIL.NIL.").unwrap(), "0");
        assert_eq!(number(".IX.IX.IX.IX.IX.IX.IX.IX.IX.IX.IX.IX.").unwrap(), "999999999999");
    }

    #[test]
    fn unknown_digit_word_is_fatal() {
        assert_eq!(number(".X.").unwrap_err(), TranslateError::UnknownDigit("X".into()));
        assert_eq!(number(".IIII.").unwrap_err(), TranslateError::UnknownDigit("IIII".into()));
    }

    #[test]
    fn strings() {
        assert_eq!(string("^^"), "\"\"");
        assert_eq!(string("^HELLO.WORLD^"), "\"HELLO.WORLD\"");
        assert_eq!(string("^YO+YOYO++^"), r#""YO\nYOYO\n\n""#);
        assert_eq!(string("^+^"), r#""\n""#);
    }

    #[test]
    fn booleans() {
        assert_eq!(boolean("VERUM").unwrap(), "true");
        assert_eq!(boolean("FALSUM").unwrap(), "false");
        assert!(matches!(boolean("verum"), Err(TranslateError::UnknownSpelling { .. })));
    }

    proptest! {
        #[test]
        fn numerals_lose_leading_zeros_only(digits in proptest::collection::vec(0usize..10, 1..24)) {
            let text = format!(
                ".{}.",
                digits.iter().map(|d| DIGITS[*d].0).collect::<Vec<_>>().join(".")
            );
            let decimal: String = digits.iter().map(|d| DIGITS[*d].1).collect();
            let out = number(&text).unwrap();

            prop_assert!(out == "0" || !out.starts_with('0'));
            prop_assert!(decimal.ends_with(out.as_str()));
            let stripped = decimal.trim_start_matches('0');
            prop_assert_eq!(out.as_str(), if stripped.is_empty() { "0" } else { stripped });
        }
    }
}
