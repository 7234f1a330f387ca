// ============================================================================
// Validation des champs du formulaire
// ============================================================================
// Vérifie le montant et la date saisis avant d'accepter une dépense
//
// CONCEPTS RUST :
// 1. LazyLock : regex compilée une seule fois, au premier usage
// 2. Fonctions pures : pas d'état, un bool en sortie, jamais de panic
// 3. Option et ? : parse_amount s'arrête au premier échec
// ============================================================================

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Montant maximal accepté par le formulaire
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Chiffres, puis au plus deux décimales (le point final seul est toléré)
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{0,2})?$").expect("amount pattern is valid"));

/// MM/DD/YYYY, mois 01-12, jour 01-31 (aucune vérification calendaire)
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/[0-9]{4}$")
        .expect("date pattern is valid")
});

/// Valide un montant, y compris en cours de saisie
///
/// - "" est valide (l'utilisateur n'a pas encore tapé)
/// - sinon : chiffres avec au plus 2 décimales, valeur dans [0, 1 000 000]
///
/// # Exemples
/// ```
/// use lazyexpense::validation::validate_amount;
///
/// assert!(validate_amount(""));
/// assert!(validate_amount("12.5"));
/// assert!(!validate_amount("12.345"));
/// assert!(!validate_amount("abc"));
/// ```
pub fn validate_amount(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    parse_amount(text).is_some()
}

/// Convertit un montant valide et non vide en Decimal
///
/// Retourne None si le texte est vide, mal formé ou hors bornes.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    if !AMOUNT_PATTERN.is_match(text) {
        return None;
    }

    // "12." est une saisie en cours : on l'interprète comme 12
    let amount = Decimal::from_str(text.trim_end_matches('.')).ok()?;

    if amount >= Decimal::ZERO && amount <= MAX_AMOUNT {
        Some(amount)
    } else {
        None
    }
}

/// Valide une date au format MM/DD/YYYY
///
/// Vérification de format uniquement : "02/30/2024" passe.
pub fn validate_date(text: &str) -> bool {
    DATE_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_amount_is_in_progress() {
        assert!(validate_amount(""));
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_amounts_in_range() {
        for text in ["0", "0.00", "7", "12.5", "12.50", "999999.99", "1000000", "1000000.00", "12."] {
            assert!(validate_amount(text), "{text} should be valid");
        }
    }

    #[test]
    fn test_amounts_out_of_range() {
        assert!(!validate_amount("-0.01"));
        assert!(!validate_amount("1000000.01"));
        assert!(!validate_amount("2000000"));
    }

    #[test]
    fn test_amount_too_many_decimals() {
        assert!(!validate_amount("12.345"));
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        for text in ["abc", "1e5", " 12", "12 ", "+5", ".5", "1,000", "12.3.4", "١٢"] {
            assert!(!validate_amount(text), "{text:?} should be invalid");
        }
    }

    #[test]
    fn test_amount_overflow_is_rejected() {
        assert!(!validate_amount("99999999999999999999999999999999999"));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("12.50").map(|d| d.to_string()), Some("12.50".to_string()));
        assert_eq!(parse_amount("12."), Some(Decimal::from(12)));
    }

    #[test]
    fn test_date_format_only() {
        assert!(validate_date("04/21/2024"));
        assert!(validate_date("12/31/1999"));
        // Pas de vérification calendaire : comportement connu
        assert!(validate_date("02/30/2024"));
        assert!(validate_date("02/31/2023"));
    }

    #[test]
    fn test_date_out_of_range() {
        assert!(!validate_date("13/01/2024"));
        assert!(!validate_date("00/10/2024"));
        assert!(!validate_date("01/32/2024"));
        assert!(!validate_date("01/00/2024"));
    }

    #[test]
    fn test_date_fixed_width() {
        assert!(!validate_date("1/01/2024"));
        assert!(!validate_date("01/1/2024"));
        assert!(!validate_date("01/01/24"));
        assert!(!validate_date("01/01/20245"));
        assert!(!validate_date("2024-01-01"));
        assert!(!validate_date(""));
    }
}
