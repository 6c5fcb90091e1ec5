//! Masks and checks for the remaining form inputs: phone, e-mail, money,
//! CEP and dates.

use crate::core::document::normalize as digits_only;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

pub const INVALID_PHONE_MESSAGE: &str = "Telefone inválido.";
pub const INVALID_EMAIL_MESSAGE: &str = "E-mail inválido.";

const PHONE_MAX_DIGITS: usize = 11;
const CEP_LEN: usize = 8;

/// `(NN) NNNNN-NNNN` for mobile numbers, `(NN) NNNN-NNNN` for landlines.
pub fn mask_phone(raw: &str) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(PHONE_MAX_DIGITS);

    if digits.is_empty() {
        return digits;
    }
    if digits.len() <= 2 {
        return format!("({}", digits);
    }

    let (area, number) = digits.split_at(2);
    let prefix_len = if digits.len() == PHONE_MAX_DIGITS { 5 } else { 4 };
    if number.len() <= prefix_len {
        format!("({}) {}", area, number)
    } else {
        let (prefix, suffix) = number.split_at(prefix_len);
        format!("({}) {}-{}", area, prefix, suffix)
    }
}

pub fn is_valid_phone(raw: &str) -> bool {
    matches!(digits_only(raw).len(), 10 | 11)
}

pub fn phone_error(raw: &str) -> Option<&'static str> {
    if raw.is_empty() || is_valid_phone(raw) {
        None
    } else {
        Some(INVALID_PHONE_MESSAGE)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static e-mail pattern"))
}

pub fn is_valid_email(raw: &str) -> bool {
    email_regex().is_match(raw)
}

pub fn email_error(raw: &str) -> Option<&'static str> {
    if raw.is_empty() || is_valid_email(raw) {
        None
    } else {
        Some(INVALID_EMAIL_MESSAGE)
    }
}

/// Formats a value as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let (units, fraction) = (cents / 100, cents % 100);

    let raw = units.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction)
}

/// Reads a typed money value back into a number. Thousands separators are
/// dropped and the decimal comma becomes a point.
pub fn parse_brl(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    kept.replacen(',', ".", 1).parse().ok()
}

pub fn normalize_cep(raw: &str) -> String {
    digits_only(raw)
}

pub fn is_complete_cep(raw: &str) -> bool {
    normalize_cep(raw).len() == CEP_LEN
}

pub fn mask_cep(raw: &str) -> String {
    let mut digits = normalize_cep(raw);
    digits.truncate(CEP_LEN);
    if digits.len() > 5 {
        digits.insert(5, '-');
    }
    digits
}

/// Renders an ISO date or timestamp as `dd/MM/yyyy`, or `N/A`.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });

    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("1"), "(1");
        assert_eq!(mask_phone("119"), "(11) 9");
        assert_eq!(mask_phone("1198765"), "(11) 9876-5");
        assert_eq!(mask_phone("1132654321"), "(11) 3265-4321");
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(mask_phone("(11) 98765-43219"), "(11) 98765-4321");
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("(11) 3265-4321"));
        assert!(is_valid_phone("11987654321"));
        assert!(!is_valid_phone("119876"));
        assert_eq!(phone_error(""), None);
        assert_eq!(phone_error("(11) 9876"), Some(INVALID_PHONE_MESSAGE));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("compras@aromas.com.br"));
        assert!(!is_valid_email("compras@aromas"));
        assert!(!is_valid_email("com pras@aromas.com"));
        assert_eq!(email_error(""), None);
        assert_eq!(email_error("x@y"), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(5.5), "R$ 5,50");
        assert_eq!(format_brl(1234.567), "R$ 1.234,57");
        assert_eq!(format_brl(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
    }

    #[test]
    fn test_parse_brl() {
        assert_eq!(parse_brl("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_brl("12,5"), Some(12.5));
        assert_eq!(parse_brl("-R$ 3,00"), Some(-3.0));
        assert_eq!(parse_brl("R$ "), None);
    }

    #[test]
    fn test_cep() {
        assert_eq!(mask_cep("01310100"), "01310-100");
        assert_eq!(mask_cep("0131"), "0131");
        assert!(is_complete_cep("01310-100"));
        assert!(!is_complete_cep("01310-10"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-03-15")), "15/03/2024");
        assert_eq!(format_date(Some("2024-03-15T14:02:26.123Z")), "15/03/2024");
        assert_eq!(format_date(Some("2024-03-15T14:02:26")), "15/03/2024");
        assert_eq!(format_date(Some("ontem")), "N/A");
        assert_eq!(format_date(None), "N/A");
    }
}
