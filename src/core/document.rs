//! CPF/CNPJ input handling: digit normalization, progressive masking and
//! check-digit validation.
//!
//! The entry point is [`normalize_and_validate`], which never fails. Forms
//! keep a [`DocumentInput`] per field and feed it every change event.

use serde::{Deserialize, Serialize};

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;

pub const INVALID_DOCUMENT_MESSAGE: &str = "CPF ou CNPJ inválido.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Individual taxpayer number, 11 digits.
    Cpf,
    /// Company registry number, 14 digits.
    Cnpj,
}

impl DocumentKind {
    /// Classifies a digit-only string. Only terminal lengths have a kind.
    pub fn of_digits(digits: &str) -> Option<Self> {
        match digits.len() {
            CPF_LEN => Some(DocumentKind::Cpf),
            CNPJ_LEN => Some(DocumentKind::Cnpj),
            _ => None,
        }
    }

    /// Pattern used while typing: anything up to 11 digits is masked as CPF.
    pub fn mask_pattern(len: usize) -> Self {
        if len <= CPF_LEN {
            DocumentKind::Cpf
        } else {
            DocumentKind::Cnpj
        }
    }

    /// Separator inserted before each digit index.
    fn separators(self) -> &'static [(usize, char)] {
        match self {
            DocumentKind::Cpf => &[(3, '.'), (6, '.'), (9, '-')],
            DocumentKind::Cnpj => &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
        }
    }

    fn is_valid(self, digits: &[u32]) -> bool {
        match self {
            DocumentKind::Cpf => cpf_checksum_matches(digits),
            DocumentKind::Cnpj => cnpj_checksum_matches(digits),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verdict {
    /// Digit count is not 11 or 14; nothing to report yet.
    #[default]
    Incomplete,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentCheck {
    pub masked: String,
    pub digits: String,
    pub kind: Option<DocumentKind>,
    pub verdict: Verdict,
}

impl DocumentCheck {
    pub fn error_message(&self) -> Option<&'static str> {
        match self.verdict {
            Verdict::Invalid => Some(INVALID_DOCUMENT_MESSAGE),
            Verdict::Incomplete | Verdict::Valid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }
}

pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Applies the CPF or CNPJ mask as far as the available digits allow.
/// Non-digit input characters are ignored.
pub fn mask(digits: &str) -> String {
    let digits = normalize(digits);
    let separators = DocumentKind::mask_pattern(digits.len()).separators();

    let mut masked = String::with_capacity(digits.len() + separators.len());
    for (index, digit) in digits.chars().enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(at, _)| *at == index) {
            masked.push(*sep);
        }
        masked.push(digit);
    }
    masked
}

pub fn validate(digits: &str) -> Verdict {
    let Some(kind) = DocumentKind::of_digits(digits) else {
        return Verdict::Incomplete;
    };
    let Some(values) = digit_values(digits) else {
        return Verdict::Invalid;
    };

    if kind.is_valid(&values) {
        Verdict::Valid
    } else {
        Verdict::Invalid
    }
}

pub fn normalize_and_validate(raw: &str) -> DocumentCheck {
    let digits = normalize(raw);
    DocumentCheck {
        masked: mask(&digits),
        kind: DocumentKind::of_digits(&digits),
        verdict: validate(&digits),
        digits,
    }
}

pub fn is_valid_cpf(digits: &str) -> bool {
    digits.len() == CPF_LEN && validate(digits) == Verdict::Valid
}

pub fn is_valid_cnpj(digits: &str) -> bool {
    digits.len() == CNPJ_LEN && validate(digits) == Verdict::Valid
}

fn digit_values(digits: &str) -> Option<Vec<u32>> {
    digits.chars().map(|c| c.to_digit(10)).collect()
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    // Weights run from len+1 down to 2.
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 | 11 => 0,
        r => r,
    }
}

fn cpf_checksum_matches(digits: &[u32]) -> bool {
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

fn cnpj_check_digit(digits: &[u32]) -> u32 {
    // Cycle 5..2,9..2 for 12 digits; 6..2,9..2 for 13.
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0;
    for d in digits {
        sum += d * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

fn cnpj_checksum_matches(digits: &[u32]) -> bool {
    cnpj_check_digit(&digits[..12]) == digits[12] && cnpj_check_digit(&digits[..13]) == digits[13]
}

/// Per-field state for a CPF/CNPJ input. Each change replaces the previous
/// result; the verdict drops back to `Incomplete` whenever the digit count
/// leaves the terminal lengths.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    current: DocumentCheck,
}

impl DocumentInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(raw: &str) -> Self {
        let mut input = Self::new();
        input.on_change(raw);
        input
    }

    pub fn on_change(&mut self, raw: &str) -> &DocumentCheck {
        let next = normalize_and_validate(raw);
        if next.verdict != self.current.verdict {
            tracing::trace!(
                from = ?self.current.verdict,
                to = ?next.verdict,
                digits = next.digits.len(),
                "document verdict changed"
            );
        }
        self.current = next;
        &self.current
    }

    pub fn value(&self) -> &str {
        &self.current.masked
    }

    pub fn digits(&self) -> &str {
        &self.current.digits
    }

    pub fn verdict(&self) -> Verdict {
        self.current.verdict
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.current.error_message()
    }

    pub fn check(&self) -> &DocumentCheck {
        &self.current
    }
}
