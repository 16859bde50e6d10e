//! Built-in property validators and the validator registry
//!
//! Validators classify a raw value and return violation messages in display
//! order. Each rule is checked independently, so one value can produce
//! several messages.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::value::{value_text, Value};
use crate::schema::property::ValidatorFn;

pub const NAME_TOO_SHORT: &str = "A name must contain at least one character";
pub const NAME_NOT_LETTERS: &str = "A name must contain only letters";
pub const AGE_NOT_A_NUMBER: &str = "This is not a number !";
pub const AGE_NOT_POSITIVE_INTEGER: &str = "An age should be a positive integer";
pub const AGE_TOO_HIGH: &str = "A valid age should be less than 121";

/// Highest accepted age
pub const MAX_AGE: f64 = 120.0;

lazy_static! {
    static ref LETTERS: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap();
}

/// Validate a person's name: non-empty, ASCII letters only
pub fn validate_name(value: &Value) -> Vec<String> {
    let text = value_text(value);
    let mut errors = Vec::new();

    if text.is_empty() {
        errors.push(NAME_TOO_SHORT.to_string());
    }
    if !LETTERS.is_match(&text) {
        errors.push(NAME_NOT_LETTERS.to_string());
    }

    errors
}

/// Validate an age
///
/// Three independent rules, in order: the value must convert to a number,
/// it must be written as a plain run of digits, and its numeric value must
/// not exceed [`MAX_AGE`].
pub fn validate_age(value: &Value) -> Vec<String> {
    let text = value_text(value);
    let number = to_number(&text);
    let mut errors = Vec::new();

    if number.is_none() {
        errors.push(AGE_NOT_A_NUMBER.to_string());
    }
    if !DIGITS.is_match(&text) {
        errors.push(AGE_NOT_POSITIVE_INTEGER.to_string());
    }
    if number.is_some_and(|n| n > MAX_AGE) {
        errors.push(AGE_TOO_HIGH.to_string());
    }

    errors
}

/// Convert text to a number with browser form-field semantics
///
/// Surrounding whitespace is ignored and blank text is zero. Accepts
/// decimal literals with optional sign and exponent, `Infinity` with an
/// optional sign, and unsigned `0x`/`0o`/`0b` integers. Returns `None` for
/// anything else (the NaN case).
pub fn to_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(is_str_whitespace);

    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    if DECIMAL_LITERAL.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

/// Whitespace and line terminators ignored around numeric text
///
/// Narrower than `char::is_whitespace`: U+0085 (NEL) is not included, while
/// the byte order mark U+FEFF is.
fn is_str_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Named validators that form definitions can refer to
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: BTreeMap<String, ValidatorFn>,
}

impl ValidatorRegistry {
    /// An empty registry
    pub fn empty() -> Self {
        Self {
            validators: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in `name` and `age` validators
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("name", validate_name);
        registry.register("age", validate_age);
        registry
    }

    /// Register (or replace) a validator under a name
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    pub fn get(&self, name: &str) -> Option<ValidatorFn> {
        self.validators.get(name).cloned()
    }

    /// Registered validator names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.validators.keys().map(String::as_str).collect()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
