//! Field validators for the intake conversation. Inputs arrive already
//! trimmed and lower-cased.

use std::sync::OnceLock;

use regex::Regex;

/// Words that end the conversation when they appear anywhere in the input.
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_YEARS_EXPERIENCE: u8 = 50;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?1?[0-9]{10,14}$").expect("phone pattern is valid"))
}

/// Substring match, not whole-word: "goodbye" and "byebye" both count.
pub fn contains_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| input.contains(*k))
}

pub fn is_valid_name(input: &str) -> bool {
    input.chars().count() >= MIN_NAME_CHARS
}

pub fn is_valid_email(input: &str) -> bool {
    email_regex().is_match(input)
}

pub fn is_valid_phone(input: &str) -> bool {
    phone_regex().is_match(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceError {
    NotANumber,
    OutOfRange,
}

/// Accepts a whole number of years in `0..=50`.
///
/// Anything shaped like an integer (optional sign, digits) that falls outside
/// the range, including values too large for any integer type, is
/// `OutOfRange`; everything else is `NotANumber`.
pub fn parse_experience(input: &str) -> Result<u8, ExperienceError> {
    let digits = input
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExperienceError::NotANumber);
    }
    match input.parse::<i64>() {
        Ok(years) if (0..=i64::from(MAX_YEARS_EXPERIENCE)).contains(&years) => Ok(years as u8),
        _ => Err(ExperienceError::OutOfRange),
    }
}
