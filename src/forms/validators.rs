//! Field Validators

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;

use super::FieldError;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const CPF_DIGITS: usize = 11;

/// Whether `email` looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Strips CPF formatting, returning the digits when there are exactly 11.
pub fn normalize_cpf(cpf: &str) -> Option<String> {
    let digits: String = cpf.chars().filter(char::is_ascii_digit).collect();

    (digits.len() == CPF_DIGITS).then_some(digits)
}

/// Masks a CPF as `000.000.000-00`, leaving values that are not a CPF as given.
pub fn format_cpf(cpf: &str) -> String {
    let Some(digits) = normalize_cpf(cpf) else {
        return cpf.to_string();
    };

    let (head, check) = digits.split_at(9);
    let groups: Vec<&str> = [0, 3, 6]
        .into_iter()
        .filter_map(|start| head.get(start..start + 3))
        .collect();

    format!("{}-{check}", groups.join("."))
}

/// Whether `date` is a calendar date written as `YYYY-MM-DD`.
pub fn is_valid_date(date: &str) -> bool {
    date.len() == 10 && date.parse::<Date>().is_ok()
}

pub(super) fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

pub(super) fn min_chars(value: &str, min: usize) -> Result<(), FieldError> {
    required(value)?;

    if value.trim().chars().count() < min {
        Err(FieldError::TooShort(min))
    } else {
        Ok(())
    }
}

pub(super) fn email(value: &str) -> Result<(), FieldError> {
    required(value)?;

    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

pub(super) fn cpf(value: &str) -> Result<(), FieldError> {
    required(value)?;

    normalize_cpf(value).map(|_| ()).ok_or(FieldError::InvalidCpf)
}

pub(super) fn date(value: &str) -> Result<(), FieldError> {
    required(value)?;

    if is_valid_date(value.trim()) {
        Ok(())
    } else {
        Err(FieldError::InvalidDate)
    }
}

/// Accepts values that fit a ticket count and are at least `min`.
pub(super) fn count(value: i64, min: i64) -> Result<u32, FieldError> {
    if value < min {
        return Err(FieldError::BelowMinimum(min));
    }

    u32::try_from(value).map_err(|_err| FieldError::AboveMaximum(i64::from(u32::MAX)))
}
