//! Member data validation.
//!
//! Checks the fields required before a member record is submitted:
//! - Name, city and chapter present
//! - Email shape
//! - Indian ten-digit mobile number

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("mobile pattern compiles"));

/// Member fields as entered, before submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub city: Option<String>,
    pub chapter_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Non-digits are stripped before matching, so "98765 43210" passes.
pub fn is_valid_mobile_number(mobile: &str) -> bool {
    let digits: String = mobile.chars().filter(char::is_ascii_digit).collect();
    MOBILE_PATTERN.is_match(&digits)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

pub fn validate_member(member: &MemberDraft) -> ValidationReport {
    let mut errors = Vec::new();

    if is_blank(&member.name) {
        errors.push("Name is required".to_string());
    }

    if !member.email.as_deref().is_some_and(is_valid_email) {
        errors.push("Valid email is required".to_string());
    }

    if !member.mobile_number.as_deref().is_some_and(is_valid_mobile_number) {
        errors.push("Valid mobile number is required".to_string());
    }

    if is_blank(&member.city) {
        errors.push("City is required".to_string());
    }

    if is_blank(&member.chapter_name) {
        errors.push("Chapter is required".to_string());
    }

    ValidationReport {
        errors,
    }
}
