use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// At least one character that is not a newline.
static TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+").expect("text pattern compiles"));

/// Must start with `http(s)://` and a dotted host; anything may follow
/// (ports, fragments, parentheses in titles).
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+(/[A-Za-z0-9_\- ./?%&=]*)?")
        .expect("url pattern compiles")
});

/// Why a sentence was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text is invalid")]
    TextInvalid,
    #[error("Url is invalid")]
    UrlInvalid,
}

/// Checks a sentence's text and source URL.
///
/// Text is checked first; the first failing rule is reported.
pub fn validate_sentence(text: &str, url: &str) -> Result<(), ValidationError> {
    if !TEXT_PATTERN.is_match(text) {
        return Err(ValidationError::TextInvalid);
    }

    if !URL_PATTERN.is_match(url) {
        return Err(ValidationError::UrlInvalid);
    }

    Ok(())
}
