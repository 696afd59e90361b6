//! Request language negotiation
//!
//! Each request computes its own language from, in order: an explicit
//! `lang` parameter, the first entry of the `Accept-Language` header, and a
//! fixed fallback. The result is passed explicitly to notice resolution.

use std::fmt;

use unic_langid::LanguageIdentifier;

/// Language used when the request expresses no usable preference
pub const FALLBACK_LANGUAGE: &str = "en";

/// The language a single request asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLanguage(String);

impl RequestLanguage {
    /// Negotiates the request language with the standard fallback
    pub fn negotiate(param: Option<&str>, accept_language: Option<&str>) -> Self {
        Self::negotiate_with_fallback(param, accept_language, FALLBACK_LANGUAGE)
    }

    /// Negotiates the request language with a caller-chosen fallback
    ///
    /// Candidates that are not well-formed language identifiers are skipped.
    pub fn negotiate_with_fallback(
        param: Option<&str>,
        accept_language: Option<&str>,
        fallback: &str,
    ) -> Self {
        let from_header = accept_language
            .and_then(|header| header.split(',').next())
            .and_then(|entry| entry.split(';').next());

        param
            .and_then(well_formed)
            .or_else(|| from_header.and_then(well_formed))
            .map(Self)
            .unwrap_or_else(|| Self(fallback.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn well_formed(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate == "*" {
        return None;
    }
    candidate
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|_| candidate.to_string())
}
