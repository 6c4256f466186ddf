//! Online-only stub detection.
//!
//! Nature-style articles often carry a short "Methods" section whose only
//! content redirects the reader to the online version or a DOI. Such a stub
//! must not be surfaced as the methods text.

/// Word count below which a candidate's text is checked for stub phrasing.
pub const STUB_WORD_LIMIT: usize = 50;

/// Phrases that state the methods live somewhere else entirely.
const STRONG_INDICATORS: [&str; 6] = [
    "available in the online version",
    "available at http",
    "available at https",
    "available at 10.",
    "available at doi",
    "online content",
];

/// Openings typical of redirection notes.
const REDIRECTION_STARTS: [&str; 4] = [
    "methods and any",
    "any methods",
    "methods are available",
    "methods, including",
];

/// Whether extracted text is a "see online methods" placeholder.
///
/// Callers apply this only to texts shorter than [`STUB_WORD_LIMIT`] words;
/// the phrase lists are too generic to be safe on full-length sections.
pub fn is_stub(text: &str) -> bool {
    let lower = text.to_lowercase();
    STRONG_INDICATORS.iter().any(|p| lower.contains(p))
        || REDIRECTION_STARTS.iter().any(|p| lower.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_indicators() {
        assert!(is_stub(
            "Methods, together with additional references, are available in the online version of the paper."
        ));
        assert!(is_stub("Full methods available at https://doi.org/10.1038/xyz."));
        assert!(is_stub("Online content including detailed protocols accompanies this paper."));
    }

    #[test]
    fn test_redirection_starts() {
        assert!(is_stub("Methods and any associated references are in the supplement."));
        assert!(is_stub("Any methods referenced here appear elsewhere."));
        assert!(is_stub("Methods, including statements of data availability, accompany this paper."));
    }

    #[test]
    fn test_substantive_text_not_flagged() {
        assert!(!is_stub(
            "Participants were recruited from three population cohorts and genotyped on the array."
        ));
        // Mentions the supplement without redirecting away from the section.
        assert!(!is_stub("Additional detail appears in the supplementary note."));
    }
}
