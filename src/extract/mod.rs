//! Methods-section extraction pipeline.
//!
//! Control flow: the locator ranks candidate sections, the renderer turns
//! the best one into normalized text, the stub detector may fall back to
//! later candidates, and the supplementary detector runs only when nothing
//! was located at all. Fully synchronous; a [`Document`] is processed
//! start-to-finish with no interior I/O, so independent documents can be
//! handled by parallel workers with no coordination.

mod locator;
mod render;
mod stub;
mod supplement;

pub use locator::{Candidate, locate_all, locate_best};
pub use render::extract_text;
pub use stub::{STUB_WORD_LIMIT, is_stub};
pub use supplement::{SupplementaryPointer, find_supplementary_pointer};

use tracing::debug;

use crate::jats::Document;
use crate::text::word_count;

/// Terminal state of one extraction run.
///
/// All four are valid results of a successful run; only XML parse failures
/// are reported as [`Error`](crate::Error) before this point. None of these
/// is ever coerced to an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Clean methods text, ready for sentence tokenization.
    Methods(String),
    /// A methods section exists, but every candidate is a short note
    /// redirecting to the online-only full text.
    OnlineOnly,
    /// No inline methods section, but a supplementary-materials pointer was
    /// detected.
    Supplementary {
        message: String,
        href: Option<String>,
    },
    /// No methods section located by any pass, and no supplementary pointer.
    NotFound,
}

/// Run the full pipeline over a parsed article.
pub fn extract_methods(doc: &Document) -> Outcome {
    let candidates = locate_all(doc);

    let Some(first) = candidates.first() else {
        if let Some(pointer) = find_supplementary_pointer(doc) {
            debug!(href = ?pointer.href, "methods are in supplementary materials");
            let message = match &pointer.href {
                Some(href) => {
                    format!("methods section is in supplementary materials file: {href}")
                }
                None => "methods section is in supplementary materials".to_string(),
            };
            return Outcome::Supplementary {
                message,
                href: pointer.href,
            };
        }
        return Outcome::NotFound;
    };

    let text = extract_text(doc, first.node);

    // Short redirection stubs yield to a later substantive candidate
    // (some articles carry a stub followed by "ONLINE METHODS").
    if word_count(&text) < STUB_WORD_LIMIT && is_stub(&text) {
        for candidate in &candidates[1..] {
            let alt = extract_text(doc, candidate.node);
            if word_count(&alt) >= STUB_WORD_LIMIT {
                debug!(priority = candidate.priority, "stub recovered from later candidate");
                return Outcome::Methods(alt);
            }
        }
        debug!("all candidates are online-only stubs");
        return Outcome::OnlineOnly;
    }

    Outcome::Methods(text)
}
