//! # metex
//!
//! A fast, lightweight library for locating and extracting the methods
//! section of JATS-tagged scientific articles as clean plain text.
//!
//! ## Features
//!
//! - Parses heterogeneously tagged publisher XML into a read-only tree
//! - Finds the "Methods" / "Materials and Methods" section across the
//!   tagging dialects publishers actually use (typed, titled, mistagged)
//! - Excludes abstract summaries, contributor lists, and nested subsections
//! - Strips citation cross-references, math source, and images, then
//!   normalizes the remaining text for sentence tokenization
//! - Detects "see online methods" stubs and supplementary-file pointers
//!
//! ## Quick Start
//!
//! ```
//! use metex::{Outcome, extract_methods, parse_document};
//!
//! let doc = parse_document(
//!     r#"<article><body>
//!          <sec sec-type="methods">
//!            <title>Methods</title>
//!            <p>Participants were genotyped on standard arrays.</p>
//!          </sec>
//!        </body></article>"#,
//! ).unwrap();
//!
//! match extract_methods(&doc) {
//!     Outcome::Methods(text) => assert!(text.starts_with("Methods.")),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod error;
pub mod extract;
pub mod jats;
pub mod report;
pub mod text;

pub use error::{Error, Result};
pub use extract::{
    Candidate, Outcome, extract_methods, extract_text, locate_all, locate_best,
};
pub use jats::{Document, NodeId, parse_document, parse_file};
pub use report::TextReport;
pub use text::normalize;
