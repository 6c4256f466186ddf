//! Plain-text normalization for extracted article fragments.
//!
//! [`normalize`] turns the raw text rendered from a JATS subtree into clean,
//! sentence-tokenizable prose: unicode compatibility composition, whitespace
//! collapsing, and removal of the punctuation debris that citation stripping
//! leaves behind (empty bracket pairs, orphaned commas, dashes that used to
//! sit before a reference).
//!
//! The renderer applies `normalize` once per paragraph and once over the
//! whole result, so the pipeline runs to a fixpoint: re-normalizing already
//! normalized text is a no-op regardless of nesting level.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// `(Smith et al, )` style author parentheticals left incomplete after
/// reference stripping.
static AUTHOR_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z][a-zA-Z\s&,;.]+et al[,;\s.]*\)").unwrap());

/// Bracket pairs whose interior is empty or separators only.
static EMPTY_SQUARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*[,;\u{2013}\u{2014}\-\s]*\s*\]").unwrap());
static EMPTY_ROUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*[,;\u{2013}\u{2014}\-\s]*\s*\)").unwrap());

static REPEATED_PERIODS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static REPEATED_COMMAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",{2,}").unwrap());

/// Adjacent punctuation pairs; only the later mark survives.
static ADJACENT_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;.]\s*([,;.])").unwrap());

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;.:!?])").unwrap());

static SPACE_AFTER_OPEN_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+").unwrap());
static SPACE_BEFORE_CLOSE_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\)").unwrap());
static SPACE_AFTER_OPEN_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s+").unwrap());
static SPACE_BEFORE_CLOSE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\]").unwrap());

/// Dash artifacts from citations that sat mid-sentence before removal.
static DASH_BETWEEN_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]\s*[\u{2013}\u{2014}-]\s*[,;.]").unwrap());
static DASH_AT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]\s*[\u{2013}\u{2014}-]\s*$").unwrap());
static DASH_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{2013}\u{2014}-]\s*[,;.]").unwrap());

/// Leading numeric outline prefix on a section title ("2.1 GWAS" -> "GWAS").
static TITLE_OUTLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+\.)+\d*\s+").unwrap());

/// Outline numbers at the start of a paragraph or right after a period.
static PARA_OUTLINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.)+\d*\s*").unwrap());
static PARA_OUTLINE_AFTER_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+(\d+\.)+\d*\s+").unwrap());

/// Normalize raw concatenated XML text into clean plain text.
///
/// Pure function of its input: no I/O, no randomness. Idempotent:
/// `normalize(normalize(x)) == normalize(x)` for all `x`.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    // Each rewrite strictly shrinks the string, so this terminates.
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One ordered application of the cleanup steps.
fn normalize_pass(raw: &str) -> String {
    // 1. Compatibility composition; non-breaking spaces become plain spaces.
    let text: String = raw.nfkc().collect::<String>().replace('\u{a0}', " ");

    // 2. Collapse whitespace runs.
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    // 3. Incomplete author-citation parentheticals.
    let text = AUTHOR_CITATION.replace_all(text, "");

    // 4. Bracket pairs emptied by reference stripping.
    let text = EMPTY_SQUARE.replace_all(&text, "");
    let text = EMPTY_ROUND.replace_all(&text, "");

    // 5. Runs of repeated punctuation.
    let text = REPEATED_PERIODS.replace_all(&text, ".");
    let text = REPEATED_COMMAS.replace_all(&text, ",");

    // 6. Adjacent punctuation pairs keep the later mark.
    let text = ADJACENT_PUNCT.replace_all(&text, "$1");

    // 7. No whitespace before terminal punctuation.
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");

    // 8. No whitespace just inside parentheses/brackets.
    let text = SPACE_AFTER_OPEN_PAREN.replace_all(&text, "(");
    let text = SPACE_BEFORE_CLOSE_PAREN.replace_all(&text, ")");
    let text = SPACE_AFTER_OPEN_BRACKET.replace_all(&text, "[");
    let text = SPACE_BEFORE_CLOSE_BRACKET.replace_all(&text, "]");

    // 9. Dash-before-terminal artifacts become a single period.
    let text = DASH_BETWEEN_PUNCT.replace_all(&text, ".");
    let text = DASH_AT_END.replace_all(&text, ".");
    let text = DASH_BEFORE_PUNCT.replace_all(&text, ".");

    text.trim().to_string()
}

/// Strip a leading numeric outline prefix from a section title.
pub fn strip_title_outline(title: &str) -> String {
    TITLE_OUTLINE.replace(title.trim(), "").into_owned()
}

/// Strip outline numbers inside a paragraph (at the start, and after a
/// sentence-ending period).
pub fn strip_paragraph_outline(text: &str) -> String {
    let text = PARA_OUTLINE_START.replace(text, "");
    PARA_OUTLINE_AFTER_PERIOD
        .replace_all(&text, ". ")
        .into_owned()
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
