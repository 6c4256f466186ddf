//! Quality report over extracted methods text.
//!
//! Counts the artifacts that should have been removed during extraction
//! (citation leftovers, spacing and punctuation debris, LaTeX markup,
//! outline numbers) so batch runs can flag documents that need a second
//! look before sentence tokenization.

use std::sync::LazyLock;

use regex::Regex;

static EMPTY_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*\]").unwrap());
static EMPTY_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*\)").unwrap());
static ET_AL_CITATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z][a-zA-Z\s&,;.]+et al[,;\s.]*\)").unwrap());
static NUMBER_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\d+\s*(?:,\s*\d+\s*)*\]").unwrap());

static SPACE_BEFORE_PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \.").unwrap());
static SPACE_BEFORE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ,").unwrap());
static SPACE_BEFORE_SEMICOLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ;").unwrap());
static MULTIPLE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"  +").unwrap());
static SPACE_IN_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+|\s+\)").unwrap());

static DOUBLE_PERIODS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\.+").unwrap());
static DOUBLE_COMMAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",,+").unwrap());
static DASH_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{2013}\u{2014}-]\s*,").unwrap());

static LATEX_USEPACKAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\usepackage").unwrap());
static LATEX_DOCUMENTCLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\documentclass").unwrap());
static LATEX_BEGIN_DOCUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\begin\{document\}").unwrap());

static SECTION_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\. )(\d+\.)+\d*\s+[A-Z]").unwrap());

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Artifact counts and statistics for one extracted text.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TextReport {
    // Citation cleanup
    pub empty_brackets: usize,
    pub empty_parens: usize,
    pub et_al_citations: usize,
    pub number_brackets: usize,
    // Spacing
    pub space_before_period: usize,
    pub space_before_comma: usize,
    pub space_before_semicolon: usize,
    pub multiple_spaces: usize,
    pub space_in_parens: usize,
    // Punctuation
    pub double_periods: usize,
    pub double_commas: usize,
    pub dash_comma: usize,
    // LaTeX/markup noise
    pub latex_commands: usize,
    // Outline numbers
    pub section_numbers: usize,
    // Statistics
    pub words: usize,
    pub sentences: usize,
}

impl TextReport {
    /// Analyze one extracted text.
    pub fn analyze(text: &str) -> Self {
        Self {
            empty_brackets: EMPTY_BRACKETS.find_iter(text).count(),
            empty_parens: EMPTY_PARENS.find_iter(text).count(),
            et_al_citations: ET_AL_CITATIONS.find_iter(text).count(),
            number_brackets: NUMBER_BRACKETS.find_iter(text).count(),
            space_before_period: SPACE_BEFORE_PERIOD.find_iter(text).count(),
            space_before_comma: SPACE_BEFORE_COMMA.find_iter(text).count(),
            space_before_semicolon: SPACE_BEFORE_SEMICOLON.find_iter(text).count(),
            multiple_spaces: MULTIPLE_SPACES.find_iter(text).count(),
            space_in_parens: SPACE_IN_PARENS.find_iter(text).count(),
            double_periods: DOUBLE_PERIODS.find_iter(text).count(),
            double_commas: DOUBLE_COMMAS.find_iter(text).count(),
            dash_comma: DASH_COMMA.find_iter(text).count(),
            latex_commands: LATEX_USEPACKAGE.find_iter(text).count()
                + LATEX_DOCUMENTCLASS.find_iter(text).count()
                + LATEX_BEGIN_DOCUMENT.find_iter(text).count(),
            section_numbers: SECTION_NUMBERS.find_iter(text).count(),
            words: text.split_whitespace().count(),
            sentences: SENTENCE_END.find_iter(text).count(),
        }
    }

    /// Hard failures: the text needs additional cleaning.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut push = |count: usize, what: &str| {
            if count > 0 {
                issues.push(format!("{count} {what}"));
            }
        };
        push(self.empty_brackets, "empty brackets");
        push(self.empty_parens, "empty parentheses");
        push(self.et_al_citations, "et al citations");
        push(self.space_before_period, "spaces before periods");
        push(self.space_before_comma, "spaces before commas");
        push(self.space_before_semicolon, "spaces before semicolons");
        push(self.space_in_parens, "extra spaces in parentheses");
        push(self.double_periods, "double periods");
        push(self.double_commas, "double commas");
        push(self.dash_comma, "dash-comma artifacts");
        push(self.latex_commands, "LaTeX commands");
        issues
    }

    /// Soft findings worth checking but not failing on.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.number_brackets > 0 {
            warnings.push(format!("{} numbered citations", self.number_brackets));
        }
        if self.multiple_spaces > 50 {
            warnings.push(format!("{} double spaces (unusual)", self.multiple_spaces));
        }
        if self.section_numbers > 0 {
            warnings.push(format!("{} section numbers found", self.section_numbers));
        }
        warnings
    }

    /// Whether the text is ready for sentence tokenization.
    pub fn is_clean(&self) -> bool {
        self.issues().is_empty()
    }

    /// Average words per estimated sentence.
    pub fn avg_sentence_len(&self) -> f64 {
        self.words as f64 / self.sentences.max(1) as f64
    }
}
