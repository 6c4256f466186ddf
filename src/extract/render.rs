//! Ordered plain-text rendering of a document subtree.
//!
//! Rendering behavior varies by tag, modeled as a [`RenderRule`] resolved per
//! node rather than nested conditionals. Retained text always keeps document
//! order; nothing is reordered or deduplicated.

use crate::jats::{Document, NodeId};
use crate::text::{normalize, strip_paragraph_outline, strip_title_outline};

/// How a node is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderRule {
    /// Contributes no text of its own; the caller still keeps its tail.
    /// Bibliographic cross-references, raw TeX math source, and images.
    Skip,
    /// `sec`: header line from the title, then the remaining children.
    Section,
    /// `p`: joined inline content, normalized as one paragraph.
    Paragraph,
    /// Everything else: own text plus children and tails, untouched.
    Inline,
}

impl RenderRule {
    fn for_node(doc: &Document, id: NodeId) -> Self {
        match doc.tag(id) {
            "xref" if doc.attr(id, "ref-type") == Some("bibr") => RenderRule::Skip,
            "tex-math" | "graphic" | "inline-graphic" => RenderRule::Skip,
            "sec" => RenderRule::Section,
            "p" => RenderRule::Paragraph,
            _ => RenderRule::Inline,
        }
    }
}

/// Render a subtree to normalized plain text.
///
/// One full [`normalize`] pass runs over the concatenated result to catch
/// citation artifacts that straddled element boundaries and survived
/// per-paragraph cleaning.
pub fn extract_text(doc: &Document, id: NodeId) -> String {
    normalize(&render(doc, id))
}

fn render(doc: &Document, id: NodeId) -> String {
    match RenderRule::for_node(doc, id) {
        RenderRule::Skip => String::new(),
        RenderRule::Section => render_section(doc, id),
        RenderRule::Paragraph => render_paragraph(doc, id),
        RenderRule::Inline => render_inline(doc, id),
    }
}

fn render_section(doc: &Document, id: NodeId) -> String {
    let mut parts: Vec<String> = Vec::new();

    // Header line from the title. Label text duplicates the numeric prefix
    // stripped from titles and is discarded.
    if let Some(title) = doc.first_child_tagged(id, "title") {
        let text = render(doc, title);
        let text = strip_title_outline(text.trim());
        if !text.is_empty() {
            parts.push(format!("{text}. "));
        }
    }

    for &child in doc.children(id) {
        if !matches!(doc.tag(child), "label" | "title") {
            let text = render(doc, child);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        push_tail(doc, child, &mut parts);
    }

    parts.join(" ")
}

fn render_paragraph(doc: &Document, id: NodeId) -> String {
    let mut parts: Vec<String> = Vec::new();

    let own = doc.node(id).text.trim();
    if !own.is_empty() {
        parts.push(own.to_string());
    }

    for &child in doc.children(id) {
        // A bibliographic cross-reference contributes nothing, but the text
        // following it belongs to the sentence.
        if RenderRule::for_node(doc, child) != RenderRule::Skip {
            let text = render(doc, child);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        push_tail(doc, child, &mut parts);
    }

    let paragraph = normalize(&parts.join(" "));
    let paragraph = strip_paragraph_outline(&paragraph);
    if paragraph.is_empty() {
        String::new()
    } else {
        format!("{paragraph} ")
    }
}

fn render_inline(doc: &Document, id: NodeId) -> String {
    let mut parts: Vec<String> = Vec::new();

    let own = doc.node(id).text.trim();
    if !own.is_empty() {
        parts.push(own.to_string());
    }

    for &child in doc.children(id) {
        let text = render(doc, child);
        if !text.is_empty() {
            parts.push(text);
        }
        push_tail(doc, child, &mut parts);
    }

    parts.join(" ")
}

fn push_tail(doc: &Document, child: NodeId, parts: &mut Vec<String>) {
    let tail = doc.node(child).tail.trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jats::parse_document;

    fn extract(xml: &str) -> String {
        let doc = parse_document(xml).unwrap();
        extract_text(&doc, doc.root())
    }

    #[test]
    fn test_section_header_from_title() {
        let text = extract(
            r#"<sec sec-type="methods">
                 <label>2.1</label>
                 <title>2.1 Statistical Analysis</title>
                 <p>We used mixed models.</p>
               </sec>"#,
        );
        assert_eq!(text, "Statistical Analysis. We used mixed models.");
    }

    #[test]
    fn test_numeric_only_title_survives() {
        // The outline pattern requires trailing text after the numbers, so a
        // bare numeric title is kept as-is.
        let text = extract("<sec><title>2.1</title><p>Content here.</p></sec>");
        assert_eq!(text, "2.1. Content here.");
    }

    #[test]
    fn test_citation_xref_skipped_tail_kept() {
        let text = extract(
            r#"<p>Genotyping followed prior work <xref ref-type="bibr" rid="b1">1</xref> with minor changes.</p>"#,
        );
        assert_eq!(text, "Genotyping followed prior work with minor changes.");
    }

    #[test]
    fn test_non_bibr_xref_is_rendered() {
        let text = extract(
            r#"<p>See <xref ref-type="fig" rid="f1">Figure 1</xref> for details.</p>"#,
        );
        assert_eq!(text, "See Figure 1 for details.");
    }

    #[test]
    fn test_tex_math_and_graphics_skipped() {
        let text = extract(
            r#"<p>The estimate
                 <inline-formula>
                   <tex-math>\hat{\beta} = 0.4</tex-math>
                   <inline-graphic href="eq1.gif"/>
                 </inline-formula>
                 was significant.</p>"#,
        );
        assert_eq!(text, "The estimate was significant.");
    }

    #[test]
    fn test_paragraph_separator() {
        let text = extract("<sec><title>Methods</title><p>First.</p><p>Second.</p></sec>");
        assert_eq!(text, "Methods. First. Second.");
    }

    #[test]
    fn test_nested_subsections_in_order() {
        let text = extract(
            r#"<sec sec-type="methods">
                 <title>Methods</title>
                 <p>Overview text.</p>
                 <sec><title>Cohorts</title><p>Three cohorts were used.</p></sec>
                 <sec><title>Genotyping</title><p>Arrays were run.</p></sec>
               </sec>"#,
        );
        assert_eq!(
            text,
            "Methods. Overview text. Cohorts. Three cohorts were used. Genotyping. Arrays were run."
        );
    }

    #[test]
    fn test_cross_paragraph_artifact_cleanup() {
        // The citation parenthetical is split across inline elements, so the
        // per-paragraph pass sees it whole only after joining.
        let text = extract(
            r#"<sec><p>Observed (<italic>Smith</italic> et al, ) in all cohorts.</p></sec>"#,
        );
        assert_eq!(text, "Observed in all cohorts.");
    }
}
