//! JATS XML parsing into the arena [`Document`].
//!
//! Event-driven parse with `quick-xml`. Namespace prefixes on both tag and
//! attribute names are stripped to local names, matching how heterogeneously
//! namespaced publisher files are queried downstream.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::document::{Document, Node, NodeId};
use crate::error::{Error, Result};

/// Parse a JATS article from a string.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);

    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let id = open_element(&mut nodes, &stack, &mut root, &e)?;
                stack.push(id);
            }
            Ok(Event::Empty(e)) => {
                open_element(&mut nodes, &stack, &mut root, &e)?;
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(e)) => {
                append_text(&mut nodes, &stack, &String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(e)) => {
                append_text(&mut nodes, &stack, &String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    append_text(&mut nodes, &stack, &resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    let root = root.ok_or_else(|| Error::InvalidDocument("no root element".to_string()))?;
    Ok(Document::from_arena(nodes, root))
}

/// Read and parse a JATS article from a file, handling non-UTF-8 encodings.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    let hint = encoding_hint(&bytes);
    let text = decode_text(strip_bom(&bytes), hint.as_deref());
    parse_document(&text)
}

fn open_element(
    nodes: &mut Vec<Node>,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<NodeId> {
    let name = e.name();
    let tag = String::from_utf8_lossy(local_name(name.as_ref())).into_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attrs.push((key, value));
    }

    let parent = stack.last().copied();
    let id = NodeId(nodes.len() as u32);
    nodes.push(Node::new(tag, attrs, parent));

    match parent {
        Some(p) => nodes[p.index()].children.push(id),
        None => {
            if root.is_some() {
                return Err(Error::InvalidDocument(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(id);
        }
    }

    Ok(id)
}

/// Route character data to the open element's own text, or to the tail of
/// its most recent child if one has already closed.
fn append_text(nodes: &mut [Node], stack: &[NodeId], text: &str) {
    let Some(&current) = stack.last() else {
        return; // prolog/epilog whitespace
    };

    match nodes[current.index()].children.last().copied() {
        Some(last_child) => nodes[last_child.index()].tail.push_str(text),
        None => nodes[current.index()].text.push_str(text),
    }
}

/// Extract local name from a namespaced XML name (e.g., "xlink:href" -> "href").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        "nbsp" => return Some("\u{a0}".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

/// Strip UTF-8 BOM if present.
fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Pull the encoding name out of an XML declaration, if one is present in
/// the first line of the file.
fn encoding_hint(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let decl = head.strip_prefix("\u{feff}").unwrap_or(&head);
    if !decl.starts_with("<?xml") {
        return None;
    }
    let rest = decl.split_once("encoding=")?.1;
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    rest[1..].split(quote).next().map(|s| s.to_string())
}

/// Decode bytes to a string, handling various encodings.
///
/// Tries UTF-8 first, then the hint encoding from the XML declaration,
/// then falls back to Windows-1252 (common in older publisher files).
fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
