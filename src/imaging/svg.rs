//! SVG size detection from the root element's attributes.
//!
//! SVG has no pixel grid, so "dimensions" are whatever the root `<svg>` tag
//! declares. Resolution order:
//!
//! 1. `width` and `height` both present → use them
//! 2. one of them present plus a `viewBox` → derive the other from its aspect ratio
//! 3. neither present → the `viewBox` width/height
//! 4. otherwise the missing dimension stays unknown (the manifest fills in
//!    its default)
//!
//! Lengths are plain numbers or carry an absolute unit (`px`, `in`, `cm`,
//! `mm`, `pt`, `pc`), converted at 96 px per inch. Relative units (`%`, `em`,
//! `ex`) can't be resolved without a viewport or font and count as unknown.
//!
//! The root is the first element of the document. Comments, CDATA sections,
//! processing instructions and the doctype before it are skipped, so a
//! commented-out `<svg>` never supplies dimensions.

use super::backend::{ProbeError, ProbedImage};
use std::path::Path;

pub fn probe_svg(path: &Path) -> Result<ProbedImage, ProbeError> {
    let bytes = std::fs::read(path).map_err(|e| ProbeError::io(path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| ProbeError::format(path, "SVG is not valid UTF-8"))?;
    let tag = root_tag(&text).ok_or_else(|| ProbeError::format(path, "no <svg> root element"))?;
    Ok(dimensions_from_tag(tag))
}

/// Body of the root `<svg ...>` start tag (everything between `<svg` and
/// the closing `>`). `None` when the first element isn't `svg`.
fn root_tag(text: &str) -> Option<&str> {
    let mut rest = text;
    loop {
        rest = &rest[rest.find('<')?..];
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = skip_past(after, "-->")?;
        } else if let Some(after) = rest.strip_prefix("<![CDATA[") {
            rest = skip_past(after, "]]>")?;
        } else if let Some(after) = rest.strip_prefix("<?") {
            rest = skip_past(after, "?>")?;
        } else if let Some(after) = rest.strip_prefix("<!") {
            rest = skip_declaration(after)?;
        } else {
            let after = rest.strip_prefix("<svg")?;
            // Reject `<svgfoo`; accept `<svg>`, `<svg/>`, `<svg ...`
            return match after.chars().next() {
                Some(c) if c.is_whitespace() || c == '>' || c == '/' => {
                    Some(&after[..tag_end(after)?])
                }
                _ => None,
            };
        }
    }
}

fn skip_past<'a>(text: &'a str, terminator: &str) -> Option<&'a str> {
    text.find(terminator).map(|i| &text[i + terminator.len()..])
}

/// Skip a `<!DOCTYPE ...>`, including a bracketed internal subset.
fn skip_declaration(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => return Some(&text[i + 1..]),
            _ => {}
        }
    }
    None
}

/// Offset of the `>` closing a start tag. Quoted attribute values may hold `>`.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i),
            None => {}
        }
    }
    None
}

/// Value of `name="..."` or `name='...'` inside a start tag.
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut search = tag;
    loop {
        let pos = search.find(name)?;
        let preceded_ok = search[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace());
        let after = search[pos + name.len()..].trim_start();
        if preceded_ok && let Some(after_eq) = after.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let quote = after_eq.chars().next()?;
            if quote == '"' || quote == '\'' {
                let body = &after_eq[1..];
                let end = body.find(quote)?;
                return Some(&body[..end]);
            }
        }
        search = &search[pos + name.len()..];
    }
}

/// Absolute units and their size in px.
const UNITS: &[(&str, f64)] = &[
    ("px", 1.0),
    ("in", 96.0),
    ("cm", 96.0 / 2.54),
    ("mm", 96.0 / 25.4),
    ("pt", 96.0 / 72.0),
    ("pc", 16.0),
];

fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let (number, scale) = UNITS
        .iter()
        .find_map(|(unit, scale)| value.strip_suffix(unit).map(|n| (n, *scale)))
        .unwrap_or((value, 1.0));
    number
        .trim()
        .parse::<f64>()
        .ok()
        .map(|n| n * scale)
        .filter(|n| *n > 0.0)
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some((*w, *h)),
        _ => None,
    }
}

fn to_px(n: f64) -> u32 {
    n.round().max(1.0) as u32
}

fn dimensions_from_tag(tag: &str) -> ProbedImage {
    let width = attribute(tag, "width").and_then(parse_length);
    let height = attribute(tag, "height").and_then(parse_length);
    let view_box = attribute(tag, "viewBox").and_then(parse_view_box);

    let (width, height) = match (width, height, view_box) {
        (Some(w), Some(h), _) => (Some(w), Some(h)),
        (Some(w), None, Some((vw, vh))) => (Some(w), Some(w * vh / vw)),
        (None, Some(h), Some((vw, vh))) => (Some(h * vw / vh), Some(h)),
        (None, None, Some((vw, vh))) => (Some(vw), Some(vh)),
        (w, h, None) => (w, h),
    };

    ProbedImage {
        width: width.map(to_px),
        height: height.map(to_px),
        kind: Some("svg".to_string()),
    }
}
