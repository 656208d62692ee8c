//! In-process SVG optimizer
//!
//! Streams the document through a quick-xml reader and writes it back, dropping
//! what rendered component SVGs usually carry: the XML prologue, comments,
//! editor metadata and pretty-printing whitespace. CDATA sections, text content
//! and whitespace inside text elements are written back untouched. Number
//! rounding only applies to attributes that hold geometry or other numbers.

use super::OptimizerConfig;
use super::traits::SvgOptimizer;
use crate::error::{OptimizeError, Result};
use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use std::borrow::Cow;
use std::io::Cursor;
use std::sync::LazyLock;

/// Built-in event-based optimizer
pub struct BuiltinOptimizer {
    remove_xml_declaration: bool,
    remove_doctype: bool,
    remove_comments: bool,
    remove_editor_data: bool,
    collapse_whitespace: bool,
    removed_elements: Vec<&'static [u8]>,
    precision: Option<usize>,
}

/// Namespace prefixes written by vector editors
const EDITOR_PREFIXES: &[&[u8]] = &[b"sodipodi", b"inkscape", b"sketch"];

/// Elements whose whitespace is content
const TEXT_CONTENT: &[&[u8]] = &[
    b"text", b"tspan", b"textPath", b"style", b"script", b"title", b"desc",
];

/// Attributes holding numbers, lengths, number lists or transforms
const NUMERIC_ATTRIBUTES: &[&[u8]] = &[
    b"d",
    b"points",
    b"x",
    b"y",
    b"x1",
    b"y1",
    b"x2",
    b"y2",
    b"cx",
    b"cy",
    b"r",
    b"rx",
    b"ry",
    b"fx",
    b"fy",
    b"dx",
    b"dy",
    b"width",
    b"height",
    b"viewBox",
    b"transform",
    b"gradientTransform",
    b"patternTransform",
    b"offset",
    b"opacity",
    b"fill-opacity",
    b"stroke-opacity",
    b"stop-opacity",
    b"stroke-width",
    b"stroke-dasharray",
    b"stroke-dashoffset",
    b"stroke-miterlimit",
    b"font-size",
    b"letter-spacing",
    b"stdDeviation",
];

// Constant pattern, exercised by the tests below
#[allow(clippy::expect_used)]
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("number pattern is valid")
});

impl BuiltinOptimizer {
    /// Build the optimizer from a configuration
    pub fn new(config: &OptimizerConfig) -> Self {
        let removed_elements = [
            (config.remove_metadata, b"metadata".as_slice()),
            (config.remove_title, b"title".as_slice()),
            (config.remove_desc, b"desc".as_slice()),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        Self {
            remove_xml_declaration: config.remove_xml_declaration,
            remove_doctype: config.remove_doctype,
            remove_comments: config.remove_comments,
            remove_editor_data: config.remove_editor_data,
            collapse_whitespace: config.collapse_whitespace,
            removed_elements,
            precision: config.precision.map(usize::from),
        }
    }

    fn apply(&self, svg: &str) -> Result<String> {
        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Cursor::new(Vec::with_capacity(svg.len())));
        // One entry per open element: whether its whitespace must be kept
        let mut preserve: Vec<bool> = Vec::new();
        // Depth inside a removed element
        let mut skip_depth = 0usize;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(invalid(format!(
                        "parse error at byte {}: {e}",
                        reader.error_position()
                    )));
                }
            };

            if skip_depth > 0 {
                match event {
                    Event::Start(_) => skip_depth += 1,
                    Event::End(_) => skip_depth -= 1,
                    Event::Eof => break,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Eof => break,
                Event::Decl(_) if self.remove_xml_declaration => {}
                Event::DocType(_) if self.remove_doctype => {}
                Event::Comment(_) if self.remove_comments => {}
                Event::Start(start) => {
                    if self.removes_element(start.name().as_ref()) {
                        skip_depth = 1;
                        continue;
                    }
                    let keep = preserve.last().copied().unwrap_or(false)
                        || preserves_whitespace(&start);
                    preserve.push(keep);
                    write(&mut writer, Event::Start(self.rewrite(&start)?))?;
                }
                Event::Empty(start) => {
                    if !self.removes_element(start.name().as_ref()) {
                        write(&mut writer, Event::Empty(self.rewrite(&start)?))?;
                    }
                }
                Event::End(end) => {
                    preserve.pop();
                    write(&mut writer, Event::End(end))?;
                }
                Event::Text(text)
                    if self.collapse_whitespace
                        && !preserve.last().copied().unwrap_or(false)
                        && text.iter().all(u8::is_ascii_whitespace) => {}
                event => write(&mut writer, event)?,
            }
        }

        let out = String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| invalid(e.to_string()))?;
        Ok(out.trim().to_string())
    }

    fn removes_element(&self, name: &[u8]) -> bool {
        if self.removed_elements.iter().any(|removed| *removed == name) {
            return true;
        }
        self.remove_editor_data
            && prefix(name).is_some_and(|p| EDITOR_PREFIXES.iter().any(|e| *e == p))
    }

    /// Copy an element's start tag, dropping editor attributes and rounding numbers
    fn rewrite<'a>(&self, start: &BytesStart<'a>) -> Result<BytesStart<'a>> {
        let mut out = start.clone();
        out.clear_attributes();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| invalid(e.to_string()))?;
            let key = attr.key.as_ref();
            if self.remove_editor_data && is_editor_attribute(key) {
                continue;
            }

            let value: Cow<'_, [u8]> = match self.precision {
                Some(digits) if NUMERIC_ATTRIBUTES.iter().any(|n| *n == key) => {
                    match std::str::from_utf8(&attr.value) {
                        Ok(text) => Cow::Owned(round_numbers(text, digits).into_bytes()),
                        Err(_) => Cow::Borrowed(&attr.value[..]),
                    }
                }
                _ => Cow::Borrowed(&attr.value[..]),
            };
            out.push_attribute((key, &double_quoted(&value)[..]));
        }

        Ok(out)
    }
}

#[async_trait]
impl SvgOptimizer for BuiltinOptimizer {
    async fn optimize(&self, svg: &str) -> Result<String> {
        self.apply(svg)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

fn invalid(reason: String) -> crate::Error {
    OptimizeError::InvalidSvg { reason }.into()
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| invalid(format!("failed to write event: {e}")))
}

fn prefix(name: &[u8]) -> Option<&[u8]> {
    name.iter().position(|b| *b == b':').map(|i| &name[..i])
}

fn preserves_whitespace(start: &BytesStart<'_>) -> bool {
    let local = start.local_name();
    if TEXT_CONTENT.iter().any(|t| *t == local.as_ref()) {
        return true;
    }
    matches!(
        start.try_get_attribute("xml:space"),
        Ok(Some(attr)) if &attr.value[..] == b"preserve"
    )
}

fn is_editor_attribute(key: &[u8]) -> bool {
    let name = key.strip_prefix(b"xmlns:".as_slice()).unwrap_or(key);
    EDITOR_PREFIXES.iter().any(|p| {
        name == *p || (name.starts_with(p) && name.get(p.len()) == Some(&b':'))
    })
}

/// Raw values from single-quoted attributes may hold `"`; output is double-quoted.
fn double_quoted(value: &[u8]) -> Cow<'_, [u8]> {
    if !value.contains(&b'"') {
        return Cow::Borrowed(value);
    }
    let mut out = Vec::with_capacity(value.len() + 10);
    for &b in value {
        if b == b'"' {
            out.extend_from_slice(b"&quot;");
        } else {
            out.push(b);
        }
    }
    Cow::Owned(out)
}

/// Round every fractional number in a numeric attribute value.
///
/// Numbers that were written back to back (`1.5.5` in path data) get a space
/// between them when rounding would otherwise merge them.
fn round_numbers(value: &str, digits: usize) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    let mut prev_end = None;

    for m in NUMBER.find_iter(value) {
        out.push_str(&value[last..m.start()]);
        let token = m.as_str();
        let rounded = if token.contains(['.', 'e', 'E']) {
            round_number(token, digits)
        } else {
            token.to_string()
        };
        if prev_end == Some(m.start()) && !rounded.starts_with(['-', '+']) {
            out.push(' ');
        }
        out.push_str(&rounded);
        last = m.end();
        prev_end = Some(m.end());
    }

    out.push_str(&value[last..]);
    out
}

/// Round a decimal literal to `digits` fractional digits, dropping trailing zeros.
fn round_number(literal: &str, digits: usize) -> String {
    let Ok(value) = literal.parse::<f64>() else {
        return literal.to_string();
    };
    let mut s = format!("{value:.digits$}");
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
