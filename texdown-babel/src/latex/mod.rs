//! LaTeX-to-Unicode normalizer.
//!
//! Rewrites `$...$` and `$$...$$` spans in Markdown source into plain Unicode
//! text. Fractions cannot be expressed in plain text, so they come out as
//! [`Segment::Fraction`] values ([`normalize_segments`]) or as fraction
//! markers embedded in a string ([`normalize`]) when the result still has to
//! pass through the Markdown tokenizer.
//!
//! Math content is parsed by a small recursive-descent scanner
//! ([`scanner::parse_latex`]) so braces nest to any depth. Only a fixed subset
//! of LaTeX is understood; anything else is kept verbatim.
//!
//! The normalizer never fails: a span it cannot make sense of is left as it
//! was written.

pub mod marker;
pub mod scanner;
pub mod symbols;

use log::debug;

pub use marker::{encode_segments, split_markers, Segment};

use marker::{is_marker_safe, push_text};
use scanner::{parse_latex, Node};
use symbols::{command_symbol, map_chars, subscript, superscript, FRACTION_COMMANDS, TEXT_WRAPPERS};

/// Normalize all math spans in `text`, encoding fractions as markers.
///
/// Text without a `$` is returned unchanged.
pub fn normalize(text: &str) -> String {
    if !text.contains('$') {
        return text.to_string();
    }
    encode_segments(&normalize_segments(text))
}

/// Normalize all math spans in `text` into typed segments.
pub fn normalize_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    if !text.contains('$') {
        push_text(&mut segments, text);
        return segments;
    }

    for span in split_display_math(text) {
        match span {
            Span::Math(content) => append(&mut segments, rewrite_math_content(content)),
            Span::Text(prose) => normalize_inline_math(prose, &mut segments),
        }
    }
    segments
}

/// Rewrite the inside of one math span.
pub fn rewrite_math_content(content: &str) -> Vec<Segment> {
    let nodes = parse_latex(content);
    let mut out = MathOutput::default();
    out.render(&nodes);
    collapse_whitespace(out.segments)
}

enum Span<'a> {
    Text(&'a str),
    Math(&'a str),
}

/// Position of the next `$$` at or after `from` that is not escaped.
fn find_display_delimiter(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .match_indices("$$")
        .map(|(offset, _)| from + offset)
        .find(|&index| !text[..index].ends_with('\\'))
}

fn split_display_math(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(open) = find_display_delimiter(text, cursor) {
        let Some(close) = find_display_delimiter(text, open + 2) else {
            debug!("unclosed display math at byte {open}, left verbatim");
            break;
        };
        if close == open + 2 {
            // `$$$$` has no content and is not math.
            cursor = close + 2;
            continue;
        }
        spans.push(Span::Text(&text[literal_start..open]));
        spans.push(Span::Math(&text[open + 2..close]));
        cursor = close + 2;
        literal_start = cursor;
    }

    spans.push(Span::Text(&text[literal_start..]));
    spans
}

/// Byte offsets of inline `$` delimiters in one line.
///
/// A `$` next to another `$`, or escaped with a backslash, is not a delimiter.
fn inline_delimiters(line: &str) -> Vec<usize> {
    let bytes = line.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i] == b'$')
        .filter(|&i| i == 0 || (bytes[i - 1] != b'$' && bytes[i - 1] != b'\\'))
        .filter(|&i| bytes.get(i + 1) != Some(&b'$'))
        .collect()
}

fn normalize_inline_math(prose: &str, segments: &mut Vec<Segment>) {
    for line in prose.split_inclusive('\n') {
        let delimiters = inline_delimiters(line);
        if delimiters.len() % 2 == 1 {
            debug!("unbalanced inline math delimiters, line left verbatim: {line:?}");
            push_text(segments, line);
            continue;
        }

        let mut last = 0;
        for pair in delimiters.chunks(2) {
            let (open, close) = (pair[0], pair[1]);
            push_text(segments, &line[last..open]);
            append(segments, rewrite_math_content(&line[open + 1..close]));
            last = close + 1;
        }
        push_text(segments, &line[last..]);
    }
}

fn append(segments: &mut Vec<Segment>, more: Vec<Segment>) {
    for segment in more {
        match segment {
            Segment::Text(text) => push_text(segments, &text),
            fraction => segments.push(fraction),
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace runs to one space and trim the ends of the sequence.
fn collapse_whitespace(segments: Vec<Segment>) -> Vec<Segment> {
    let last = segments.len().saturating_sub(1);
    let mut out = Vec::with_capacity(segments.len());

    for (index, segment) in segments.into_iter().enumerate() {
        match segment {
            Segment::Text(text) => {
                let mut collapsed = collapse(&text);
                if !collapsed.is_empty() {
                    if index > 0 && text.starts_with(char::is_whitespace) {
                        collapsed.insert(0, ' ');
                    }
                    if index < last && text.ends_with(char::is_whitespace) {
                        collapsed.push(' ');
                    }
                } else if index > 0 && index < last && !text.is_empty() {
                    collapsed.push(' ');
                }
                push_text(&mut out, &collapsed);
            }
            fraction => out.push(fraction),
        }
    }
    out
}

/// Linear `A/B` form, parenthesizing parts longer than one symbol.
fn linear_fraction(numerator: &str, denominator: &str) -> String {
    fn wrap(part: &str) -> String {
        if part.chars().count() > 1 {
            format!("({part})")
        } else {
            part.to_string()
        }
    }
    format!("{}/{}", wrap(numerator), wrap(denominator))
}

#[derive(Default)]
struct MathOutput {
    segments: Vec<Segment>,
}

impl MathOutput {
    fn push_str(&mut self, text: &str) {
        push_text(&mut self.segments, text);
    }

    fn has_fraction(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Fraction { .. }))
    }

    /// Flatten to text, writing fractions in linear form.
    fn into_linear(self) -> String {
        self.segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(text) => text,
                Segment::Fraction {
                    numerator,
                    denominator,
                } => linear_fraction(&numerator, &denominator),
            })
            .collect()
    }

    fn render_to_linear(nodes: &[Node<'_>]) -> String {
        let mut out = MathOutput::default();
        out.render(nodes);
        out.into_linear()
    }

    fn render(&mut self, nodes: &[Node<'_>]) {
        let mut index = 0;
        while index < nodes.len() {
            index = self.render_node(nodes, index);
        }
    }

    /// Render the node at `index`, returning the index of the next node.
    fn render_node(&mut self, nodes: &[Node<'_>], index: usize) -> usize {
        match &nodes[index] {
            Node::Char(c @ ('^' | '_')) => self.render_script(nodes, index, *c),
            Node::Char(c) => {
                let mut buffer = [0u8; 4];
                self.push_str(c.encode_utf8(&mut buffer));
                index + 1
            }
            Node::Group(group) => {
                self.render(&group.nodes);
                index + 1
            }
            Node::Command(name) if TEXT_WRAPPERS.contains(name) => {
                match nodes.get(index + 1) {
                    Some(Node::Group(group)) => {
                        self.push_str(group.source);
                        index + 2
                    }
                    _ => {
                        self.push_str(command_symbol(name).unwrap_or(""));
                        index + 1
                    }
                }
            }
            Node::Command(name) if FRACTION_COMMANDS.contains(name) => {
                self.render_fraction(nodes, index, name)
            }
            Node::Command("sqrt") => self.render_sqrt(nodes, index),
            Node::Command(name) => {
                match command_symbol(name) {
                    Some(symbol) => self.push_str(symbol),
                    None => {
                        self.push_str("\\");
                        self.push_str(name);
                    }
                }
                index + 1
            }
        }
    }

    fn render_script(&mut self, nodes: &[Node<'_>], index: usize, script: char) -> usize {
        let table = if script == '^' { superscript } else { subscript };
        let next = skip_whitespace(nodes, index + 1);

        match nodes.get(next) {
            Some(Node::Group(group)) => {
                let inner = Self::render_to_linear(&group.nodes);
                self.push_str(&map_chars(inner.trim(), table));
                next + 1
            }
            Some(Node::Char(c)) if c.is_alphanumeric() => {
                self.push_str(&map_chars(&c.to_string(), table));
                next + 1
            }
            _ => {
                self.push_str(&script.to_string());
                index + 1
            }
        }
    }

    fn render_fraction(&mut self, nodes: &[Node<'_>], index: usize, name: &str) -> usize {
        let first = skip_whitespace(nodes, index + 1);
        let second = skip_whitespace(nodes, first + 1);

        let (Some(Node::Group(numerator)), Some(Node::Group(denominator))) =
            (nodes.get(first), nodes.get(second))
        else {
            // Missing arguments: keep the command as written.
            self.push_str("\\");
            self.push_str(name);
            if let Some(Node::Group(group)) = nodes.get(first) {
                self.push_str("{");
                self.push_str(group.source);
                self.push_str("}");
                return first + 1;
            }
            return index + 1;
        };

        let mut top = MathOutput::default();
        top.render(&numerator.nodes);
        let mut bottom = MathOutput::default();
        bottom.render(&denominator.nodes);

        let nested = top.has_fraction() || bottom.has_fraction();
        let top = collapse(&top.into_linear());
        let bottom = collapse(&bottom.into_linear());

        if nested || !is_marker_safe(&top) || !is_marker_safe(&bottom) {
            self.push_str(&linear_fraction(&top, &bottom));
        } else {
            self.segments.push(Segment::fraction(top, bottom));
        }
        second + 1
    }

    fn render_sqrt(&mut self, nodes: &[Node<'_>], index: usize) -> usize {
        let mut next = skip_whitespace(nodes, index + 1);
        let mut degree = None;

        if let Some(Node::Char('[')) = nodes.get(next) {
            let Some(offset) = nodes[next..]
                .iter()
                .position(|n| matches!(n, Node::Char(']')))
            else {
                self.push_str("\\sqrt");
                return index + 1;
            };
            let close = next + offset;
            degree = Some(collapse(&Self::render_to_linear(&nodes[next + 1..close])));
            next = skip_whitespace(nodes, close + 1);
        }

        let Some(Node::Group(radicand)) = nodes.get(next) else {
            if degree.is_some() {
                self.push_str("\\sqrt");
            } else {
                self.push_str("√");
            }
            return index + 1;
        };

        match degree.as_deref() {
            Some("3") => self.push_str("∛"),
            Some(n) => {
                self.push_str(&map_chars(n, superscript));
                self.push_str("√");
            }
            None => self.push_str("√"),
        }
        self.render(&radicand.nodes);
        next + 1
    }
}

fn skip_whitespace(nodes: &[Node<'_>], mut index: usize) -> usize {
    while nodes.get(index).is_some_and(Node::is_whitespace) {
        index += 1;
    }
    index
}
