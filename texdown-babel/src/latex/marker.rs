//! Fraction markers: the text encoding of a fraction inside normalized prose.
//!
//! The tokenizer only sees text, so a fraction crosses it as
//! `⟦FRAC:<numerator>:<denominator>⟧` and is decoded back into a
//! [`Segment::Fraction`] by the inline renderer.

use log::warn;

pub const MARKER_OPEN: &str = "⟦FRAC:";
pub const MARKER_CLOSE: char = '⟧';

/// A piece of normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Fraction {
        numerator: String,
        denominator: String,
    },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text(content.into())
    }

    pub fn fraction(numerator: impl Into<String>, denominator: impl Into<String>) -> Self {
        Segment::Fraction {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }
}

/// True when `part` can sit inside a marker without breaking its syntax.
pub fn is_marker_safe(part: &str) -> bool {
    !part.contains([':', '⟦', MARKER_CLOSE])
}

pub fn encode_fraction(numerator: &str, denominator: &str) -> String {
    format!("{MARKER_OPEN}{numerator}:{denominator}{MARKER_CLOSE}")
}

/// Encode segments back into a single string, fractions as markers.
pub fn encode_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Fraction {
                numerator,
                denominator,
            } => out.push_str(&encode_fraction(numerator, denominator)),
        }
    }
    out
}

/// Append text to `segments`, merging with a trailing text segment.
pub fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Split text on fraction markers, in document order.
///
/// A marker that does not parse (no closing bracket, no separator, more than
/// one separator) is kept as literal text.
pub fn split_markers(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_OPEN) {
        push_text(&mut segments, &rest[..start]);
        let body_start = start + MARKER_OPEN.len();

        match parse_marker_body(&rest[body_start..]) {
            Some((numerator, denominator, consumed)) => {
                segments.push(Segment::fraction(numerator, denominator));
                rest = &rest[body_start + consumed..];
            }
            None => {
                warn!("malformed fraction marker kept as text: {:?}", rest);
                push_text(&mut segments, MARKER_OPEN);
                rest = &rest[body_start..];
            }
        }
    }

    push_text(&mut segments, rest);
    segments
}

/// Parse `num:den⟧`, returning both parts and the bytes consumed.
fn parse_marker_body(body: &str) -> Option<(&str, &str, usize)> {
    let close = body.find(MARKER_CLOSE)?;
    let inner = &body[..close];
    if inner.contains('⟦') {
        return None;
    }
    let (numerator, denominator) = inner.split_once(':')?;
    if denominator.contains(':') {
        return None;
    }
    Some((numerator, denominator, close + MARKER_CLOSE.len_utf8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_text_around_a_marker() {
        assert_eq!(
            split_markers("A⟦FRAC:1:2⟧B"),
            vec![
                Segment::text("A"),
                Segment::fraction("1", "2"),
                Segment::text("B"),
            ]
        );
    }

    #[test]
    fn adjacent_markers() {
        assert_eq!(
            split_markers("⟦FRAC:a:b⟧⟦FRAC:c:d⟧"),
            vec![Segment::fraction("a", "b"), Segment::fraction("c", "d")]
        );
    }

    #[test]
    fn unterminated_marker_is_literal() {
        assert_eq!(
            split_markers("x ⟦FRAC:1:2 y"),
            vec![Segment::text("x ⟦FRAC:1:2 y")]
        );
    }

    #[test]
    fn marker_with_extra_separator_is_literal_but_later_marker_decodes() {
        assert_eq!(
            split_markers("⟦FRAC:1:2:3⟧ then ⟦FRAC:4:5⟧"),
            vec![
                Segment::text("⟦FRAC:1:2:3⟧ then "),
                Segment::fraction("4", "5"),
            ]
        );
    }

    #[test]
    fn encode_is_inverse_of_split_for_plain_parts() {
        let segments = vec![
            Segment::text("x = "),
            Segment::fraction("π", "2"),
        ];
        let encoded = encode_segments(&segments);
        assert_eq!(encoded, "x = ⟦FRAC:π:2⟧");
        assert_eq!(split_markers(&encoded), segments);
    }

    #[test]
    fn marker_safety() {
        assert!(is_marker_safe("a+b"));
        assert!(!is_marker_safe("a:b"));
        assert!(!is_marker_safe("⟦x"));
    }
}
