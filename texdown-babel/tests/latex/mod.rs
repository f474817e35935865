//! Math normalization, observed through the public `latex` API.

use insta::assert_snapshot;
use texdown_babel::latex::{normalize, normalize_segments, split_markers, Segment};

#[test]
fn text_without_dollars_is_untouched() {
    let text = "No math here: \\alpha, {braces}, ⟦brackets⟧ and 50% off.";
    assert_eq!(normalize(text), text);
}

#[test]
fn greek_and_operators() {
    assert_snapshot!(normalize("$\\alpha + \\beta$"), @"α + β");
    assert_snapshot!(normalize("Since $a \\leq b$, done."), @"Since a ≤ b, done.");
}

#[test]
fn scripts() {
    assert_snapshot!(normalize("$E = mc^2$"), @"E = mc²");
    assert_snapshot!(normalize("$x_{i}$"), @"xᵢ");
}

#[test]
fn fraction_becomes_a_single_marker() {
    let out = normalize("$\\frac{1}{2}$");
    assert_eq!(out.matches("⟦FRAC:").count(), 1);
    assert_eq!(split_markers(&out), vec![Segment::fraction("1", "2")]);
}

#[test]
fn fraction_segments_keep_surrounding_prose() {
    assert_eq!(
        normalize_segments("A $\\frac{a}{b}$ B"),
        vec![
            Segment::text("A "),
            Segment::fraction("a", "b"),
            Segment::text(" B"),
        ]
    );
}

#[test]
fn nested_fraction_goes_linear() {
    assert_snapshot!(normalize("$\\frac{\\frac{1}{2}}{3}$"), @"(1/2)/3");
}

#[test]
fn square_and_cube_roots() {
    assert_snapshot!(normalize("$\\sqrt{2}$"), @"√2");
    assert_snapshot!(normalize("$\\sqrt[3]{x}$"), @"∛x");
}

#[test]
fn unmatched_dollar_leaves_line_alone() {
    let line = "$x$ costs $5";
    assert_eq!(normalize(line), line);
}

#[test]
fn balance_is_judged_per_line() {
    let text = "Pay $5 today\nand $y$ tomorrow";
    assert_eq!(normalize(text), "Pay $5 today\nand y tomorrow");
}

#[test]
fn display_math_between_paragraphs() {
    let text = "Before\n\n$$x^{2} + y^{2}$$\n\nAfter";
    assert_eq!(normalize(text), "Before\n\nx² + y²\n\nAfter");
}

#[test]
fn unclosed_display_math_is_verbatim() {
    let text = "$$x + y";
    assert_eq!(normalize(text), text);
}

#[test]
fn unknown_commands_survive() {
    assert_snapshot!(normalize("$\\foo + \\alpha$"), @"\\foo + α");
}

#[test]
fn text_wrappers_keep_their_argument() {
    assert_snapshot!(normalize("$\\text{if } x > 0$"), @"if x > 0");
}

#[test]
fn markers_split_around_text() {
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
fn malformed_marker_is_literal() {
    assert_eq!(
        split_markers("x ⟦FRAC:1⟧ y"),
        vec![Segment::text("x ⟦FRAC:1⟧ y")]
    );
}
