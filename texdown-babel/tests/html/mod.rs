//! Markdown → HTML, end to end.

use crate::common::fixture;
use std::collections::HashMap;
use texdown_babel::format::Format;
use texdown_babel::formats::html::{HtmlFormat, HtmlTheme};
use texdown_babel::formats::markdown::parse_from_markdown;
use texdown_babel::{convert, FormatRegistry, SerializedDocument};

fn kitchensink_html() -> String {
    let doc = parse_from_markdown(&fixture("kitchensink.md"), true);
    HtmlFormat::default().serialize(&doc).unwrap()
}

#[test]
fn kitchensink_page_structure() {
    let html = kitchensink_html();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Kinematics</title>"));
    assert!(html.contains("<h1 class=\"td-heading td-heading-1\">Kinematics</h1>"));
    assert!(html.contains("<h2 class=\"td-heading td-heading-2\">Lists</h2>"));
    assert!(html.contains("<blockquote class=\"td-quote\"><p>Quoted √2 text</p></blockquote>"));
    assert!(html.contains("<hr class=\"td-rule\">"));
}

#[test]
fn kitchensink_math_and_lists() {
    let html = kitchensink_html();

    assert!(html.contains("<mfrac><mrow><mtext>d</mtext></mrow><mrow><mtext>t</mtext></mrow></mfrac>"));
    assert!(html.contains("td-list-depth-2"));
    assert!(html.contains("<span class=\"td-list-marker\">◦ </span>nested x₁"));
    assert!(html.contains("<span class=\"td-list-marker\">2. </span>two"));
}

#[test]
fn kitchensink_table_code_links_images() {
    let html = kitchensink_html();

    assert!(html.contains("<tr class=\"td-row-header\"><th><strong>Name</strong></th>"));
    assert!(html.contains("<td>π</td>"));
    assert!(html.contains("<div class=\"td-code-label\">rust</div>"));
    assert!(html.contains("<span class=\"td-muted\"> (https://example.com)</span>"));
    assert!(html.contains("[Image: chart]"));
}

#[test]
fn themes_layer_over_baseline() {
    let doc = parse_from_markdown("Body\n", true);
    let standard = HtmlFormat::new(HtmlTheme::Standard).serialize(&doc).unwrap();
    let serif = HtmlFormat::new(HtmlTheme::Serif).serialize(&doc).unwrap();

    assert!(standard.contains(".td-document"));
    assert!(serif.contains(".td-document"));
    assert!(serif.contains("Cambria"));
    assert!(!standard.contains("Cambria"));
}

#[test]
fn convert_helper_produces_html_text() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "serif".to_string());
    match convert("# Hi\n", "html", &options).unwrap() {
        SerializedDocument::Text(html) => assert!(html.contains("Cambria")),
        SerializedDocument::Binary(_) => panic!("expected text"),
    }
}

#[test]
fn json_format_through_registry() {
    let registry = FormatRegistry::default();
    let doc = parse_from_markdown("$\\frac{1}{2}$\n", true);
    let json = registry.serialize(&doc, "json").unwrap();
    assert!(json.contains("\"type\": \"fraction\""));
}

#[test]
fn markdown_cannot_serialize() {
    let registry = FormatRegistry::default();
    let doc = parse_from_markdown("x\n", true);
    assert!(registry.serialize(&doc, "markdown").is_err());
}
