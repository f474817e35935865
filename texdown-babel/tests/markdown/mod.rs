//! Markdown → Document, end to end.

use crate::common::{fixture, outline};
use insta::assert_snapshot;
use std::collections::HashMap;
use texdown_babel::format::Format;
use texdown_babel::formats::markdown::{parse_from_markdown, MarkdownFormat};
use texdown_babel::ir::nodes::{Block, ColorClass, Run};
use texdown_babel::FormatRegistry;

#[test]
fn kitchensink_outline() {
    let doc = parse_from_markdown(&fixture("kitchensink.md"), true);
    assert_snapshot!(outline(&doc), @r"
h1 Kinematics
p Velocity is v = [d/t] and speed is scalar.
h2 Lists
• alpha α
• beta
  ◦ nested x₁
1. one
2. two
> Quoted √2 text
code[rust] 1 lines
table 3x2
---
p See docs (https://example.com) and [Image: chart].
");
}

#[test]
fn kitchensink_without_latex_keeps_dollars() {
    let doc = parse_from_markdown(&fixture("kitchensink.md"), false);
    let text = outline(&doc);
    assert!(text.contains("$\\alpha$"));
    assert!(!text.contains("[d/t]"));
}

#[test]
fn registry_parses_markdown_with_options() {
    let registry = FormatRegistry::default();
    let mut options = HashMap::new();
    options.insert("latex".to_string(), "false".to_string());

    let doc = registry
        .parse_with_options("$\\beta$\n", "markdown", &options)
        .unwrap();
    assert_eq!(outline(&doc), "p $\\beta$");

    let doc = registry.parse("$\\beta$\n", "markdown").unwrap();
    assert_eq!(outline(&doc), "p β");
}

#[test]
fn soft_breaks_become_line_breaks() {
    let doc = MarkdownFormat::default().parse("first\nsecond\n").unwrap();
    assert_eq!(outline(&doc), "p first⏎second");
}

#[test]
fn inline_styles_map_to_run_styles() {
    let doc = parse_from_markdown("**b** *i* ~~s~~ `c`\n", true);
    let Block::Paragraph { runs } = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    let styled: Vec<_> = runs
        .iter()
        .filter_map(|run| match run {
            Run::Text(text) if !text.content.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect();

    assert!(styled[0].style.bold);
    assert!(styled[1].style.italic);
    assert!(styled[2].style.strike);
    assert!(styled[3].style.code);
    assert_eq!(styled[3].color, ColorClass::InlineCode);
}

#[test]
fn quote_and_code_blocks() {
    let doc = parse_from_markdown("> quoted\n\n    indented code\n", true);
    assert_eq!(outline(&doc), "> quoted\ncode[] 1 lines");
}

#[test]
fn heading_levels() {
    let doc = parse_from_markdown("# One\n\n### Three\n\n###### Six\n", true);
    assert_eq!(outline(&doc), "h1 One\nh3 Three\nh6 Six");
}

#[test]
fn code_block_keeps_blank_lines_and_math() {
    let doc = parse_from_markdown("```\na\n\nb\n```\n", true);
    let Block::CodeBlock(code) = &doc.blocks[0] else {
        panic!("expected code block");
    };
    assert_eq!(code.lines, vec!["a", "", "b"]);
    assert_eq!(code.language, None);
}

#[test]
fn raw_html_is_text() {
    let doc = parse_from_markdown("<div>hi</div>\n", true);
    assert_eq!(outline(&doc), "p <div>hi</div>");
}

#[test]
fn control_characters_in_link_destinations_are_dropped() {
    let doc = parse_from_markdown("[site](<http://x\u{1}y>)\n", true);
    let Block::Paragraph { runs } = &doc.blocks[0] else {
        panic!("expected a paragraph, got {:?}", doc.blocks[0]);
    };
    match &runs[0] {
        Run::Link { content, url, .. } => {
            assert_eq!(content, "site");
            assert_eq!(url, "http://xy");
        }
        other => panic!("expected a link run, got {other:?}"),
    }
}

#[test]
fn control_characters_in_fence_info_are_dropped() {
    let doc = parse_from_markdown("```rust\u{1}\ncode\n```\n", true);
    let Block::CodeBlock(code) = &doc.blocks[0] else {
        panic!("expected a code block, got {:?}", doc.blocks[0]);
    };
    assert_eq!(code.language.as_deref(), Some("rust"));
    assert_eq!(code.lines, vec!["code".to_string()]);
}
