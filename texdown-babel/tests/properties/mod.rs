//! Property tests for the normalizer and the control-character filter.

use proptest::prelude::*;
use texdown_babel::builder::build_document;
use texdown_babel::common::sanitize::is_forbidden_control;
use texdown_babel::ir::nodes::{Block, Run};
use texdown_babel::ir::token::{Token, TokenKind};
use texdown_babel::latex::normalize;

fn paragraph(text: String) -> Vec<Token> {
    vec![
        Token::new(TokenKind::ParagraphOpen),
        Token::inline(vec![Token::text(text)]),
        Token::new(TokenKind::ParagraphClose),
    ]
}

fn linked_paragraph(href: String) -> Vec<Token> {
    vec![
        Token::new(TokenKind::ParagraphOpen),
        Token::inline(vec![
            Token::new(TokenKind::LinkOpen).with_attr("href", href),
            Token::text("site"),
            Token::new(TokenKind::LinkClose),
        ]),
        Token::new(TokenKind::ParagraphClose),
    ]
}

proptest! {
    #[test]
    fn normalize_is_identity_without_dollars(text in "[^$]*") {
        prop_assert_eq!(normalize(&text), text);
    }

    #[test]
    fn runs_never_carry_forbidden_controls(text in "[\\x00-\\x7F]{0,64}") {
        let doc = build_document(&paragraph(text.clone()));
        for block in &doc.blocks {
            for run in block.runs().unwrap_or_default() {
                let content = run.plain_text();
                prop_assert!(!content.chars().any(is_forbidden_control));
            }
        }
    }

    #[test]
    fn link_urls_never_carry_forbidden_controls(href in "[\\x00-\\x7F]{0,64}") {
        let doc = build_document(&linked_paragraph(href));
        for run in doc.blocks[0].runs().unwrap_or_default() {
            prop_assert!(!run.plain_text().chars().any(is_forbidden_control));
        }
    }

    #[test]
    fn code_languages_never_carry_forbidden_controls(info in "[\\x00-\\x7F]{0,16}") {
        let tokens = vec![Token::new(TokenKind::Fence).with_info(info).with_content("x\n")];
        let doc = build_document(&tokens);
        if let Block::CodeBlock(code) = &doc.blocks[0] {
            let language = code.language.clone().unwrap_or_default();
            prop_assert!(!language.chars().any(is_forbidden_control));
        }
    }

    #[test]
    fn tab_newline_and_carriage_return_survive(
        parts in prop::collection::vec("[a-z]{1,5}", 1..5),
        sep in prop::sample::select(vec!['\t', '\n', '\r']),
    ) {
        let text = parts.join(&sep.to_string());
        let doc = build_document(&paragraph(text.clone()));
        let rendered: String = doc.blocks[0]
            .runs()
            .unwrap_or_default()
            .iter()
            .map(Run::plain_text)
            .collect();
        prop_assert_eq!(rendered, text);
    }

    #[test]
    fn normalize_never_panics(text in "\\PC{0,80}") {
        let _ = normalize(&text);
    }
}
