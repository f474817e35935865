//! Building documents from hand-written token streams.

use texdown_babel::builder::build_document;
use texdown_babel::ir::nodes::{Block, ListMarker, RowRole, Run};
use texdown_babel::ir::token::{Token, TokenKind};

fn tok(kind: TokenKind) -> Token {
    Token::new(kind)
}

fn paragraph(text: &str) -> Vec<Token> {
    vec![
        tok(TokenKind::ParagraphOpen),
        Token::inline(vec![Token::text(text)]),
        tok(TokenKind::ParagraphClose),
    ]
}

fn ordered_list(items: &[&str]) -> Vec<Token> {
    let mut tokens = vec![tok(TokenKind::OrderedListOpen)];
    for item in items {
        tokens.push(tok(TokenKind::ListItemOpen));
        tokens.extend(paragraph(item));
        tokens.push(tok(TokenKind::ListItemClose));
    }
    tokens.push(tok(TokenKind::OrderedListClose));
    tokens
}

fn cell(kind: TokenKind, close: TokenKind, text: &str) -> Vec<Token> {
    vec![
        tok(kind),
        Token::inline(vec![Token::text(text)]),
        tok(close),
    ]
}

fn markers(blocks: &[Block]) -> Vec<ListMarker> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::ListItem(item) => Some(item.marker),
            _ => None,
        })
        .collect()
}

#[test]
fn ordinals_count_up_and_restart_per_list() {
    let mut tokens = ordered_list(&["a", "b", "c"]);
    tokens.extend(paragraph("between"));
    tokens.extend(ordered_list(&["x", "y"]));

    let doc = build_document(&tokens);
    assert_eq!(
        markers(&doc.blocks),
        vec![
            ListMarker::Ordinal(1),
            ListMarker::Ordinal(2),
            ListMarker::Ordinal(3),
            ListMarker::Ordinal(1),
            ListMarker::Ordinal(2),
        ]
    );
}

#[test]
fn table_rows_get_header_and_zebra_roles() {
    let mut tokens = vec![
        tok(TokenKind::TableOpen),
        tok(TokenKind::TheadOpen),
        tok(TokenKind::TrOpen),
    ];
    tokens.extend(cell(TokenKind::ThOpen, TokenKind::ThClose, "H1"));
    tokens.extend(cell(TokenKind::ThOpen, TokenKind::ThClose, "H2"));
    tokens.extend([
        tok(TokenKind::TrClose),
        tok(TokenKind::TheadClose),
        tok(TokenKind::TbodyOpen),
    ]);
    for row in [["a", "b"], ["c", "d"]] {
        tokens.push(tok(TokenKind::TrOpen));
        for text in row {
            tokens.extend(cell(TokenKind::TdOpen, TokenKind::TdClose, text));
        }
        tokens.push(tok(TokenKind::TrClose));
    }
    tokens.extend([tok(TokenKind::TbodyClose), tok(TokenKind::TableClose)]);

    let doc = build_document(&tokens);
    let [Block::Table(table)] = doc.blocks.as_slice() else {
        panic!("expected one table, got {:?}", doc.blocks);
    };
    assert_eq!(table.column_count, 2);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.header_row_index, 0);
    assert_eq!(table.rows[0].role, RowRole::Header);
    assert_ne!(table.rows[1].role, table.rows[2].role);

    let Run::Text(header) = &table.rows[0].cells[0][0] else {
        panic!("expected text in header cell");
    };
    assert!(header.style.bold);
}

#[test]
fn empty_table_is_dropped() {
    let tokens = vec![tok(TokenKind::TableOpen), tok(TokenKind::TableClose)];
    assert!(build_document(&tokens).blocks.is_empty());
}

#[test]
fn unknown_tokens_are_skipped() {
    let mut tokens = vec![Token::new(TokenKind::from_name("footnote_ref"))];
    tokens.extend(paragraph("kept"));
    let doc = build_document(&tokens);
    assert_eq!(doc.blocks.len(), 1);
    assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
}

#[test]
fn fraction_markers_in_text_become_runs() {
    let doc = build_document(&paragraph("A⟦FRAC:1:2⟧B"));
    let Block::Paragraph { runs } = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(
        runs,
        &vec![
            Run::text("A"),
            Run::Fraction {
                numerator: "1".to_string(),
                denominator: "2".to_string(),
            },
            Run::text("B"),
        ]
    );
}

#[test]
fn control_characters_are_stripped_from_runs() {
    let doc = build_document(&paragraph("bell\u{07}\tand\u{1B}escape"));
    let Block::Paragraph { runs } = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(runs, &vec![Run::text("bell\tandescape")]);
}

#[test]
fn paragraph_without_inline_children_uses_raw_content() {
    let tokens = vec![
        tok(TokenKind::ParagraphOpen),
        tok(TokenKind::Inline).with_content("raw text"),
        tok(TokenKind::ParagraphClose),
    ];
    let doc = build_document(&tokens);
    assert_eq!(doc.blocks[0].runs(), Some(&[Run::text("raw text")][..]));
}
