//! Markdown tokenizing (Markdown → token stream)
//!
//! Parses CommonMark with comrak and flattens the comrak AST into the
//! markdown-it style token stream the document builder consumes.
//! Pipeline: Markdown string → Comrak AST → Tokens

use crate::ir::token::{Token, TokenKind};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use log::debug;

/// Tokenize a Markdown string.
pub fn tokenize(source: &str) -> Vec<Token> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut tokens = Vec::new();
    for child in root.children() {
        collect_block_tokens(child, &mut tokens);
    }
    debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    tokens
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

fn open_close(open: TokenKind, close: TokenKind) -> (Token, Token) {
    (Token::new(open), Token::new(close))
}

/// Flatten a block node and its descendants.
fn collect_block_tokens<'a>(node: &'a AstNode<'a>, tokens: &mut Vec<Token>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Heading(heading) => {
            tokens.push(Token::new(TokenKind::HeadingOpen).with_level(heading.level));
            tokens.push(inline_token(node));
            tokens.push(Token::new(TokenKind::HeadingClose).with_level(heading.level));
        }

        NodeValue::Paragraph => {
            tokens.push(Token::new(TokenKind::ParagraphOpen));
            tokens.push(inline_token(node));
            tokens.push(Token::new(TokenKind::ParagraphClose));
        }

        NodeValue::List(list) => {
            let (open, close) = match list.list_type {
                ListType::Ordered => (
                    Token::new(TokenKind::OrderedListOpen).with_attr("start", list.start.to_string()),
                    Token::new(TokenKind::OrderedListClose),
                ),
                ListType::Bullet => open_close(TokenKind::BulletListOpen, TokenKind::BulletListClose),
            };
            tokens.push(open);
            collect_children(node, tokens);
            tokens.push(close);
        }

        NodeValue::Item(_) => {
            tokens.push(Token::new(TokenKind::ListItemOpen));
            collect_children(node, tokens);
            tokens.push(Token::new(TokenKind::ListItemClose));
        }

        NodeValue::CodeBlock(code_block) => {
            let token = if code_block.fenced {
                Token::new(TokenKind::Fence).with_info(code_block.info.clone())
            } else {
                Token::new(TokenKind::CodeBlock)
            };
            tokens.push(token.with_content(code_block.literal.clone()));
        }

        NodeValue::HtmlBlock(html) => {
            // Raw HTML is not rendered; it is carried through as text.
            tokens.push(Token::new(TokenKind::ParagraphOpen));
            tokens.push(Token::inline(vec![Token::text(html.literal.trim_end())]));
            tokens.push(Token::new(TokenKind::ParagraphClose));
        }

        NodeValue::FrontMatter(_) => {}

        NodeValue::ThematicBreak => tokens.push(Token::new(TokenKind::Hr)),

        NodeValue::BlockQuote => {
            tokens.push(Token::new(TokenKind::BlockquoteOpen));
            collect_children(node, tokens);
            tokens.push(Token::new(TokenKind::BlockquoteClose));
        }

        NodeValue::Table(_) => {
            tokens.push(Token::new(TokenKind::TableOpen));
            collect_table_rows(node, tokens);
            tokens.push(Token::new(TokenKind::TableClose));
        }

        _ => {
            // Other containers keep their block children.
            collect_children(node, tokens);
        }
    }
}

fn collect_children<'a>(node: &'a AstNode<'a>, tokens: &mut Vec<Token>) {
    for child in node.children() {
        collect_block_tokens(child, tokens);
    }
}

/// Emit table rows, wrapping header rows in thead and the rest in tbody.
fn collect_table_rows<'a>(table: &'a AstNode<'a>, tokens: &mut Vec<Token>) {
    let mut in_head = false;
    let mut in_body = false;

    for row in table.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));

        if header && !in_head {
            tokens.push(Token::new(TokenKind::TheadOpen));
            in_head = true;
        }
        if !header {
            if in_head {
                tokens.push(Token::new(TokenKind::TheadClose));
                in_head = false;
            }
            if !in_body {
                tokens.push(Token::new(TokenKind::TbodyOpen));
                in_body = true;
            }
        }

        let (cell_open, cell_close) = if header {
            (TokenKind::ThOpen, TokenKind::ThClose)
        } else {
            (TokenKind::TdOpen, TokenKind::TdClose)
        };

        tokens.push(Token::new(TokenKind::TrOpen));
        for cell in row.children() {
            tokens.push(Token::new(cell_open.clone()));
            tokens.push(inline_token(cell));
            tokens.push(Token::new(cell_close.clone()));
        }
        tokens.push(Token::new(TokenKind::TrClose));
    }

    if in_head {
        tokens.push(Token::new(TokenKind::TheadClose));
    }
    if in_body {
        tokens.push(Token::new(TokenKind::TbodyClose));
    }
}

/// Build the `inline` token for a node whose children are inline content.
fn inline_token<'a>(node: &'a AstNode<'a>) -> Token {
    let mut children = Vec::new();
    for child in node.children() {
        collect_inline_tokens(child, &mut children);
    }
    Token::inline(children).with_content(collect_text_from_children(node))
}

/// Flatten an inline node into open/close pairs and leaf tokens.
fn collect_inline_tokens<'a>(node: &'a AstNode<'a>, tokens: &mut Vec<Token>) {
    let node_data = node.data.borrow();

    let wrap = |tokens: &mut Vec<Token>, open: Token, close: TokenKind| {
        tokens.push(open);
        for child in node.children() {
            collect_inline_tokens(child, tokens);
        }
        tokens.push(Token::new(close));
    };

    match &node_data.value {
        NodeValue::Text(text) => tokens.push(Token::text(text.clone())),

        NodeValue::Strong => wrap(tokens, Token::new(TokenKind::StrongOpen), TokenKind::StrongClose),
        NodeValue::Emph => wrap(tokens, Token::new(TokenKind::EmOpen), TokenKind::EmClose),
        NodeValue::Strikethrough => wrap(tokens, Token::new(TokenKind::SOpen), TokenKind::SClose),

        NodeValue::Link(link) => {
            let mut open = Token::new(TokenKind::LinkOpen).with_attr("href", link.url.clone());
            if !link.title.is_empty() {
                open = open.with_attr("title", link.title.clone());
            }
            wrap(tokens, open, TokenKind::LinkClose);
        }

        NodeValue::Image(link) => {
            let mut image = Token::new(TokenKind::Image)
                .with_attr("src", link.url.clone())
                .with_attr("alt", collect_text_from_children(node));
            if !link.title.is_empty() {
                image = image.with_attr("title", link.title.clone());
            }
            tokens.push(image);
        }

        NodeValue::Code(code) => {
            tokens.push(Token::new(TokenKind::CodeInline).with_content(code.literal.clone()));
        }

        // Soft breaks are promoted to hard breaks.
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            tokens.push(Token::new(TokenKind::Hardbreak));
        }

        NodeValue::HtmlInline(html) => tokens.push(Token::text(html.clone())),

        _ => {
            for child in node.children() {
                collect_inline_tokens(child, tokens);
            }
        }
    }
}

/// Collect text content from a node
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.kind.as_str()).collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let tokens = tokenize("# Title\n\nBody text.\n");
        assert_eq!(
            kinds(&tokens),
            vec![
                "heading_open",
                "inline",
                "heading_close",
                "paragraph_open",
                "inline",
                "paragraph_close"
            ]
        );
        assert_eq!(tokens[0].level, Some(1));
        assert_eq!(tokens[1].children[0].content, "Title");
    }

    #[test]
    fn test_soft_break_becomes_hard_break() {
        let tokens = tokenize("one\ntwo\n");
        let inline = &tokens[1];
        assert_eq!(kinds(&inline.children), vec!["text", "hardbreak", "text"]);
    }

    #[test]
    fn test_inline_pairs() {
        let tokens = tokenize("**b** *i* ~~s~~ `c` [l](http://x.y)\n");
        let children = kinds(&tokens[1].children);
        for expected in [
            "strong_open",
            "strong_close",
            "em_open",
            "em_close",
            "s_open",
            "s_close",
            "code_inline",
            "link_open",
            "link_close",
        ] {
            assert!(children.contains(&expected), "missing {expected}");
        }
        let link = tokens[1]
            .children
            .iter()
            .find(|t| t.kind == TokenKind::LinkOpen)
            .unwrap();
        assert_eq!(link.attr("href"), Some("http://x.y"));
    }

    #[test]
    fn test_fenced_code() {
        let tokens = tokenize("```rust\nfn main() {}\n```\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Fence);
        assert_eq!(tokens[0].info.as_deref(), Some("rust"));
        assert_eq!(tokens[0].content, "fn main() {}\n");
    }

    #[test]
    fn test_ordered_list_items() {
        let tokens = tokenize("1. a\n2. b\n");
        assert_eq!(tokens[0].kind, TokenKind::OrderedListOpen);
        let items = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::ListItemOpen)
            .count();
        assert_eq!(items, 2);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::OrderedListClose);
    }

    #[test]
    fn test_table_sections() {
        let tokens = tokenize("|A|B|\n|-|-|\n|1|2|\n");
        let names = kinds(&tokens);
        assert_eq!(names[0], "table_open");
        assert_eq!(names[1], "thead_open");
        assert!(names.contains(&"tbody_open"));
        assert_eq!(names.iter().filter(|n| **n == "th_open").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "td_open").count(), 2);
        assert_eq!(*names.last().unwrap(), "table_close");
    }

    #[test]
    fn test_front_matter_is_skipped() {
        let tokens = tokenize("---\ntitle: x\n---\n\nBody\n");
        assert_eq!(
            kinds(&tokens),
            vec!["paragraph_open", "inline", "paragraph_close"]
        );
    }

    #[test]
    fn test_image_attrs() {
        let tokens = tokenize("![a diagram](img.png \"T\")\n");
        let image = &tokens[1].children[0];
        assert_eq!(image.kind, TokenKind::Image);
        assert_eq!(image.attr("src"), Some("img.png"));
        assert_eq!(image.attr("alt"), Some("a diagram"));
        assert_eq!(image.attr("title"), Some("T"));
    }
}
