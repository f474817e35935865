//! Token stream to document tree.
//!
//! [`DocumentBuilder`] walks the token list once, front to back. Block tokens
//! update the nesting state in its [`ParserContext`]; `heading_open` and
//! `paragraph_open` consume the following `inline` token (and their close)
//! and emit a block; table events are buffered by the
//! [`TableCollector`](table::TableCollector) until `table_close`.
//!
//! Building never fails. Unknown token kinds are skipped, and a heading or
//! paragraph without its inline token produces nothing.

pub mod context;
pub mod inline;
pub mod table;

use crate::common::strip_control_chars;
use crate::ir::nodes::{Block, CodeBlock, Document, Heading, ListItem, Run};
use crate::ir::token::{Token, TokenKind};
use context::ParserContext;
use inline::{render_inline, RenderContext};
use log::{debug, trace, warn};

pub use context::BULLETS;
pub use inline::InlineRenderer;

#[derive(Debug, Default)]
pub struct DocumentBuilder {
    context: ParserContext,
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the builder and build a document from `tokens`.
    pub fn build(mut self, tokens: &[Token]) -> Document {
        let mut index = 0;
        while index < tokens.len() {
            index = self.step(tokens, index);
        }
        debug!(
            "built {} blocks from {} tokens",
            self.blocks.len(),
            tokens.len()
        );
        Document {
            blocks: self.blocks,
        }
    }

    /// Handle the token at `index`; returns the index of the next token.
    fn step(&mut self, tokens: &[Token], index: usize) -> usize {
        let token = &tokens[index];
        trace!("token {index}: {}", token.kind.as_str());

        match &token.kind {
            TokenKind::HeadingOpen => return self.heading(tokens, index),
            TokenKind::ParagraphOpen => return self.paragraph(tokens, index),
            TokenKind::Fence | TokenKind::CodeBlock => self.code_block(token),

            TokenKind::BulletListOpen => self.context.open_list(false),
            TokenKind::OrderedListOpen => self.context.open_list(true),
            TokenKind::BulletListClose | TokenKind::OrderedListClose => {
                self.context.close_list()
            }
            TokenKind::ListItemOpen => self.context.start_item(),

            TokenKind::BlockquoteOpen => self.context.enter_blockquote(),
            TokenKind::BlockquoteClose => self.context.leave_blockquote(),

            TokenKind::TableOpen => self.context.table.reset(),
            TokenKind::TheadOpen => self.context.table.set_header(true),
            TokenKind::TheadClose => self.context.table.set_header(false),
            TokenKind::TrOpen => self.context.table.start_row(),
            TokenKind::TrClose => self.context.table.end_row(),
            TokenKind::ThOpen | TokenKind::TdOpen => self.context.table.start_cell(),
            TokenKind::ThClose | TokenKind::TdClose => self.context.table.end_cell(),
            TokenKind::TableClose => self.table(),
            TokenKind::Inline => {
                if !self.context.table.push_inline(token) {
                    trace!("inline token outside any block ignored");
                }
            }

            TokenKind::Hr => self.blocks.push(Block::Rule),

            TokenKind::HeadingClose
            | TokenKind::ParagraphClose
            | TokenKind::ListItemClose
            | TokenKind::TbodyOpen
            | TokenKind::TbodyClose => {}

            // Inline-only kinds never appear at block level in a
            // well-formed stream.
            TokenKind::Text
            | TokenKind::StrongOpen
            | TokenKind::StrongClose
            | TokenKind::EmOpen
            | TokenKind::EmClose
            | TokenKind::SOpen
            | TokenKind::SClose
            | TokenKind::LinkOpen
            | TokenKind::LinkClose
            | TokenKind::Softbreak
            | TokenKind::Hardbreak
            | TokenKind::CodeInline
            | TokenKind::Image => trace!("stray inline token {} ignored", token.kind.as_str()),

            TokenKind::Unknown(name) => debug!("skipping unknown token kind {name}"),
        }
        index + 1
    }

    /// Index after an `open, inline, close` triple that starts at `index`,
    /// tolerating a missing close.
    fn after_triple(tokens: &[Token], index: usize, close: TokenKind) -> usize {
        match tokens.get(index + 2) {
            Some(token) if token.kind == close => index + 3,
            _ => index + 2,
        }
    }

    fn following_inline(tokens: &[Token], index: usize) -> Option<&Token> {
        tokens
            .get(index + 1)
            .filter(|token| token.kind == TokenKind::Inline)
    }

    fn heading(&mut self, tokens: &[Token], index: usize) -> usize {
        let Some(inline) = Self::following_inline(tokens, index) else {
            return index + 1;
        };
        let level = tokens[index].level.unwrap_or(1).clamp(1, 6);
        let runs = render_inline(inline, RenderContext::heading(level));
        self.blocks.push(Block::Heading(Heading { level, runs }));
        Self::after_triple(tokens, index, TokenKind::HeadingClose)
    }

    fn paragraph(&mut self, tokens: &[Token], index: usize) -> usize {
        let Some(inline) = Self::following_inline(tokens, index) else {
            return index + 1;
        };

        let block = if self.context.list_depth() > 0 {
            Block::ListItem(ListItem {
                depth: self.context.list_depth(),
                marker: self.context.current_marker(),
                runs: render_inline(inline, RenderContext::default()),
            })
        } else if self.context.in_blockquote() {
            Block::Quote {
                runs: render_inline(inline, RenderContext::quote()),
            }
        } else {
            Block::Paragraph {
                runs: render_inline(inline, RenderContext::default()),
            }
        };
        self.blocks.push(block);
        Self::after_triple(tokens, index, TokenKind::ParagraphClose)
    }

    fn code_block(&mut self, token: &Token) {
        let content = strip_control_chars(&token.content);
        let lines = content
            .trim_end_matches('\n')
            .split('\n')
            .map(str::to_string)
            .collect();
        let language = token
            .info
            .as_deref()
            .map(strip_control_chars)
            .map(|info| info.trim().to_string())
            .filter(|info| !info.is_empty());
        self.blocks
            .push(Block::CodeBlock(CodeBlock { language, lines }));
    }

    fn table(&mut self) {
        if self.context.table.header_rows() == 0 {
            debug!("table has no thead; row 0 is used as the header");
        }
        let grid = self.context.table.take_grid();
        let rendered: Vec<Vec<Vec<Run>>> = grid
            .into_iter()
            .enumerate()
            .map(|(row_index, row)| {
                let context = if row_index == 0 {
                    RenderContext::table_header()
                } else {
                    RenderContext::default()
                };
                row.into_iter()
                    .map(|cell| {
                        cell.iter()
                            .flat_map(|inline| render_inline(inline, context))
                            .collect::<Vec<Run>>()
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        match table::flush(rendered) {
            Some(table) => self.blocks.push(Block::Table(table)),
            None => warn!("dropping table with no cells"),
        }
    }
}

/// Build a document from a token stream with a fresh builder.
pub fn build_document(tokens: &[Token]) -> Document {
    DocumentBuilder::new().build(tokens)
}
