//! Inline run rendering.
//!
//! Turns the children of one `inline` token into [`Run`]s. Styling comes
//! from paired open/close tokens toggling flags in an [`InlineState`] that
//! lives for exactly one call.

use crate::common::strip_control_chars;
use crate::ir::nodes::{ColorClass, Run, TextRun, TextStyle};
use crate::ir::token::{Token, TokenKind};
use crate::latex::{split_markers, Segment};
use log::trace;

/// Where the runs being rendered will end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub heading_level: Option<u8>,
    pub default_color: ColorClass,
    /// Render every text run bold (table header rows).
    pub force_bold: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            heading_level: None,
            default_color: ColorClass::Body,
            force_bold: false,
        }
    }
}

impl RenderContext {
    pub fn heading(level: u8) -> Self {
        RenderContext {
            heading_level: Some(level),
            default_color: ColorClass::Heading,
            ..Self::default()
        }
    }

    pub fn quote() -> Self {
        RenderContext {
            default_color: ColorClass::Quote,
            ..Self::default()
        }
    }

    pub fn table_header() -> Self {
        RenderContext {
            default_color: ColorClass::TableHeader,
            force_bold: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct InlineState {
    bold: bool,
    italic: bool,
    strike: bool,
    link_url: Option<String>,
}

/// Renders inline tokens under one [`RenderContext`].
#[derive(Debug)]
pub struct InlineRenderer {
    context: RenderContext,
    state: InlineState,
    runs: Vec<Run>,
}

impl InlineRenderer {
    pub fn new(context: RenderContext) -> Self {
        InlineRenderer {
            context,
            state: InlineState::default(),
            runs: Vec::new(),
        }
    }

    /// Render the children of an `inline` token. A token with no children
    /// renders its own content as plain text.
    pub fn render_inline(self, inline: &Token) -> Vec<Run> {
        if inline.children.is_empty() && !inline.content.is_empty() {
            return self.render(&[Token::text(inline.content.clone())]);
        }
        self.render(&inline.children)
    }

    pub fn render(mut self, children: &[Token]) -> Vec<Run> {
        for child in children {
            self.render_child(child);
        }
        self.runs
    }

    fn render_child(&mut self, token: &Token) {
        match &token.kind {
            TokenKind::Text => self.push_text(&token.content),
            TokenKind::CodeInline => {
                let content = strip_control_chars(&token.content);
                if !content.is_empty() {
                    let style = TextStyle {
                        code: true,
                        ..self.style()
                    };
                    self.runs.push(Run::Text(TextRun {
                        content: content.into_owned(),
                        style,
                        color: ColorClass::InlineCode,
                    }));
                }
            }
            TokenKind::StrongOpen => self.state.bold = true,
            TokenKind::StrongClose => self.state.bold = false,
            TokenKind::EmOpen => self.state.italic = true,
            TokenKind::EmClose => self.state.italic = false,
            TokenKind::SOpen => self.state.strike = true,
            TokenKind::SClose => self.state.strike = false,
            TokenKind::LinkOpen => {
                let href = token.attr("href").unwrap_or_default();
                self.state.link_url = Some(strip_control_chars(href).into_owned());
            }
            TokenKind::LinkClose => self.state.link_url = None,
            TokenKind::Softbreak | TokenKind::Hardbreak => self.runs.push(Run::LineBreak),
            TokenKind::Image => {
                let label = token
                    .attr("alt")
                    .filter(|alt| !alt.is_empty())
                    .or_else(|| token.attr("src"))
                    .unwrap_or_default();
                self.runs.push(Run::Image {
                    label: strip_control_chars(label).into_owned(),
                });
            }
            other => trace!("inline token {} ignored", other.as_str()),
        }
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            bold: self.state.bold || self.context.force_bold,
            italic: self.state.italic,
            // Headings ignore strike-through.
            strike: self.state.strike && self.context.heading_level.is_none(),
            code: false,
        }
    }

    fn push_text(&mut self, raw: &str) {
        let content = strip_control_chars(raw);
        for segment in split_markers(&content) {
            match segment {
                Segment::Text(text) if text.is_empty() => {}
                Segment::Text(text) => self.push_styled(text),
                Segment::Fraction {
                    numerator,
                    denominator,
                } => self.runs.push(Run::Fraction {
                    numerator,
                    denominator,
                }),
            }
        }
    }

    fn push_styled(&mut self, content: String) {
        let style = self.style();
        let run = match &self.state.link_url {
            Some(url) => Run::Link {
                content,
                url: url.clone(),
                style,
            },
            None => Run::Text(TextRun {
                content,
                style,
                color: self.context.default_color,
            }),
        };
        self.runs.push(run);
    }
}

/// Render one `inline` token under `context`.
pub fn render_inline(inline: &Token, context: RenderContext) -> Vec<Run> {
    InlineRenderer::new(context).render_inline(inline)
}
