//! The flat token stream consumed by the document builder.
//!
//! Tokens follow the markdown-it model: block structure is carried by
//! `*_open`/`*_close` pairs, and each run of inline content sits in one
//! `inline` token whose `children` hold the inline events.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Closed set of token kinds, named after the markdown-it token types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    HeadingOpen,
    HeadingClose,
    ParagraphOpen,
    ParagraphClose,
    Fence,
    CodeBlock,
    BulletListOpen,
    BulletListClose,
    OrderedListOpen,
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    BlockquoteOpen,
    BlockquoteClose,
    TableOpen,
    TableClose,
    TheadOpen,
    TheadClose,
    TbodyOpen,
    TbodyClose,
    TrOpen,
    TrClose,
    ThOpen,
    ThClose,
    TdOpen,
    TdClose,
    Inline,
    Hr,
    Text,
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
    SOpen,
    SClose,
    LinkOpen,
    LinkClose,
    Softbreak,
    Hardbreak,
    CodeInline,
    Image,
    /// Any token type this crate does not know about.
    Unknown(String),
}

const NAMES: &[(&str, TokenKind)] = &[
    ("heading_open", TokenKind::HeadingOpen),
    ("heading_close", TokenKind::HeadingClose),
    ("paragraph_open", TokenKind::ParagraphOpen),
    ("paragraph_close", TokenKind::ParagraphClose),
    ("fence", TokenKind::Fence),
    ("code_block", TokenKind::CodeBlock),
    ("bullet_list_open", TokenKind::BulletListOpen),
    ("bullet_list_close", TokenKind::BulletListClose),
    ("ordered_list_open", TokenKind::OrderedListOpen),
    ("ordered_list_close", TokenKind::OrderedListClose),
    ("list_item_open", TokenKind::ListItemOpen),
    ("list_item_close", TokenKind::ListItemClose),
    ("blockquote_open", TokenKind::BlockquoteOpen),
    ("blockquote_close", TokenKind::BlockquoteClose),
    ("table_open", TokenKind::TableOpen),
    ("table_close", TokenKind::TableClose),
    ("thead_open", TokenKind::TheadOpen),
    ("thead_close", TokenKind::TheadClose),
    ("tbody_open", TokenKind::TbodyOpen),
    ("tbody_close", TokenKind::TbodyClose),
    ("tr_open", TokenKind::TrOpen),
    ("tr_close", TokenKind::TrClose),
    ("th_open", TokenKind::ThOpen),
    ("th_close", TokenKind::ThClose),
    ("td_open", TokenKind::TdOpen),
    ("td_close", TokenKind::TdClose),
    ("inline", TokenKind::Inline),
    ("hr", TokenKind::Hr),
    ("text", TokenKind::Text),
    ("strong_open", TokenKind::StrongOpen),
    ("strong_close", TokenKind::StrongClose),
    ("em_open", TokenKind::EmOpen),
    ("em_close", TokenKind::EmClose),
    ("s_open", TokenKind::SOpen),
    ("s_close", TokenKind::SClose),
    ("link_open", TokenKind::LinkOpen),
    ("link_close", TokenKind::LinkClose),
    ("softbreak", TokenKind::Softbreak),
    ("hardbreak", TokenKind::Hardbreak),
    ("code_inline", TokenKind::CodeInline),
    ("image", TokenKind::Image),
];

impl TokenKind {
    pub fn from_name(name: &str) -> Self {
        NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| TokenKind::Unknown(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenKind::Unknown(name) => name,
            known => NAMES
                .iter()
                .find(|(_, kind)| kind == known)
                .map(|(name, _)| *name)
                .unwrap_or("unknown"),
        }
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Heading level, for `heading_open`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    /// Fence info string (language tag).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Token {
            kind,
            level: None,
            content: String::new(),
            children: Vec::new(),
            attrs: BTreeMap::new(),
            info: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Shorthand for a `text` token.
    pub fn text(content: impl Into<String>) -> Self {
        Token::new(TokenKind::Text).with_content(content)
    }

    /// Shorthand for an `inline` token holding `children`.
    pub fn inline(children: Vec<Token>) -> Self {
        Token::new(TokenKind::Inline).with_children(children)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
