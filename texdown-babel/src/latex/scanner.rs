//! Tokenizer and balanced-brace parser for math source.
//!
//! The scanner splits math source into commands (`\alpha`, `\,`) and single
//! characters. The parser folds balanced `{...}` pairs into [`Group`] nodes of
//! any depth; a brace without a partner stays a literal character.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Command name without the backslash.
    Command(&'a str),
    Char(char),
}

#[derive(Debug)]
pub struct LatexScanner<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> LatexScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        LatexScanner {
            source,
            position: 0,
        }
    }
}

impl<'a> Iterator for LatexScanner<'a> {
    /// Byte offset of the token start, and the token.
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.position;
        let rest = &self.source[start..];
        let next = rest.chars().next()?;

        if next != '\\' {
            self.position += next.len_utf8();
            return Some((start, Token::Char(next)));
        }

        let after = &rest[1..];
        let len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        if len > 0 {
            self.position += 1 + len;
            return Some((start, Token::Command(&after[..len])));
        }

        match after.chars().next() {
            Some(symbol) => {
                let width = symbol.len_utf8();
                self.position += 1 + width;
                Some((start, Token::Command(&after[..width])))
            }
            None => {
                self.position += 1;
                Some((start, Token::Char('\\')))
            }
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(name) => write!(f, "\\{name}"),
            Token::Char(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Char(char),
    Command(&'a str),
    Group(Group<'a>),
}

/// A balanced `{...}` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub nodes: Vec<Node<'a>>,
    /// Source text between the braces, untouched.
    pub source: &'a str,
}

impl<'a> Node<'a> {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Char(c) if c.is_whitespace())
    }
}

pub fn parse_latex(source: &str) -> Vec<Node<'_>> {
    let mut parser = Parser {
        source,
        tokens: LatexScanner::new(source).collect(),
        position: 0,
    };
    let (nodes, _) = parser.parse_sequence(false);
    nodes
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(usize, Token<'a>)>,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Parse until end of input, or until the `}` closing the current group
    /// when `nested`. Returns the nodes and whether a closing brace was found.
    fn parse_sequence(&mut self, nested: bool) -> (Vec<Node<'a>>, bool) {
        let mut nodes = Vec::new();

        while let Some(&(offset, token)) = self.tokens.get(self.position) {
            self.position += 1;
            match token {
                Token::Char('}') if nested => return (nodes, true),
                Token::Char('{') => {
                    let start = offset + 1;
                    let (inner, closed) = self.parse_sequence(true);
                    if closed {
                        let end = self.tokens[self.position - 1].0;
                        nodes.push(Node::Group(Group {
                            nodes: inner,
                            source: &self.source[start..end],
                        }));
                    } else {
                        nodes.push(Node::Char('{'));
                        nodes.extend(inner);
                    }
                }
                Token::Char(c) => nodes.push(Node::Char(c)),
                Token::Command(name) => nodes.push(Node::Command(name)),
            }
        }

        (nodes, false)
    }
}
