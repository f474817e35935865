//! Core data structures of the styled document tree.
//!
//! The builder only records semantic intent (bold, heading level, color
//! class, header/zebra rows). Fonts, sizes and colors belong to the
//! serializers.

use serde::Serialize;

/// The root of a built document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Plain text of the first heading, or a generic title.
    pub fn title(&self) -> String {
        self.blocks
            .iter()
            .find_map(|block| match block {
                Block::Heading(heading) => Some(
                    heading
                        .runs
                        .iter()
                        .map(Run::plain_text)
                        .collect::<String>()
                        .trim()
                        .to_string(),
                ),
                _ => None,
            })
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| "Texdown Document".to_string())
    }
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    Paragraph {
        runs: Vec<Run>,
    },
    ListItem(ListItem),
    Quote {
        runs: Vec<Run>,
    },
    CodeBlock(CodeBlock),
    Table(Table),
    Rule,
}

/// A heading with a level from 1 to 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub runs: Vec<Run>,
}

/// One paragraph inside a list item, with its marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Nesting depth, starting at 1.
    pub depth: usize,
    pub marker: ListMarker,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMarker {
    Bullet(char),
    Ordinal(usize),
}

impl ListMarker {
    /// The marker as printed before the item text.
    pub fn label(&self) -> String {
        match self {
            ListMarker::Bullet(symbol) => format!("{symbol} "),
            ListMarker::Ordinal(n) => format!("{n}. "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub column_count: usize,
    pub header_row_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub role: RowRole,
    /// Cells in column order; a row may be shorter than the table.
    pub cells: Vec<Vec<Run>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRole {
    Header,
    Body,
    /// A data row carrying the alternate fill.
    Zebra,
}

/// An inline element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Run {
    Text(TextRun),
    Fraction {
        numerator: String,
        denominator: String,
    },
    /// Styled text followed by a plain ` (url)` annotation.
    Link {
        content: String,
        url: String,
        style: TextStyle,
    },
    /// Stands in for an image; carries the alt text or the source.
    Image {
        label: String,
    },
    LineBreak,
}

impl Run {
    /// Plain body text with no styling.
    pub fn text(content: impl Into<String>) -> Self {
        Run::Text(TextRun {
            content: content.into(),
            style: TextStyle::default(),
            color: ColorClass::Body,
        })
    }

    /// All textual content of the run, as a reader would see it.
    pub fn plain_text(&self) -> String {
        match self {
            Run::Text(run) => run.content.clone(),
            Run::Fraction {
                numerator,
                denominator,
            } => format!("{numerator}/{denominator}"),
            Run::Link { content, url, .. } => format!("{content} ({url})"),
            Run::Image { label } => label.clone(),
            Run::LineBreak => "\n".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub content: String,
    pub style: TextStyle,
    pub color: ColorClass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    /// Monospace with a highlight background.
    pub code: bool,
}

/// Semantic text color; serializers pick the actual color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    #[default]
    Body,
    Heading,
    Quote,
    InlineCode,
    Link,
    Muted,
    TableHeader,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Body => "body",
            ColorClass::Heading => "heading",
            ColorClass::Quote => "quote",
            ColorClass::InlineCode => "inline-code",
            ColorClass::Link => "link",
            ColorClass::Muted => "muted",
            ColorClass::TableHeader => "table-header",
        }
    }
}

impl Block {
    /// Runs of a block that holds a single run sequence.
    pub fn runs(&self) -> Option<&[Run]> {
        match self {
            Block::Heading(heading) => Some(&heading.runs),
            Block::Paragraph { runs } | Block::Quote { runs } => Some(runs),
            Block::ListItem(item) => Some(&item.runs),
            Block::CodeBlock(_) | Block::Table(_) | Block::Rule => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_labels() {
        assert_eq!(ListMarker::Bullet('•').label(), "• ");
        assert_eq!(ListMarker::Ordinal(3).label(), "3. ");
    }

    #[test]
    fn blocks_serialize_with_a_type_tag() {
        let block = Block::Paragraph {
            runs: vec![Run::text("hi"), Run::LineBreak],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["runs"][0]["type"], "text");
        assert_eq!(json["runs"][0]["color"], "body");
        assert_eq!(json["runs"][1]["type"], "line_break");
    }

    #[test]
    fn title_comes_from_first_heading() {
        let doc = Document {
            blocks: vec![
                Block::Paragraph {
                    runs: vec![Run::text("intro")],
                },
                Block::Heading(Heading {
                    level: 2,
                    runs: vec![Run::text(" Results ")],
                }),
            ],
        };
        assert_eq!(doc.title(), "Results");
        assert_eq!(Document::default().title(), "Texdown Document");
    }

    #[test]
    fn plain_text_of_runs() {
        let link = Run::Link {
            content: "docs".to_string(),
            url: "https://example.com".to_string(),
            style: TextStyle::default(),
        };
        assert_eq!(link.plain_text(), "docs (https://example.com)");
        let fraction = Run::Fraction {
            numerator: "1".to_string(),
            denominator: "2".to_string(),
        };
        assert_eq!(fraction.plain_text(), "1/2");
    }
}
