//! Document → `word/document.xml`.
//!
//! Visual constants live here, the same way the HTML serializer keeps them in
//! its CSS: fonts, half-point sizes, hex colors and twip spacings. Fractions
//! are written as Office Math (`m:oMath` / `m:f`) so Word shows them stacked
//! and keeps them editable.

use crate::common::sanitize::is_forbidden_control;
use crate::formats::page::{cm_to_twips, PageSize};
use crate::ir::nodes::{
    Block, CodeBlock, ColorClass, Document, ListItem, RowRole, Run, Table, TextRun, TextStyle,
};
use std::fmt::Write as _;

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_M: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) const FONT_BODY: (&str, &str) = ("Calibri", "微软雅黑");
pub(crate) const FONT_HEADING: (&str, &str) = ("Calibri", "黑体");
const FONT_CODE: (&str, &str) = ("Consolas", "等线");

/// Sizes in half-points.
pub(crate) const SIZE_BODY: u32 = 22;
const SIZE_CODE: u32 = 20;
const SIZE_CODE_BLOCK: u32 = 19;
const SIZE_SMALL: u32 = 18;
pub(crate) const SIZE_HEADINGS: [u32; 6] = [44, 36, 30, 26, 22, 21];

pub(crate) const COLOR_BODY: &str = "333333";
pub(crate) const COLOR_HEADING: &str = "1A1A2E";
const COLOR_QUOTE: &str = "555555";
const COLOR_QUOTE_BORDER: &str = "DDDDDD";
const COLOR_INLINE_CODE: &str = "D43F3F";
const COLOR_INLINE_CODE_BG: &str = "F0F0F0";
const COLOR_CODE_BLOCK: &str = "2B2B2B";
const COLOR_CODE_BLOCK_BG: &str = "F8F8F8";
const COLOR_LINK: &str = "066EE0";
const COLOR_MUTED: &str = "999999";
const COLOR_TABLE_HEADER_BG: &str = "4472C4";
const COLOR_TABLE_HEADER_TEXT: &str = "FFFFFF";
const COLOR_TABLE_ZEBRA: &str = "F2F2F2";
const COLOR_TABLE_BORDER: &str = "BFBFBF";
const COLOR_RULE: &str = "CCCCCC";

/// Spacing in twips (20 per point).
const SPACE_6PT: u32 = 120;
const SPACE_12PT: u32 = 240;
const SPACE_2PT: u32 = 40;

const LIST_INDENT_CM: f64 = 1.27;
const LIST_HANGING_CM: f64 = 0.63;
const CODE_INDENT_CM: f64 = 0.5;

/// Font size and face for the runs of one block.
#[derive(Debug, Clone, Copy)]
struct RunFrame {
    size: u32,
    font: (&'static str, &'static str),
    /// Headings are bold whatever the inline flags say.
    bold: bool,
}

impl RunFrame {
    fn body() -> Self {
        RunFrame {
            size: SIZE_BODY,
            font: FONT_BODY,
            bold: false,
        }
    }

    fn heading(level: u8) -> Self {
        let index = usize::from(level.clamp(1, 6)) - 1;
        RunFrame {
            size: SIZE_HEADINGS[index],
            font: FONT_HEADING,
            bold: true,
        }
    }
}

/// Render the complete `word/document.xml` part.
pub fn document_xml(doc: &Document, size: PageSize) -> String {
    let mut writer = BodyWriter {
        out: String::new(),
        size,
    };
    for block in &doc.blocks {
        writer.block(block);
    }
    writer.finish()
}

#[derive(Debug)]
struct BodyWriter {
    out: String,
    size: PageSize,
}

impl BodyWriter {
    fn finish(mut self) -> String {
        let (width, height) = self.size.twips();
        let (vertical, horizontal) = self.size.margin_twips();
        let _ = write!(
            self.out,
            "<w:sectPr><w:pgSz w:w=\"{width}\" w:h=\"{height}\"/>\
             <w:pgMar w:top=\"{vertical}\" w:right=\"{horizontal}\" w:bottom=\"{vertical}\" \
             w:left=\"{horizontal}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>"
        );
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"{NS_W}\" xmlns:m=\"{NS_M}\" xmlns:r=\"{NS_R}\">\
             <w:body>{}</w:body></w:document>",
            self.out
        )
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let level = heading.level.clamp(1, 6);
                let props = format!(
                    "<w:pStyle w:val=\"Heading{level}\"/>{}",
                    spacing(SPACE_12PT, SPACE_6PT)
                );
                self.paragraph(&props, &heading.runs, RunFrame::heading(level));
            }
            Block::Paragraph { runs } => self.paragraph("", runs, RunFrame::body()),
            Block::ListItem(item) => self.list_item(item),
            Block::Quote { runs } => {
                let props = format!(
                    "<w:pBdr><w:left w:val=\"single\" w:sz=\"12\" w:space=\"8\" w:color=\"{COLOR_QUOTE_BORDER}\"/></w:pBdr>\
                     {}<w:ind w:left=\"{}\"/>",
                    spacing(SPACE_6PT, SPACE_6PT),
                    cm_to_twips(LIST_INDENT_CM)
                );
                self.paragraph(&props, runs, RunFrame::body());
            }
            Block::CodeBlock(code) => self.code_block(code),
            Block::Table(table) => self.table(table),
            Block::Rule => {
                let _ = write!(
                    self.out,
                    "<w:p><w:pPr><w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" w:space=\"1\" w:color=\"{COLOR_RULE}\"/></w:pBdr>{}</w:pPr></w:p>",
                    spacing(SPACE_12PT, SPACE_12PT)
                );
            }
        }
    }

    fn paragraph(&mut self, props: &str, runs: &[Run], frame: RunFrame) {
        self.out.push_str("<w:p>");
        if !props.is_empty() {
            let _ = write!(self.out, "<w:pPr>{props}</w:pPr>");
        }
        self.runs(runs, frame);
        self.out.push_str("</w:p>");
    }

    fn list_item(&mut self, item: &ListItem) {
        let props = format!(
            "{}<w:ind w:left=\"{}\" w:hanging=\"{}\"/>",
            spacing(0, SPACE_2PT),
            cm_to_twips(LIST_INDENT_CM * item.depth as f64),
            cm_to_twips(LIST_HANGING_CM)
        );
        let _ = write!(self.out, "<w:p><w:pPr>{props}</w:pPr>");
        let marker = TextRun {
            content: item.marker.label(),
            style: TextStyle::default(),
            color: ColorClass::Body,
        };
        self.text_run(&marker, RunFrame::body());
        self.runs(&item.runs, RunFrame::body());
        self.out.push_str("</w:p>");
    }

    fn code_block(&mut self, code: &CodeBlock) {
        let shading = shd(COLOR_CODE_BLOCK_BG);
        if let Some(language) = &code.language {
            let _ = write!(
                self.out,
                "<w:p><w:pPr>{shading}{}</w:pPr>",
                spacing(SPACE_6PT, 0)
            );
            self.raw_run(
                &format!("  {language}"),
                &run_props(FONT_CODE, SIZE_SMALL, COLOR_MUTED, &[], ""),
            );
            self.out.push_str("</w:p>");
        }

        let last = code.lines.len().saturating_sub(1);
        for (index, line) in code.lines.iter().enumerate() {
            let after = if index == last { SPACE_6PT } else { 0 };
            let _ = write!(
                self.out,
                "<w:p><w:pPr>{shading}<w:spacing w:before=\"0\" w:after=\"{after}\" w:line=\"240\" w:lineRule=\"auto\"/><w:ind w:left=\"{}\"/></w:pPr>",
                cm_to_twips(CODE_INDENT_CM)
            );
            // An empty run would collapse the line.
            let text = if line.is_empty() { " " } else { line };
            self.raw_run(
                text,
                &run_props(FONT_CODE, SIZE_CODE_BLOCK, COLOR_CODE_BLOCK, &[], ""),
            );
            self.out.push_str("</w:p>");
        }
    }

    fn table(&mut self, table: &Table) {
        let (page_width, _) = self.size.twips();
        let (_, margin) = self.size.margin_twips();
        let column_width = (page_width - 2 * margin) / table.column_count.max(1) as u32;

        let _ = write!(
            self.out,
            "<w:tbl><w:tblPr><w:jc w:val=\"center\"/><w:tblBorders>{}</w:tblBorders>\
             <w:tblCellMar><w:top w:w=\"60\" w:type=\"dxa\"/><w:left w:w=\"100\" w:type=\"dxa\"/>\
             <w:bottom w:w=\"60\" w:type=\"dxa\"/><w:right w:w=\"100\" w:type=\"dxa\"/></w:tblCellMar>\
             </w:tblPr><w:tblGrid>",
            ["top", "left", "bottom", "right", "insideH", "insideV"]
                .iter()
                .map(|side| format!(
                    "<w:{side} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"{COLOR_TABLE_BORDER}\"/>"
                ))
                .collect::<String>()
        );
        for _ in 0..table.column_count {
            let _ = write!(self.out, "<w:gridCol w:w=\"{column_width}\"/>");
        }
        self.out.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.out.push_str("<w:tr>");
            let missing = table.column_count.saturating_sub(row.cells.len());
            if missing > 0 {
                let _ = write!(self.out, "<w:trPr><w:gridAfter w:val=\"{missing}\"/></w:trPr>");
            }
            let fill = match row.role {
                RowRole::Header => Some(COLOR_TABLE_HEADER_BG),
                RowRole::Zebra => Some(COLOR_TABLE_ZEBRA),
                RowRole::Body => None,
            };
            for cell in &row.cells {
                let _ = write!(
                    self.out,
                    "<w:tc><w:tcPr><w:tcW w:w=\"{column_width}\" w:type=\"dxa\"/>{}</w:tcPr><w:p>",
                    fill.map(shd).unwrap_or_default()
                );
                self.runs(cell, RunFrame::body());
                self.out.push_str("</w:p></w:tc>");
            }
            self.out.push_str("</w:tr>");
        }
        self.out.push_str("</w:tbl>");
        // Word needs a paragraph between a table and whatever follows.
        self.out.push_str("<w:p/>");
    }

    fn runs(&mut self, runs: &[Run], frame: RunFrame) {
        for run in runs {
            match run {
                Run::Text(text) => self.text_run(text, frame),
                Run::Fraction {
                    numerator,
                    denominator,
                } => self.fraction(numerator, denominator),
                Run::Link {
                    content,
                    url,
                    style,
                } => {
                    let link = TextRun {
                        content: content.clone(),
                        style: *style,
                        color: ColorClass::Link,
                    };
                    self.text_run(&link, frame);
                    self.raw_run(
                        &format!(" ({url})"),
                        &run_props(frame.font, SIZE_SMALL, COLOR_MUTED, &[], ""),
                    );
                }
                Run::Image { label } => self.raw_run(
                    &format!("[Image: {label}]"),
                    &run_props(frame.font, frame.size, COLOR_MUTED, &["<w:i/>"], ""),
                ),
                Run::LineBreak => self.out.push_str("<w:r><w:br/></w:r>"),
            }
        }
    }

    fn text_run(&mut self, run: &TextRun, frame: RunFrame) {
        let mut flags = Vec::new();
        if run.style.bold || frame.bold {
            flags.push("<w:b/>");
        }
        if run.style.italic {
            flags.push("<w:i/>");
        }
        if run.style.strike {
            flags.push("<w:strike/>");
        }
        let underline = if run.color == ColorClass::Link {
            "<w:u w:val=\"single\"/>"
        } else {
            ""
        };

        let props = if run.style.code {
            let trailing = format!("{underline}{}", shd(COLOR_INLINE_CODE_BG));
            run_props(FONT_CODE, SIZE_CODE, COLOR_INLINE_CODE, &flags, &trailing)
        } else {
            run_props(frame.font, frame.size, color_hex(run.color, frame), &flags, underline)
        };
        self.raw_run(&run.content, &props);
    }

    /// One `w:r` per line of `text`; tabs and line breaks become their
    /// WordprocessingML elements.
    fn raw_run(&mut self, text: &str, props: &str) {
        let _ = write!(self.out, "<w:r>{props}");
        let mut pending = String::new();
        for c in text.chars() {
            match c {
                '\n' | '\t' => {
                    self.flush_text(&mut pending);
                    self.out
                        .push_str(if c == '\n' { "<w:br/>" } else { "<w:tab/>" });
                }
                '\r' => {}
                _ => pending.push(c),
            }
        }
        self.flush_text(&mut pending);
        self.out.push_str("</w:r>");
    }

    fn flush_text(&mut self, pending: &mut String) {
        if !pending.is_empty() {
            let _ = write!(
                self.out,
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape_xml(pending)
            );
            pending.clear();
        }
    }

    fn fraction(&mut self, numerator: &str, denominator: &str) {
        let _ = write!(
            self.out,
            "<m:oMath><m:f><m:fPr><m:type m:val=\"bar\"/></m:fPr>\
             <m:num><m:r><m:t>{}</m:t></m:r></m:num>\
             <m:den><m:r><m:t>{}</m:t></m:r></m:den></m:f></m:oMath>",
            escape_xml(numerator),
            escape_xml(denominator)
        );
    }
}

fn color_hex(color: ColorClass, frame: RunFrame) -> &'static str {
    match color {
        ColorClass::Body if frame.bold => COLOR_HEADING,
        ColorClass::Body => COLOR_BODY,
        ColorClass::Heading => COLOR_HEADING,
        ColorClass::Quote => COLOR_QUOTE,
        ColorClass::InlineCode => COLOR_INLINE_CODE,
        ColorClass::Link => COLOR_LINK,
        ColorClass::Muted => COLOR_MUTED,
        ColorClass::TableHeader => COLOR_TABLE_HEADER_TEXT,
    }
}

/// `w:rPr` in schema order: fonts, `flags` (b, i, strike), color, size,
/// then `trailing` (underline, shading).
fn run_props(
    font: (&str, &str),
    size: u32,
    color: &str,
    flags: &[&str],
    trailing: &str,
) -> String {
    let (latin, east_asian) = font;
    format!(
        "<w:rPr><w:rFonts w:ascii=\"{latin}\" w:hAnsi=\"{latin}\" w:eastAsia=\"{east_asian}\"/>{}\
         <w:color w:val=\"{color}\"/><w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>{trailing}</w:rPr>",
        flags.concat()
    )
}

fn spacing(before: u32, after: u32) -> String {
    format!("<w:spacing w:before=\"{before}\" w:after=\"{after}\"/>")
}

fn shd(fill: &str) -> String {
    format!("<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{fill}\"/>")
}

/// Escape XML special characters, dropping characters XML 1.0 cannot hold.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_forbidden_control(c) => {}
            c => escaped.push(c),
        }
    }
    escaped
}
