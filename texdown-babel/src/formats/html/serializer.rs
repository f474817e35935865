//! HTML serialization (Document → HTML export)
//!
//! Converts styled documents to semantic HTML5 with embedded CSS.
//! Pipeline: Document → RcDom → HTML string → complete page

use crate::error::FormatError;
use crate::formats::html::HtmlTheme;
use crate::ir::nodes::{
    Block, CodeBlock, ColorClass, Document, ListItem, RowRole, Run, Table, TextRun, TextStyle,
};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    Namespace, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Indentation per list level, in centimetres.
const LIST_INDENT_CM: f32 = 1.27;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// CSS theme to use
    pub theme: HtmlTheme,
    /// Optional custom CSS to append after the baseline and theme CSS
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            custom_css: None,
        }
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a document to HTML with the given theme
pub fn serialize_to_html(doc: &Document, theme: HtmlTheme) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, HtmlOptions::new(theme))
}

/// Serialize a document to HTML with full options
pub fn serialize_to_html_with_options(
    doc: &Document,
    options: HtmlOptions,
) -> Result<String, FormatError> {
    let title = doc.title();

    // Step 1: Document → RcDom (HTML DOM tree)
    let dom = build_html_dom(doc);

    // Step 2: RcDom → HTML string
    let html_string = serialize_dom(&dom)?;

    // Step 3: Wrap in complete HTML document with CSS
    Ok(wrap_in_document(&html_string, &title, &options))
}

/// Build an HTML DOM tree from the document blocks
fn build_html_dom(doc: &Document) -> RcDom {
    let dom = RcDom::default();
    let doc_container = create_element("div", vec![("class", "td-document")]);

    for block in &doc.blocks {
        let node = block_to_node(block);
        append(&doc_container, node);
    }

    dom.document.children.borrow_mut().push(doc_container);
    dom
}

fn block_to_node(block: &Block) -> Handle {
    match block {
        Block::Heading(heading) => {
            let tag = format!("h{}", heading.level.clamp(1, 6));
            let class = format!("td-heading td-heading-{}", heading.level);
            let node = create_element(&tag, vec![("class", &class)]);
            append_runs(&node, &heading.runs);
            node
        }

        Block::Paragraph { runs } => {
            let node = create_element("p", vec![("class", "td-paragraph")]);
            append_runs(&node, runs);
            node
        }

        Block::ListItem(item) => list_item_to_node(item),

        Block::Quote { runs } => {
            let quote = create_element("blockquote", vec![("class", "td-quote")]);
            let para = create_element("p", vec![]);
            append_runs(&para, runs);
            append(&quote, para);
            quote
        }

        Block::CodeBlock(code) => code_block_to_node(code),

        Block::Table(table) => table_to_node(table),

        Block::Rule => create_element("hr", vec![("class", "td-rule")]),
    }
}

fn list_item_to_node(item: &ListItem) -> Handle {
    let class = format!("td-list-item td-list-depth-{}", item.depth);
    let style = format!(
        "padding-left: {:.2}cm",
        LIST_INDENT_CM * item.depth as f32
    );
    let node = create_element("p", vec![("class", &class), ("style", &style)]);

    let marker = create_element("span", vec![("class", "td-list-marker")]);
    append(&marker, create_text(&item.marker.label()));
    append(&node, marker);

    append_runs(&node, &item.runs);
    node
}

fn code_block_to_node(code: &CodeBlock) -> Handle {
    let wrapper = create_element("div", vec![("class", "td-code")]);

    let mut attrs = vec![("class", "td-code-block")];
    if let Some(language) = &code.language {
        let label = create_element("div", vec![("class", "td-code-label")]);
        append(&label, create_text(language));
        append(&wrapper, label);
        attrs.push(("data-language", language.as_str()));
    }

    let pre = create_element("pre", attrs);
    let code_node = create_element("code", vec![]);
    append(&code_node, create_text(&code.lines.join("\n")));
    append(&pre, code_node);
    append(&wrapper, pre);
    wrapper
}

fn table_to_node(table: &Table) -> Handle {
    let node = create_element("table", vec![("class", "td-table")]);

    for row in &table.rows {
        let (class, cell_tag) = match row.role {
            RowRole::Header => ("td-row-header", "th"),
            RowRole::Body => ("td-row", "td"),
            RowRole::Zebra => ("td-row td-row-zebra", "td"),
        };
        let tr = create_element("tr", vec![("class", class)]);
        // Short rows stay short.
        for cell in row.cells.iter().take(table.column_count) {
            let cell_node = create_element(cell_tag, vec![]);
            append_runs(&cell_node, cell);
            append(&tr, cell_node);
        }
        append(&node, tr);
    }

    node
}

fn append_runs(parent: &Handle, runs: &[Run]) {
    for run in runs {
        append_run(parent, run);
    }
}

/// Add one run to an HTML node
fn append_run(parent: &Handle, run: &Run) {
    match run {
        Run::Text(text) => append(parent, text_run_to_node(text)),

        Run::Fraction {
            numerator,
            denominator,
        } => append(parent, fraction_to_node(numerator, denominator)),

        Run::Link {
            content,
            url,
            style,
        } => {
            let link = styled(create_text(content), *style);
            append(parent, color_span(ColorClass::Link, link));
            let annotation = create_text(&format!(" ({url})"));
            append(parent, color_span(ColorClass::Muted, annotation));
        }

        Run::Image { label } => {
            let span = create_element("span", vec![("class", "td-image")]);
            append(&span, create_text(&format!("[Image: {label}]")));
            append(parent, span);
        }

        Run::LineBreak => append(parent, create_element("br", vec![])),
    }
}

fn text_run_to_node(run: &TextRun) -> Handle {
    let node = if run.style.code {
        let code = create_element("code", vec![("class", "td-inline-code")]);
        append(&code, create_text(&run.content));
        code
    } else {
        create_text(&run.content)
    };
    let node = styled(
        node,
        TextStyle {
            code: false,
            ..run.style
        },
    );

    // Block-level colors come from the container; only mark the others.
    match run.color {
        ColorClass::Link | ColorClass::Muted => color_span(run.color, node),
        _ => node,
    }
}

/// Wrap `node` in a span carrying the `td-<color>` class.
fn color_span(color: ColorClass, node: Handle) -> Handle {
    let class = format!("td-{}", color.as_str());
    let span = create_element("span", vec![("class", &class)]);
    append(&span, node);
    span
}

/// Wrap `node` in strong/em/s elements for the active style flags.
fn styled(node: Handle, style: TextStyle) -> Handle {
    let mut node = node;
    for (active, tag) in [
        (style.strike, "s"),
        (style.italic, "em"),
        (style.bold, "strong"),
    ] {
        if active {
            let wrapper = create_element(tag, vec![]);
            append(&wrapper, node);
            node = wrapper;
        }
    }
    node
}

/// A fraction as a MathML `mfrac`.
fn fraction_to_node(numerator: &str, denominator: &str) -> Handle {
    let math = create_math_element("math", vec![("class", "td-fraction")]);
    let frac = create_math_element("mfrac", vec![]);
    for part in [numerator, denominator] {
        let row = create_math_element("mrow", vec![]);
        let text = create_math_element("mtext", vec![]);
        append(&text, create_text(part));
        append(&row, text);
        append(&frac, row);
    }
    append(&math, frac);
    math
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    create_element_ns(ns!(html), tag, attrs)
}

/// Create a MathML element with attributes
fn create_math_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    create_element_ns(ns!(mathml), tag, attrs)
}

fn create_element_ns(namespace: Namespace, tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, namespace, LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the inner content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let doc_container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    // Serialize each element together with its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in doc_container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        output.push(b'\n');
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// The baseline stylesheet embedded in every export.
pub fn baseline_css() -> &'static str {
    include_str!("../../../css/baseline.css")
}

fn theme_css(theme: HtmlTheme) -> &'static str {
    match theme {
        HtmlTheme::Standard => include_str!("../../../css/themes/theme-standard.css"),
        HtmlTheme::Serif => include_str!("../../../css/themes/theme-serif.css"),
    }
}

/// Wrap the content in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let baseline_css = baseline_css();
    let theme_css = theme_css(options.theme);

    // Custom CSS is appended after baseline and theme
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="texdown">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{theme_css}
{custom_css}
  </style>
</head>
<body>
<div class="td-document">
{body_html}</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
