//! Shared helpers: fixture loading and a compact text outline of a document.

use texdown_babel::ir::nodes::{Block, Document, Run};

/// Read a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

fn runs_text(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| match run {
            Run::Text(text) => text.content.clone(),
            Run::Fraction {
                numerator,
                denominator,
            } => format!("[{numerator}/{denominator}]"),
            Run::Link { content, url, .. } => format!("{content} ({url})"),
            Run::Image { label } => format!("[Image: {label}]"),
            Run::LineBreak => "⏎".to_string(),
        })
        .collect()
}

/// One line per block, e.g. `h1 Title`, `  ◦ nested`, `table 3x2`.
pub fn outline(doc: &Document) -> String {
    doc.blocks
        .iter()
        .map(|block| match block {
            Block::Heading(heading) => format!("h{} {}", heading.level, runs_text(&heading.runs)),
            Block::Paragraph { runs } => format!("p {}", runs_text(runs)),
            Block::ListItem(item) => format!(
                "{}{}{}",
                "  ".repeat(item.depth.saturating_sub(1)),
                item.marker.label(),
                runs_text(&item.runs)
            ),
            Block::Quote { runs } => format!("> {}", runs_text(runs)),
            Block::CodeBlock(code) => format!(
                "code[{}] {} lines",
                code.language.as_deref().unwrap_or(""),
                code.lines.len()
            ),
            Block::Table(table) => format!("table {}x{}", table.rows.len(), table.column_count),
            Block::Rule => "---".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
