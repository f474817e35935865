//! CLI-specific transforms
//!
//! This module defines the views `texdown inspect` can show. Each one stops
//! the conversion pipeline at a stage and prints what that stage produced.
//!
//! ## Transform Pipeline
//!
//! 1. **Math normalization** - Markdown → Markdown with Unicode math
//!    - `math`: the normalized source, fraction markers left visible
//!
//! 2. **Tokenization** - Markdown → Token stream
//!    - `tokens-json`: the token stream as JSON
//!    - `tokens-simple`: one token kind per line, inline children indented
//!
//! 3. **Building** - Tokens → Document
//!    - `blocks-json`: the styled block tree as JSON
//!
//! ## Extra Parameters
//!
//! - `latex`: "false" skips math normalization in every stage.
//!
//! Example: `texdown inspect notes.md tokens-json --extra-latex false`

use std::collections::HashMap;
use texdown_babel::builder::DocumentBuilder;
use texdown_babel::format::parse_bool_option;
use texdown_babel::formats::markdown::parser::tokenize;
use texdown_babel::ir::token::Token;
use texdown_babel::latex;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-json", "tokens-json", "tokens-simple", "math"];

/// Transform used when none is given.
pub const DEFAULT_TRANSFORM: &str = "blocks-json";

/// Execute a named transform on a source file with optional extra parameters
///
/// Returns the transformed output as a string, or an error message.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let use_latex = parse_bool_option(extra_params, "latex", true).map_err(|e| e.to_string())?;
    let normalized = if use_latex {
        latex::normalize(source)
    } else {
        source.to_string()
    };

    match transform_name {
        "math" => Ok(normalized),
        "tokens-json" => {
            let tokens = tokenize(&normalized);
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tokens-simple" => Ok(tokens_to_simple(&tokenize(&normalized))),
        "blocks-json" => {
            let doc = DocumentBuilder::new().build(&tokenize(&normalized));
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        _ => Err(format!(
            "Unknown transform '{transform_name}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn tokens_to_simple(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        output.push_str(token.kind.as_str());
        if let Some(level) = token.level {
            output.push_str(&format!(" (level {level})"));
        }
        output.push('\n');
        for child in &token.children {
            output.push_str("  ");
            output.push_str(child.kind.as_str());
            if !child.content.is_empty() {
                output.push_str(&format!(" {:?}", child.content));
            }
            output.push('\n');
        }
    }
    output
}
