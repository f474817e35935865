//! Static symbol tables for the math normalizer.
//!
//! Commands are keyed by name without the leading backslash. Lookup is by
//! whole command token, so `\le` can never match inside `\left`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const GREEK_LETTERS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("vartheta", "ϑ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("varpi", "ϖ"),
    ("rho", "ρ"),
    ("varrho", "ϱ"),
    ("sigma", "σ"),
    ("varsigma", "ς"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("varphi", "ϕ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Alpha", "Α"),
    ("Beta", "Β"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Epsilon", "Ε"),
    ("Zeta", "Ζ"),
    ("Eta", "Η"),
    ("Theta", "Θ"),
    ("Iota", "Ι"),
    ("Kappa", "Κ"),
    ("Lambda", "Λ"),
    ("Mu", "Μ"),
    ("Nu", "Ν"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Rho", "Ρ"),
    ("Sigma", "Σ"),
    ("Tau", "Τ"),
    ("Upsilon", "Υ"),
    ("Phi", "Φ"),
    ("Chi", "Χ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
];

pub const MATH_SYMBOLS: &[(&str, &str)] = &[
    // operators
    ("times", "×"),
    ("div", "÷"),
    ("pm", "±"),
    ("mp", "∓"),
    ("cdot", "·"),
    ("ast", "∗"),
    ("star", "⋆"),
    // relations
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("sim", "∼"),
    ("simeq", "≃"),
    ("cong", "≅"),
    ("propto", "∝"),
    // calculus
    ("infty", "∞"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("iint", "∬"),
    ("iiint", "∭"),
    ("oint", "∮"),
    // logic and sets
    ("forall", "∀"),
    ("exists", "∃"),
    ("nexists", "∄"),
    ("in", "∈"),
    ("notin", "∉"),
    ("ni", "∋"),
    ("subset", "⊂"),
    ("supset", "⊃"),
    ("subseteq", "⊆"),
    ("supseteq", "⊇"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("emptyset", "∅"),
    ("varnothing", "∅"),
    ("land", "∧"),
    ("lor", "∨"),
    ("lnot", "¬"),
    ("neg", "¬"),
    // arrows
    ("Rightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("Leftrightarrow", "⇔"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("leftrightarrow", "↔"),
    ("uparrow", "↑"),
    ("downarrow", "↓"),
    ("mapsto", "↦"),
    ("to", "→"),
    // dots and shapes
    ("ldots", "…"),
    ("cdots", "⋯"),
    ("vdots", "⋮"),
    ("ddots", "⋱"),
    ("angle", "∠"),
    ("triangle", "△"),
    ("square", "□"),
    ("circ", "∘"),
    ("bullet", "•"),
    ("diamond", "◇"),
    ("sqrt", "√"),
    ("cbrt", "∛"),
    ("prime", "′"),
    ("degree", "°"),
    // escaped punctuation
    ("%", "%"),
    ("$", "$"),
    ("&", "&"),
    ("#", "#"),
    ("{", "{"),
    ("}", "}"),
    ("_", "_"),
    // spacing
    ("quad", " "),
    ("qquad", "  "),
    (",", " "),
    (";", " "),
    (":", " "),
    ("!", ""),
    (" ", " "),
    // sizing and wrappers with no visible output
    ("text", ""),
    ("mathrm", ""),
    ("mathbf", ""),
    ("mathit", ""),
    ("left", ""),
    ("right", ""),
    ("Big", ""),
    ("big", ""),
    ("Bigg", ""),
    ("bigg", ""),
    ("displaystyle", ""),
];

/// Commands whose brace argument is kept verbatim.
pub const TEXT_WRAPPERS: &[&str] = &[
    "text",
    "mathrm",
    "mathbf",
    "mathit",
    "textbf",
    "textit",
    "operatorname",
];

/// Commands that build a fraction from two brace arguments.
pub const FRACTION_COMMANDS: &[&str] = &["frac", "dfrac", "tfrac"];

static COMMANDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    GREEK_LETTERS
        .iter()
        .chain(MATH_SYMBOLS.iter())
        .map(|&(name, symbol)| (name, symbol))
        .collect()
});

/// Unicode replacement for a command name, if the command is known.
pub fn command_symbol(name: &str) -> Option<&'static str> {
    COMMANDS.get(name).copied()
}

pub fn superscript(c: char) -> Option<char> {
    match c {
        '0' => Some('⁰'),
        '1' => Some('¹'),
        '2' => Some('²'),
        '3' => Some('³'),
        '4' => Some('⁴'),
        '5' => Some('⁵'),
        '6' => Some('⁶'),
        '7' => Some('⁷'),
        '8' => Some('⁸'),
        '9' => Some('⁹'),
        '+' => Some('⁺'),
        '-' => Some('⁻'),
        '=' => Some('⁼'),
        '(' => Some('⁽'),
        ')' => Some('⁾'),
        'n' => Some('ⁿ'),
        'i' => Some('ⁱ'),
        'x' => Some('ˣ'),
        _ => None,
    }
}

pub fn subscript(c: char) -> Option<char> {
    match c {
        '0' => Some('₀'),
        '1' => Some('₁'),
        '2' => Some('₂'),
        '3' => Some('₃'),
        '4' => Some('₄'),
        '5' => Some('₅'),
        '6' => Some('₆'),
        '7' => Some('₇'),
        '8' => Some('₈'),
        '9' => Some('₉'),
        '+' => Some('₊'),
        '-' => Some('₋'),
        '=' => Some('₌'),
        '(' => Some('₍'),
        ')' => Some('₎'),
        'a' => Some('ₐ'),
        'e' => Some('ₑ'),
        'i' => Some('ᵢ'),
        'j' => Some('ⱼ'),
        'k' => Some('ₖ'),
        'n' => Some('ₙ'),
        'o' => Some('ₒ'),
        'p' => Some('ₚ'),
        'r' => Some('ᵣ'),
        's' => Some('ₛ'),
        't' => Some('ₜ'),
        'u' => Some('ᵤ'),
        'x' => Some('ₓ'),
        _ => None,
    }
}

/// Map every character through `table`, passing unmapped characters through.
pub fn map_chars(text: &str, table: fn(char) -> Option<char>) -> String {
    text.chars().map(|c| table(c).unwrap_or(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_command_lookup() {
        assert_eq!(command_symbol("le"), Some("≤"));
        assert_eq!(command_symbol("left"), Some(""));
        assert_eq!(command_symbol("leftarrow"), Some("←"));
        assert_eq!(command_symbol("alpha"), Some("α"));
        assert_eq!(command_symbol("Omega"), Some("Ω"));
        assert_eq!(command_symbol("unknowncommand"), None);
    }

    #[test]
    fn script_maps_pass_unknown_chars_through() {
        assert_eq!(map_chars("2n+1", superscript), "²ⁿ⁺¹");
        assert_eq!(map_chars("ij", subscript), "ᵢⱼ");
        assert_eq!(map_chars("zq", superscript), "zq");
    }
}
