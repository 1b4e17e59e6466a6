//! Selector suffixes the engine builds on its own.
//!
//! Selectors are opaque backend syntax. Nothing here parses a caller's
//! selector beyond detecting a trailing `index:<n>`; the helpers only append.

/// `<selector> index:<n>`: the n-th match of `selector`.
pub fn indexed(selector: &str, index: usize) -> String {
    format!("{} index:{}", selector, index)
}

/// `<selector> parent *`: ancestor chain of the match, nearest first.
pub fn parents(selector: &str) -> String {
    format!("{} parent *", selector)
}

/// `<selector> child *`: direct children of the match.
pub fn children(selector: &str) -> String {
    format!("{} child *", selector)
}

/// `<selector> descendant *`: every element below the match.
pub fn descendants(selector: &str) -> String {
    format!("{} descendant *", selector)
}

/// True when the selector already pins one element with a trailing `index:<n>`.
pub fn is_indexed(selector: &str) -> bool {
    let selector = selector.trim();
    match selector.rfind("index:") {
        Some(pos) if pos > 0 => {
            let digits = &selector[pos + "index:".len()..];
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}
