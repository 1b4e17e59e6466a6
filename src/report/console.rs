use std::convert::Infallible;

use crate::element::element::ElementRecord;
use crate::element::elements::ElementList;
use crate::error::InspectError;
use crate::tree::node::TreeNode;
use crate::tree::walker::walk_forest;

// ============================================================================
// Console reporter: indented hierarchy output
// ============================================================================

/// One line per element, indented two spaces per nesting level.
///
/// ```text
/// FrameLayout id=content [0,0 1080x1920]
///   Button id=login "Sign in" (disabled)
/// ```
pub fn format_forest(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    let _ = walk_forest(forest, &mut |element: &ElementRecord, level: usize| {
        out.push_str(&"  ".repeat(level));
        out.push_str(&element_line(element));
        out.push('\n');
        Ok::<(), Infallible>(())
    });
    out
}

/// Numbered list of query results with their selectors.
pub fn format_elements(elements: &ElementList) -> String {
    let mut out = String::new();
    for (i, element) in elements.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n    {}\n", i, element_line(element), element.query()));
    }
    out
}

/// Compact single-line summary of an element.
pub fn element_line(element: &ElementRecord) -> String {
    let mut line = element.element_class().unwrap_or("?").to_string();

    if let Some(id) = element.id() {
        line.push_str(&format!(" id={}", id));
    }
    if let Some(text) = element.text().filter(|t| !t.is_empty()) {
        line.push_str(&format!(" {:?}", text));
    }
    if let Some(rect) = element.rect() {
        if let (Some(x), Some(y), Some(w), Some(h)) = (rect.x, rect.y, rect.width, rect.height) {
            line.push_str(&format!(" [{},{} {}x{}]", x, y, w, h));
        }
    }
    if !element.is_enabled() {
        line.push_str(" (disabled)");
    }

    line
}

/// Pretty-printed JSON of the whole forest.
pub fn forest_json(forest: &[TreeNode]) -> Result<String, InspectError> {
    serde_json::to_string_pretty(forest).map_err(|e| InspectError::JsonSerialize {
        context: "hierarchy report".into(),
        source: e,
    })
}
