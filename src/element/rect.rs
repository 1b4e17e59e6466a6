use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Bounding box of an on-screen element.
///
/// Every field is optional because backends report partial geometry. Two
/// rects are equal when all fields present on *both* sides match; a field
/// missing on either side is skipped rather than counted as a mismatch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Rect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_y: Option<f64>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            center_x: Some(center_x),
            center_y: Some(center_y),
        }
    }

    /// Decode a `{x, y, width, height, center_x, center_y}` object.
    ///
    /// Returns `None` when `value` is not an object. Fields may be numbers or
    /// numeric strings; anything else is treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let field = |name: &str| map.get(name).and_then(number_of);

        Some(Self {
            x: field("x"),
            y: field("y"),
            width: field("width"),
            height: field("height"),
            center_x: field("center_x"),
            center_y: field("center_y"),
        })
    }

    fn fields(&self) -> [Option<f64>; 6] {
        [self.x, self.y, self.width, self.height, self.center_x, self.center_y]
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.fields()
            .iter()
            .zip(other.fields().iter())
            .all(|pair| match pair {
                (Some(a), Some(b)) => a == b,
                _ => true,
            })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "null".to_string(), |n| n.to_string());
        write!(
            f,
            "x: {}, y: {}, width: {}, height: {}, center_x: {}, center_y: {}",
            show(self.x),
            show(self.y),
            show(self.width),
            show(self.height),
            show(self.center_x),
            show(self.center_y)
        )
    }
}
