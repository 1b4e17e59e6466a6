use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::element::rect::Rect;
use crate::error::InspectError;

/// Snapshot of one UI element plus the selector that retrieves it.
///
/// Records are never mutated once built. Equality is deliberately loose:
/// `rect`, `id`, `text` and `class` are compared only where both sides carry
/// a value, and `query` is ignored, so the same on-screen element reached
/// through two different selectors compares equal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElementRecord {
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    element_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "contentDescription", skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rect: Option<Rect>,
    query: String,
}

impl ElementRecord {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Decode one raw element map as returned by the query backend.
    pub fn from_raw(raw: &Value, query: impl Into<String>) -> Result<Self, InspectError> {
        let query = query.into();
        match raw.as_object() {
            Some(map) => Ok(Self::from_map(map, query)),
            None => Err(InspectError::MalformedElement {
                query,
                payload: raw.to_string(),
            }),
        }
    }

    pub fn from_map(map: &Map<String, Value>, query: impl Into<String>) -> Self {
        let text_of = |key: &str| map.get(key).and_then(scalar_text);

        Self {
            element_class: text_of("class"),
            id: text_of("id"),
            text: text_of("text"),
            description: text_of("description"),
            content_description: text_of("contentDescription"),
            enabled: map.get("enabled").is_some_and(truthy),
            rect: map.get("rect").and_then(Rect::from_json),
            query: query.into(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.element_class = Some(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_description(mut self, content_description: impl Into<String>) -> Self {
        self.content_description = Some(content_description.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn element_class(&self) -> Option<&str> {
        self.element_class.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn content_description(&self) -> Option<&str> {
        self.content_description.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn rect(&self) -> Option<&Rect> {
        self.rect.as_ref()
    }

    /// Selector that retrieves exactly this element from the backend.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// String form of a JSON scalar. `null`, arrays and objects are absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn loosely_equal<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

impl PartialEq for ElementRecord {
    fn eq(&self, other: &Self) -> bool {
        loosely_equal(self.rect(), other.rect())
            && loosely_equal(self.id(), other.id())
            && loosely_equal(self.text(), other.text())
            && loosely_equal(self.element_class(), other.element_class())
    }
}

impl fmt::Display for ElementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<&str>| v.unwrap_or("null").to_string();
        write!(
            f,
            "id: {}, class: {}, text: {}, description: {}, content description: {}, enabled: {}, rect: {}",
            show(self.id()),
            show(self.element_class()),
            show(self.text()),
            show(self.description()),
            show(self.content_description()),
            self.enabled,
            self.rect.map_or_else(|| "null".to_string(), |r| r.to_string())
        )
    }
}
