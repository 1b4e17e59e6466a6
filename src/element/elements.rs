use serde_json::Value;

use crate::backend::selector;
use crate::element::element::ElementRecord;
use crate::error::InspectError;

/// Ordered result of one selector query.
#[derive(Debug, Clone, Default)]
pub struct ElementList {
    query: String,
    elements: Vec<ElementRecord>,
}

impl ElementList {
    /// Wrap raw query results, giving each element a selector of its own.
    ///
    /// An already indexed query is kept as is for every element; otherwise
    /// element `i` gets `<query> index:i`.
    pub fn from_results(results: &[Value], query: &str) -> Result<Self, InspectError> {
        let query = query.trim();
        let pinned = selector::is_indexed(query);

        let elements = results
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let element_query = if pinned {
                    query.to_string()
                } else {
                    selector::indexed(query, i)
                };
                ElementRecord::from_raw(raw, element_query).map_err(|_| {
                    InspectError::MalformedElement {
                        query: query.to_string(),
                        payload: Value::Array(results.to_vec()).to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            query: query.to_string(),
            elements,
        })
    }

    pub fn first(&self) -> Result<&ElementRecord, InspectError> {
        self.elements
            .first()
            .ok_or_else(|| InspectError::EmptyCollection("Empty elements collection".into()))
    }

    pub fn get(&self, index: usize) -> Option<&ElementRecord> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementRecord> {
        self.elements.iter()
    }

    /// The selector these results came from.
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl IntoIterator for ElementList {
    type Item = ElementRecord;
    type IntoIter = std::vec::IntoIter<ElementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a ElementRecord;
    type IntoIter = std::slice::Iter<'a, ElementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
