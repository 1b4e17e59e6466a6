use serde_json::Value;

use crate::error::InspectError;

/// Blocking access to the automation backend's selector queries.
///
/// `query` returns the raw results in backend order: element property maps
/// for plain selectors, or property values when `args` names a property.
/// Calls are serialized by `&mut self`; the backend is not assumed to cope
/// with concurrent commands.
pub trait QueryExecutor {
    fn query(&mut self, selector: &str, args: &[&str]) -> Result<Vec<Value>, InspectError>;
}

/// Source of the one-shot hierarchical screen dump.
pub trait DumpSource {
    fn fetch_dump(&self) -> Result<String, InspectError>;
}
