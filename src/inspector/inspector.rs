use serde_json::Value;

use crate::backend::executor::{DumpSource, QueryExecutor};
use crate::backend::selector;
use crate::element::element::ElementRecord;
use crate::element::elements::ElementList;
use crate::error::InspectError;
use crate::trace::logger::TraceSink;
use crate::tree::dump_builder::DumpTreeBuilder;
use crate::tree::node::TreeNode;
use crate::tree::query_builder::QueryTreeBuilder;
use crate::tree::walker::{walk, walk_forest};

/// Selector matching every element on screen.
pub const ALL_ELEMENTS: &str = "*";

/// Element queries and hierarchy inspection against one backend.
pub struct Inspector<'a> {
    executor: &'a mut dyn QueryExecutor,
    dump: Option<&'a dyn DumpSource>,
    sink: &'a dyn TraceSink,
}

impl<'a> Inspector<'a> {
    pub fn new(executor: &'a mut dyn QueryExecutor, sink: &'a dyn TraceSink) -> Self {
        Self {
            executor,
            dump: None,
            sink,
        }
    }

    /// Enable the dump-based operations.
    pub fn with_dump(mut self, source: &'a dyn DumpSource) -> Self {
        self.dump = Some(source);
        self
    }

    pub fn query(&mut self, selector: &str) -> Result<ElementList, InspectError> {
        let results = self.executor.query(selector, &[])?;
        ElementList::from_results(&results, selector)
    }

    /// Direct children of `element`.
    pub fn children(&mut self, element: &ElementRecord) -> Result<ElementList, InspectError> {
        self.query(&selector::children(element.query()))
    }

    /// Ask the backend for one property of `element`.
    ///
    /// Backends answer unknown properties with a "no accessor" message,
    /// which is reported as `None`.
    pub fn property(
        &mut self,
        element: &ElementRecord,
        name: &str,
    ) -> Result<Option<Value>, InspectError> {
        let results = self.executor.query(element.query(), &[name])?;
        let value = match results.into_iter().next() {
            Some(Value::Null) | None => None,
            Some(Value::String(s)) if s.to_lowercase().contains("no accessor") => None,
            Some(v) => Some(v),
        };
        Ok(value)
    }

    pub fn description(&mut self, element: &ElementRecord) -> Result<Option<String>, InspectError> {
        match element.description() {
            Some(d) => Ok(Some(d.to_string())),
            None => self.property_text(element, "description"),
        }
    }

    pub fn content_description(
        &mut self,
        element: &ElementRecord,
    ) -> Result<Option<String>, InspectError> {
        match element.content_description() {
            Some(d) => Ok(Some(d.to_string())),
            None => self.property_text(element, "contentDescription"),
        }
    }

    fn property_text(
        &mut self,
        element: &ElementRecord,
        name: &str,
    ) -> Result<Option<String>, InspectError> {
        Ok(self.property(element, name)?.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        }))
    }

    /// Query-mode forest of the whole screen.
    pub fn tree_from_root(&mut self) -> Result<Vec<TreeNode>, InspectError> {
        QueryTreeBuilder::new(&mut *self.executor, self.sink).build(ALL_ELEMENTS, None)
    }

    /// Query-mode tree rooted at `element`.
    ///
    /// An element without descendants comes back as a single node.
    pub fn tree_from(&mut self, element: &ElementRecord) -> Result<TreeNode, InspectError> {
        let base = selector::descendants(element.query());
        let forest =
            QueryTreeBuilder::new(&mut *self.executor, self.sink).build(&base, Some(element))?;

        Ok(forest
            .into_iter()
            .next()
            .unwrap_or_else(|| TreeNode::new(element.clone())))
    }

    /// Dump-mode forest of the current screen.
    pub fn root_elements(&self) -> Result<Vec<TreeNode>, InspectError> {
        let source = self
            .dump
            .ok_or_else(|| InspectError::MissingState("no hierarchy dump source configured".into()))?;
        DumpTreeBuilder::new(source, self.sink).build()
    }

    /// Call `callback` for every element on screen with its nesting level.
    pub fn inspect<F>(&self, mut callback: F) -> Result<(), InspectError>
    where
        F: FnMut(&ElementRecord, usize) -> Result<(), InspectError>,
    {
        let forest = self.root_elements()?;
        walk_forest(&forest, &mut callback)
    }

    /// Call `callback` for `element` and everything below it.
    pub fn inspect_element<F>(
        &mut self,
        element: &ElementRecord,
        mut callback: F,
    ) -> Result<(), InspectError>
    where
        F: FnMut(&ElementRecord, usize) -> Result<(), InspectError>,
    {
        let tree = self.tree_from(element)?;
        walk(&tree, 0, &mut callback)
    }
}
