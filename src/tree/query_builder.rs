use crate::backend::executor::QueryExecutor;
use crate::backend::selector;
use crate::element::element::ElementRecord;
use crate::error::InspectError;
use crate::trace::logger::TraceSink;
use crate::trace::trace::{BuildMode, TraceEvent};
use crate::tree::merge::merge_path;
use crate::tree::node::TreeNode;

/// Rebuilds a hierarchy from flat `index:N` and `parent *` queries.
///
/// Elements are visited from the last index to the first. Each element not
/// already placed fetches its ancestor chain once, and the resulting
/// root-to-leaf path is grafted into the forest. Every element on a merged
/// path is remembered so later indices reached through the same chain cost
/// no further ancestor queries.
pub struct QueryTreeBuilder<'a> {
    executor: &'a mut dyn QueryExecutor,
    sink: &'a dyn TraceSink,
}

impl<'a> QueryTreeBuilder<'a> {
    pub fn new(executor: &'a mut dyn QueryExecutor, sink: &'a dyn TraceSink) -> Self {
        Self { executor, sink }
    }

    /// Build the forest of everything matched by `base`.
    ///
    /// With a `bounding_root`, ancestor chains are cut at that element and
    /// elements whose chain never reaches it are left out.
    pub fn build(
        &mut self,
        base: &str,
        bounding_root: Option<&ElementRecord>,
    ) -> Result<Vec<TreeNode>, InspectError> {
        let count = self.executor.query(base, &[])?.len();
        self.sink.log(
            &TraceEvent::now(BuildMode::Query, "build_started")
                .with_selector(base)
                .with_count(count),
        );

        let mut forest: Vec<TreeNode> = Vec::new();
        let mut merged: Vec<ElementRecord> = Vec::new();

        for index in (0..count).rev() {
            let query = selector::indexed(base, index);
            let Some(element) = self.fetch_element(&query)? else {
                self.sink.log(
                    &TraceEvent::now(BuildMode::Query, "element_vanished").with_selector(&query),
                );
                continue;
            };

            if merged.contains(&element) {
                self.sink.log(
                    &TraceEvent::now(BuildMode::Query, "already_merged").with_selector(&query),
                );
                continue;
            }

            let chain = self.ancestors(&query)?;
            let ancestors = match bounding_root {
                Some(root) => {
                    let within = ancestors_within(chain, root);
                    if within.is_empty() {
                        self.sink.log(
                            &TraceEvent::now(BuildMode::Query, "outside_root")
                                .with_selector(&query)
                                .with_detail(root.query()),
                        );
                        merged.push(element);
                        continue;
                    }
                    within
                }
                None => chain,
            };

            let mut path = Vec::with_capacity(ancestors.len() + 1);
            path.push(element);
            path.extend(ancestors);
            path.reverse();

            merge_path(&path, &mut forest);
            merged.extend(path);
        }

        self.sink.log(
            &TraceEvent::now(BuildMode::Query, "build_finished")
                .with_selector(base)
                .with_count(forest.len()),
        );
        Ok(forest)
    }

    fn fetch_element(&mut self, query: &str) -> Result<Option<ElementRecord>, InspectError> {
        let results = self.executor.query(query, &[])?;
        results
            .first()
            .map(|raw| ElementRecord::from_raw(raw, query))
            .transpose()
    }

    /// Ancestor chain of the element matched by `query`, nearest first.
    fn ancestors(&mut self, query: &str) -> Result<Vec<ElementRecord>, InspectError> {
        let parent_query = selector::parents(query);
        let results = self.executor.query(&parent_query, &[])?;
        self.sink.log(
            &TraceEvent::now(BuildMode::Query, "ancestors_fetched")
                .with_selector(&parent_query)
                .with_count(results.len()),
        );

        results
            .iter()
            .enumerate()
            .map(|(i, raw)| ElementRecord::from_raw(raw, selector::indexed(&parent_query, i)))
            .collect()
    }
}

/// Cut a nearest-first ancestor chain just after `root`.
///
/// Returns an empty chain when `root` does not occur in it.
pub fn ancestors_within(mut chain: Vec<ElementRecord>, root: &ElementRecord) -> Vec<ElementRecord> {
    match chain.iter().position(|ancestor| ancestor == root) {
        Some(pos) => {
            chain.truncate(pos + 1);
            chain
        }
        None => Vec::new(),
    }
}
