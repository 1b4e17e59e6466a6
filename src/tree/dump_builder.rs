use serde_json::{Map, Value};

use crate::backend::executor::DumpSource;
use crate::backend::selector;
use crate::element::element::ElementRecord;
use crate::error::InspectError;
use crate::trace::logger::TraceSink;
use crate::trace::trace::{BuildMode, TraceEvent};
use crate::tree::node::TreeNode;

/// Builds the forest of the current screen from one hierarchy dump.
pub struct DumpTreeBuilder<'a> {
    source: &'a dyn DumpSource,
    sink: &'a dyn TraceSink,
}

impl<'a> DumpTreeBuilder<'a> {
    pub fn new(source: &'a dyn DumpSource, sink: &'a dyn TraceSink) -> Self {
        Self { source, sink }
    }

    /// Fetch the dump and convert it.
    ///
    /// A failed fetch or a body that is not JSON means there is no screen to
    /// inspect yet: it is logged and yields an empty forest.
    pub fn build(&self) -> Result<Vec<TreeNode>, InspectError> {
        self.sink
            .log(&TraceEvent::now(BuildMode::Dump, "fetching_hierarchy"));

        let body = match self.source.fetch_dump() {
            Ok(body) => body,
            Err(e) => {
                eprintln!("Warning: could not fetch view hierarchy: {}", e);
                self.sink.log(
                    &TraceEvent::now(BuildMode::Dump, "dump_fetch_failed").with_detail(&e),
                );
                return Ok(Vec::new());
            }
        };

        let forest = match parse_forest(&body) {
            Ok(forest) => forest,
            Err(e) => {
                eprintln!("Warning: could not read view hierarchy: {}", e);
                self.sink.log(
                    &TraceEvent::now(BuildMode::Dump, "dump_parse_failed").with_detail(&e),
                );
                return Ok(Vec::new());
            }
        };
        self.sink.log(
            &TraceEvent::now(BuildMode::Dump, "hierarchy_built").with_count(forest.len()),
        );
        Ok(forest)
    }
}

/// Parse a dump document and convert it with [`forest_from_dump`].
pub fn parse_forest(body: &str) -> Result<Vec<TreeNode>, InspectError> {
    let dump: Value = serde_json::from_str(body).map_err(|e| InspectError::JsonParse {
        context: "hierarchy dump".into(),
        source: e,
    })?;
    Ok(forest_from_dump(&dump))
}

/// Convert a dump whose top level holds a `children` array.
///
/// Every top-level node becomes a root, addressed as `* index:i`. Below the
/// roots, nodes with `visible: false` are dropped together with their subtrees.
pub fn forest_from_dump(dump: &Value) -> Vec<TreeNode> {
    let Some(roots) = dump.get("children").and_then(Value::as_array) else {
        return Vec::new();
    };

    roots
        .iter()
        .enumerate()
        .map(|(i, node)| build_subtree(node, selector::indexed("*", i)))
        .collect()
}

fn build_subtree(node: &Value, query: String) -> TreeNode {
    let mut tree_node = node_from_dump(node, &query);

    let children = node.get("children").and_then(Value::as_array);
    for (j, child) in children.into_iter().flatten().enumerate() {
        if !is_visible(child) {
            continue;
        }
        let child_query = selector::indexed(&selector::children(&query), j);
        tree_node.append_child(build_subtree(child, child_query));
    }

    tree_node
}

/// Map one dump node onto a childless [`TreeNode`].
///
/// `type` becomes the element class and `value` its text. `rect` is copied
/// when present, with missing coordinates left empty.
pub fn node_from_dump(node: &Value, query: &str) -> TreeNode {
    let mut raw = Map::new();

    for (from, to) in [
        ("type", "class"),
        ("id", "id"),
        ("value", "text"),
        ("enabled", "enabled"),
        ("rect", "rect"),
    ] {
        if let Some(value) = node.get(from) {
            raw.insert(to.to_string(), value.clone());
        }
    }

    TreeNode::new(ElementRecord::from_map(&raw, query))
}

/// Nodes without a `visible` flag count as visible.
fn is_visible(node: &Value) -> bool {
    node.get("visible").and_then(Value::as_bool).unwrap_or(true)
}
