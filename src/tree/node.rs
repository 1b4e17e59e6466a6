use serde::Serialize;

use crate::element::element::ElementRecord;

/// One element of a reconstructed hierarchy with its exclusively owned children.
///
/// Children keep on-screen nesting order as the backend reported it.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    data: ElementRecord,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(data: ElementRecord) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn data(&self) -> &ElementRecord {
        &self.data
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    pub fn append_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}
