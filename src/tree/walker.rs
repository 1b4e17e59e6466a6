use crate::element::element::ElementRecord;
use crate::tree::node::TreeNode;

/// Pre-order walk calling `callback(element, nesting_level)` for every node.
///
/// `node` itself is reported at `level`; children follow at `level + 1` in
/// child order. The first callback error stops the walk and is returned.
pub fn walk<F, E>(node: &TreeNode, level: usize, callback: &mut F) -> Result<(), E>
where
    F: FnMut(&ElementRecord, usize) -> Result<(), E>,
{
    callback(node.data(), level)?;
    for child in node.children() {
        walk(child, level + 1, callback)?;
    }
    Ok(())
}

/// Walk every root of `forest` in order, each starting at level 0.
pub fn walk_forest<F, E>(forest: &[TreeNode], callback: &mut F) -> Result<(), E>
where
    F: FnMut(&ElementRecord, usize) -> Result<(), E>,
{
    for root in forest {
        walk(root, 0, callback)?;
    }
    Ok(())
}
