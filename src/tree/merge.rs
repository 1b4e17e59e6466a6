use crate::element::element::ElementRecord;
use crate::tree::node::TreeNode;

/// Graft a root-first path of elements into `forest`.
///
/// The path is matched against each root in turn. On the first root whose
/// data equals `path[0]`, matching children are followed as deep as they go
/// and the unmatched suffix is appended as a new linear branch under the last
/// matched node. A path that matches no root becomes a new root at the front
/// of the forest. Merging a path that is already fully present is a no-op.
pub fn merge_path(path: &[ElementRecord], forest: &mut Vec<TreeNode>) {
    let Some(branch_root) = path.first() else {
        return;
    };

    for root in forest.iter_mut() {
        if root.data() == branch_root {
            graft(root, path);
            return;
        }
    }

    if let Some(branch) = create_branch(path) {
        forest.insert(0, branch);
    }
}

fn graft(root: &mut TreeNode, path: &[ElementRecord]) {
    let mut current = root;

    for (depth, element) in path.iter().enumerate().skip(1) {
        let matched = current
            .children()
            .iter()
            .position(|child| child.data() == element);

        match matched {
            Some(index) => current = &mut current.children_mut()[index],
            None => {
                if let Some(branch) = create_branch(&path[depth..]) {
                    current.append_child(branch);
                }
                return;
            }
        }
    }
}

/// Build a linear chain `path[0] -> path[1] -> ...`, or `None` for an empty path.
pub fn create_branch(path: &[ElementRecord]) -> Option<TreeNode> {
    let (leaf, ancestors) = path.split_last()?;

    let mut node = TreeNode::new(leaf.clone());
    for element in ancestors.iter().rev() {
        let mut parent = TreeNode::new(element.clone());
        parent.append_child(node);
        node = parent;
    }
    Some(node)
}
