use super::*;

impl<C: Collider> QuadTree<C> {
    /// Appends every leaf under `start` that `rect` is routed into. Uses the
    /// same routing rule as insertion, so insert and remove agree on the set.
    pub(crate) fn leaves_in(&self, start: QuadNodeData, rect: &Rect, output: &mut Vec<QuadNodeData>) {
        if !start.rect.intersects(rect) {
            return;
        }

        let mut stack = NodeStack::new();
        stack.push(start);
        let mut targets = [QuadNodeData::default(); 4];
        while let Some(data) = stack.pop() {
            let node = *self.nodes.at(data.node);
            match node {
                QuadNode::Leaf { .. } => output.push(data),
                QuadNode::Branch { first_child } => {
                    let targets_len = child_targets(&data, first_child, rect, &mut targets);
                    for target in targets[..targets_len].iter().rev() {
                        stack.push(*target);
                    }
                }
            }
        }
    }

    /// Appends the leaves overlapping `area`.
    pub fn get_leaves(&self, area: Rect, output: &mut Vec<QuadNodeData>) {
        self.leaves_in(self.root_data(), &area, output);
    }

    /// Appends the index of every leaf, in pre-order (top-left first).
    pub fn get_all_leaves(&self, output: &mut Vec<u32>) {
        let mut stack: Stack<u32> = Stack::new();
        stack.push(ROOT_INDEX);
        while let Some(index) = stack.pop() {
            match *self.nodes.at(index) {
                QuadNode::Leaf { .. } => output.push(index),
                QuadNode::Branch { first_child } => {
                    for offset in (0..4).rev() {
                        stack.push(first_child + offset);
                    }
                }
            }
        }
    }

    /// Like [`QuadTree::get_all_leaves`], with each leaf's cell and depth.
    pub fn get_all_leaf_node_datas(&self, output: &mut Vec<QuadNodeData>) {
        let mut stack = NodeStack::new();
        stack.push(self.root_data());
        while let Some(data) = stack.pop() {
            match *self.nodes.at(data.node) {
                QuadNode::Leaf { .. } => output.push(data),
                QuadNode::Branch { first_child } => {
                    for &quadrant in Quadrant::ALL.iter().rev() {
                        stack.push(data.child(quadrant, first_child));
                    }
                }
            }
        }
    }
}
