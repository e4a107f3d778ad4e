use super::*;

impl<C: Collider> QuadTree<C> {
    /// Calls `f(a, b)` with `a < b` for every pair of colliders whose
    /// rectangles intersect. Pairs sharing several leaves are reported once.
    pub fn for_each_collision_pair<F>(&mut self, mut f: F)
    where
        F: FnMut(ColliderIndex, ColliderIndex),
    {
        let mut leaves = std::mem::take(&mut self.node_scratch);
        let mut members = std::mem::take(&mut self.pair_members);
        leaves.clear();
        self.get_all_leaves(&mut leaves);
        self.pair_dedupe.clear();

        for &leaf in &leaves {
            let (mut current, count) = match *self.nodes.at(leaf) {
                QuadNode::Leaf { head, count } => (head, count),
                QuadNode::Branch { .. } => continue,
            };
            if count < 2 {
                continue;
            }

            members.clear();
            while let Some(element_index) = current {
                let element = self.elements.at(element_index);
                members.push(element.collider);
                current = element.next;
            }

            for (i, &a) in members.iter().enumerate() {
                let a_rect = self.colliders.at(a).bounds();
                for &b in &members[i + 1..] {
                    let (min, max) = if a < b { (a, b) } else { (b, a) };
                    let key = (u64::from(min) << 32) | u64::from(max);
                    if !self.pair_dedupe.insert(key) {
                        continue;
                    }
                    if a_rect.intersects(&self.colliders.at(b).bounds()) {
                        f(min, max);
                    }
                }
            }
        }

        self.pair_members = members;
        self.node_scratch = leaves;
    }
}
