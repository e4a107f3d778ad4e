use super::*;

impl<C: Collider> QuadTree<C> {
    /// Turns the overflowing leaf `data` into a branch with four empty leaf
    /// children and queues its colliders on `pending` for re-routing.
    pub(crate) fn subdivide_node(
        &mut self,
        data: QuadNodeData,
        pending: &mut PendingStack,
    ) -> QuadtreeResult<()> {
        let (head, count) = match *self.nodes.at(data.node) {
            QuadNode::Leaf { head, count } => (head, count),
            QuadNode::Branch { .. } => return Ok(()),
        };
        debug_assert!(data.depth < self.config.max_divisions);
        log::debug!(
            "subdividing node {} at depth {} holding {} elements",
            data.node,
            data.depth,
            count
        );

        let first_child = self.alloc_children();
        *self.nodes.at_mut(data.node) = QuadNode::Branch { first_child };

        let mut current = head;
        while let Some(element_index) = current {
            let element = self.elements.erase(element_index)?;
            pending.push((element.collider, data));
            current = element.next;
        }
        Ok(())
    }

    fn alloc_children(&mut self) -> u32 {
        let first_child = self.nodes.insert(QuadNode::empty_leaf());
        for offset in 1..4 {
            let child = self.nodes.insert(QuadNode::empty_leaf());
            debug_assert_eq!(
                child,
                first_child + offset,
                "child quartet must be contiguous"
            );
        }
        first_child
    }

    /// Collapses every branch whose four children are empty leaves, bottom-up,
    /// so chains of empty branches fold in a single call. Returns the number
    /// of merged branches.
    pub fn cleanup(&mut self) -> QuadtreeResult<usize> {
        let mut stack: Stack<(u32, bool)> = Stack::new();
        stack.push((ROOT_INDEX, false));
        let mut merged = 0usize;

        while let Some((index, children_done)) = stack.pop() {
            let first_child = match *self.nodes.at(index) {
                QuadNode::Branch { first_child } => first_child,
                QuadNode::Leaf { .. } => continue,
            };
            if !children_done {
                stack.push((index, true));
                for offset in 0..4 {
                    stack.push((first_child + offset, false));
                }
                continue;
            }

            let all_empty = (0..4).all(|offset| {
                matches!(
                    *self.nodes.at(first_child + offset),
                    QuadNode::Leaf { count: 0, .. }
                )
            });
            if !all_empty {
                continue;
            }

            // Descending, so the LIFO free chain returns the block in order.
            for offset in (0..4).rev() {
                self.nodes.erase(first_child + offset)?;
            }
            *self.nodes.at_mut(index) = QuadNode::empty_leaf();
            merged += 1;
        }

        if merged > 0 {
            log::debug!("cleanup merged {} branches", merged);
        }
        Ok(merged)
    }

    /// Empties every leaf and forgets all colliders. Branches stay branches.
    pub fn clear_elements(&mut self) {
        self.elements.clear();
        self.colliders.clear();

        let mut leaves = std::mem::take(&mut self.node_scratch);
        leaves.clear();
        self.get_all_leaves(&mut leaves);
        for &leaf in &leaves {
            *self.nodes.at_mut(leaf) = QuadNode::empty_leaf();
        }
        self.node_scratch = leaves;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> QuadTree {
        QuadTree::new(
            Rect::new(100, 0, 0, 100),
            Config {
                pool_size: 16,
                max_divisions: 4,
                max_elts_per_node: 1,
            },
        )
        .unwrap()
    }

    #[test]
    fn subdivision_allocates_contiguous_children() {
        let mut qt = tree();
        qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        assert_eq!(
            *qt.nodes.at(ROOT_INDEX),
            QuadNode::Branch { first_child: 1 }
        );
        assert_eq!(qt.leaf_count(1), Some(1));
        assert_eq!(qt.leaf_count(2), Some(0));
        assert_eq!(qt.leaf_count(3), Some(0));
        assert_eq!(qt.leaf_count(4), Some(1));
    }

    #[test]
    fn cleanup_keeps_occupied_branches() {
        let mut qt = tree();
        qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        assert_eq!(qt.cleanup(), Ok(0));
        assert_eq!(qt.storage_counts().0, 5);
    }

    #[test]
    fn cleanup_reuses_slots_on_next_split() {
        let mut qt = tree();
        let a = qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        let b = qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        qt.remove(a).unwrap();
        qt.remove(b).unwrap();
        assert_eq!(qt.cleanup(), Ok(1));
        assert_eq!(*qt.nodes.at(ROOT_INDEX), QuadNode::empty_leaf());
        assert_eq!(qt.nodes.len(), 1);

        qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        assert_eq!(
            *qt.nodes.at(ROOT_INDEX),
            QuadNode::Branch { first_child: 1 }
        );
        assert_eq!(qt.nodes.high_water_mark(), 5);
    }

    #[test]
    fn clear_elements_keeps_branches() {
        let mut qt = tree();
        qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        qt.clear_elements();
        assert!(!qt.nodes.at(ROOT_INDEX).is_leaf());
        assert_eq!(qt.storage_counts(), (5, 0, 0));
        for leaf in 1..5 {
            assert_eq!(qt.leaf_count(leaf), Some(0));
        }
    }
}
