use super::*;

impl<C: Collider> QuadTree<C> {
    /// Appends every collider whose rectangle intersects `area` (edges
    /// included). Each collider is reported once, in discovery order. An
    /// inverted `area` matches nothing.
    pub fn query(&mut self, area: Rect, output: &mut Vec<ColliderIndex>) {
        self.collect_intersecting(&area);
        output.extend_from_slice(&self.emitted);
    }

    pub fn query_with<F>(&mut self, area: Rect, mut f: F)
    where
        F: FnMut(ColliderIndex, &C),
    {
        self.collect_intersecting(&area);
        for &collider_index in &self.emitted {
            f(collider_index, self.colliders.at(collider_index));
        }
    }

    pub fn query_colliders(&mut self, area: Rect, output: &mut Vec<C>)
    where
        C: Clone,
    {
        self.collect_intersecting(&area);
        output.extend(
            self.emitted
                .iter()
                .map(|&collider_index| self.colliders.at(collider_index).clone()),
        );
    }

    /// Fills `self.emitted` with the de-duplicated hits for `area`.
    fn collect_intersecting(&mut self, area: &Rect) {
        let capacity = self.colliders.capacity();
        if self.query_table.len() != capacity {
            self.query_table.resize(capacity, false);
        }
        self.emitted.clear();
        if !area.is_valid() {
            return;
        }

        let mut leaves = std::mem::take(&mut self.leaf_scratch);
        leaves.clear();
        self.leaves_in(self.root_data(), area, &mut leaves);

        for leaf in &leaves {
            let mut current = match *self.nodes.at(leaf.node) {
                QuadNode::Leaf { head, .. } => head,
                QuadNode::Branch { .. } => None,
            };
            while let Some(element_index) = current {
                let element = *self.elements.at(element_index);
                current = element.next;

                let slot = element.collider as usize;
                if self.query_table[slot] {
                    continue;
                }
                if self.colliders.at(element.collider).bounds().intersects(area) {
                    self.query_table[slot] = true;
                    self.emitted.push(element.collider);
                }
            }
        }
        self.leaf_scratch = leaves;

        for &collider_index in &self.emitted {
            self.query_table[collider_index as usize] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> QuadTree {
        QuadTree::new(
            Rect::new(100, 0, 0, 100),
            Config {
                pool_size: 4,
                max_divisions: 3,
                max_elts_per_node: 1,
            },
        )
        .unwrap()
    }

    #[test]
    fn straddling_collider_reported_once() {
        let mut qt = tree();
        qt.insert(Rect::new(90, 80, 10, 20)).unwrap();
        qt.insert(Rect::new(20, 10, 80, 90)).unwrap();
        let wide = qt.insert(Rect::new(60, 40, 40, 60)).unwrap();

        let mut out = Vec::new();
        qt.query(Rect::new(100, 0, 0, 100), &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1, 2]);

        out.clear();
        qt.query(Rect::new(55, 45, 45, 55), &mut out);
        assert_eq!(out, vec![wide]);
    }

    #[test]
    fn touching_edges_count_as_hits() {
        let mut qt = tree();
        let a = qt.insert(Rect::new(30, 20, 20, 30)).unwrap();
        let mut out = Vec::new();
        qt.query(Rect::new(40, 30, 30, 40), &mut out);
        assert_eq!(out, vec![a]);
        out.clear();
        qt.query(Rect::new(40, 31, 31, 40), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn marks_are_reset_between_queries() {
        let mut qt = tree();
        for i in 0..6 {
            qt.insert(Rect::new(10 + i * 10, i * 10, i * 10, 10 + i * 10))
                .unwrap();
        }
        let mut first = Vec::new();
        qt.query(Rect::new(100, 0, 0, 100), &mut first);
        assert_eq!(first.len(), 6);
        assert!(qt.query_table.iter().all(|mark| !mark));

        let mut second = Vec::new();
        qt.query(Rect::new(100, 0, 0, 100), &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn table_follows_collider_capacity() {
        let mut qt = tree();
        for i in 0..40 {
            qt.insert(Rect::new(i + 1, i, i, i + 1)).unwrap();
        }
        let mut out = Vec::new();
        qt.query_with(Rect::new(5, 0, 0, 5), |index, rect| {
            assert!(rect.bottom <= 5);
            out.push(index);
        });
        assert_eq!(qt.query_table.len(), qt.colliders.capacity());
        out.sort_unstable();
        assert_eq!(out, vec![0, 1, 2, 3, 4, 5]);
    }
}
