use super::*;

impl<C: Collider> QuadTree<C> {
    pub fn new(bounds: Rect, config: Config) -> QuadtreeResult<Self> {
        validate_rect(&bounds)?;
        config.validate()?;

        let mut nodes = Arena::new();
        let root = nodes.insert(QuadNode::empty_leaf());
        debug_assert_eq!(root, ROOT_INDEX);

        Ok(Self {
            bounds,
            config,
            colliders: Arena::with_capacity(config.pool_size),
            nodes,
            elements: Arena::with_capacity(config.pool_size),
            query_table: Vec::new(),
            emitted: Vec::new(),
            leaf_scratch: Vec::new(),
            node_scratch: Vec::new(),
            pending: Stack::new(),
            pair_dedupe: FxHashSet::default(),
            pair_members: Vec::new(),
        })
    }

    pub fn with_defaults(bounds: Rect) -> QuadtreeResult<Self> {
        Self::new(bounds, Config::default())
    }

    /// Registers the collider and links it into every leaf its rectangle
    /// overlaps, splitting leaves that overflow. A collider lying entirely
    /// outside the tree bounds is registered but reaches no leaf.
    pub fn insert(&mut self, collider: C) -> QuadtreeResult<ColliderIndex> {
        let rect = collider.bounds();
        validate_rect(&rect)?;

        let collider_index = self.colliders.insert(collider);
        if !rect.intersects(&self.bounds) {
            return Ok(collider_index);
        }

        let mut pending = std::mem::take(&mut self.pending);
        pending.clear();
        pending.push((collider_index, self.root_data()));
        let result = self.distribute(&mut pending);
        self.pending = pending;
        result.map(|_| collider_index)
    }

    /// Unlinks the collider from every leaf it was routed into and frees its
    /// slot. The index may be handed out again by a later insert.
    ///
    /// The leaf set is recomputed from the stored rectangle. Colliders are
    /// held by value and subdivision re-routes with the same rule, so it
    /// always matches the set the collider was linked into.
    pub fn remove(&mut self, collider_index: ColliderIndex) -> QuadtreeResult<C> {
        let rect = self.colliders.get(collider_index)?.bounds();

        let mut leaves = std::mem::take(&mut self.leaf_scratch);
        leaves.clear();
        self.leaves_in(self.root_data(), &rect, &mut leaves);
        let mut result = Ok(());
        for leaf in &leaves {
            if let Err(err) = self.unlink_element(leaf.node, collider_index) {
                result = Err(err);
                break;
            }
        }
        self.leaf_scratch = leaves;
        result?;

        self.colliders.erase(collider_index)
    }

    pub fn get(&self, collider_index: ColliderIndex) -> QuadtreeResult<&C> {
        self.colliders.get(collider_index)
    }

    pub fn colliders(&self) -> impl Iterator<Item = (ColliderIndex, &C)> + '_ {
        self.colliders.iter()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn nodes(&self) -> &Arena<QuadNode> {
        &self.nodes
    }

    pub fn node(&self, index: u32) -> QuadtreeResult<&QuadNode> {
        self.nodes.get(index)
    }

    /// Element count of a leaf, `None` for branches and unknown nodes.
    pub fn leaf_count(&self, index: u32) -> Option<u32> {
        match self.nodes.get(index) {
            Ok(QuadNode::Leaf { count, .. }) => Some(*count),
            _ => None,
        }
    }

    /// Live (quad nodes, element nodes, colliders).
    pub fn storage_counts(&self) -> (usize, usize, usize) {
        (self.nodes.len(), self.elements.len(), self.colliders.len())
    }

    pub fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline(always)]
    pub(crate) fn root_data(&self) -> QuadNodeData {
        QuadNodeData {
            node: ROOT_INDEX,
            depth: 0,
            rect: self.bounds,
        }
    }

    /// Drains `pending`, walking each (collider, node) pair down to the leaves.
    /// Entries may name a node that has since become a branch; they are routed
    /// on from there.
    pub(crate) fn distribute(&mut self, pending: &mut PendingStack) -> QuadtreeResult<()> {
        let mut targets = [QuadNodeData::default(); 4];
        while let Some((collider_index, data)) = pending.pop() {
            let node = *self.nodes.at(data.node);
            match node {
                QuadNode::Branch { first_child } => {
                    let rect = self.colliders.at(collider_index).bounds();
                    let targets_len = child_targets(&data, first_child, &rect, &mut targets);
                    for target in targets[..targets_len].iter().rev() {
                        pending.push((collider_index, *target));
                    }
                }
                QuadNode::Leaf { head, count } => {
                    let element = self.elements.insert(ElementNode {
                        next: head,
                        collider: collider_index,
                    });
                    let count = count + 1;
                    *self.nodes.at_mut(data.node) = QuadNode::Leaf {
                        head: Some(element),
                        count,
                    };
                    if count > self.config.max_elts_per_node
                        && data.depth < self.config.max_divisions
                    {
                        self.subdivide_node(data, pending)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn unlink_element(&mut self, node: u32, collider_index: ColliderIndex) -> QuadtreeResult<bool> {
        let (head, count) = match *self.nodes.at(node) {
            QuadNode::Leaf { head, count } => (head, count),
            QuadNode::Branch { .. } => return Ok(false),
        };

        let mut previous: Option<u32> = None;
        let mut current = head;
        while let Some(element_index) = current {
            let element = *self.elements.at(element_index);
            if element.collider == collider_index {
                let head = match previous {
                    None => element.next,
                    Some(previous_index) => {
                        self.elements.at_mut(previous_index).next = element.next;
                        head
                    }
                };
                *self.nodes.at_mut(node) = QuadNode::Leaf {
                    head,
                    count: count - 1,
                };
                self.elements.erase(element_index)?;
                return Ok(true);
            }
            previous = current;
            current = element.next;
        }

        log::warn!(
            "collider {} missing from leaf {}; element lists are inconsistent",
            collider_index,
            node
        );
        Ok(false)
    }
}
