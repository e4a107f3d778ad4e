//! Bucket quadtree over index arenas.
//!
//! Every node, every (collider, leaf) pairing and every collider lives in an
//! [`Arena`]; links between them are arena indices. A leaf keeps its colliders
//! in a singly linked list of [`ElementNode`]s. A collider that straddles a
//! cell midline is registered in every leaf it overlaps, so queries
//! de-duplicate their output.
//!
//! The intended driving loop inserts every live collider, runs queries or
//! [`QuadTree::for_each_collision_pair`], then calls [`QuadTree::cleanup`] and
//! [`QuadTree::clear_elements`] before the next pass.

use crate::arena::{Arena, Stack};
use crate::error::QuadtreeResult;
use common::shapes::Rect;
use fxhash::FxHashSet;
use std::fmt;

mod collision_pairs;
mod config;
mod core;
mod maintenance;
mod query_rect;
mod traversal;
mod types;

pub use config::Config;
pub use types::{Collider, ColliderIndex, ElementNode, QuadNode, QuadNodeData, Quadrant};

use types::*;

pub struct QuadTree<C = Rect> {
    bounds: Rect,
    config: Config,
    colliders: Arena<C>,
    nodes: Arena<QuadNode>,
    elements: Arena<ElementNode>,
    // De-duplication marks, one per collider slot.
    query_table: Vec<bool>,
    emitted: Vec<ColliderIndex>,
    leaf_scratch: Vec<QuadNodeData>,
    node_scratch: Vec<u32>,
    pending: PendingStack,
    pair_dedupe: FxHashSet<u64>,
    pair_members: Vec<ColliderIndex>,
}

impl<C> fmt::Debug for QuadTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds)
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("elements", &self.elements.len())
            .field("colliders", &self.colliders.len())
            .finish()
    }
}
