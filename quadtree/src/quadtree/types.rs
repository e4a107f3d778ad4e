use crate::arena::Stack;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rect;

pub(crate) const ROOT_INDEX: u32 = 0;

/// Slot number of a collider in the tree's collider arena.
pub type ColliderIndex = u32;

/// Anything with an axis-aligned bounding rectangle can be stored in the tree.
pub trait Collider {
    fn bounds(&self) -> Rect;
}

impl Collider for Rect {
    #[inline(always)]
    fn bounds(&self) -> Rect {
        *self
    }
}

/// One entry of a leaf's singly linked element list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementNode {
    pub next: Option<u32>,
    pub collider: ColliderIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadNode {
    Leaf { head: Option<u32>, count: u32 },
    /// `first_child` is the first of four contiguous slots.
    Branch { first_child: u32 },
}

impl QuadNode {
    #[inline(always)]
    pub(crate) fn empty_leaf() -> Self {
        QuadNode::Leaf {
            head: None,
            count: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadNode::Leaf { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

/// A node together with the cell it covers. Produced during traversal only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadNodeData {
    pub node: u32,
    pub depth: u32,
    pub rect: Rect,
}

impl QuadNodeData {
    #[inline(always)]
    pub fn midpoint(&self) -> (i32, i32) {
        let r = self.rect;
        let half_x = r.left as i64 + (r.right as i64 - r.left as i64) / 2;
        let half_y = r.bottom as i64 + (r.top as i64 - r.bottom as i64) / 2;
        (half_x as i32, half_y as i32)
    }

    #[inline(always)]
    pub fn child(&self, quadrant: Quadrant, first_child: u32) -> QuadNodeData {
        let (half_x, half_y) = self.midpoint();
        let r = self.rect;
        let rect = match quadrant {
            Quadrant::TopLeft => Rect::new(r.top, half_y, r.left, half_x),
            Quadrant::TopRight => Rect::new(r.top, half_y, half_x, r.right),
            Quadrant::BottomLeft => Rect::new(half_y, r.bottom, r.left, half_x),
            Quadrant::BottomRight => Rect::new(half_y, r.bottom, half_x, r.right),
        };
        QuadNodeData {
            node: first_child + quadrant as u32,
            depth: self.depth + 1,
            rect,
        }
    }
}

pub(crate) type NodeStack = Stack<QuadNodeData>;
pub(crate) type PendingStack = Stack<(ColliderIndex, QuadNodeData)>;

/// Fills `targets` with every child of the branch `data` that `rect` must be
/// routed into. A rectangle straddling a midline goes to both sides.
#[inline(always)]
pub(crate) fn child_targets(
    data: &QuadNodeData,
    first_child: u32,
    rect: &Rect,
    targets: &mut [QuadNodeData; 4],
) -> usize {
    let (half_x, half_y) = data.midpoint();
    let upper = rect.top >= half_y;
    let lower = rect.bottom < half_y;

    let mut targets_len = 0usize;
    if rect.left < half_x {
        if upper {
            targets[targets_len] = data.child(Quadrant::TopLeft, first_child);
            targets_len += 1;
        }
        if lower {
            targets[targets_len] = data.child(Quadrant::BottomLeft, first_child);
            targets_len += 1;
        }
    }
    if rect.right >= half_x {
        if upper {
            targets[targets_len] = data.child(Quadrant::TopRight, first_child);
            targets_len += 1;
        }
        if lower {
            targets[targets_len] = data.child(Quadrant::BottomRight, first_child);
            targets_len += 1;
        }
    }

    targets_len
}

pub(crate) fn validate_rect(rect: &Rect) -> QuadtreeResult<()> {
    if !rect.is_valid() {
        return Err(QuadtreeError::InvalidRect {
            top: rect.top,
            bottom: rect.bottom,
            left: rect.left,
            right: rect.right,
        });
    }
    Ok(())
}
