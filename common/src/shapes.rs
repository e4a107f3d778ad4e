use rand::Rng;
use std::fmt;

/// Axis-aligned rectangle in integer world units. `top` is the larger y value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Rect {
    pub fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Builds a rectangle from its bottom-left corner and a size.
    pub fn from_corner(left: i32, bottom: i32, width: i32, height: i32) -> Self {
        Self {
            top: bottom + height,
            bottom,
            left,
            right: left + width,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.left + self.width() / 2,
            self.bottom + self.height() / 2,
        )
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        (self.right, self.bottom)
    }

    /// False for rectangles whose edges are inverted.
    pub fn is_valid(&self) -> bool {
        self.bottom <= self.top && self.left <= self.right
    }

    /// Closed-interval overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top >= other.bottom
            && self.bottom <= other.top
    }

    pub fn contains_rect(&self, inner: &Rect) -> bool {
        self.left <= inner.left
            && self.right >= inner.right
            && self.bottom <= inner.bottom
            && self.top >= inner.top
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Picks a `width` x `height` rectangle lying fully inside `self`. When the
    /// requested size does not fit, the rectangle is pinned to the bottom-left corner.
    pub fn random_inside<R: Rng>(&self, width: i32, height: i32, rng: &mut R) -> Rect {
        let left = Self::safe_rand(rng, self.left, self.right - width);
        let bottom = Self::safe_rand(rng, self.bottom, self.top - height);
        Rect::from_corner(left, bottom, width, height)
    }

    fn safe_rand<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ top: {}, bottom: {}, left: {}, right: {} }}",
            self.top, self.bottom, self.left, self.right
        )
    }
}
