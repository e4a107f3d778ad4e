use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadtreeError {
    IndexOutOfBounds { index: u32, len: u32 },
    VacantSlot { index: u32 },
    InvalidRect {
        top: i32,
        bottom: i32,
        left: i32,
        right: i32,
    },
    InvalidConfig {
        max_divisions: u32,
        max_elts_per_node: u32,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::IndexOutOfBounds { index, len } => {
                write!(
                    f,
                    "arena index out of bounds (index: {}, len: {})",
                    index, len
                )
            }
            QuadtreeError::VacantSlot { index } => {
                write!(f, "arena slot is not occupied (index: {})", index)
            }
            QuadtreeError::InvalidRect {
                top,
                bottom,
                left,
                right,
            } => {
                write!(
                    f,
                    "rectangle edges must satisfy bottom <= top and left <= right (top: {}, bottom: {}, left: {}, right: {})",
                    top, bottom, left, right
                )
            }
            QuadtreeError::InvalidConfig {
                max_divisions,
                max_elts_per_node,
            } => {
                write!(
                    f,
                    "max_elts_per_node must be at least 1 (max_divisions: {}, max_elts_per_node: {})",
                    max_divisions, max_elts_per_node
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
