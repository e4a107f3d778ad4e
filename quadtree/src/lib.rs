pub mod arena;
pub mod error;
pub mod quadtree;

pub use arena::{Arena, Stack};
pub use common::shapes;
pub use error::{QuadtreeError, QuadtreeResult};
