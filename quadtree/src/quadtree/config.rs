use crate::error::{QuadtreeError, QuadtreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Initial reservation for the collider and element arenas.
    pub pool_size: usize,
    /// Deepest level a leaf may sit at; the root is depth 0.
    pub max_divisions: u32,
    /// A leaf holding more elements than this splits, unless it is at `max_divisions`.
    pub max_elts_per_node: u32,
}

impl Config {
    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.max_elts_per_node == 0 {
            return Err(QuadtreeError::InvalidConfig {
                max_divisions: self.max_divisions,
                max_elts_per_node: self.max_elts_per_node,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_size: 256,
            max_divisions: 6,
            max_elts_per_node: 8,
        }
    }
}
