//! Forest construction from flat child/parent linked items
//!
//! Items are partitioned level by level: every item whose parent value equals
//! the current parent is a member of the level, and its own id becomes the
//! parent value of the next level down.

pub mod builder;
pub mod node;

pub use builder::{TreeBuilder, CHILDREN_KEY};
pub use node::TreeNode;
