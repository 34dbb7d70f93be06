//! Typed tree nodes

use std::fmt::Debug;

/// A value that knows its own id, its parent's id, and how to adopt children.
///
/// Used by [`TreeBuilder::build_typed_tree`](super::TreeBuilder::build_typed_tree)
/// to nest values directly, without going through mappings.
pub trait TreeNode: Clone + Send + Sync + Sized {
    type Id: PartialEq + Clone + Debug + Send + Sync;

    fn id(&self) -> Self::Id;

    fn parent_id(&self) -> Self::Id;

    /// Called only with a non-empty list
    fn set_children(&mut self, children: Vec<Self>);
}

/// Chain of ids from the current level up to the root, used to reject cycles
pub(crate) struct Ancestors<'a, T> {
    pub(crate) value: &'a T,
    pub(crate) parent: Option<&'a Ancestors<'a, T>>,
}

impl<'a, T: PartialEq> Ancestors<'a, T> {
    pub(crate) fn root(value: &'a T) -> Self {
        Self { value, parent: None }
    }

    pub(crate) fn push(&'a self, value: &'a T) -> Self {
        Self {
            value,
            parent: Some(self),
        }
    }

    pub(crate) fn contains(&self, value: &T) -> bool {
        let mut cursor = Some(self);
        while let Some(link) = cursor {
            if link.value == value {
                return true;
            }
            cursor = link.parent;
        }
        false
    }
}
