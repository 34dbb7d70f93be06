//! Recursive level partitioning into nested mappings or typed nodes

use rayon::prelude::*;
use tracing::{debug, instrument};

use super::node::{Ancestors, TreeNode};
use crate::bean::{AsProps, PropertyMapper};
use crate::collection::BatchConverter;
use crate::error::{Error, Result};
use crate::types::{Mapping, Value};
use crate::utils::is_blank;

/// Key under which a node's children are attached
pub const CHILDREN_KEY: &str = "children";

struct Keys<'a> {
    id: &'a str,
    parent: &'a str,
}

/// Builds forests out of flat, parent-linked item lists.
///
/// Each level rescans the whole item list, so the cost is quadratic in the
/// number of items. Items whose parent never appears are dropped. With
/// `parallel = true` sibling subtrees are built concurrently and sibling order
/// is not guaranteed.
#[derive(Clone, Default)]
pub struct TreeBuilder {
    mapper: PropertyMapper,
}

impl TreeBuilder {
    pub fn new(mapper: PropertyMapper) -> Self {
        Self { mapper }
    }

    /// Nests `items` under the ones whose `id_key` value equals their
    /// `parent_key` value, starting from the items whose parent is `root`.
    ///
    /// Records are turned into mappings first; mappings are cloned. Children
    /// land under [`CHILDREN_KEY`] only when a node has at least one.
    #[instrument(skip(self, items, root), fields(count = items.len()))]
    pub fn build_tree<S>(
        &self,
        items: &[S],
        id_key: &str,
        parent_key: &str,
        root: &Value,
        parallel: bool,
    ) -> Result<Vec<Mapping>>
    where
        S: AsProps + Sync,
    {
        if is_blank(id_key) {
            return Err(Error::invalid_argument("tree id key must not be empty"));
        }
        if is_blank(parent_key) {
            return Err(Error::invalid_argument("tree parent key must not be empty"));
        }
        if root.is_null() {
            return Err(Error::invalid_argument("tree root parent value must not be null"));
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let nodes = BatchConverter::new(self.mapper.clone()).convert_all_to_mapping(items, true)?;
        let keys = Keys {
            id: id_key,
            parent: parent_key,
        };
        let forest = self.mapping_level(&nodes, &keys, &Ancestors::root(root), parallel)?;
        debug!(roots = forest.len(), "Tree built");
        Ok(forest)
    }

    fn mapping_level(
        &self,
        nodes: &[Mapping],
        keys: &Keys<'_>,
        ancestors: &Ancestors<'_, Value>,
        parallel: bool,
    ) -> Result<Vec<Mapping>> {
        let members: Vec<&Mapping> = nodes
            .iter()
            .filter(|node| node.get(keys.parent) == Some(ancestors.value))
            .collect();

        let attach = |node: &&Mapping| -> Result<Mapping> {
            let mut node = (*node).clone();
            let id = match node.get(keys.id) {
                Some(id) if !id.is_null() => id.clone(),
                _ => return Ok(node),
            };
            if ancestors.contains(&id) {
                return Err(Error::TreeError(format!(
                    "cycle detected: {} = {} is its own ancestor",
                    keys.id, id
                )));
            }

            let children = self.mapping_level(nodes, keys, &ancestors.push(&id), parallel)?;
            if !children.is_empty() {
                node.insert(
                    CHILDREN_KEY.to_string(),
                    Value::List(children.into_iter().map(Value::Map).collect()),
                );
            }
            Ok(node)
        };

        if parallel && members.len() > 1 {
            self.mapper
                .run(|| members.par_iter().map(attach).collect::<Result<Vec<Mapping>>>())?
        } else {
            members.iter().map(attach).collect()
        }
    }

    /// Typed counterpart of [`build_tree`](Self::build_tree)
    #[instrument(skip(self, items, root), fields(count = items.len()))]
    pub fn build_typed_tree<N: TreeNode>(&self, items: &[N], root: &N::Id, parallel: bool) -> Result<Vec<N>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let forest = self.typed_level(items, &Ancestors::root(root), parallel)?;
        debug!(roots = forest.len(), "Typed tree built");
        Ok(forest)
    }

    fn typed_level<N: TreeNode>(&self, items: &[N], ancestors: &Ancestors<'_, N::Id>, parallel: bool) -> Result<Vec<N>> {
        let members: Vec<&N> = items
            .iter()
            .filter(|item| item.parent_id() == *ancestors.value)
            .collect();

        let attach = |item: &&N| -> Result<N> {
            let mut node = (*item).clone();
            let id = node.id();
            if ancestors.contains(&id) {
                return Err(Error::TreeError(format!("cycle detected: id {:?} is its own ancestor", id)));
            }
            let children = self.typed_level(items, &ancestors.push(&id), parallel)?;
            if !children.is_empty() {
                node.set_children(children);
            }
            Ok(node)
        };

        if parallel && members.len() > 1 {
            self.mapper
                .run(|| members.par_iter().map(attach).collect::<Result<Vec<N>>>())?
        } else {
            members.iter().map(attach).collect()
        }
    }
}
