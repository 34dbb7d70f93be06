use std::collections::BTreeSet;

use water::tree::CHILDREN_KEY;
use water::{Error, Mapping, TreeBuilder, Value};

use crate::fixtures::{Category, TestFixtures};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn child_ids(node: &Mapping) -> BTreeSet<i64> {
        node.get(CHILDREN_KEY)
            .and_then(Value::as_list)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|child| child.as_map()?.get("id")?.as_i64())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn child(node: &Mapping, id: i64) -> &Mapping {
        node[CHILDREN_KEY]
            .as_list()
            .unwrap()
            .iter()
            .filter_map(Value::as_map)
            .find(|child| child["id"] == Value::Int(id))
            .unwrap()
    }

    #[test]
    fn test_sample_forest_shape() {
        for parallel in [false, true] {
            let forest = TreeBuilder::default()
                .build_tree(&TestFixtures::tree_rows(), "id", "pid", &Value::Int(0), parallel)
                .unwrap();

            assert_eq!(forest.len(), 1);
            let root = &forest[0];
            assert_eq!(root["id"], Value::Int(1));
            assert_eq!(child_ids(root), BTreeSet::from([2, 3]));
            assert_eq!(child_ids(child(root, 2)), BTreeSet::from([4]));
            assert!(!child(root, 3).contains_key(CHILDREN_KEY));
        }
    }

    #[test]
    fn test_records_are_converted_before_nesting() {
        let categories = vec![
            TestFixtures::category(10, -1, "root"),
            TestFixtures::category(11, 10, "left"),
            TestFixtures::category(12, 10, "right"),
            TestFixtures::category(99, 50, "orphan"),
        ];
        let forest = TreeBuilder::default()
            .build_tree(&categories, "id", "pid", &Value::Int(-1), false)
            .unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0]["label"], Value::String("root".into()));
        assert_eq!(child_ids(&forest[0]), BTreeSet::from([11, 12]));
    }

    #[test]
    fn test_empty_input_regardless_of_mode() {
        let none: Vec<Category> = Vec::new();
        for parallel in [false, true] {
            let forest = TreeBuilder::default()
                .build_tree(&none, "id", "pid", &Value::Int(0), parallel)
                .unwrap();
            assert!(forest.is_empty());
        }
    }

    #[test]
    fn test_preconditions() {
        let rows = TestFixtures::tree_rows();
        let builder = TreeBuilder::default();
        assert!(matches!(
            builder.build_tree(&rows, "", "pid", &Value::Int(0), false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            builder.build_tree(&rows, "id", "pid", &Value::Null, true),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_typed_tree() {
        let depts = vec![
            TestFixtures::dept(1, 0, "hq"),
            TestFixtures::dept(2, 1, "eng"),
            TestFixtures::dept(3, 2, "platform"),
            TestFixtures::dept(4, 0, "ops"),
        ];
        for parallel in [false, true] {
            let mut forest = TreeBuilder::default().build_typed_tree(&depts, &0, parallel).unwrap();
            forest.sort_by_key(|dept| dept.id);
            assert_eq!(forest.len(), 2);
            assert_eq!(forest[0].children[0].name, "eng");
            assert_eq!(forest[0].children[0].children[0].name, "platform");
            assert!(forest[1].children.is_empty());
        }
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let depts = vec![TestFixtures::dept(0, 0, "loop")];
        let err = TreeBuilder::default().build_typed_tree(&depts, &0, false).unwrap_err();
        assert!(matches!(err, Error::TreeError(_)));
    }
}
