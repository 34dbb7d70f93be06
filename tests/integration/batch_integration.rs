use std::sync::Arc;

use water::config::MapperConfig;
use water::{BatchConverter, Error, Mapping, PoolBuilder, PropertyMapper, Value};

use crate::fixtures::{Employee, TestFixtures, User};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pooled_converter() -> BatchConverter {
        let pool = PoolBuilder::new()
            .threads(3)
            .thread_name_prefix("batch")
            .build()
            .unwrap();
        BatchConverter::new(PropertyMapper::new().with_pool(Arc::new(pool)))
    }

    #[test]
    fn test_ordered_batch_matches_input_positions() {
        let users = TestFixtures::users(64);
        let maps = pooled_converter().convert_all_to_mapping(&users, true).unwrap();
        assert_eq!(maps.len(), users.len());
        for (user, map) in users.iter().zip(&maps) {
            assert_eq!(map["name"], Value::String(user.name.clone()));
        }

        let back: Vec<User> = pooled_converter().convert_all(&maps, true).unwrap();
        assert_eq!(back, users);
    }

    #[test]
    fn test_unordered_batch_keeps_every_element() {
        let users = TestFixtures::users(500);
        let employees: Vec<Employee> = pooled_converter().convert_all(&users, false).unwrap();
        assert_eq!(employees.len(), 500);

        let mut names: Vec<String> = employees.into_iter().map(|e| e.name).collect();
        names.sort();
        let mut expected: Vec<String> = users.into_iter().map(|u| u.name).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_empty_batches() {
        let converter = pooled_converter();
        let users: Vec<User> = Vec::new();
        for ordered in [true, false] {
            assert!(converter.convert_all::<_, Employee>(&users, ordered).unwrap().is_empty());
        }
    }

    #[test]
    fn test_parallel_field_reads_inside_pool() {
        let mapper = PropertyMapper::with_config(MapperConfig {
            parallel_field_threshold: 1,
        })
        .with_pool(Arc::new(PoolBuilder::new().threads(2).build().unwrap()));
        let map = mapper.to_mapping(&TestFixtures::alice()).unwrap();
        assert_eq!(map, PropertyMapper::new().to_mapping(&TestFixtures::alice()).unwrap());
    }

    #[test]
    fn test_shut_down_pool_fails_parallel_paths() {
        let pool = Arc::new(PoolBuilder::new().threads(1).build().unwrap());
        let converter = BatchConverter::new(PropertyMapper::new().with_pool(pool.clone()));
        pool.shutdown();

        let users = TestFixtures::users(4);
        let err = converter.convert_all_to_mapping(&users, false).unwrap_err();
        assert!(matches!(err, Error::ThreadError(_)));
        assert_eq!(converter.convert_all_to_mapping(&users, true).unwrap().len(), 4);
    }

    #[test]
    fn test_mappings_pass_through_unchanged() {
        let rows: Vec<Mapping> = TestFixtures::tree_rows();
        let copied = BatchConverter::default().convert_all_to_mapping(&rows, true).unwrap();
        assert_eq!(copied, rows);
    }
}
