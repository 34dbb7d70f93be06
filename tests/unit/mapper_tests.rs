use water::types::IntoValue;
use water::{impl_record, Error, FieldError, Mapping, PropertyMapper, Props, PropsMut, Value};

use crate::fixtures::{Employee, TestFixtures, User};

#[derive(Debug, Clone, Default, PartialEq)]
struct Counter {
    hits: u64,
    slots: usize,
}

impl_record!(Counter { hits: u64, slots: usize });

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alice_scenario() {
        let alice = User {
            name: "Alice".into(),
            age: 30,
            ..Default::default()
        };
        let map = PropertyMapper::new().to_mapping(&alice).unwrap();
        assert_eq!(map["name"], Value::String("Alice".into()));
        assert_eq!(map["age"], Value::Int(30));
        assert!(!map.contains_key("class"));
    }

    #[test]
    fn test_record_mapping_round_trip() {
        let mapper = PropertyMapper::new();
        let alice = TestFixtures::alice();

        let mut map = Mapping::new();
        mapper.record_to_mapping(&alice, &mut map).unwrap();
        let mut copy = User::default();
        mapper.mapping_to_record(&map, &mut copy).unwrap();

        assert_eq!(copy, alice);
    }

    #[test]
    fn test_record_to_mapping_keeps_unrelated_keys() {
        let mut map = Mapping::new();
        map.insert("extra".into(), true.into_value());
        map.insert("name".into(), "old".into_value());
        PropertyMapper::new()
            .record_to_mapping(&TestFixtures::alice(), &mut map)
            .unwrap();
        assert_eq!(map["extra"], Value::Bool(true));
        assert_eq!(map["name"], Value::String("Alice".into()));
    }

    #[test]
    fn test_type_exact_record_copy() {
        let mut employee = Employee {
            name: "before".into(),
            age: 77,
            title: "cto".into(),
        };
        PropertyMapper::new()
            .record_to_record(&TestFixtures::alice(), &mut employee)
            .unwrap();
        assert_eq!(employee.name, "Alice");
        assert_eq!(employee.age, 77);
        assert_eq!(employee.title, "cto");
    }

    #[test]
    fn test_absent_key_leaves_field_untouched() {
        let mut user = TestFixtures::alice();
        let mut map = Mapping::new();
        map.insert("age".into(), 41i32.into_value());
        PropertyMapper::new().mapping_to_record(&map, &mut user).unwrap();
        assert_eq!(user.age, 41);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_null_clears_optional_field_only() {
        let mapper = PropertyMapper::new();
        let mut user = TestFixtures::alice();

        let mut map = Mapping::new();
        map.insert("email".into(), Value::Null);
        mapper.mapping_to_record(&map, &mut user).unwrap();
        assert_eq!(user.email, None);

        map.insert("name".into(), Value::Null);
        let err = mapper.mapping_to_record(&map, &mut user).unwrap_err();
        assert!(matches!(err, Error::PropertyCopy { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_dates_accept_json_strings() {
        let mut map = Mapping::new();
        map.insert("joined".into(), "2021-06-01 12:00:00".into_value());
        let user: User = PropertyMapper::new().copy_new(&map).unwrap();
        assert_eq!(user.joined, TestFixtures::joined());
    }

    #[test]
    fn test_copy_dispatch() {
        let mapper = PropertyMapper::new();
        let alice = TestFixtures::alice();

        let mut map = Mapping::new();
        mapper
            .copy(Props::Record(&alice), PropsMut::Mapping(&mut map))
            .unwrap();
        let mut other = Mapping::new();
        let err = mapper
            .copy(Props::Mapping(&map), PropsMut::Mapping(&mut other))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        assert!(other.is_empty());
    }

    #[test]
    fn test_conversion_error_keeps_cause() {
        let mut map = Mapping::new();
        map.insert("age".into(), Value::Int(i64::MAX));
        let err = PropertyMapper::new()
            .mapping_to_record(&map, &mut User::default())
            .unwrap_err();
        match err {
            Error::PropertyCopy {
                source: FieldError::Conversion { field, .. },
                ..
            } => assert_eq!(field, "age"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wide_unsigned_fields_survive_round_trip() {
        let mapper = PropertyMapper::new();
        let counter = Counter {
            hits: u64::MAX,
            slots: 12,
        };
        let map = mapper.to_mapping(&counter).unwrap();
        assert_eq!(map["slots"], Value::Int(12));

        let back: Counter = mapper.copy_new(&map).unwrap();
        assert_eq!(back, counter);
    }

    #[test]
    fn test_empty_mapping_is_noop() {
        let mut user = TestFixtures::alice();
        PropertyMapper::new()
            .mapping_to_record(&Mapping::new(), &mut user)
            .unwrap();
        assert_eq!(user, TestFixtures::alice());
    }
}
