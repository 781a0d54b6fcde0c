//! End-to-end scenarios mixing property writes, parsing and checks.

#[cfg(test)]
mod tests {
    use crate::compare::{CompareMode, ContainsMode, FormatMode};
    use crate::error::StepError;
    use crate::value::{from_json, FileHandle, Value};
    use crate::world::World;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_set_typed_value_then_read_parent() {
        let mut world = World::new();
        world
            .set_property_from_string("user.roles[0]", "string admin")
            .unwrap();
        assert_eq!(
            world.get_property("user.roles"),
            Some(&Value::List(vec![Value::from("admin")]))
        );
        assert!(world.check_length("roles of user", 1).is_ok());
        assert!(world.check_type("roles of user", "array").is_ok());
    }

    #[test]
    fn test_check_property_equals() {
        let mut world = World::new();
        world.set_property("greeting", "hello");
        assert!(world
            .check_property("greeting", CompareMode::Equals, "string hello")
            .is_ok());

        let err = world
            .check_property("greeting", CompareMode::Equals, "string world")
            .unwrap_err();
        match err {
            StepError::AssertionMismatch {
                property,
                expected,
                actual,
                ..
            } => {
                assert_eq!(property, "greeting");
                assert_eq!(expected, "\"world\"");
                assert_eq!(actual, "\"hello\"");
            }
            other => panic!("unexpected error: {}", other),
        }

        assert!(world
            .check_property("greeting", CompareMode::NotEquals, "string world")
            .is_ok());
    }

    #[test]
    fn test_number_array_roundtrip() {
        let mut world = World::new();
        world
            .set_property_from_string("ids of response", "number-array 1,2,3")
            .unwrap();
        assert_eq!(
            world.get_property("response.ids"),
            Some(&Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
        assert!(world
            .check_property("response.ids", CompareMode::Equals, "number-array 1,2,3")
            .is_ok());
        assert!(world
            .check_property("response.ids[1]", CompareMode::Equals, "number 2")
            .is_ok());
    }

    #[test]
    fn test_unknown_type_names_tag() {
        let mut world = World::new();
        let err = world
            .set_property_from_string("a", "widget 1")
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown type: widget");
        assert_eq!(world.get_property("a"), None);
    }

    #[test]
    fn test_response_body_against_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut fixture = std::fs::File::create(dir.path().join("logo.bin")).unwrap();
        fixture.write_all(&[0x89, 0x50, 0x4e, 0x47]).unwrap();

        let mut world = World::builder().base_dir(dir.path()).build();
        world.set_property("response.body", Value::Bytes(vec![0x89, 0x50, 0x4e, 0x47]));

        assert!(world
            .check_property("body of response", CompareMode::Equals, "file logo.bin")
            .is_ok());
        assert!(world
            .check_property("body of response", CompareMode::NotEquals, "buffer PNG")
            .is_ok());

        let err = world
            .check_property("body of response", CompareMode::Equals, "file missing.bin")
            .unwrap_err();
        assert!(matches!(err, StepError::Io { .. }));
    }

    #[test]
    fn test_two_file_handles_compare_by_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "same").unwrap();
        std::fs::write(dir.path().join("b.txt"), "same").unwrap();

        let world = World::new();
        let a = Value::File(FileHandle::new(dir.path().join("a.txt")));
        let b = Value::File(FileHandle::new(dir.path().join("b.txt")));
        assert!(world.compare(Some(&a), Some(&b), CompareMode::Equals).is_ok());
    }

    #[test]
    fn test_property_parser_compares_two_properties() {
        let mut world = World::builder()
            .root(from_json(r#"{"created": {"id": 7}, "fetched": {"id": 7}}"#).unwrap())
            .build();
        assert!(world
            .check_property("fetched", CompareMode::Equals, "property created")
            .is_ok());

        world.set_property("fetched.id", Value::Int(8));
        assert!(world
            .check_property("id of fetched", CompareMode::NotEquals, "property id of created")
            .is_ok());
    }

    #[test]
    fn test_remove_then_check_absent() {
        let mut world = World::builder()
            .root(from_json(r#"{"body": {"token": "t", "user": {"id": 1}}}"#).unwrap())
            .build();
        world.remove_property("token of body");
        assert!(world.check_not_exists("body.token").is_ok());
        assert!(world.check_not_exists("body.user.id").is_err());

        world.remove_property("never.was.here");
        assert_eq!(
            world.root(),
            &from_json(r#"{"body": {"user": {"id": 1}}}"#).unwrap()
        );
    }

    #[test]
    fn test_members_of_parsed_arrays() {
        let mut world = World::new();
        world
            .set_property_from_string("actual", "string-array b,a,c")
            .unwrap();
        world
            .set_property_from_string("expected", "string-array a,b")
            .unwrap();
        assert!(world
            .check_contains_members("actual", ContainsMode::Subset, "expected")
            .is_ok());
        assert!(world
            .check_contains_members("actual", ContainsMode::Only, "expected")
            .is_err());
    }

    #[test]
    fn test_format_check_with_registered_validator() {
        let mut world = World::builder()
            .format_validator("digits", |value, _| {
                value
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
            })
            .build();
        world.set_property("code", "12345");
        assert!(world.check_format("code", FormatMode::Has, "digits").is_ok());

        world.set_property("code", "12a45");
        assert!(world.check_format("code", FormatMode::HasNot, "digits").is_ok());
        assert!(matches!(
            world.check_format("code", FormatMode::Has, "email"),
            Err(StepError::UnknownFormat { .. })
        ));
    }
}
