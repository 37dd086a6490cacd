use crate::opack_dict;
use crate::protocol::opack::{DictBuilder, OpackDict, OpackValue};

#[test]
fn test_value_accessors() {
    let value = OpackValue::Integer(42);
    assert_eq!(value.as_i64(), Some(42));
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_bool(), None);
    assert!(!value.is_null());
    assert!(OpackValue::Null.is_null());
}

#[test]
fn test_value_from_conversions() {
    assert!(matches!(OpackValue::from(true), OpackValue::Boolean(true)));
    assert!(matches!(OpackValue::from(42i64), OpackValue::Integer(42)));
    assert!(matches!(OpackValue::from("hello"), OpackValue::String(s) if s == "hello"));
    assert!(matches!(
        OpackValue::from(vec![0xAAu8, 0xBB]),
        OpackValue::Data(_)
    ));

    match OpackValue::from(vec!["a", "b"]) {
        OpackValue::Array(items) => assert_eq!(items.len(), 2),
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn test_dict_insertion_order() {
    let mut dict = OpackDict::new();
    dict.insert("z", 1i64);
    dict.insert("a", 2i64);
    dict.insert("m", 3i64);

    let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_dict_replace_keeps_position() {
    let mut dict = OpackDict::new();
    dict.insert("first", 1i64);
    dict.insert("second", 2i64);
    dict.insert("first", 10i64);

    assert_eq!(dict.len(), 2);
    let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["first", "second"]);
    assert_eq!(dict.get("first").and_then(OpackValue::as_i64), Some(10));
}

#[test]
fn test_dict_builder() {
    let dict = DictBuilder::new()
        .insert("key1", "value1")
        .insert("key2", 42i64)
        .insert_opt("key3", Some("present"))
        .insert_opt::<&str>("key4", None)
        .build();

    let d = dict.as_dict().unwrap();
    assert_eq!(d.len(), 3);
    assert!(d.get("key1").is_some());
    assert!(d.get("key4").is_none());
}

#[test]
fn test_opack_dict_macro() {
    let dict = opack_dict! {
        "name" => "test",
        "count" => 5i64,
    };

    let d = dict.as_dict().unwrap();
    assert_eq!(d.get("name").and_then(OpackValue::as_str), Some("test"));
    assert_eq!(d.get("count").and_then(OpackValue::as_i64), Some(5));
}
