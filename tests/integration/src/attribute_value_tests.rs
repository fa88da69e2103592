//! Attribute Value Tests
//!
//! Copy semantics of HDA attribute values across payload shapes, and
//! timestamp marshalling against the instance's `time_as_utc` flag.

mod common;

use std::any::Any;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use common::*;
use opc_classic::{
    ApplicationConfig, ApplicationInstance, AttributeValue, BrowseFilter, Classify, DeepClone,
    FileTime, NodeKind, OpcError, Result, Value,
};

/// An HDA annotation: a structured payload with its own copy capability
#[derive(Debug, Clone)]
struct Annotation {
    user: String,
    lines: Vec<String>,
}

impl DeepClone for Annotation {
    fn deep_clone(&self) -> Result<Box<dyn DeepClone>> {
        Ok(Box::new(self.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A payload wrapping a resource that refuses to be duplicated
#[derive(Debug)]
struct LockedResource;

impl DeepClone for LockedResource {
    fn deep_clone(&self) -> Result<Box<dyn DeepClone>> {
        Err(OpcError::Clone("resource is locked".to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn sample_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 9, 30)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 500)
        .unwrap()
}

#[test]
fn test_default_value() {
    let value = AttributeValue::new();
    assert!(value.value().is_empty());
    assert_eq!(value.timestamp(), NaiveDateTime::MIN);
}

#[test]
fn test_clone_scalar_and_timestamp() {
    let original = AttributeValue::with_value(250i16, sample_time());
    let mut clone = original.deep_clone().unwrap();

    assert!(matches!(clone.value(), Value::I16(250)));
    clone.set_timestamp(NaiveDateTime::MIN);
    assert_eq!(original.timestamp(), sample_time());
}

#[test]
fn test_clone_structured_payload() {
    let original = AttributeValue::with_value(
        Value::object(Annotation {
            user: "operator".to_string(),
            lines: vec!["pump restarted".to_string()],
        }),
        sample_time(),
    );
    let mut clone = original.deep_clone().unwrap();

    let annotation = clone.value_mut().downcast_mut::<Annotation>().unwrap();
    annotation.lines.push("confirmed".to_string());

    let untouched = original.value().downcast_ref::<Annotation>().unwrap();
    assert_eq!(untouched.user, "operator");
    assert_eq!(untouched.lines, vec!["pump restarted".to_string()]);
}

#[test]
fn test_clone_nested_sequences() {
    let original = AttributeValue::with_value(
        vec![
            Value::from(vec![Value::from(1u32), Value::from(2u32)]),
            Value::from("tail"),
        ],
        sample_time(),
    );
    let mut clone = original.deep_clone().unwrap();

    let inner = &mut clone.value_mut().as_array_mut().unwrap()[0];
    inner.as_array_mut().unwrap()[0] = Value::from(100u32);

    assert_eq!(original.value().to_string(), "[[1, 2], tail]");
    assert_eq!(clone.value().to_string(), "[[100, 2], tail]");
}

#[test]
fn test_clone_failure_leaves_original() {
    let original = AttributeValue::with_value(
        vec![Value::from(1i32), Value::object(LockedResource)],
        sample_time(),
    );

    match original.deep_clone() {
        Err(OpcError::Clone(message)) => assert_eq!(message, "resource is locked"),
        other => panic!("unexpected result: {:?}", other.map(|v| v.value().to_string())),
    }
    assert_eq!(original.value().as_array().unwrap().len(), 2);
    assert_eq!(original.timestamp(), sample_time());
}

#[test]
fn test_shared_payload_aliases_across_clones() {
    let original = AttributeValue::with_value(Value::shared(Mutex::new(0u32)), sample_time());
    let clone = original.deep_clone().unwrap();

    let counter: Arc<Mutex<u32>> = clone.value().downcast_shared().unwrap();
    *counter.lock().unwrap() += 1;

    let seen: Arc<Mutex<u32>> = original.value().downcast_shared().unwrap();
    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn test_values_move_between_threads() {
    let original = AttributeValue::with_value(vec![Value::from(1.0f64)], sample_time());
    let clone = original.deep_clone().unwrap();

    let handle = std::thread::spawn(move || clone.value().to_string());
    assert_eq!(handle.join().unwrap(), "[1]");
    assert_eq!(original.value().to_string(), "[1]");
}

#[test]
fn test_marshalling_reads_flag_at_call_time() {
    init_logging();

    let app = ApplicationInstance::with_config(
        ApplicationConfig::default().with_time_as_utc(true),
        RecordingProvider::new(),
    );
    let value = AttributeValue::with_value(1i32, sample_time());

    let as_utc = value.marshal_timestamp(&app.time_config()).unwrap();
    let expected = FileTime::from_timestamp(sample_time(), true).unwrap();
    assert_eq!(as_utc, expected);

    app.set_time_as_utc(false);
    let as_local = value.marshal_timestamp(&app.time_config()).unwrap();
    let expected = FileTime::from_timestamp(sample_time(), false).unwrap();
    assert_eq!(as_local, expected);

    let mut restored = AttributeValue::new();
    restored.unmarshal_timestamp(as_local, &app.time_config()).unwrap();
    assert_eq!(restored.timestamp(), sample_time());
}

/// A browse element as an external browse engine would report it
struct Element {
    has_children: bool,
    is_item: bool,
    value: AttributeValue,
}

impl Classify for Element {
    fn node_kind(&self) -> NodeKind {
        NodeKind::from_flags(self.has_children, self.is_item)
    }
}

#[test]
fn test_item_filter_selects_readable_nodes() {
    let elements = vec![
        Element { has_children: true, is_item: false, value: AttributeValue::new() },
        Element {
            has_children: false,
            is_item: true,
            value: AttributeValue::with_value(7i32, sample_time()),
        },
    ];

    let items: Vec<_> = BrowseFilter::Item.apply(elements.iter()).collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].value.has_timestamp());

    let branches: Vec<_> = BrowseFilter::Branch.apply(elements.iter()).collect();
    assert_eq!(branches.len(), 1);
    assert!(branches[0].value.value().is_empty());
}
