//! End-to-end scenarios (spec §8) against the synthetic `FieldsAndMethods`
//! fixture built by `support::write_fields_and_methods_class`.

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use mini_jvm::{Value, VM};

fn temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("mini_jvm_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn loads_class_with_expected_shape() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    let class = vm.class("FieldsAndMethods").expect("class resolves");
    assert_eq!(class.class.name, "FieldsAndMethods");
    assert_eq!(class.class.super_name, "java/lang/Object");
    assert_eq!(class.class.fields.len(), 2);
    assert_eq!(class.class.methods.len(), 8);
}

#[test]
fn add_returns_the_sum() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    let result = vm
        .call("FieldsAndMethods", "add", &[Value::Int(2), Value::Int(3)])
        .expect("add succeeds");
    assert!(matches!(result, Some(Value::Int(5))));
}

#[test]
fn sub_matches_two_complement_semantics() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    let sub = vm.call("FieldsAndMethods", "sub", &[Value::Int(10), Value::Int(4)]).unwrap();
    assert!(matches!(sub, Some(Value::Int(6))));
}

#[test]
fn hello_invokes_the_registered_native_exactly_once() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    let calls: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let recorded = calls.clone();
    vm.register_native("Runtime", "log", "(Ljava/lang/String;)V", move |args| {
        if let Some(Value::Str(s)) = args.first() {
            recorded.borrow_mut().push(s.to_string());
        }
        Ok(None)
    });

    let result = vm.call("FieldsAndMethods", "hello", &[]).expect("hello succeeds");
    assert!(result.is_none());
    assert_eq!(*calls.borrow(), vec!["Hello world".to_string()]);
}

#[test]
fn increment_b_advances_the_static_field() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    for _ in 0..3 {
        vm.call("FieldsAndMethods", "incrementB", &[]).expect("incrementB succeeds");
    }

    let class = vm.class("FieldsAndMethods").unwrap();
    let b = class.get_static("b");
    assert!(matches!(b, Value::Int(5)));
}

#[test]
fn create_and_increment_a_mutate_the_new_instance() {
    let dir = temp_dir();
    support::write_fields_and_methods_class(&dir);
    let vm = VM::new([dir]);

    let created = vm.call("FieldsAndMethods", "create", &[]).expect("create succeeds");
    let instance = match created {
        Some(Value::Instance(instance)) => instance,
        other => panic!("expected an instance, got {other:?}"),
    };
    assert!(matches!(instance.get_field("a"), Value::Int(1)));

    for _ in 0..3 {
        vm.call_method(&instance.class, "incrementA", "()V", &[Value::Instance(instance.clone())])
            .expect("incrementA succeeds");
    }
    assert!(matches!(instance.get_field("a"), Value::Int(4)));
}

#[test]
fn unresolvable_class_is_a_not_found_error() {
    let dir = temp_dir();
    let vm = VM::new([dir]);

    let err = vm.call("NoSuchClass", "whatever", &[]).unwrap_err();
    assert!(matches!(err, mini_jvm::VmError::Resolution { .. }));
}
