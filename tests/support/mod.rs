//! Assembles the `FieldsAndMethods` class byte-for-byte (spec §8
//! "End-to-end scenarios") via `classfile::builder`, since no Java/Kotlin
//! toolchain is available in this environment to produce a real artifact.
//! Fields `a` (instance) and `b` (static); methods `<init>`, `<clinit>`,
//! `add`, `sub`, `create`, `incrementA`, `incrementB`, `hello` (8 total,
//! matching spec.md §8 scenario 1).

use std::fs;
use std::path::PathBuf;

use classfile::builder::{ClassWriter, CodeSpec, FieldSpec, MethodSpec};

pub fn write_fields_and_methods_class(dir: &std::path::Path) -> PathBuf {
    let mut w = ClassWriter::new();

    w.add_field(FieldSpec { access_flags: 0x0002, name: "a".into(), descriptor: "I".into() });
    w.add_field(FieldSpec { access_flags: 0x000A, name: "b".into(), descriptor: "I".into() });

    let object_init = w.method_ref("java/lang/Object", "<init>", "()V");
    let this_init = w.method_ref("FieldsAndMethods", "<init>", "()V");
    let a_field = w.field_ref("FieldsAndMethods", "a", "I");
    let b_field = w.field_ref("FieldsAndMethods", "b", "I");
    let hello_string = w.string("Hello world");
    let log_method = w.method_ref("Runtime", "log", "(Ljava/lang/String;)V");

    // <init>()V: aload_0; invokespecial Object.<init>; aload_0; iconst_1; putfield a; return
    w.add_method(MethodSpec {
        access_flags: 0x0001,
        name: "<init>".into(),
        descriptor: "()V".into(),
        code: Some(CodeSpec {
            max_stack: 2,
            max_locals: 1,
            code: {
                let mut c = vec![0x2a, 0xb7];
                c.extend_from_slice(&object_init.to_be_bytes());
                c.push(0x2a);
                c.push(0x04);
                c.push(0xb5);
                c.extend_from_slice(&a_field.to_be_bytes());
                c.push(0xb1);
                c
            },
        }),
    });

    // <clinit>()V: iconst_2; putstatic b; return
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "<clinit>".into(),
        descriptor: "()V".into(),
        code: Some(CodeSpec {
            max_stack: 1,
            max_locals: 0,
            code: {
                let mut c = vec![0x05, 0xb3];
                c.extend_from_slice(&b_field.to_be_bytes());
                c.push(0xb1);
                c
            },
        }),
    });

    // add(x, y)I: iload_0; iload_1; iadd; ireturn
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "add".into(),
        descriptor: "(II)I".into(),
        code: Some(CodeSpec { max_stack: 2, max_locals: 2, code: vec![0x1a, 0x1b, 0x60, 0xac] }),
    });

    // sub(x, y)I: iload_0; iload_1; isub; ireturn
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "sub".into(),
        descriptor: "(II)I".into(),
        code: Some(CodeSpec { max_stack: 2, max_locals: 2, code: vec![0x1a, 0x1b, 0x64, 0xac] }),
    });

    // create()LFieldsAndMethods;: new FieldsAndMethods; dup; invokespecial <init>; areturn
    let this_class = w.class("FieldsAndMethods");
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "create".into(),
        descriptor: "()LFieldsAndMethods;".into(),
        code: Some(CodeSpec {
            max_stack: 2,
            max_locals: 0,
            code: {
                let mut c = vec![0xbb];
                c.extend_from_slice(&this_class.to_be_bytes());
                c.push(0x59);
                c.push(0xb7);
                c.extend_from_slice(&this_init.to_be_bytes());
                c.push(0xb0);
                c
            },
        }),
    });

    // incrementA()V: aload_0; dup; getfield a; iconst_1; iadd; putfield a; return
    w.add_method(MethodSpec {
        access_flags: 0x0001,
        name: "incrementA".into(),
        descriptor: "()V".into(),
        code: Some(CodeSpec {
            max_stack: 3,
            max_locals: 1,
            code: {
                let mut c = vec![0x2a, 0x59, 0xb4];
                c.extend_from_slice(&a_field.to_be_bytes());
                c.push(0x04);
                c.push(0x60);
                c.push(0xb5);
                c.extend_from_slice(&a_field.to_be_bytes());
                c.push(0xb1);
                c
            },
        }),
    });

    // incrementB()V: getstatic b; iconst_1; iadd; putstatic b; return
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "incrementB".into(),
        descriptor: "()V".into(),
        code: Some(CodeSpec {
            max_stack: 2,
            max_locals: 0,
            code: {
                let mut c = vec![0xb2];
                c.extend_from_slice(&b_field.to_be_bytes());
                c.push(0x04);
                c.push(0x60);
                c.push(0xb3);
                c.extend_from_slice(&b_field.to_be_bytes());
                c.push(0xb1);
                c
            },
        }),
    });

    // hello()V: ldc "Hello world"; invokestatic Runtime.log; return
    w.add_method(MethodSpec {
        access_flags: 0x0009,
        name: "hello".into(),
        descriptor: "()V".into(),
        code: Some(CodeSpec {
            max_stack: 1,
            max_locals: 0,
            code: {
                let mut c = vec![0x12, hello_string as u8, 0xb8];
                c.extend_from_slice(&log_method.to_be_bytes());
                c.push(0xb1);
                c
            },
        }),
    });

    let bytes = w.finish(0x0021, "FieldsAndMethods", "java/lang/Object");
    let path = dir.join("FieldsAndMethods.class");
    fs::write(&path, &bytes).expect("write synthetic class fixture");
    path
}
