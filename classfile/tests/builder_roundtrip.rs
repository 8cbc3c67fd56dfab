//! Confirms `classfile::builder` and `ClassFile::parse` agree with each
//! other on a small synthetic class, since no real `.class` fixture is
//! available to check against in this environment.

use classfile::builder::{ClassWriter, CodeSpec, FieldSpec, MethodSpec};
use classfile::class_file::ClassFile;

#[test]
fn round_trips_a_small_synthetic_class() {
    let mut writer = ClassWriter::new();

    writer.add_field(FieldSpec {
        access_flags: 0x0002, // private
        name: "a".to_string(),
        descriptor: "I".to_string(),
    });
    writer.add_field(FieldSpec {
        access_flags: 0x000A, // private static
        name: "b".to_string(),
        descriptor: "I".to_string(),
    });

    writer.add_method(MethodSpec {
        access_flags: 0x0001, // public
        name: "add".to_string(),
        descriptor: "(II)I".to_string(),
        code: Some(CodeSpec {
            max_stack: 2,
            max_locals: 3,
            code: vec![0x1a, 0x1b, 0x60, 0xac], // iload_0, iload_1, iadd, ireturn
        }),
    });
    writer.add_method(MethodSpec {
        access_flags: 0x0009, // public static
        name: "<clinit>".to_string(),
        descriptor: "()V".to_string(),
        code: Some(CodeSpec { max_stack: 0, max_locals: 0, code: vec![0xb1] }), // return
    });

    let bytes = writer.finish(0x0021, "FieldsAndMethods", "java/lang/Object");

    let class = ClassFile::parse(&bytes).expect("synthetic class should parse");
    assert_eq!(class.name, "FieldsAndMethods");
    assert_eq!(class.super_name, "java/lang/Object");
    assert_eq!(class.fields.len(), 2);
    assert_eq!(class.methods.len(), 2);

    let add = class.method("add", "(II)I").expect("add method present");
    let code = add.code().expect("add has a Code attribute");
    assert_eq!(code.max_stack, 2);
    assert_eq!(code.max_locals, 3);
    assert_eq!(code.code, vec![0x1a, 0x1b, 0x60, 0xac]);

    let clinit = class.method_named("<clinit>").expect("<clinit> present");
    assert!(clinit.is_static());
}
