//! [The Constant Pool](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A2201%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C256%2Cnull%5D)
//!
//! Entries are numbered from 1; index 0 is invalid. A 64-bit entry
//! (Long/Double) consumes two consecutive indices — the second is a
//! placeholder, never dereferenced directly (spec §3).

use crate::error::{ClassFormatError, FormatCause};
use crate::reader::ClassReader;

#[derive(Clone, Debug)]
pub enum ConstantPool {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    FieldRef { class_index: u16, name_and_type_index: u16 },
    MethodRef { class_index: u16, name_and_type_index: u16 },
    InterfaceMethodRef { class_index: u16, name_and_type_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    /// MethodHandle/MethodType/InvokeDynamic: recognized only to the extent
    /// needed to parse past them (spec §3); never resolved to a `Value`.
    MethodHandle { reference_kind: u8, reference_index: u16 },
    MethodType { descriptor_index: u16 },
    Dynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    InvokeDynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    Module { name_index: u16 },
    Package { name_index: u16 },
    /// The placeholder second slot of a Long/Double entry.
    Placeholder,
}

impl ConstantPool {
    /// `Resolve(index) -> string` (spec §4.B): follows indirection so a
    /// caller supplying any of {Utf8, String, Class, NameAndType} receives
    /// the underlying text. Anything else resolves to the empty string.
    pub fn resolve_string(pool: &[ConstantPool], index: u16) -> String {
        let Some(entry) = pool.get(index as usize) else {
            return String::new();
        };
        match entry {
            ConstantPool::Utf8(s) => s.clone(),
            ConstantPool::String { string_index } => {
                ConstantPool::resolve_string(pool, *string_index)
            }
            ConstantPool::Class { name_index } | ConstantPool::NameAndType { name_index, .. } => {
                ConstantPool::resolve_string(pool, *name_index)
            }
            _ => String::new(),
        }
    }

    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            ConstantPool::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn name_and_type(&self) -> Option<(u16, u16)> {
        match self {
            ConstantPool::FieldRef { class_index, name_and_type_index }
            | ConstantPool::MethodRef { class_index, name_and_type_index }
            | ConstantPool::InterfaceMethodRef { class_index, name_and_type_index } => {
                Some((*class_index, *name_and_type_index))
            }
            _ => None,
        }
    }
}

/// Reads `count - 1` entries (the count item includes the unused index 0),
/// incrementing the logical index by 2 for Long/Double so the next entry
/// lands on the correct slot (spec §4.C).
pub fn read_constant_pool(
    reader: &mut ClassReader,
    count: u16,
) -> Result<Vec<ConstantPool>, ClassFormatError> {
    let mut pool = Vec::with_capacity(count as usize);
    pool.push(ConstantPool::Placeholder); // index 0 is invalid, never read
    let mut index = 1u16;
    while index < count {
        let tag = reader.read_u1();
        let entry = match tag {
            1 => {
                let length = reader.read_u2();
                let bytes = reader.read_bytes(length as usize);
                ConstantPool::Utf8(String::from_utf8_lossy(&bytes).into_owned())
            }
            3 => ConstantPool::Integer(reader.read_u4() as i32),
            4 => ConstantPool::Float(f32::from_bits(reader.read_u4())),
            5 => {
                pool.push(ConstantPool::Long(reader.read_u8() as i64));
                pool.push(ConstantPool::Placeholder);
                index += 2;
                continue;
            }
            6 => {
                pool.push(ConstantPool::Double(f64::from_bits(reader.read_u8())));
                pool.push(ConstantPool::Placeholder);
                index += 2;
                continue;
            }
            7 => ConstantPool::Class { name_index: reader.read_u2() },
            8 => ConstantPool::String { string_index: reader.read_u2() },
            9 => ConstantPool::FieldRef {
                class_index: reader.read_u2(),
                name_and_type_index: reader.read_u2(),
            },
            10 => ConstantPool::MethodRef {
                class_index: reader.read_u2(),
                name_and_type_index: reader.read_u2(),
            },
            11 => ConstantPool::InterfaceMethodRef {
                class_index: reader.read_u2(),
                name_and_type_index: reader.read_u2(),
            },
            12 => ConstantPool::NameAndType {
                name_index: reader.read_u2(),
                descriptor_index: reader.read_u2(),
            },
            15 => ConstantPool::MethodHandle {
                reference_kind: reader.read_u1(),
                reference_index: reader.read_u2(),
            },
            16 => ConstantPool::MethodType { descriptor_index: reader.read_u2() },
            17 => ConstantPool::Dynamic {
                bootstrap_method_attr_index: reader.read_u2(),
                name_and_type_index: reader.read_u2(),
            },
            18 => ConstantPool::InvokeDynamic {
                bootstrap_method_attr_index: reader.read_u2(),
                name_and_type_index: reader.read_u2(),
            },
            19 => ConstantPool::Module { name_index: reader.read_u2() },
            20 => ConstantPool::Package { name_index: reader.read_u2() },
            other => {
                return Err(ClassFormatError::new(
                    FormatCause::InvalidConstantTag(other),
                    format!("constant pool index {index}, reader offset {:#06X}", reader.position()),
                ))
            }
        };
        pool.push(entry);
        index += 1;
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_class_name_through_utf8() {
        let pool = vec![
            ConstantPool::Placeholder,
            ConstantPool::Utf8("FieldsAndMethods".into()),
            ConstantPool::Class { name_index: 1 },
        ];
        assert_eq!(ConstantPool::resolve_string(&pool, 2), "FieldsAndMethods");
    }

    #[test]
    fn unknown_tag_is_a_parse_error() {
        let mut reader = ClassReader::new(&[0xFF]);
        let err = read_constant_pool(&mut reader, 2).unwrap_err();
        assert!(matches!(err.cause, FormatCause::InvalidConstantTag(0xFF)));
    }

    #[test]
    fn long_entry_consumes_two_slots() {
        // tag 5 (Long), high=0, low=1
        let mut reader = ClassReader::new(&[5, 0, 0, 0, 0, 0, 0, 0, 1]);
        let pool = read_constant_pool(&mut reader, 2).unwrap();
        assert_eq!(pool.len(), 3); // placeholder@0, Long@1, Placeholder@2
        assert!(matches!(pool[2], ConstantPool::Placeholder));
    }
}
