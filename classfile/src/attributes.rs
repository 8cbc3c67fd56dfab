//! [Attributes](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A1244%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C564%2Cnull%5D)
//!
//! An attribute is `(name, opaque bytes)` (spec §3) — the loader is
//! tolerant of attribute payloads it doesn't otherwise interpret. The one
//! exception is `Code`, whose header the interpreter needs to build a
//! frame; its structure is decoded separately by [`CodeAttribute::parse`].

use crate::constants::ConstantPool;
use crate::reader::ClassReader;

#[derive(Clone, Debug)]
pub struct AttributeInfo {
    pub name: String,
    pub info: Vec<u8>,
}

pub fn read_attributes(
    reader: &mut ClassReader,
    pool: &[ConstantPool],
    count: u16,
) -> Vec<AttributeInfo> {
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name_index = reader.read_u2();
        let length = reader.read_u4();
        let info = reader.read_bytes(length as usize);
        attributes.push(AttributeInfo {
            name: ConstantPool::resolve_string(pool, name_index),
            info,
        });
    }
    attributes
}

/// The structural subset of `Code` the interpreter needs (spec §4.G):
/// `max_stack`, `max_locals`, and the raw bytecode. The exception table
/// and nested attributes are parsed only far enough to be skipped, per
/// spec's "ignored by the core".
#[derive(Clone, Debug)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

impl CodeAttribute {
    pub fn parse(info: &[u8]) -> Option<CodeAttribute> {
        let mut reader = ClassReader::new(info);
        let max_stack = reader.read_u2();
        let max_locals = reader.read_u2();
        let code_length = reader.read_u4();
        let code = reader.read_bytes(code_length as usize);
        // exception_table: 4 u2s per entry, skipped
        let exception_table_length = reader.read_u2();
        let _ = reader.read_bytes(exception_table_length as usize * 8);
        // nested attributes: skipped entirely (not resolvable without the
        // class's constant pool, and not needed by the core)
        if !reader.ok() {
            return None;
        }
        Some(CodeAttribute { max_stack, max_locals, code })
    }

    /// Finds and decodes the `Code` attribute in a field/method's
    /// attribute list (spec §4.G "Method entry").
    pub fn find(attributes: &[AttributeInfo]) -> Option<CodeAttribute> {
        attributes
            .iter()
            .find(|a| a.name == "Code")
            .and_then(|a| CodeAttribute::parse(&a.info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_header_and_skips_the_rest() {
        let mut info = vec![0, 4, 0, 2, 0, 0, 0, 3, 0x2A, 0x2A, 0xB1];
        info.extend_from_slice(&[0, 0]); // exception_table_length = 0
        info.extend_from_slice(&[0, 0]); // attributes_count = 0
        let code = CodeAttribute::parse(&info).unwrap();
        assert_eq!(code.max_stack, 4);
        assert_eq!(code.max_locals, 2);
        assert_eq!(code.code, vec![0x2A, 0x2A, 0xB1]);
    }
}
