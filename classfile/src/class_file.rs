//! [Class File Format](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A376%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C590%2Cnull%5D)

use crate::access_flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use crate::attributes::{read_attributes, AttributeInfo, CodeAttribute};
use crate::constants::{read_constant_pool, ConstantPool};
use crate::error::{ClassFormatError, FormatCause};
use crate::reader::ClassReader;

/// A field or method record; both share `(flags, name_index,
/// descriptor_index, attributes)` (spec §4.C).
#[derive(Clone, Debug)]
pub struct MemberInfo<Flags> {
    pub access_flags: Flags,
    pub name: String,
    pub descriptor: String,
    pub attributes: Vec<AttributeInfo>,
}

pub type FieldInfo = MemberInfo<FieldAccessFlags>;
pub type MethodInfo = MemberInfo<MethodAccessFlags>;

impl MethodInfo {
    pub fn code(&self) -> Option<CodeAttribute> {
        CodeAttribute::find(&self.attributes)
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }
}

/// A loaded class, immutable after parsing (spec §3). Carries the full
/// constant pool by reference so later opcode dispatch can resolve
/// indices without re-reading the class file.
#[derive(Clone, Debug)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: Vec<ConstantPool>,
    pub access_flags: ClassAccessFlags,
    pub name: String,
    pub super_name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Vec<AttributeInfo>,
}

const MAGIC: u32 = 0xCAFEBABE;

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<ClassFile, ClassFormatError> {
        let mut reader = ClassReader::new(bytes);

        let magic = reader.read_u4();
        if magic != MAGIC {
            return Err(ClassFormatError::new(
                FormatCause::IncorrectMagic(magic),
                "class file header",
            ));
        }
        let minor_version = reader.read_u2();
        let major_version = reader.read_u2();

        let constant_pool_count = reader.read_u2();
        let constant_pool = read_constant_pool(&mut reader, constant_pool_count)?;

        let access_flags = ClassAccessFlags::from_bits_truncate(reader.read_u2());

        let this_class = reader.read_u2();
        let name = ConstantPool::resolve_string(&constant_pool, this_class);

        let super_class = reader.read_u2();
        let super_name = if super_class == 0 {
            String::new()
        } else {
            ConstantPool::resolve_string(&constant_pool, super_class)
        };

        let interfaces_count = reader.read_u2();
        let mut interfaces = Vec::with_capacity(interfaces_count as usize);
        for _ in 0..interfaces_count {
            let index = reader.read_u2();
            interfaces.push(ConstantPool::resolve_string(&constant_pool, index));
        }

        let fields_count = reader.read_u2();
        let mut fields = Vec::with_capacity(fields_count as usize);
        for _ in 0..fields_count {
            fields.push(read_member(&mut reader, &constant_pool, FieldAccessFlags::from_bits_truncate));
        }

        let methods_count = reader.read_u2();
        let mut methods = Vec::with_capacity(methods_count as usize);
        for _ in 0..methods_count {
            methods.push(read_member(&mut reader, &constant_pool, MethodAccessFlags::from_bits_truncate));
        }

        let class_attributes_count = reader.read_u2();
        let attributes = read_attributes(&mut reader, &constant_pool, class_attributes_count);

        reader.finish("class file trailer")?;

        Ok(ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            name,
            super_name,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    pub fn method_named(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodInfo> {
        if descriptor.is_empty() {
            return self.method_named(name);
        }
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }
}

fn read_member<Flags>(
    reader: &mut ClassReader,
    pool: &[ConstantPool],
    from_bits: impl Fn(u16) -> Flags,
) -> MemberInfo<Flags> {
    let access_flags = from_bits(reader.read_u2());
    let name_index = reader.read_u2();
    let descriptor_index = reader.read_u2();
    let attributes_count = reader.read_u2();
    let attributes = read_attributes(reader, pool, attributes_count);
    MemberInfo {
        access_flags,
        name: ConstantPool::resolve_string(pool, name_index),
        descriptor: ConstantPool::resolve_string(pool, descriptor_index),
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_magic() {
        let err = ClassFile::parse(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err.cause, FormatCause::IncorrectMagic(0)));
    }
}
