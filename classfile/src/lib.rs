#![allow(clippy::enum_variant_names)]

/// [Binary reader](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#page=103)
pub mod reader;
/// [The Constant Pool](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A2201%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C256%2Cnull%5D)
pub mod constants;
/// [Access Flags](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#page=85)
pub mod access_flags;
/// [Descriptors](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A677%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C448%2Cnull%5D)
pub mod descriptors;
/// [Attributes](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A1244%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C564%2Cnull%5D)
pub mod attributes;
/// [Class File Format](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#%5B%7B%22num%22%3A376%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C72%2C590%2Cnull%5D)
pub mod class_file;
pub mod error;
#[cfg(feature = "builder")]
pub mod builder;

pub use class_file::ClassFile;
pub use constants::ConstantPool;
pub use error::ClassFormatError;
