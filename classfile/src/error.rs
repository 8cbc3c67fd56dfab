use std::error::Error;
use std::fmt::Display;

use crate::constants::ConstantPool;

/// Why a class artifact failed to parse. Carries enough of the offending
/// value to identify the failure site without needing the original bytes.
#[derive(Debug)]
pub enum FormatCause {
    IncorrectMagic(u32),
    UnexpectedEof,
    InvalidConstantTag(u8),
    InvalidIndex(u16),
    InvalidConstant(ConstantPool),
}

impl Display for FormatCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatCause::IncorrectMagic(magic) => write!(f, "incorrect magic: {magic:#010X}"),
            FormatCause::UnexpectedEof => write!(f, "unexpected end of class file"),
            FormatCause::InvalidConstantTag(tag) => write!(f, "invalid constant pool tag: {tag}"),
            FormatCause::InvalidIndex(index) => write!(f, "invalid constant pool index: {index}"),
            FormatCause::InvalidConstant(c) => {
                write!(f, "constant at referenced index had the wrong kind: {c:?}")
            }
        }
    }
}

/// A loader-side error: malformed header, unknown constant-pool tag,
/// truncated input (spec §7, "Parse error").
#[derive(Debug)]
pub struct ClassFormatError {
    pub cause: FormatCause,
    pub context: String,
}

impl ClassFormatError {
    pub fn new(cause: FormatCause, context: impl Into<String>) -> ClassFormatError {
        ClassFormatError {
            cause,
            context: context.into(),
        }
    }
}

impl Error for ClassFormatError {}

impl Display for ClassFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class format error: {} ({})", self.cause, self.context)
    }
}
